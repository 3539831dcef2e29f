//! SwarmView CLI
//!
//! Render recorded UAV swarm snapshots as tree + 3D position figures.

use clap::Parser;
use std::path::{Path, PathBuf};
use swarmview::demos::{parse_demo_selection, DEFAULT_DATA_DIR};
use swarmview::driver::{show_written, summary_json};
use swarmview::{export_figures, font, run_demos, show_snapshot, summarize};
use swarmview::{StyleConfig, StylePreset};
use swarmview_core::{Result, SimRecording, VisError};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// SwarmView snapshot renderer
#[derive(Parser, Debug)]
#[command(name = "swarmview")]
#[command(about = "Draw hierarchy trees and 3D positions of recorded UAV swarms", long_about = None)]
struct Args {
    /// NDJSON recording (omit to run the built-in demos)
    file: Option<PathBuf>,

    /// Snapshot to show interactively
    index: Option<usize>,

    /// Export these snapshot indices as PNG files (comma separated)
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    export: Vec<usize>,

    /// Output prefix for exported files (default: recording file stem)
    #[arg(long)]
    prefix: Option<String>,

    /// TOML style file
    #[arg(long, conflicts_with = "preset")]
    style: Option<PathBuf>,

    /// Built-in style (line, lttr)
    #[arg(long)]
    preset: Option<String>,

    /// Demos to run without FILE (line, lttr, all)
    #[arg(long, default_value = "all")]
    demo: String,

    /// Directory holding the demo recordings
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Only write files, never open the viewer
    #[arg(long)]
    no_show: bool,

    /// Print a JSON summary of the snapshots instead of rendering
    #[arg(long)]
    summary: bool,

    /// Font file for figure text
    #[arg(long)]
    font: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    // Initialize logging; stdout is reserved for --summary
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(exit_code(&e));
    }
}

/// Usage errors exit with 2 like clap's own, everything else with 1.
fn exit_code(err: &VisError) -> i32 {
    if matches!(err, VisError::Usage(_)) {
        2
    } else {
        1
    }
}

/// Rejects argument combinations that have no meaning, before any I/O.
fn check_args(args: &Args) -> Result<()> {
    let Some(file) = &args.file else {
        if args.summary || !args.export.is_empty() {
            return Err(VisError::usage("--summary and --export need a FILE"));
        }
        return Ok(());
    };
    if args.summary {
        return Ok(());
    }

    match (args.index, args.export.is_empty()) {
        (Some(_), false) => Err(VisError::usage("give either INDEX or --export, not both")),
        (Some(_), true) if args.no_show => Err(VisError::usage(
            "--no-show leaves nothing to do for a single INDEX; use --export",
        )),
        (None, true) => Err(VisError::usage(format!(
            "missing snapshot INDEX for {} (or pass --export 1,2,3)",
            file.display()
        ))),
        _ => Ok(()),
    }
}

fn run(args: &Args) -> Result<()> {
    check_args(args)?;
    let style = resolve_style(args)?;

    let Some(file) = &args.file else {
        return run_demo_sequence(args, style.as_ref());
    };

    if args.summary {
        let recording = SimRecording::open(file)?;
        let indices: Vec<usize> = args.index.into_iter().chain(args.export.iter().copied()).collect();
        println!("{}", summary_json(&summarize(&recording, &indices)?)?);
        return Ok(());
    }

    let style = style.unwrap_or_default();
    select_font(args, &style)?;
    let recording = SimRecording::open(file)?;

    if let Some(index) = args.index {
        return show_snapshot(&recording, index, &style);
    }

    let prefix = args.prefix.clone().unwrap_or_else(|| default_prefix(file));
    let figures = export_figures(&recording, &args.export, &style, &prefix)?;
    info!("Exported {} figure(s)", figures.len());
    if !args.no_show {
        show_written(&figures, &prefix)?;
    }
    Ok(())
}

fn run_demo_sequence(args: &Args, style: Option<&StyleConfig>) -> Result<()> {
    let demos = parse_demo_selection(&args.demo)?;
    select_font(args, style.unwrap_or(&StyleConfig::default()))?;

    info!("SwarmView v{}", env!("CARGO_PKG_VERSION"));
    let figures = run_demos(&args.data_dir, &demos, style, !args.no_show)?;
    info!("✓ {} demo figure(s) written", figures.len());
    Ok(())
}

/// `--style` file, else `--preset`, else `None` (per-run defaults apply).
fn resolve_style(args: &Args) -> Result<Option<StyleConfig>> {
    if let Some(path) = &args.style {
        info!("Using style {}", path.display());
        return StyleConfig::load(path).map(Some);
    }
    match &args.preset {
        Some(name) => Ok(Some(name.parse::<StylePreset>()?.style())),
        None => Ok(None),
    }
}

/// `--font` wins over the style's font.
fn select_font(args: &Args, style: &StyleConfig) -> Result<()> {
    let preferred = args.font.as_deref().or(style.figure.font.as_deref());
    let source = font::ensure_font(preferred)?;
    info!("Text font: {}", source);
    Ok(())
}

fn default_prefix(file: &Path) -> String {
    file.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("figure")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("swarmview").chain(argv.iter().copied())).unwrap()
    }

    fn usage_error(argv: &[&str]) -> VisError {
        let err = run(&parse(argv)).unwrap_err();
        assert!(matches!(err, VisError::Usage(_)), "{:?} gave {:?}", argv, err);
        err
    }

    #[test]
    fn test_file_without_index_is_usage_error() {
        let err = usage_error(&["rec.ndjson"]);
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_too_many_positionals_rejected() {
        assert!(Args::try_parse_from(["swarmview", "rec.ndjson", "1", "2"]).is_err());
    }

    #[test]
    fn test_index_with_export_is_usage_error() {
        usage_error(&["rec.ndjson", "3", "--export", "1,2"]);
    }

    #[test]
    fn test_no_show_with_index_is_usage_error() {
        usage_error(&["rec.ndjson", "3", "--no-show"]);
    }

    #[test]
    fn test_summary_needs_file() {
        usage_error(&["--summary"]);
        usage_error(&["--export", "1"]);
    }

    #[test]
    fn test_unknown_demo_is_usage_error() {
        usage_error(&["--demo", "bogus"]);
    }

    #[test]
    fn test_style_and_preset_conflict() {
        assert!(Args::try_parse_from(["swarmview", "--style", "a.toml", "--preset", "lttr"]).is_err());
    }

    #[test]
    fn test_export_list_parsed() {
        let args = parse(&["rec.ndjson", "--export", "1,5,6", "--prefix", "line"]);
        assert_eq!(args.export, vec![1, 5, 6]);
        assert!(check_args(&args).is_ok());
    }

    #[test]
    fn test_missing_recording_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.ndjson");
        let args = parse(&[missing.to_str().unwrap(), "0"]);
        let err = run(&args).unwrap_err();
        assert!(matches!(err, VisError::Io { .. }));
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_default_prefix_is_file_stem() {
        assert_eq!(default_prefix(Path::new("data/out-line-20240828-215415")), "out-line-20240828-215415");
        assert_eq!(default_prefix(Path::new("runs/flight.ndjson")), "flight");
    }
}
