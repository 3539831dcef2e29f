//! Font registration for figure text.
//!
//! plotters draws text through ab_glyph, which needs the font bytes to be
//! registered up front. The font is resolved once per process: an explicit
//! font file from the first call wins, otherwise the bundled DejaVu Sans is
//! used, so figures always carry their labels.

use plotters::style::FontStyle;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use swarmview_core::{Result, VisError};
use tracing::debug;

/// Family name every text element is drawn with.
pub const FONT_FAMILY: &str = "sans-serif";

static BUNDLED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

static FONT: OnceLock<FontSource> = OnceLock::new();

/// Where the registered font came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    File(PathBuf),
    Bundled,
}

impl std::fmt::Display for FontSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontSource::File(path) => write!(f, "{}", path.display()),
            FontSource::Bundled => write!(f, "bundled DejaVu Sans"),
        }
    }
}

/// Registers a font for [`FONT_FAMILY`] and returns its source.
///
/// An explicit `preferred` file that cannot be read or parsed is a
/// configuration error. Once a font is registered, later calls return it
/// unchanged.
pub fn ensure_font(preferred: Option<&Path>) -> Result<&'static FontSource> {
    if let Some(source) = FONT.get() {
        return Ok(source);
    }

    let source = match preferred {
        Some(path) => {
            register(load_font_file(path)?)?;
            FontSource::File(path.to_path_buf())
        }
        None => {
            register(BUNDLED_FONT)?;
            FontSource::Bundled
        }
    };
    debug!("Using font: {}", source);
    Ok(FONT.get_or_init(|| source))
}

/// Reads and validates a font file, leaking it only once it parses.
fn load_font_file(path: &Path) -> Result<&'static [u8]> {
    let data = std::fs::read(path)
        .map_err(|e| VisError::config(format!("cannot read font {}: {}", path.display(), e)))?;
    check_font(&data).map_err(|msg| VisError::config(format!("{}: {}", path.display(), msg)))?;

    // ab_glyph keeps a 'static reference for the life of the process
    Ok(Box::leak(data.into_boxed_slice()))
}

fn check_font(data: &[u8]) -> std::result::Result<(), String> {
    ab_glyph::FontRef::try_from_slice(data)
        .map(|_| ())
        .map_err(|e| format!("not a usable TrueType/OpenType font ({})", e))
}

fn register(bytes: &'static [u8]) -> Result<()> {
    plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| VisError::config("font rejected by the text renderer"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_font_parses() {
        assert!(check_font(BUNDLED_FONT).is_ok());
    }

    #[test]
    fn test_missing_font_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_font_file(&dir.path().join("nope.ttf")).unwrap_err();
        assert!(matches!(err, VisError::Config(_)));
    }

    #[test]
    fn test_garbage_font_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a font").unwrap();
        let err = load_font_file(file.path()).unwrap_err();
        assert!(matches!(err, VisError::Config(_)));
    }

    #[test]
    fn test_default_font_always_available() {
        let source = ensure_font(None).unwrap();
        assert!(FONT.get().is_some());
        // First registration wins for the rest of the process
        assert_eq!(ensure_font(None).unwrap(), source);
    }
}
