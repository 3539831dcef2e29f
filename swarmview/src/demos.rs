//! Built-in demonstration runs over the bundled swarm recordings.

use crate::style::StyleConfig;
use std::path::{Path, PathBuf};
use swarmview_core::VisError;

/// Directory holding the demo recordings, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data/050ms-0.10m";

/// Demo identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoId {
    /// Line formation, layered tree with labelled positions
    Line,

    /// Letter formation, radial tree with unlabelled positions
    Lttr,
}

impl DemoId {
    /// Returns every demo in the order they are run.
    pub fn all() -> Vec<DemoId> {
        vec![DemoId::Line, DemoId::Lttr]
    }

    /// Returns the demo name, also used as the output file prefix.
    pub fn name(&self) -> &'static str {
        match self {
            DemoId::Line => "line",
            DemoId::Lttr => "lttr",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DemoId::Line => "Line formation: layered tree, labelled 20 m box",
            DemoId::Lttr => "Letter formation: radial tree, unlabelled 25 m box",
        }
    }

    /// Recording file name inside the data directory.
    pub fn recording(&self) -> &'static str {
        match self {
            DemoId::Line => "out-line-20240828-215415",
            DemoId::Lttr => "out-lttr-20240828-221140",
        }
    }

    /// Snapshot indices exported by the demo.
    pub fn indices(&self) -> &'static [usize] {
        match self {
            DemoId::Line => &[1, 5, 6, 11, 12, 15],
            DemoId::Lttr => &[1, 4, 7, 8, 12, 13, 14, 18],
        }
    }

    pub fn style(&self) -> StyleConfig {
        match self {
            DemoId::Line => StyleConfig::default(),
            DemoId::Lttr => StyleConfig::lttr(),
        }
    }

    pub fn recording_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.recording())
    }
}

impl std::fmt::Display for DemoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DemoId {
    type Err = VisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "line" => Ok(DemoId::Line),
            "lttr" | "letter" => Ok(DemoId::Lttr),
            "all" => Err(VisError::usage("'all' names a demo group, not a single demo")),
            _ => Err(VisError::usage(format!(
                "Unknown demo: {} (expected line, lttr or all)",
                s
            ))),
        }
    }
}

/// Parses a `--demo` value: a single demo name or `all`.
pub fn parse_demo_selection(s: &str) -> Result<Vec<DemoId>, VisError> {
    if s.eq_ignore_ascii_case("all") {
        Ok(DemoId::all())
    } else {
        Ok(vec![s.parse()?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StylePreset;
    use swarmview_core::LayoutStrategy;

    #[test]
    fn test_names_round_trip() {
        for demo in DemoId::all() {
            assert_eq!(demo.name().parse::<DemoId>().unwrap(), demo);
            assert_eq!(demo.to_string(), demo.name());
        }
        assert!("bogus".parse::<DemoId>().is_err());
    }

    #[test]
    fn test_selection() {
        assert_eq!(parse_demo_selection("ALL").unwrap(), DemoId::all());
        assert_eq!(parse_demo_selection("lttr").unwrap(), vec![DemoId::Lttr]);
        assert!(parse_demo_selection("").is_err());
    }

    #[test]
    fn test_demo_settings() {
        assert_eq!(DemoId::Line.indices(), &[1, 5, 6, 11, 12, 15]);
        assert_eq!(DemoId::Lttr.indices().len(), 8);
        assert_eq!(DemoId::Line.style(), StylePreset::Line.style());
        assert_eq!(DemoId::Lttr.style().tree.layout, LayoutStrategy::Twopi);
        assert_eq!(
            DemoId::Line.recording_path(Path::new(DEFAULT_DATA_DIR)),
            PathBuf::from("data/050ms-0.10m/out-line-20240828-215415")
        );
    }
}
