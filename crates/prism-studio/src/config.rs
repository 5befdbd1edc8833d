//! Studio configuration, read from an optional `prism.toml`.
//!
//! ```toml
//! demo = "cube"
//!
//! [window]
//! title = "prism"
//! width = 420
//! height = 760
//!
//! [logging]
//! filter = "info,prism_demos=trace"
//!
//! [gpu]
//! vsync = true
//!
//! [gesture]
//! rotate_gain = 0.01
//! move_threshold = 1.2
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use prism_demos::{DemoKind, GestureConfig};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "prism.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioConfig {
    pub demo: DemoKind,
    pub window: WindowSection,
    pub logging: LoggingSection,
    pub gpu: GpuSection,
    pub gesture: GestureConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowSection {
    /// Base title; the active status line is appended to it.
    pub title: String,
    pub width: f64,
    pub height: f64,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            title: "prism".to_string(),
            width: 420.0,
            height: 760.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// `env_logger` filter; falls back to `RUST_LOG` when unset.
    pub filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GpuSection {
    pub vsync: bool,
}

impl Default for GpuSection {
    fn default() -> Self {
        Self { vsync: true }
    }
}

impl StudioConfig {
    pub fn validate(&self) -> Result<()> {
        let WindowSection { width, height, .. } = self.window;
        ensure!(
            width.is_finite() && height.is_finite() && width >= 1.0 && height >= 1.0,
            "window size must be at least 1x1, got {width}x{height}"
        );
        self.gesture.validate()
    }
}

/// Loads the config and reports which file it came from.
///
/// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
/// read if present and defaults are used otherwise. Runs before the logger is
/// up, so the caller logs the returned source.
pub fn load(path: Option<&Path>) -> Result<(StudioConfig, Option<PathBuf>)> {
    let source = match path {
        Some(path) => Some(path.to_path_buf()),
        None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
    };
    let config = match &source {
        Some(path) => load_from_path(path)?,
        None => StudioConfig::default(),
    };
    Ok((config, source))
}

pub fn load_from_path(path: &Path) -> Result<StudioConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: StudioConfig =
        toml::from_str(&content).with_context(|| format!("failed to parse config file {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config file {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("prism.toml");
        fs::write(&path, body).expect("failed to write config");
        path
    }

    #[test]
    fn empty_file_yields_defaults() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = write(&dir, "");
        assert_eq!(load_from_path(&path).unwrap(), StudioConfig::default());
    }

    #[test]
    fn sections_override_defaults() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = write(
            &dir,
            r#"
demo = "cube"

[window]
title = "orbit"
height = 600

[logging]
filter = "debug"

[gpu]
vsync = false

[gesture]
move_threshold = 3.0
"#,
        );

        let cfg = load_from_path(&path).unwrap();
        assert_eq!(cfg.demo, DemoKind::Cube);
        assert_eq!(cfg.window.title, "orbit");
        assert_eq!(cfg.window.width, 420.0);
        assert_eq!(cfg.window.height, 600.0);
        assert_eq!(cfg.logging.filter.as_deref(), Some("debug"));
        assert!(!cfg.gpu.vsync);
        assert_eq!(cfg.gesture.move_threshold, 3.0);
        assert_eq!(cfg.gesture.rotate_gain, 0.01);
    }

    #[test]
    fn invalid_toml_reports_the_path() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = write(&dir, "not = valid = toml");
        let err = format!("{:#}", load_from_path(&path).unwrap_err());
        assert!(err.contains("prism.toml"), "{err}");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = write(&dir, "[gesture]\nrotate_speed = 1.0\n");
        assert!(load_from_path(&path).is_err());
    }

    #[test]
    fn unknown_demo_is_rejected() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = write(&dir, "demo = \"teapot\"\n");
        assert!(load_from_path(&path).is_err());
    }

    #[test]
    fn invalid_gesture_values_fail_validation() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = write(&dir, "[gesture]\nscale_min = 4.0\n");
        let err = format!("{:#}", load_from_path(&path).unwrap_err());
        assert!(err.contains("scale_min"), "{err}");
    }

    #[test]
    fn explicit_file_is_reported_as_the_source() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = write(&dir, "demo = \"wave\"\n");
        let (cfg, source) = load(Some(&path)).unwrap();
        assert_eq!(cfg.demo, DemoKind::Wave);
        assert_eq!(source, Some(path));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let missing = dir.path().join("absent.toml");
        assert!(load(Some(&missing)).is_err());
    }
}
