use std::sync::Once;

use log::LevelFilter;

/// GPU stack crates whose output is capped unless the filter names them.
pub const NOISY_MODULES: &[&str] = &["wgpu_core", "wgpu_hal", "naga"];

/// Logger configuration.
///
/// `filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "prism_demos=trace,wgpu_core=info").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Explicit filter from the CLI or config file. Wins over `RUST_LOG`.
    pub filter: Option<String>,
    /// Level used when neither `filter` nor `RUST_LOG` is set.
    pub default_level: LevelFilter,
    /// Cap applied to [`NOISY_MODULES`].
    pub noisy_level: LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            default_level: LevelFilter::Info,
            noisy_level: LevelFilter::Warn,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn with_filter(filter: Option<String>) -> Self {
        Self { filter, ..Self::default() }
    }

    /// Builds the effective directive string.
    ///
    /// Precedence for the main part: `filter`, then `env` (the value of
    /// `RUST_LOG`), then `default_level`. Caps for noisy modules come first so
    /// a directive naming one of them later in the string replaces its cap.
    pub fn directives(&self, env: Option<&str>) -> String {
        let main = self
            .filter
            .as_deref()
            .or(env)
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| self.default_level.to_string().to_lowercase());

        let mut parts: Vec<String> = NOISY_MODULES
            .iter()
            .map(|m| format!("{m}={}", self.noisy_level.to_string().to_lowercase()))
            .collect();
        parts.push(main);
        parts.join(",")
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; subsequent calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let env = std::env::var("RUST_LOG").ok();
        let directives = config.directives(env.as_deref());

        env_logger::Builder::new()
            .parse_filters(&directives)
            .write_style(config.write_style)
            .init();

        log::debug!("logging initialized with `{directives}`");
    });
}
