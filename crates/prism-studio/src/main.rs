//! `prism-studio`: opens one window and runs the selected demo in it.

mod cli;
mod config;
mod shell;

use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use prism_engine::device::GpuInit;
use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::window::{Runtime, RuntimeConfig};

use crate::cli::{Cli, HELP};
use crate::shell::Shell;

fn main() -> Result<()> {
    let cli = Cli::from_env()?;
    if cli.help {
        print!("{HELP}");
        return Ok(());
    }

    let (mut cfg, source) = config::load(cli.config.as_deref())?;
    if let Some(demo) = cli.demo {
        cfg.demo = demo;
    }
    if cli.log.is_some() {
        cfg.logging.filter = cli.log;
    }

    init_logging(LoggingConfig::with_filter(cfg.logging.filter.clone()));
    match &source {
        Some(path) => log::info!("loaded config from {}", path.display()),
        None => log::debug!("no {} found, using defaults", config::DEFAULT_CONFIG_FILE),
    }
    log::info!("starting demo `{}`", cfg.demo);

    let runtime = RuntimeConfig {
        title: cfg.window.title.clone(),
        initial_size: LogicalSize::new(cfg.window.width, cfg.window.height),
    };
    let gpu = GpuInit::default().with_vsync(cfg.gpu.vsync);
    let shell = Shell::new(cfg.demo, cfg.gesture, cfg.window.title);

    Runtime::run(runtime, gpu, shell).with_context(|| format!("demo `{}` failed", cfg.demo))
}
