use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use prism_demos::DemoKind;

pub const HELP: &str = "\
prism-studio: touch-driven rendering demos

USAGE:
  prism-studio [OPTIONS]

OPTIONS:
  --demo <NAME>     triangle | spin | cube | wave
  --config <PATH>   TOML config file (default: ./prism.toml if present)
  --log <FILTER>    log filter, e.g. \"debug\" or \"prism_demos=trace\"
  -h, --help        print this help

KEYS:
  Esc               quit
  R                 reset the active demo
";

/// Parsed command line. Every field overrides the config file.
#[derive(Debug, Default, PartialEq)]
pub struct Cli {
    pub help: bool,
    pub demo: Option<DemoKind>,
    pub config: Option<PathBuf>,
    pub log: Option<String>,
}

impl Cli {
    pub fn from_env() -> Result<Self> {
        Self::parse(pico_args::Arguments::from_env())
    }

    pub fn from_vec(args: Vec<OsString>) -> Result<Self> {
        Self::parse(pico_args::Arguments::from_vec(args))
    }

    fn parse(mut args: pico_args::Arguments) -> Result<Self> {
        let cli = Cli {
            help: args.contains(["-h", "--help"]),
            demo: args.opt_value_from_str("--demo").context("invalid --demo")?,
            config: args.opt_value_from_str("--config").context("invalid --config")?,
            log: args.opt_value_from_str("--log").context("invalid --log")?,
        };

        let rest = args.finish();
        if !rest.is_empty() {
            bail!("unexpected arguments: {rest:?}");
        }
        Ok(cli)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli> {
        Cli::from_vec(args.iter().map(OsString::from).collect())
    }

    #[test]
    fn no_arguments_means_no_overrides() {
        assert_eq!(parse(&[]).unwrap(), Cli::default());
    }

    #[test]
    fn all_options() {
        let cli = parse(&["--demo", "wave", "--config", "x.toml", "--log", "trace"]).unwrap();
        assert_eq!(cli.demo, Some(DemoKind::Wave));
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert_eq!(cli.log.as_deref(), Some("trace"));
        assert!(!cli.help);
    }

    #[test]
    fn equals_syntax_is_accepted() {
        assert_eq!(parse(&["--demo=cube"]).unwrap().demo, Some(DemoKind::Cube));
    }

    #[test]
    fn short_help_flag() {
        assert!(parse(&["-h"]).unwrap().help);
    }

    #[test]
    fn bad_demo_name_is_an_error() {
        let err = format!("{:#}", parse(&["--demo", "teapot"]).unwrap_err());
        assert!(err.contains("--demo"), "{err}");
    }

    #[test]
    fn leftover_arguments_are_rejected() {
        assert!(parse(&["--demo", "spin", "extra"]).is_err());
    }
}
