//! Command line arguments

use std::path::PathBuf;

use crate::domain::SessionMode;

pub const USAGE: &str = "\
Usage:
  measuring-stick [measure | measure-region | region] [--config <path>]

Modes:
  measure          drag to measure distances (default)
  measure-region   measure, then drag the region to capture with the measurement
  region           drag a region to capture";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CliArgs {
    pub mode: SessionMode,
    /// Config file to use instead of the default location
    pub config: Option<PathBuf>,
    pub help: bool,
}

impl CliArgs {
    /// Parse arguments, program name excluded
    pub fn parse<I, S>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = CliArgs::default();
        let mut mode_seen = false;
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "--config" => {
                    let path = args.next().ok_or("--config requires a path")?;
                    parsed.config = Some(PathBuf::from(path));
                }
                flag if flag.starts_with('-') => return Err(format!("unknown option '{flag}'")),
                mode if !mode_seen => {
                    parsed.mode = mode.parse()?;
                    mode_seen = true;
                }
                extra => return Err(format!("unexpected argument '{extra}'")),
            }
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_measure() {
        let args = CliArgs::parse(Vec::<String>::new()).unwrap();
        assert_eq!(args.mode, SessionMode::Measure);
        assert_eq!(args.config, None);
    }

    #[test]
    fn parses_mode_and_config() {
        let args = CliArgs::parse(["region", "--config", "/tmp/ms.json"]).unwrap();
        assert_eq!(args.mode, SessionMode::Region);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/ms.json")));

        let args = CliArgs::parse(["--config", "c.json", "measure-region"]).unwrap();
        assert_eq!(args.mode, SessionMode::MeasureThenRegion);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(CliArgs::parse(["--config"]).is_err());
        assert!(CliArgs::parse(["zoom"]).is_err());
        assert!(CliArgs::parse(["--verbose"]).is_err());
        assert!(CliArgs::parse(["region", "measure"]).is_err());
    }
}
