use super::types::*;
use crate::error_handling::types::ConfigError;
use crate::log_parsing::classifier::DEFAULT_HEADER_WIDTH;
use chrono::NaiveDate;
use clap::Parser;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable consulted when `--log-dir` is not given.
pub const LOG_DIR_ENV: &str = "PLAYTIME_LOG_DIR";

/// Application configuration structure that defines all runtime parameters.
///
/// Values come from an optional TOML file and are then overridden by any
/// command-line flag that was given (see [`CliArgs`]). Keys missing from the
/// file keep their defaults.
///
/// # Examples
///
/// ```toml
/// log_dir = "/srv/minecraft/logs"
/// output = "playtime.csv"
/// start_date = "2021-03-01"
/// end_date = "2021-03-31"
/// format = "csv"
/// ```
///
/// # Fields Overview
///
/// - `log_dir`: directory holding the daily `YYYY-MM-DD-<n>.log[.gz]` files
/// - `output`: path of the report file to create
/// - `start_date` / `end_date`: inclusive report range, derived from the logs when unset
/// - `format`: report format, `csv` or `json`
/// - `header_width`: width of the `[HH:MM:SS] [thread/LEVEL]: ` header preceding usernames
/// - `excluded_prefixes`: file name prefixes that are never read
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub log_dir: PathBuf,
    pub output: PathBuf,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub format: ReportFormat,
    pub header_width: usize,
    pub excluded_prefixes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("./tms"),
            output: PathBuf::from("./playtime.csv"),
            start_date: None,
            end_date: None,
            format: ReportFormat::Csv,
            header_width: DEFAULT_HEADER_WIDTH,
            excluded_prefixes: vec!["debug".to_string(), "latest".to_string()],
        }
    }
}

/// Command-line arguments.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "playtime")]
#[command(version)]
#[command(about = "Per-player online time statistics from Minecraft server logs")]
pub struct CliArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding the daily log files
    #[arg(long, env = "PLAYTIME_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Report file to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// First reported day, YYYY-MM-DD
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Last reported day, YYYY-MM-DD
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Width of the timestamp/level header in front of usernames
    #[arg(long)]
    pub header_width: Option<usize>,

    /// Log every recognized event
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::TomlError(e.to_string()))
    }

    /// Loads the file named by `--config`, if any, then applies the CLI overrides.
    pub fn resolve(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => {
                debug!("Reading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        if let Some(log_dir) = &args.log_dir {
            config.log_dir = log_dir.clone();
        }
        if let Some(output) = &args.output {
            config.output = output.clone();
        }
        if args.start_date.is_some() {
            config.start_date = args.start_date;
        }
        if args.end_date.is_some() {
            config.end_date = args.end_date;
        }
        if let Some(format) = args.format {
            config.format = format;
        }
        if let Some(header_width) = args.header_width {
            config.header_width = header_width;
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(ConfigError::InvalidDateRange(format!(
                    "start date {} is after end date {}",
                    start, end
                )));
            }
        }
        if !self.log_dir.is_dir() {
            return Err(ConfigError::DirectoryDoesNotExist(format!(
                "{} is not a directory",
                self.log_dir.display()
            )));
        }
        if self.header_width == 0 {
            return Err(ConfigError::NotInRange(
                "header_width must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_from_toml_with_defaults() {
        let config = Config::from_toml_str(
            r#"
            log_dir = "/srv/logs"
            start_date = "2021-03-01"
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.log_dir, PathBuf::from("/srv/logs"));
        assert_eq!(config.start_date, Some(date("2021-03-01")));
        assert_eq!(config.end_date, None);
        assert_eq!(config.format, ReportFormat::Json);
        assert_eq!(config.header_width, DEFAULT_HEADER_WIDTH);
        assert_eq!(config.excluded_prefixes, vec!["debug", "latest"]);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = Config::from_toml_str("log_directory = \"/srv\"");
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file(Path::new("/nonexistent/playtime.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    #[serial]
    fn test_cli_overrides_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("playtime.toml");
        fs::write(
            &config_path,
            "output = \"from-file.csv\"\nend_date = \"2021-03-31\"\n",
        )
        .unwrap();

        let args = CliArgs::try_parse_from([
            "playtime",
            "--config",
            config_path.to_str().unwrap(),
            "--log-dir",
            "/tmp",
            "--start-date",
            "2021-03-01",
            "--format",
            "json",
        ])
        .unwrap_or_else(|e| panic!("{}", e));
        let config = Config::resolve(&args).unwrap();

        assert_eq!(config.log_dir, PathBuf::from("/tmp"));
        assert_eq!(config.output, PathBuf::from("from-file.csv"));
        assert_eq!(config.start_date, Some(date("2021-03-01")));
        assert_eq!(config.end_date, Some(date("2021-03-31")));
        assert_eq!(config.format, ReportFormat::Json);
    }

    #[test]
    #[serial]
    fn test_log_dir_from_env() {
        std::env::set_var(LOG_DIR_ENV, "/var/log/minecraft");
        let args = CliArgs::try_parse_from(["playtime"]);
        std::env::remove_var(LOG_DIR_ENV);

        let config = Config::resolve(&args.unwrap()).unwrap();
        assert_eq!(config.log_dir, PathBuf::from("/var/log/minecraft"));
    }

    #[test]
    fn test_validate() {
        let dir = TempDir::new().unwrap();
        let mut config = Config {
            log_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        assert!(config.validate().is_ok());

        config.start_date = Some(date("2021-03-02"));
        config.end_date = Some(date("2021-03-01"));
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDateRange(_))));

        config.end_date = None;
        config.header_width = 0;
        assert!(matches!(config.validate(), Err(ConfigError::NotInRange(_))));

        config.header_width = DEFAULT_HEADER_WIDTH;
        config.log_dir = dir.path().join("missing");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DirectoryDoesNotExist(_))
        ));
    }
}
