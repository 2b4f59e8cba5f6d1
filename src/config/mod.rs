use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AnalyzerError;
use crate::render::template::MAX_PRECISION;
use crate::result::SortField;

/// Run configuration. Every key missing from the config file keeps its
/// default.
#[derive(PartialEq, Debug, Clone)]
pub struct Config {
    pub report_size: usize,
    pub report_dir: PathBuf,
    pub log_dir: PathBuf,
    pub parse_error_limit: f64,
    pub precision: u32,
    pub report_filename_template: String,
    pub report_template: String,
    pub sort_field: SortField,
    pub log: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            report_size: 100,
            report_dir: PathBuf::from("./reports"),
            log_dir: PathBuf::from("./log"),
            parse_error_limit: 1.0,
            precision: 3,
            report_filename_template: String::from("report-%Y.%m.%d.html"),
            report_template: String::from("report.html"),
            sort_field: SortField::TimeMed,
            log: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct ConfigFile {
    report_size: Option<usize>,
    report_dir: Option<PathBuf>,
    log_dir: Option<PathBuf>,
    parse_error_limit: Option<f64>,
    precision: Option<u32>,
    report_filename_template: Option<String>,
    report_template: Option<String>,
    sort_field: Option<String>,
    log: Option<PathBuf>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config, AnalyzerError> {
        let config_error = |reason: String| AnalyzerError::Config {
            path: path.display().to_string(),
            reason,
        };

        if !path.is_file() {
            return Err(config_error(String::from("not found")));
        }

        let content = fs::read_to_string(path).map_err(|err| config_error(err.to_string()))?;

        Config::from_json(&content).map_err(config_error)
    }

    pub fn from_json(content: &str) -> Result<Config, String> {
        let file: ConfigFile = serde_json::from_str(content).map_err(|err| err.to_string())?;
        let defaults = Config::default();

        let sort_field = match file.sort_field {
            Some(name) => name.parse::<SortField>()?,
            None => defaults.sort_field,
        };

        let parse_error_limit = file.parse_error_limit.unwrap_or(defaults.parse_error_limit);
        if parse_error_limit.is_nan() || parse_error_limit < 0.0 {
            return Err(format!(
                "PARSE_ERROR_LIMIT must be a non-negative percentage ({})",
                parse_error_limit
            ));
        }

        let precision = file.precision.unwrap_or(defaults.precision);
        if precision > MAX_PRECISION {
            return Err(format!(
                "PRECISION must be at most {} decimal places ({})",
                MAX_PRECISION, precision
            ));
        }

        let report_filename_template = file
            .report_filename_template
            .unwrap_or(defaults.report_filename_template);
        let sample_date = NaiveDate::from_ymd_opt(2017, 7, 4).expect("valid date");
        let mut sample_name = String::new();
        if write!(sample_name, "{}", sample_date.format(&report_filename_template)).is_err() {
            return Err(format!(
                "REPORT_FILENAME_TEMPLATE must only use date fields ({})",
                report_filename_template
            ));
        }

        Ok(Config {
            report_size: file.report_size.unwrap_or(defaults.report_size),
            report_dir: file.report_dir.unwrap_or(defaults.report_dir),
            log_dir: file.log_dir.unwrap_or(defaults.log_dir),
            parse_error_limit,
            precision,
            report_filename_template,
            report_template: file.report_template.unwrap_or(defaults.report_template),
            sort_field,
            log: file.log.or(defaults.log),
        })
    }
}
