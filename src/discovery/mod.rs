use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use regex::Regex;

use crate::error::AnalyzerError;

const LOG_NAME_PATTERN: &str = r"^nginx-access-ui\.log-(?P<date>[0-9]{8})\.(?P<ext>gz|log)$";

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum LogFormat {
    Plain,
    Gzip,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct LogFile {
    pub path: PathBuf,
    pub date: NaiveDate,
    pub format: LogFormat,
}

/// Finds the log with the newest date embedded in its filename. When a date
/// has both a plain and a gzip log, the plain one is used.
pub fn latest_log(log_dir: &Path) -> Result<LogFile, AnalyzerError> {
    if !log_dir.is_dir() {
        return Err(AnalyzerError::Discovery {
            reason: format!("Logdir '{}' not found", log_dir.display()),
        });
    }

    let entries = fs::read_dir(log_dir).map_err(|err| AnalyzerError::Discovery {
        reason: format!("Can't list logdir '{}': {}", log_dir.display(), err),
    })?;

    let pattern = Regex::new(LOG_NAME_PATTERN).expect("log name pattern is valid");
    let mut latest: Option<LogFile> = None;

    for entry in entries {
        let entry = entry.map_err(|err| AnalyzerError::Discovery {
            reason: format!("Can't list logdir '{}': {}", log_dir.display(), err),
        })?;

        let file_name = entry.file_name();
        let file_name = match file_name.to_str() {
            Some(name) => name,
            None => continue,
        };

        let captures = match pattern.captures(file_name) {
            Some(captures) => captures,
            None => continue,
        };

        let date = match NaiveDate::parse_from_str(&captures["date"], "%Y%m%d") {
            Ok(date) => date,
            Err(_) => {
                info!("Can't parse date in '{}'", file_name);
                continue;
            }
        };

        let format = match &captures["ext"] {
            "gz" => LogFormat::Gzip,
            _ => LogFormat::Plain,
        };

        let is_newer = match latest {
            Some(ref current) => {
                date > current.date
                    || (date == current.date
                        && format == LogFormat::Plain
                        && current.format == LogFormat::Gzip)
            }
            None => true,
        };

        if is_newer {
            latest = Some(LogFile {
                path: entry.path(),
                date,
                format,
            });
        }
    }

    latest.ok_or_else(|| AnalyzerError::Discovery {
        reason: format!("Logfile not found in '{}'", log_dir.display()),
    })
}
