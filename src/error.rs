use failure::Fail;
use std::io;

#[derive(Debug, Fail)]
pub enum AnalyzerError {
    #[fail(display = "Can't load config '{}': {}", path, reason)]
    Config { path: String, reason: String },

    #[fail(display = "{}", reason)]
    Discovery { reason: String },

    #[fail(display = "Can't read logfile '{}': {}", path, cause)]
    LogRead {
        path: String,
        #[cause]
        cause: io::Error,
    },

    #[fail(
        display = "Too many errors in parsing logfile: {} of {} lines failed ({:.3}%, limit {}%)",
        failed,
        total,
        ratio,
        limit
    )]
    ParseBudgetExceeded {
        failed: u64,
        total: u64,
        ratio: f64,
        limit: f64,
    },

    #[fail(display = "Report '{}' already exists", path)]
    ReportAlreadyExists { path: String },

    #[fail(display = "Can't render report '{}': {}", path, reason)]
    Render { path: String, reason: String },
}

impl AnalyzerError {
    /// Process exit status for this error.
    ///
    /// An existing report means an earlier run already succeeded, so it gets
    /// its own status.
    pub fn exit_code(&self) -> i32 {
        match self {
            AnalyzerError::ReportAlreadyExists { .. } => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let exists = AnalyzerError::ReportAlreadyExists {
            path: String::from("reports/report-2017.07.04.html"),
        };
        let budget = AnalyzerError::ParseBudgetExceeded {
            failed: 1,
            total: 10,
            ratio: 10.0,
            limit: 5.0,
        };

        assert_eq!(exists.exit_code(), 2);
        assert_eq!(budget.exit_code(), 1);
    }

    #[test]
    fn test_display_budget() {
        let budget = AnalyzerError::ParseBudgetExceeded {
            failed: 1,
            total: 3,
            ratio: 100.0 / 3.0,
            limit: 1.0,
        };

        assert_eq!(
            format!("{}", budget),
            "Too many errors in parsing logfile: 1 of 3 lines failed (33.333%, limit 1%)"
        );
    }
}
