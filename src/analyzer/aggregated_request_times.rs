use std::collections::HashMap;
use std::io;
use std::path::Path;

use crate::error::AnalyzerError;
use crate::log_parser::log_events::ParseOutcome;

/// All request times seen for one URL, in log order.
#[derive(PartialEq, Clone, Debug)]
pub struct UrlRequestTimes {
    pub url: String,
    pub request_times: Vec<f64>,
}

/// Outcome of one pass over a log. URLs are kept in the order they were
/// first seen.
#[derive(PartialEq, Debug)]
pub struct AggregationState {
    pub urls: Vec<UrlRequestTimes>,
    pub success_count: u64,
    pub failure_count: u64,
    pub time_sum: f64,
}

pub struct AggregatedRequestTimes {
    urls: Vec<UrlRequestTimes>,
    url_index: HashMap<String, usize>,
    success_count: u64,
    failure_count: u64,
}

impl AggregatedRequestTimes {
    pub fn new() -> AggregatedRequestTimes {
        AggregatedRequestTimes {
            urls: Vec::new(),
            url_index: HashMap::new(),
            success_count: 0,
            failure_count: 0,
        }
    }

    pub fn add(&mut self, outcome: ParseOutcome) {
        let record = match outcome {
            ParseOutcome::Record(record) => record,
            ParseOutcome::Failure => {
                self.failure_count += 1;
                return;
            }
        };

        self.success_count += 1;

        match self.url_index.get(&record.url) {
            Some(&index) => self.urls[index].request_times.push(record.request_time),
            None => {
                self.url_index.insert(record.url.clone(), self.urls.len());
                self.urls.push(UrlRequestTimes {
                    url: record.url,
                    request_times: vec![record.request_time],
                });
            }
        }
    }

    /// Closes the pass. Fails when the share of unparsable lines, in percent,
    /// is above `parse_error_limit`, or when there is nothing to report on.
    pub fn result(self, parse_error_limit: f64) -> Result<AggregationState, AnalyzerError> {
        let total = self.success_count + self.failure_count;

        if total == 0 {
            return Err(AnalyzerError::ParseBudgetExceeded {
                failed: 0,
                total: 0,
                ratio: 100.0,
                limit: parse_error_limit,
            });
        }

        let ratio = self.failure_count as f64 / total as f64 * 100.0;

        if ratio > parse_error_limit || self.success_count == 0 {
            return Err(AnalyzerError::ParseBudgetExceeded {
                failed: self.failure_count,
                total,
                ratio,
                limit: parse_error_limit,
            });
        }

        // Summed URL by URL so it equals the sum of the per-URL totals exactly.
        let time_sum: f64 = self
            .urls
            .iter()
            .map(|entry| entry.request_times.iter().sum::<f64>())
            .sum();

        Ok(AggregationState {
            urls: self.urls,
            success_count: self.success_count,
            failure_count: self.failure_count,
            time_sum,
        })
    }
}

/// Drains `outcomes` once. A read error aborts the pass.
pub fn aggregate<I>(
    outcomes: I,
    log_path: &Path,
    parse_error_limit: f64,
) -> Result<AggregationState, AnalyzerError>
where
    I: Iterator<Item = io::Result<ParseOutcome>>,
{
    let mut request_times = AggregatedRequestTimes::new();

    info!("Start parsing logfile {}", log_path.display());

    for outcome in outcomes {
        let outcome = outcome.map_err(|cause| AnalyzerError::LogRead {
            path: log_path.display().to_string(),
            cause,
        })?;
        request_times.add(outcome);
    }

    info!(
        "Parsed {} lines, {} failed",
        request_times.success_count + request_times.failure_count,
        request_times.failure_count
    );

    request_times.result(parse_error_limit)
}
