use crate::result::ReportRow;

pub mod aggregated_request_times;
pub mod median;

use self::aggregated_request_times::AggregationState;

/// One row per URL, in the order the URLs were first seen.
pub fn generate_stats(state: &AggregationState) -> Vec<ReportRow> {
    state
        .urls
        .iter()
        .map(|entry| {
            let count = entry.request_times.len();
            let time_sum: f64 = entry.request_times.iter().sum();
            let time_max = entry
                .request_times
                .iter()
                .cloned()
                .fold(f64::NEG_INFINITY, f64::max);

            let time_perc = if state.time_sum > 0.0 {
                100.0 * time_sum / state.time_sum
            } else {
                0.0
            };

            ReportRow {
                url: entry.url.clone(),
                count: count as u64,
                count_perc: 100.0 * count as f64 / state.success_count as f64,
                time_sum,
                time_perc,
                time_avg: time_sum / count as f64,
                time_max,
                time_med: median::median(&entry.request_times).unwrap_or(0.0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::aggregated_request_times::*;
    use super::*;
    use crate::discovery::LogFormat;
    use crate::log_parser;
    use crate::log_parser::log_events::{ParseOutcome, ParsedRecord};

    fn get_state_fixture() -> AggregationState {
        AggregationState {
            urls: vec![
                UrlRequestTimes {
                    url: String::from("/api/v2/banner/25019354"),
                    request_times: vec![5.0, 17.0, 3.0, 9.0, 14.0, 2.0],
                },
                UrlRequestTimes {
                    url: String::from("/api/v2/slot/4705/groups"),
                    request_times: vec![5.0, 2.0, 18.0, 8.0, 3.0],
                },
            ],
            success_count: 11,
            failure_count: 0,
            time_sum: 86.0,
        }
    }

    #[test]
    fn test_generate_stats() {
        let result = generate_stats(&get_state_fixture());

        let expected = vec![
            ReportRow {
                url: String::from("/api/v2/banner/25019354"),
                count: 6,
                count_perc: 100.0 * 6.0 / 11.0,
                time_sum: 50.0,
                time_perc: 100.0 * 50.0 / 86.0,
                time_avg: 50.0 / 6.0,
                time_max: 17.0,
                time_med: 7.0,
            },
            ReportRow {
                url: String::from("/api/v2/slot/4705/groups"),
                count: 5,
                count_perc: 100.0 * 5.0 / 11.0,
                time_sum: 36.0,
                time_perc: 100.0 * 36.0 / 86.0,
                time_avg: 36.0 / 5.0,
                time_max: 18.0,
                time_med: 5.0,
            },
        ];

        assert_eq!(result, expected);
    }

    #[test]
    fn test_generate_stats_keeps_sample_order() {
        let state = get_state_fixture();

        generate_stats(&state);

        assert_eq!(state.urls[0].request_times, vec![5.0, 17.0, 3.0, 9.0, 14.0, 2.0]);
    }

    #[test]
    fn test_totals_add_up() {
        let path = Path::new("src/test/nginx-access-ui.log-20170704.log");
        let lines = log_parser::open(path, LogFormat::Plain).unwrap();
        let state = aggregated_request_times::aggregate(lines, path, 20.0).unwrap();

        let rows = generate_stats(&state);

        let count_perc_sum: f64 = rows.iter().map(|row| row.count_perc).sum();
        let time_perc_sum: f64 = rows.iter().map(|row| row.time_perc).sum();
        let time_sum: f64 = rows.iter().map(|row| row.time_sum).sum();
        let count: u64 = rows.iter().map(|row| row.count).sum();

        assert_eq!(rows.len(), 4);
        assert_eq!(count, state.success_count);
        assert_eq!(time_sum, state.time_sum);
        assert!((count_perc_sum - 100.0).abs() < 1e-9);
        assert!((time_perc_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_row_time_sums_add_up_exactly() {
        let mut request_times = AggregatedRequestTimes::new();
        for &(url, time) in &[("/c", 0.847), ("/a", 0.255), ("/b", 0.761), ("/b", 0.652)] {
            request_times.add(ParseOutcome::Record(ParsedRecord {
                url: String::from(url),
                request_time: time,
            }));
        }
        let state = request_times.result(1.0).unwrap();

        let rows = generate_stats(&state);

        let time_sum: f64 = rows.iter().map(|row| row.time_sum).sum();
        assert_eq!(time_sum, state.time_sum);
    }

    #[test]
    fn test_zero_request_times() {
        let state = AggregationState {
            urls: vec![UrlRequestTimes {
                url: String::from("/"),
                request_times: vec![0.0, 0.0],
            }],
            success_count: 2,
            failure_count: 0,
            time_sum: 0.0,
        };

        let result = generate_stats(&state);

        assert_eq!(result[0].time_perc, 0.0);
        assert_eq!(result[0].count_perc, 100.0);
        assert_eq!(result[0].time_med, 0.0);
    }
}
