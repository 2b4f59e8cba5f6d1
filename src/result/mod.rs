use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Statistics for one URL. Percentages are relative to the whole log, not to
/// the rows that end up in the report.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct ReportRow {
    pub url: String,
    pub count: u64,
    pub count_perc: f64,
    pub time_sum: f64,
    pub time_perc: f64,
    pub time_avg: f64,
    pub time_max: f64,
    pub time_med: f64,
}

pub type ReportTable = Vec<ReportRow>;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum SortField {
    Count,
    CountPerc,
    TimeSum,
    TimePerc,
    TimeAvg,
    TimeMax,
    TimeMed,
}

impl SortField {
    pub fn value(self, row: &ReportRow) -> f64 {
        match self {
            SortField::Count => row.count as f64,
            SortField::CountPerc => row.count_perc,
            SortField::TimeSum => row.time_sum,
            SortField::TimePerc => row.time_perc,
            SortField::TimeAvg => row.time_avg,
            SortField::TimeMax => row.time_max,
            SortField::TimeMed => row.time_med,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SortField::Count => "count",
            SortField::CountPerc => "count_perc",
            SortField::TimeSum => "time_sum",
            SortField::TimePerc => "time_perc",
            SortField::TimeAvg => "time_avg",
            SortField::TimeMax => "time_max",
            SortField::TimeMed => "time_med",
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(name: &str) -> Result<SortField, String> {
        match name {
            "count" => Ok(SortField::Count),
            "count_perc" => Ok(SortField::CountPerc),
            "time_sum" => Ok(SortField::TimeSum),
            "time_perc" => Ok(SortField::TimePerc),
            "time_avg" => Ok(SortField::TimeAvg),
            "time_max" => Ok(SortField::TimeMax),
            "time_med" => Ok(SortField::TimeMed),
            other => Err(format!("unknown sort field '{}'", other)),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
