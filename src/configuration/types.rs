use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, PartialEq, Clone, Copy, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

/// Inclusive range of calendar days covered by a report.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Every day from `start` to `end`, both included. Empty when `start > end`.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .take_while(|day| *day <= self.end)
            .collect()
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_inclusive() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2021, 2, 27).unwrap(),
            NaiveDate::from_ymd_opt(2021, 3, 2).unwrap(),
        );
        let days: Vec<String> = range.days().iter().map(|d| d.to_string()).collect();
        assert_eq!(days, vec!["2021-02-27", "2021-02-28", "2021-03-01", "2021-03-02"]);
        assert!(range.contains(NaiveDate::from_ymd_opt(2021, 3, 1).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2021, 3, 3).unwrap()));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2021, 3, 2).unwrap(),
            NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
        );
        assert!(range.days().is_empty());
    }
}
