use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Accumulated statistics for one player over the whole run.
///
/// Days that never received any hours are absent from `daily_hours` and
/// read as zero through [`PlayerStats::hours_on`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerStats {
    pub warning_count: u64,
    pub daily_hours: BTreeMap<NaiveDate, f64>,
}

impl PlayerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hours_on(&self, day: NaiveDate) -> f64 {
        self.daily_hours.get(&day).copied().unwrap_or(0.0)
    }

    pub fn add_hours(&mut self, day: NaiveDate, hours: f64) {
        *self.daily_hours.entry(day).or_insert(0.0) += hours;
    }

    pub fn total_hours(&self) -> f64 {
        self.daily_hours.values().sum()
    }
}
