use crate::configuration::types::DateRange;
use crate::error_handling::types::ReportError;
use crate::session_tracking::PlayerStats;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, Serialize)]
struct PlayerRow<'a> {
    username: &'a str,
    daily_hours: BTreeMap<String, f64>,
    errors: u64,
}

/// Writes a pretty-printed JSON array with one object per player.
///
/// Every day of `range` is present in `daily_hours`, zero when nothing was
/// recorded.
pub fn write_json<W: Write>(
    players: &BTreeMap<String, PlayerStats>,
    range: &DateRange,
    mut out: W,
) -> Result<(), ReportError> {
    let days = range.days();
    let rows: Vec<PlayerRow> = players
        .iter()
        .map(|(username, stats)| PlayerRow {
            username,
            daily_hours: days
                .iter()
                .map(|day| (day.format("%Y-%m-%d").to_string(), stats.hours_on(*day)))
                .collect(),
            errors: stats.warning_count,
        })
        .collect();

    serde_json::to_writer_pretty(&mut out, &rows)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    #[test]
    fn test_json_rows() {
        let d1 = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2021, 3, 2).unwrap();
        let mut alice = PlayerStats::new();
        alice.add_hours(d2, 2.5);
        alice.warning_count = 3;
        let players = BTreeMap::from([("alice".to_string(), alice)]);

        let mut out = Vec::new();
        write_json(&players, &DateRange::new(d1, d2), &mut out).unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(
            value,
            json!([{
                "username": "alice",
                "daily_hours": { "2021-03-01": 0.0, "2021-03-02": 2.5 },
                "errors": 3
            }])
        );
    }
}
