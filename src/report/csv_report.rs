use crate::configuration::types::DateRange;
use crate::error_handling::types::ReportError;
use crate::session_tracking::PlayerStats;
use std::collections::BTreeMap;
use std::io::Write;

/// Writes `Username,<day_1>,...,<day_n>,Errors` followed by one row per
/// player, in username order.
pub fn write_csv<W: Write>(
    players: &BTreeMap<String, PlayerStats>,
    range: &DateRange,
    mut out: W,
) -> Result<(), ReportError> {
    let days = range.days();

    let mut header = vec!["Username".to_string()];
    header.extend(days.iter().map(|day| day.format("%Y-%m-%d").to_string()));
    header.push("Errors".to_string());
    writeln!(out, "{}", header.join(","))?;

    for (username, stats) in players {
        let mut row = vec![escape_field(username)];
        row.extend(days.iter().map(|day| stats.hours_on(*day).to_string()));
        row.push(stats.warning_count.to_string());
        writeln!(out, "{}", row.join(","))?;
    }
    out.flush()?;
    Ok(())
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
