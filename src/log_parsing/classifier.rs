use super::types::{EventKind, EventPattern, LogEvent, Matcher};
use crate::error_handling::types::ParseError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub const JOIN_SUFFIX: &str = " joined the game";
pub const LEAVE_SUFFIX: &str = " left the game";
pub const SERVER_STOP_SUFFIX: &str = " [net.minecraft.server.MinecraftServer]: Stopping server";
pub const OVERLOAD_WARNING: &str =
    "Can't keep up! Did the system time change, or is the server overloaded? ";

/// Width of `"[HH:MM:SS] [Server thread/INFO]: "`.
pub const DEFAULT_HEADER_WIDTH: usize = 33;

const TIME_FORMAT: &str = "[%H:%M:%S]";

/// Checked in order, first match wins.
const PATTERNS: [EventPattern; 4] = [
    EventPattern {
        kind: EventKind::Join,
        matcher: Matcher::EndsWith(JOIN_SUFFIX),
    },
    EventPattern {
        kind: EventKind::Leave,
        matcher: Matcher::EndsWith(LEAVE_SUFFIX),
    },
    EventPattern {
        kind: EventKind::ServerStop,
        matcher: Matcher::EndsWith(SERVER_STOP_SUFFIX),
    },
    EventPattern {
        kind: EventKind::OverloadWarning,
        matcher: Matcher::Contains(OVERLOAD_WARNING),
    },
];

/// Recognizes join, leave, server-stop and overload-warning lines.
///
/// The username of a join/leave line is the text between the fixed-width
/// header and the event suffix, so `header_width` must match the server's
/// log layout. Classification has no side effects.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    header_width: usize,
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self {
            header_width: DEFAULT_HEADER_WIDTH,
        }
    }
}

impl LineClassifier {
    pub fn new(header_width: usize) -> Self {
        Self { header_width }
    }

    pub fn header_width(&self) -> usize {
        self.header_width
    }

    pub fn classify(&self, line: &str, day: NaiveDate) -> Result<LogEvent, ParseError> {
        let kind = PATTERNS
            .iter()
            .find(|pattern| pattern.matcher.matches(line))
            .map(|pattern| pattern.kind)
            .unwrap_or(EventKind::Unrecognized);

        let event = match kind {
            EventKind::Join => LogEvent::Join {
                username: self.username(line, JOIN_SUFFIX)?,
                at: event_time(line, day)?,
            },
            EventKind::Leave => LogEvent::Leave {
                username: self.username(line, LEAVE_SUFFIX)?,
                at: event_time(line, day)?,
            },
            EventKind::ServerStop => LogEvent::ServerStop {
                at: event_time(line, day)?,
            },
            EventKind::OverloadWarning => LogEvent::OverloadWarning,
            EventKind::Unrecognized => LogEvent::Unrecognized,
        };
        Ok(event)
    }

    fn username(&self, line: &str, suffix: &str) -> Result<String, ParseError> {
        let end = line.len() - suffix.len();
        match line.get(self.header_width..end) {
            Some(name) if !name.is_empty() => Ok(name.to_string()),
            _ => Err(malformed(line, "no username between header and suffix")),
        }
    }
}

/// Classifies `line` with the default header width.
pub fn classify(line: &str, day: NaiveDate) -> Result<LogEvent, ParseError> {
    LineClassifier::default().classify(line, day)
}

/// Combines `day` with the `[HH:MM:SS]` token leading the line.
pub fn event_time(line: &str, day: NaiveDate) -> Result<NaiveDateTime, ParseError> {
    let token = line.split(' ').next().unwrap_or_default();
    let time = NaiveTime::parse_from_str(token, TIME_FORMAT)
        .map_err(|e| malformed(line, &format!("bad timestamp {:?}: {}", token, e)))?;
    Ok(day.and_time(time))
}

fn malformed(line: &str, reason: &str) -> ParseError {
    ParseError::MalformedLine {
        line: line.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, 14).unwrap()
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_join_line() {
        let event = classify("[08:00:00] [Server thread/INFO]: Alice joined the game", day()).unwrap();
        assert_eq!(
            event,
            LogEvent::Join {
                username: "Alice".into(),
                at: at(8, 0, 0)
            }
        );
    }

    #[test]
    fn test_leave_line() {
        let event = classify("[12:30:15] [Server thread/INFO]: Bob_99 left the game", day()).unwrap();
        assert_eq!(
            event,
            LogEvent::Leave {
                username: "Bob_99".into(),
                at: at(12, 30, 15)
            }
        );
    }

    #[test]
    fn test_server_stop_line() {
        let line = "[23:59:59] [Server thread/INFO] [net.minecraft.server.MinecraftServer]: Stopping server";
        assert_eq!(
            classify(line, day()).unwrap(),
            LogEvent::ServerStop { at: at(23, 59, 59) }
        );
    }

    #[test]
    fn test_overload_warning_line() {
        let line = "[10:00:00] [Server thread/WARN]: Can't keep up! Did the system time change, or is the server overloaded? Running 2000ms behind, skipping 40 tick(s)";
        assert_eq!(classify(line, day()).unwrap(), LogEvent::OverloadWarning);
    }

    #[test]
    fn test_overload_warning_needs_no_timestamp() {
        let line = "garbage Can't keep up! Did the system time change, or is the server overloaded? x";
        assert_eq!(classify(line, day()).unwrap(), LogEvent::OverloadWarning);
    }

    #[test]
    fn test_unrecognized_line() {
        let line = "[10:00:00] [Server thread/INFO]: Done (3.2s)! For help, type \"help\"";
        assert_eq!(classify(line, day()).unwrap(), LogEvent::Unrecognized);
        assert_eq!(classify("", day()).unwrap(), LogEvent::Unrecognized);
    }

    #[test]
    fn test_join_takes_priority_over_warning() {
        let line = "[10:00:00] [Server thread/INFO]: Can't keep up! Did the system time change, or is the server overloaded? joined the game";
        assert_eq!(classify(line, day()).unwrap().kind(), EventKind::Join);
    }

    #[test]
    fn test_bad_timestamp_is_malformed() {
        let result = classify("[8:xx:00] [Server thread/INFO]: Alice joined the game", day());
        assert!(matches!(result, Err(ParseError::MalformedLine { .. })));
    }

    #[test]
    fn test_missing_username_is_malformed() {
        let result = classify("[08:00:00] joined the game", day());
        assert!(matches!(result, Err(ParseError::MalformedLine { .. })));
    }

    #[test]
    fn test_custom_header_width() {
        let classifier = LineClassifier::new(11);
        let event = classifier
            .classify("[07:05:00] Carol joined the game", day())
            .unwrap();
        assert_eq!(
            event,
            LogEvent::Join {
                username: "Carol".into(),
                at: at(7, 5, 0)
            }
        );
    }

    #[test]
    fn test_timestamp_accessor() {
        let event = classify("[08:00:00] [Server thread/INFO]: Alice joined the game", day()).unwrap();
        assert_eq!(event.timestamp(), Some(at(8, 0, 0)));
        assert_eq!(LogEvent::OverloadWarning.timestamp(), None);
    }
}
