use chrono::NaiveDateTime;

/// One classified server log line.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEvent {
    Join { username: String, at: NaiveDateTime },
    Leave { username: String, at: NaiveDateTime },
    ServerStop { at: NaiveDateTime },
    OverloadWarning,
    Unrecognized,
}

impl LogEvent {
    /// Event time for the kinds that carry one.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            LogEvent::Join { at, .. } | LogEvent::Leave { at, .. } | LogEvent::ServerStop { at } => {
                Some(*at)
            }
            LogEvent::OverloadWarning | LogEvent::Unrecognized => None,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            LogEvent::Join { .. } => EventKind::Join,
            LogEvent::Leave { .. } => EventKind::Leave,
            LogEvent::ServerStop { .. } => EventKind::ServerStop,
            LogEvent::OverloadWarning => EventKind::OverloadWarning,
            LogEvent::Unrecognized => EventKind::Unrecognized,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Join,
    Leave,
    ServerStop,
    OverloadWarning,
    Unrecognized,
}

/// How a pattern is matched against a trimmed line.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    EndsWith(&'static str),
    Contains(&'static str),
}

impl Matcher {
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Matcher::EndsWith(suffix) => line.ends_with(suffix),
            Matcher::Contains(needle) => line.contains(needle),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EventPattern {
    pub kind: EventKind,
    pub matcher: Matcher,
}
