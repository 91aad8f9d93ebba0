//! Server log line classification.
//!
//! Turns one trimmed log line plus the calendar day of its file into a
//! [`LogEvent`]. Only four message shapes are recognized; everything else is
//! [`LogEvent::Unrecognized`].

pub mod classifier;
pub mod types;

pub use classifier::{classify, LineClassifier};
pub use types::{EventKind, LogEvent};
