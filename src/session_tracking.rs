//! Session tracking core module.
//!
//! This module owns the online/offline state of every player and turns a
//! stream of classified log lines into per-day online hours and overload
//! warning counts.

use chrono::NaiveDateTime;
use std::fmt;

/// Registry of currently-online players.
pub mod online_registry;
/// Per-player accumulated statistics.
pub mod player_stats;
/// The session tracker state machine.
pub mod tracker;

pub use player_stats::PlayerStats;
pub use tracker::SessionTracker;

/// A leave event for a player with no recorded join.
///
/// Happens at the start of a log written after a restart that cut a session
/// short. Non-fatal: the session contributes no hours.
#[derive(Debug, Clone, PartialEq)]
pub struct UnmatchedLeave {
    pub username: String,
    pub at: NaiveDateTime,
}

impl fmt::Display for UnmatchedLeave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} left at {} without a recorded join", self.username, self.at)
    }
}
