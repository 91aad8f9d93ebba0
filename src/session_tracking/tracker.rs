use super::online_registry::OnlineRegistry;
use super::player_stats::PlayerStats;
use super::UnmatchedLeave;
use crate::error_handling::types::TrackerError;
use crate::log_parsing::{LineClassifier, LogEvent};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::{debug, info, warn};
use std::collections::BTreeMap;

/// Event-driven state machine turning classified log lines into per-day
/// online hours and overload warning counts.
///
/// Files must be fed in non-decreasing day order, each preceded by
/// [`SessionTracker::begin_day`]. Within a day, event times must never go
/// backwards. Any violation is returned as a [`TrackerError`] before state is
/// touched.
///
/// # Fields Overview
///
/// - `players`: statistics, created lazily the first time a player is seen
/// - `online`: join time of every currently-online player
/// - `current_day`: day of the file being processed, `None` until the first `begin_day`
/// - `last_time`: latest event time seen on `current_day`
/// - `unmatched_leaves`: leave events that had no recorded join
pub struct SessionTracker {
    classifier: LineClassifier,
    players: BTreeMap<String, PlayerStats>,
    online: OnlineRegistry,
    current_day: Option<NaiveDate>,
    last_time: NaiveTime,
    unmatched_leaves: Vec<UnmatchedLeave>,
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new(LineClassifier::default())
    }
}

impl SessionTracker {
    pub fn new(classifier: LineClassifier) -> Self {
        Self {
            classifier,
            players: BTreeMap::new(),
            online: OnlineRegistry::new(),
            current_day: None,
            last_time: NaiveTime::MIN,
            unmatched_leaves: Vec::new(),
        }
    }

    /// Starts processing a file for `day`.
    ///
    /// Moving to a later day splits every open session at the new day's
    /// midnight: the time up to midnight is credited, and the player stays
    /// online from midnight on. Calling it again with the current day (a
    /// second file for the same day) changes nothing.
    pub fn begin_day(&mut self, day: NaiveDate) -> Result<(), TrackerError> {
        match self.current_day {
            Some(previous) if day < previous => {
                return Err(TrackerError::OutOfOrderDay {
                    previous,
                    requested: day,
                })
            }
            Some(previous) if day == previous => {
                debug!("Continuing day {}", day);
                return Ok(());
            }
            Some(_) => self.roll_over(day),
            None => {}
        }

        info!("Starting day {}", day);
        self.current_day = Some(day);
        self.last_time = NaiveTime::MIN;
        Ok(())
    }

    pub fn process_line(&mut self, line: &str) -> Result<(), TrackerError> {
        let day = self.current_day.ok_or(TrackerError::DayNotStarted)?;
        let event = self.classifier.classify(line, day)?;

        let event_time = event.timestamp().map(|at| at.time());
        if let Some(time) = event_time {
            if time < self.last_time {
                return Err(TrackerError::NonMonotonicTime {
                    day,
                    last_time: self.last_time,
                    found: time,
                    line: line.to_string(),
                });
            }
        }

        match event {
            LogEvent::Join { username, at } => self.join(username, at, day, line)?,
            LogEvent::Leave { username, at } => self.leave(username, at),
            LogEvent::ServerStop { at } => self.stop_server(at),
            LogEvent::OverloadWarning => self.record_warning(),
            LogEvent::Unrecognized => {}
        }

        if let Some(time) = event_time {
            self.last_time = time;
        }
        Ok(())
    }

    /// Snapshot of every player's statistics.
    ///
    /// Sessions still open are not credited until a leave, a server stop or
    /// a day rollover closes them.
    pub fn finalize(&self) -> BTreeMap<String, PlayerStats> {
        self.players.clone()
    }

    pub fn players(&self) -> &BTreeMap<String, PlayerStats> {
        &self.players
    }

    pub fn unmatched_leaves(&self) -> &[UnmatchedLeave] {
        &self.unmatched_leaves
    }

    pub fn online_players(&self) -> Vec<String> {
        self.online.online_players()
    }

    pub fn current_day(&self) -> Option<NaiveDate> {
        self.current_day
    }

    fn join(
        &mut self,
        username: String,
        at: NaiveDateTime,
        day: NaiveDate,
        line: &str,
    ) -> Result<(), TrackerError> {
        if self.online.is_online(&username) {
            return Err(TrackerError::DoubleJoin {
                username,
                day,
                line: line.to_string(),
            });
        }
        debug!("{} joined at {}", username, at);
        self.online.mark_online(&username, at);
        self.players.entry(username).or_default();
        Ok(())
    }

    fn leave(&mut self, username: String, at: NaiveDateTime) {
        self.players.entry(username.clone()).or_default();
        match self.online.mark_offline(&username) {
            Some(joined_at) => {
                debug!("{} left at {}", username, at);
                self.credit(&username, joined_at, at);
            }
            None => {
                let unmatched = UnmatchedLeave { username, at };
                warn!("{}", unmatched);
                self.unmatched_leaves.push(unmatched);
            }
        }
    }

    fn stop_server(&mut self, at: NaiveDateTime) {
        let open = self.online.open_sessions();
        debug!("Server stopping at {}, closing {} session(s)", at, open.len());
        for (username, joined_at) in open {
            self.credit(&username, joined_at, at);
        }
        self.online.mark_all_offline();
    }

    fn record_warning(&mut self) {
        for username in self.online.online_players() {
            self.players.entry(username).or_default().warning_count += 1;
        }
    }

    fn roll_over(&mut self, day: NaiveDate) {
        let midnight = day.and_time(NaiveTime::MIN);
        for (username, joined_at) in self.online.open_sessions() {
            debug!("Splitting session of {} at {}", username, midnight);
            self.credit(&username, joined_at, midnight);
            self.online.mark_online(&username, midnight);
        }
    }

    /// Credits `[from, to)` to `username`, each calendar day receiving the
    /// part of the span that fell on it.
    fn credit(&mut self, username: &str, from: NaiveDateTime, to: NaiveDateTime) {
        let stats = self.players.entry(username.to_string()).or_default();
        let mut start = from;
        while start.date() < to.date() {
            let Some(next_day) = start.date().succ_opt() else {
                break;
            };
            let next_midnight = next_day.and_time(NaiveTime::MIN);
            stats.add_hours(start.date(), hours_between(start, next_midnight));
            start = next_midnight;
        }
        if to > start {
            stats.add_hours(start.date(), hours_between(start, to));
        }
    }
}

fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / 3600.0
}
