use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Join timestamps of players, keyed by username.
///
/// A player is online if and only if they are present with `Some(joined_at)`.
/// Absent and `None` both mean offline; players who went offline stay in the
/// map with `None`.
#[derive(Debug, Clone, Default)]
pub struct OnlineRegistry {
    entries: HashMap<String, Option<NaiveDateTime>>,
}

impl OnlineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_online(&self, username: &str) -> bool {
        self.joined_at(username).is_some()
    }

    pub fn joined_at(&self, username: &str) -> Option<NaiveDateTime> {
        self.entries.get(username).copied().flatten()
    }

    pub fn mark_online(&mut self, username: &str, at: NaiveDateTime) {
        self.entries.insert(username.to_string(), Some(at));
    }

    /// Marks the player offline and returns the join time they had, if any.
    pub fn mark_offline(&mut self, username: &str) -> Option<NaiveDateTime> {
        self.entries.insert(username.to_string(), None).flatten()
    }

    pub fn mark_all_offline(&mut self) {
        for joined_at in self.entries.values_mut() {
            *joined_at = None;
        }
    }

    /// Open sessions sorted by username.
    pub fn open_sessions(&self) -> Vec<(String, NaiveDateTime)> {
        let mut open: Vec<(String, NaiveDateTime)> = self
            .entries
            .iter()
            .filter_map(|(name, joined_at)| joined_at.map(|at| (name.clone(), at)))
            .collect();
        open.sort();
        open
    }

    pub fn online_players(&self) -> Vec<String> {
        self.open_sessions().into_iter().map(|(name, _)| name).collect()
    }

    pub fn online_count(&self) -> usize {
        self.entries.values().filter(|joined_at| joined_at.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_absent_player_is_offline() {
        let registry = OnlineRegistry::new();
        assert!(!registry.is_online("ghost"));
        assert_eq!(registry.joined_at("ghost"), None);
    }

    #[test]
    fn test_mark_offline_keeps_null_entry() {
        let mut registry = OnlineRegistry::new();
        registry.mark_online("alice", at(8));
        assert!(registry.is_online("alice"));
        assert_eq!(registry.mark_offline("alice"), Some(at(8)));
        assert!(!registry.is_online("alice"));
        assert_eq!(registry.mark_offline("alice"), None);
        assert_eq!(registry.online_count(), 0);
    }

    #[test]
    fn test_open_sessions_sorted() {
        let mut registry = OnlineRegistry::new();
        registry.mark_online("carol", at(9));
        registry.mark_online("alice", at(8));
        registry.mark_online("bob", at(7));
        registry.mark_offline("bob");
        assert_eq!(
            registry.open_sessions(),
            vec![("alice".to_string(), at(8)), ("carol".to_string(), at(9))]
        );
        registry.mark_all_offline();
        assert!(registry.online_players().is_empty());
    }
}
