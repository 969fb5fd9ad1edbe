//! High score leaderboard system
//!
//! Persisted under the `highscores` key, tracks the top 10 sessions ranked by
//! average points per shot. One entry per session id: a live session keeps
//! replacing its own row as its score changes.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::persistence::{HIGHSCORES_KEY, KeyValueStore, load_json, save_json_best_effort};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Averages closer than this rank as equal and fall back to time
const AVERAGE_EPSILON: f64 = 0.01;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Session id, stable for the session's lifetime
    pub id: String,
    pub score: u32,
    pub name: String,
    /// Calendar date the entry was last written (YYYY-MM-DD)
    pub date: String,
    /// Shots fired, at least 1
    pub shots: u32,
    /// Seconds played, at least 1
    pub time: u32,
}

impl HighScoreEntry {
    /// Build an entry, flooring shots and time at 1
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        score: u32,
        shots: u32,
        time: u32,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            score,
            name: name.into(),
            date: date.into(),
            shots: shots.max(1),
            time: time.max(1),
        }
    }

    pub fn average(&self) -> f64 {
        self.score as f64 / self.shots.max(1) as f64
    }
}

/// Ranking order: higher average first, then less time played
fn rank_order(a: &HighScoreEntry, b: &HighScoreEntry) -> Ordering {
    let diff = b.average() - a.average();
    if diff.abs() > AVERAGE_EPSILON {
        if diff > 0.0 {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    } else {
        a.time.cmp(&b.time)
    }
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Upsert a session's result. Returns the 1-indexed rank, or None if the
    /// entry scored nothing or fell off the bottom.
    pub fn merge(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if entry.score == 0 {
            return None;
        }

        let id = entry.id.clone();
        self.entries.retain(|e| e.id != id);
        self.entries.push(entry);
        self.entries.sort_by(rank_order);
        self.entries.truncate(MAX_HIGH_SCORES);

        self.rank_of(&id)
    }

    /// 1-indexed position of a session, if listed
    pub fn rank_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id).map(|i| i + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Best entry (if any)
    pub fn top(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    /// Load from the store, starting fresh when missing or unreadable
    pub fn load(store: &impl KeyValueStore) -> Self {
        match load_json::<HighScores>(store, HIGHSCORES_KEY) {
            Some(mut scores) => {
                scores.entries.sort_by(rank_order);
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        save_json_best_effort(store, HIGHSCORES_KEY, self);
        log::debug!("High scores saved ({} entries)", self.entries.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn entry(id: &str, score: u32, shots: u32, time: u32) -> HighScoreEntry {
        HighScoreEntry::new(id, "ACE", score, shots, time, "2026-01-01")
    }

    #[test]
    fn test_zero_score_never_enters() {
        let mut scores = HighScores::new();
        assert_eq!(scores.merge(entry("a", 0, 3, 10)), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_upsert_replaces_session() {
        let mut scores = HighScores::new();
        scores.merge(entry("other", 300, 3, 10));
        assert_eq!(scores.merge(entry("me", 100, 2, 10)), Some(2));
        assert_eq!(scores.merge(entry("me", 400, 2, 12)), Some(1));
        assert_eq!(scores.len(), 2);
        assert_eq!(scores.top().unwrap().score, 400);
    }

    #[test]
    fn test_ranks_by_average_then_time() {
        let mut scores = HighScores::new();
        scores.merge(entry("slow", 100, 2, 40));
        scores.merge(entry("fast", 100, 2, 20));
        scores.merge(entry("sharp", 150, 2, 90));
        let ids: Vec<&str> = scores.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["sharp", "fast", "slow"]);
    }

    #[test]
    fn test_near_equal_averages_tie() {
        let mut scores = HighScores::new();
        // 33.333 vs 33.34: within epsilon, time decides
        scores.merge(entry("a", 100, 3, 50));
        scores.merge(entry("b", 3334, 100, 20));
        assert_eq!(scores.entries[0].id, "b");
    }

    #[test]
    fn test_caps_at_ten() {
        let mut scores = HighScores::new();
        for i in 1..=12 {
            scores.merge(entry(&format!("s{i}"), i * 10, 1, 5));
        }
        assert_eq!(scores.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top().unwrap().id, "s12");
        assert_eq!(scores.rank_of("s2"), None);
        assert_eq!(scores.merge(entry("low", 1, 1, 5)), None);
    }

    #[test]
    fn test_floors_shots_and_time() {
        let e = entry("a", 50, 0, 0);
        assert_eq!(e.shots, 1);
        assert_eq!(e.time, 1);
        assert_eq!(e.average(), 50.0);
    }

    #[test]
    fn test_persisted_as_plain_list() {
        let mut store = MemoryStore::new();
        let mut scores = HighScores::new();
        scores.merge(entry("a", 50, 1, 1));
        scores.save(&mut store);

        let raw = store.get(HIGHSCORES_KEY).unwrap().unwrap();
        assert!(raw.starts_with('['));
        assert_eq!(HighScores::load(&store), scores);

        store.set(HIGHSCORES_KEY, "{broken").unwrap();
        assert!(HighScores::load(&store).is_empty());
    }
}
