//! Shot history, player totals and round score

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::HitKind;
use super::target::TargetValue;

/// One resolved shot. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitRecord {
    pub id: u32,
    /// 0 for a miss
    pub points: u32,
    pub bullseye: bool,
    /// None for a miss
    pub value: Option<TargetValue>,
    /// Milliseconds since the unix epoch
    pub timestamp: u64,
    /// Round score after this shot
    pub score_snapshot: u32,
}

impl HitRecord {
    pub fn is_miss(&self) -> bool {
        self.value.is_none()
    }
}

/// Most recent hit, for the HUD popup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LastHit {
    /// Base value; the bullseye doubling is shown separately
    pub points: u32,
    pub bullseye: bool,
    /// Aim point in pixels
    pub aim: Vec2,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: usize,
    pub name: String,
    pub total_score: u32,
    pub round_score: u32,
}

impl PlayerState {
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            total_score: 0,
            round_score: 0,
        }
    }
}

/// Points for a hit of the given kind on a target of `value`
pub fn points_for(value: TargetValue, kind: HitKind) -> u32 {
    match kind {
        HitKind::Normal => value.points(),
        HitKind::Bullseye => value.points() * 2,
    }
}

/// Scores and history for the running session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreLedger {
    /// Current round (or turn) score
    pub current_score: u32,
    /// Session total across rounds and players
    pub total_score: u32,
    pub history: Vec<HitRecord>,
    pub last_hit: Option<LastHit>,
    pub players: [PlayerState; 2],
    next_record_id: u32,
}

impl ScoreLedger {
    pub fn new(name1: &str, name2: &str) -> Self {
        Self {
            current_score: 0,
            total_score: 0,
            history: Vec::new(),
            last_hit: None,
            players: [PlayerState::new(0, name1), PlayerState::new(1, name2)],
            next_record_id: 1,
        }
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_record_id;
        self.next_record_id += 1;
        id
    }

    /// Credit a hit to the active player and log it
    pub fn record_hit(
        &mut self,
        active: usize,
        value: TargetValue,
        kind: HitKind,
        aim: Vec2,
        timestamp: u64,
    ) -> &HitRecord {
        let points = points_for(value, kind);
        self.current_score += points;
        self.total_score += points;
        if let Some(player) = self.players.get_mut(active) {
            player.total_score += points;
            player.round_score += points;
        }
        self.last_hit = Some(LastHit {
            points: value.points(),
            bullseye: kind == HitKind::Bullseye,
            aim,
        });

        let record = HitRecord {
            id: self.next_id(),
            points,
            bullseye: kind == HitKind::Bullseye,
            value: Some(value),
            timestamp,
            score_snapshot: self.current_score,
        };
        self.push(record)
    }

    pub fn record_miss(&mut self, timestamp: u64) -> &HitRecord {
        self.last_hit = None;
        let record = HitRecord {
            id: self.next_id(),
            points: 0,
            bullseye: false,
            value: None,
            timestamp,
            score_snapshot: self.current_score,
        };
        self.push(record)
    }

    fn push(&mut self, record: HitRecord) -> &HitRecord {
        self.history.push(record);
        &self.history[self.history.len() - 1]
    }

    /// Clear round-scoped fields; totals survive
    pub fn reset_round(&mut self) {
        self.current_score = 0;
        self.history.clear();
        self.last_hit = None;
    }

    /// Shots fired this round, never less than one
    pub fn shots_floor(&self) -> u32 {
        (self.history.len() as u32).max(1)
    }

    /// Total score per shot for the HUD
    pub fn average_score(&self) -> f32 {
        self.total_score as f32 / self.shots_floor() as f32
    }

    pub fn bullseye_count(&self) -> usize {
        self.history.iter().filter(|r| r.bullseye).count()
    }

    /// Player with the higher total, None on a tie
    pub fn leader(&self) -> Option<&PlayerState> {
        let [a, b] = &self.players;
        match a.total_score.cmp(&b.total_score) {
            std::cmp::Ordering::Greater => Some(a),
            std::cmp::Ordering::Less => Some(b),
            std::cmp::Ordering::Equal => None,
        }
    }
}
