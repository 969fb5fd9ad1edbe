//! Target registry and motion
//!
//! Owns the live target set. Positions are in percent space (0-100 on both
//! axes); velocities are percent per frame. Render order is insertion order,
//! so later-spawned targets draw on top.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{clamp_to_arena, heading};

/// Target tier. Also the point value of a normal hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TargetValue {
    V25,
    V50,
    V75,
    V100,
}

impl TargetValue {
    pub const ALL: [TargetValue; 4] = [Self::V25, Self::V50, Self::V75, Self::V100];

    pub fn points(self) -> u32 {
        match self {
            Self::V25 => 25,
            Self::V50 => 50,
            Self::V75 => 75,
            Self::V100 => 100,
        }
    }

    /// Visual radius in pixels
    pub fn radius(self) -> f32 {
        match self {
            Self::V25 => 45.0,
            Self::V50 => 35.0,
            Self::V75 => 25.0,
            Self::V100 => 18.0,
        }
    }

    /// Tier spawned by a bullseye split (None for the top tier)
    pub fn next_tier(self) -> Option<Self> {
        match self {
            Self::V25 => Some(Self::V50),
            Self::V50 => Some(Self::V75),
            Self::V75 => Some(Self::V100),
            Self::V100 => None,
        }
    }
}

impl From<TargetValue> for u32 {
    fn from(value: TargetValue) -> Self {
        value.points()
    }
}

impl TryFrom<u32> for TargetValue {
    type Error = String;

    fn try_from(points: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|v| v.points() == points)
            .ok_or_else(|| format!("not a target value: {points}"))
    }
}

/// A live target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetEntity {
    pub id: u32,
    /// Centre in percent space
    pub pos: Vec2,
    /// Percent per frame
    pub vel: Vec2,
    pub value: TargetValue,
    /// Pixels
    pub radius: f32,
    /// Frozen mid-despawn; ignored by motion and hit testing
    pub hit: bool,
}

impl TargetEntity {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, value: TargetValue) -> Self {
        Self {
            id,
            pos,
            vel,
            value,
            radius: value.radius(),
            hit: false,
        }
    }

    /// Advance one frame with elastic reflection at the arena walls
    pub fn integrate(&mut self) {
        if self.hit {
            return;
        }
        let next = self.pos + self.vel;

        let (x, bounced_x) = clamp_to_arena(next.x);
        if bounced_x {
            self.vel.x = -self.vel.x;
        }
        let (y, bounced_y) = clamp_to_arena(next.y);
        if bounced_y {
            self.vel.y = -self.vel.y;
        }

        self.pos = Vec2::new(x, y);
    }
}

/// Spawn speed for a fresh target
pub fn spawn_speed(round: u32, training: bool) -> f32 {
    if training {
        BASE_SPEED * TRAINING_SPEED_FACTOR
    } else {
        let round_multiplier = 1.0 + ROUND_SPEED_STEP * round.saturating_sub(1) as f32;
        BASE_SPEED * NORMAL_SPEED_FACTOR * round_multiplier
    }
}

/// The live target set, in render order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetRegistry {
    targets: Vec<TargetEntity>,
    next_id: u32,
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            next_id: 1,
        }
    }

    fn next_target_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// All targets (including those mid-despawn), bottom to top
    pub fn targets(&self) -> &[TargetEntity] {
        &self.targets
    }

    pub fn get(&self, id: u32) -> Option<&TargetEntity> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Targets still in play
    pub fn active(&self) -> impl Iterator<Item = &TargetEntity> {
        self.targets.iter().filter(|t| !t.hit)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Insert a prepared target with a fresh id, returning the id
    pub fn insert(&mut self, pos: Vec2, vel: Vec2, value: TargetValue) -> u32 {
        let id = self.next_target_id();
        self.targets.push(TargetEntity::new(id, pos, vel, value));
        id
    }

    /// Spawn a random target somewhere in the inner 80% of the arena
    pub fn spawn(&mut self, rng: &mut impl Rng, round: u32, training: bool) -> u32 {
        let value = TargetValue::ALL[rng.random_range(0..TargetValue::ALL.len())];
        let speed = spawn_speed(round, training);
        let angle = rng.random::<f32>() * TAU;
        let pos = Vec2::new(
            rng.random::<f32>() * SPAWN_SPAN + SPAWN_MIN,
            rng.random::<f32>() * SPAWN_SPAN + SPAWN_MIN,
        );

        let id = self.insert(pos, heading(speed, angle), value);
        log::debug!("Spawned target {} ({} pts) at {:?}", id, value.points(), pos);
        id
    }

    /// Fan out split children of `tier` from `origin`, 120 degrees apart plus jitter
    pub fn spawn_split(&mut self, rng: &mut impl Rng, origin: Vec2, tier: TargetValue) -> Vec<u32> {
        let speed = BASE_SPEED * SPLIT_SPEED_FACTOR;
        let step = TAU / SPLIT_COUNT as f32;

        (0..SPLIT_COUNT)
            .map(|i| {
                let angle = step * i as f32 + rng.random::<f32>() * SPLIT_JITTER;
                self.insert(origin, heading(speed, angle), tier)
            })
            .collect()
    }

    /// Whether this frame should spawn a new target
    pub fn wants_spawn(&self, rng: &mut impl Rng, training: bool) -> bool {
        let cap = if training {
            TRAINING_ACTIVE_TARGETS
        } else {
            MAX_ACTIVE_TARGETS
        };
        if self.active_count() >= cap {
            return false;
        }
        training || rng.random_bool(SPAWN_CHANCE)
    }

    /// Move every non-hit target one frame
    pub fn integrate(&mut self) {
        for target in &mut self.targets {
            target.integrate();
        }
    }

    /// Freeze a target for despawn. False if unknown or already hit.
    pub fn mark_hit(&mut self, id: u32) -> bool {
        match self.targets.iter_mut().find(|t| t.id == id) {
            Some(target) if !target.hit => {
                target.hit = true;
                true
            }
            _ => false,
        }
    }

    /// Remove a target unconditionally. False if it was already gone.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.targets.len();
        self.targets.retain(|t| t.id != id);
        self.targets.len() != before
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }
}
