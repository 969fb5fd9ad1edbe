//! Sniper Range - an arcade target-shooting range
//!
//! Core modules:
//! - `sim`: Simulation core (targets, hit resolution, ledger, round/turn machine)
//! - `highscores`: Ranked top-10 leaderboard keyed by session
//! - `settings`: Player settings with default merging
//! - `reward`: Daily-capped reward prompt bookkeeping
//! - `persistence`: Key-value store port and JSON helpers
//! - `platform`: Clock and scheduler ports
//! - `audio`: Event observer port for sound/celebration collaborators
//! - `game`: Driver wiring the core to its ports
//! - `config`: Environment configuration and logger setup for the runner

pub mod audio;
pub mod config;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod reward;
pub mod settings;
pub mod sim;

pub use game::{Game, RenderSnapshot};
pub use highscores::{HighScoreEntry, HighScores};
pub use settings::{GameMode, PlayerSettings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena bounds in percent space; targets never leave [MIN, MAX]
    pub const ARENA_MIN: f32 = 5.0;
    pub const ARENA_MAX: f32 = 95.0;

    /// Spawn area: inner 80% of the arena (10..90 on both axes)
    pub const SPAWN_MIN: f32 = 10.0;
    pub const SPAWN_SPAN: f32 = 80.0;

    /// Base movement in percent per frame
    pub const BASE_SPEED: f32 = 0.2;
    /// Training targets crawl
    pub const TRAINING_SPEED_FACTOR: f32 = 0.15;
    pub const NORMAL_SPEED_FACTOR: f32 = 0.8;
    /// Extra speed per round after the first
    pub const ROUND_SPEED_STEP: f32 = 0.3;
    /// Split children fly faster than their parent
    pub const SPLIT_SPEED_FACTOR: f32 = 1.5;
    /// Children per bullseye split
    pub const SPLIT_COUNT: usize = 3;
    /// Upper bound of the random angle jitter added to each split child (radians)
    pub const SPLIT_JITTER: f32 = 1.0;

    /// Inner 30% of a target is the bullseye
    pub const BULLSEYE_RATIO: f32 = 0.3;
    /// Ammo granted by a bullseye on a 100 target (net +1 after the shot)
    pub const BULLSEYE_AMMO_BONUS: u32 = 2;

    /// Active (non-hit) target caps
    pub const MAX_ACTIVE_TARGETS: usize = 3;
    pub const TRAINING_ACTIVE_TARGETS: usize = 1;
    /// Per-frame spawn probability while under the cap (normal modes)
    pub const SPAWN_CHANCE: f64 = 0.02;

    /// Hit targets linger this long for the despawn animation
    pub const DESPAWN_DELAY_MS: u64 = 500;
    /// Render-synchronised frame period (~60 Hz)
    pub const FRAME_MS: u64 = 16;
    /// Countdown period
    pub const CLOCK_MS: u64 = 1000;

    /// Settings defaults
    pub const DEFAULT_MAX_AMMO: u32 = 5;
    pub const DEFAULT_ROUND_SECONDS: u32 = 30;

    /// Reward prompt
    pub const AD_DAILY_CAP: u32 = 5;
    pub const AD_CHANCE: f64 = 0.4;
}

/// Velocity vector of the given speed heading along `angle` (radians)
#[inline]
pub fn heading(speed: f32, angle: f32) -> Vec2 {
    Vec2::new(speed * angle.cos(), speed * angle.sin())
}

/// Clamp a coordinate into the arena bounds, reporting whether it touched a wall
#[inline]
pub fn clamp_to_arena(value: f32) -> (f32, bool) {
    use consts::{ARENA_MAX, ARENA_MIN};
    if value <= ARENA_MIN || value >= ARENA_MAX {
        (value.clamp(ARENA_MIN, ARENA_MAX), true)
    } else {
        (value, false)
    }
}
