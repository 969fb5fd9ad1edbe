//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, passed in by the caller
//! - Stable iteration order (by insertion, newest on top)
//! - Every transition applied whole before returning
//! - No timers, storage or rendering dependencies

pub mod collision;
pub mod ledger;
pub mod scoring;
pub mod state;
pub mod target;
pub mod tick;

pub use collision::{Arena, HitKind, Pick, classify, pick_target};
pub use ledger::ResourceLedger;
pub use scoring::{HitRecord, LastHit, PlayerState, ScoreLedger, points_for};
pub use state::{GameState, Overlays, RoundPhase, TurnState};
pub use target::{TargetEntity, TargetRegistry, TargetValue, spawn_speed};
pub use tick::{
    GameEvent, SettingsChange, Shot, ShotOutcome, ShotResult, advance, clock_tick,
    commit_settings, finish_session, fire, grant_reward, remove_target, reset_session,
    start_turn, tick,
};
