//! Gameplay transitions
//!
//! Each function takes the session state plus one event, applies the whole
//! change before returning, and reports what happened as a list of
//! [`GameEvent`]s for observers. Randomness is always passed in.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Arena, HitKind, pick_target};
use super::scoring::points_for;
use super::state::{GameState, RoundPhase, TurnState};
use super::target::TargetValue;
use crate::consts::BULLSEYE_AMMO_BONUS;
use crate::settings::PlayerSettings;

/// Signals for audio/celebration collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A round of ammo left the barrel
    Shot,
    /// Trigger pulled with nothing to fire
    DryFire,
    Hit { value: TargetValue, points: u32 },
    Bullseye { value: TargetValue, points: u32 },
    Miss,
    AmmoBonus { amount: u32 },
    Split { parent: u32, children: Vec<u32> },
    RoundOver { round: u32, player: usize },
    /// Versus: hand the controls to `player`
    TurnTransition { player: usize, round: u32 },
    TurnStarted { player: usize },
    RoundStarted { round: u32 },
    RewardGranted,
    SessionReset,
    /// Session entered or moved within the leaderboard
    HighScore { rank: usize },
}

/// One trigger pull
#[derive(Debug, Clone, Copy)]
pub struct Shot {
    /// Aim point in pixels, None if the player never aimed
    pub aim: Option<Vec2>,
    /// Surface geometry, None if the renderer cannot report it
    pub arena: Option<Arena>,
    /// Milliseconds since the unix epoch
    pub timestamp: u64,
}

/// How a trigger pull resolved
#[derive(Debug, Clone, PartialEq)]
pub enum ShotResult {
    /// Overlay up, no aim or no geometry: nothing happened
    Ignored,
    /// Out of ammo or time: nothing consumed, nothing recorded
    DryFire,
    Miss,
    Hit {
        target_id: u32,
        value: TargetValue,
        kind: HitKind,
        points: u32,
        ammo_bonus: u32,
        children: Vec<u32>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShotOutcome {
    pub result: ShotResult,
    pub events: Vec<GameEvent>,
}

impl ShotOutcome {
    fn quiet(result: ShotResult) -> Self {
        Self {
            result,
            events: Vec::new(),
        }
    }

    /// Target that now needs a deferred removal
    pub fn hit_target(&self) -> Option<u32> {
        match self.result {
            ShotResult::Hit { target_id, .. } => Some(target_id),
            _ => None,
        }
    }
}

/// Advance one render frame: move targets, maybe spawn one
pub fn tick(state: &mut GameState, rng: &mut impl Rng) {
    if !state.is_simulating() {
        return;
    }

    state.frame_ticks += 1;
    state.targets.integrate();

    let training = state.settings.training_mode;
    if state.targets.wants_spawn(rng, training) {
        state.targets.spawn(rng, state.round, training);
    }
}

/// One second of wall clock
pub fn clock_tick(state: &mut GameState) -> Vec<GameEvent> {
    if !state.clock_running() {
        return Vec::new();
    }

    state.ledger.tick_second();

    let mut events = Vec::new();
    push_round_over(state, &mut events);
    events
}

fn push_round_over(state: &GameState, events: &mut Vec<GameEvent>) {
    if state.is_round_over() {
        log::info!(
            "Round {} over for {} ({} pts)",
            state.round,
            state.active_player_name(),
            state.scores.current_score
        );
        events.push(GameEvent::RoundOver {
            round: state.round,
            player: state.active_player,
        });
    }
}

/// Resolve a trigger pull against the current target snapshot
pub fn fire(state: &mut GameState, rng: &mut impl Rng, shot: Shot) -> ShotOutcome {
    if state.is_suspended() {
        return ShotOutcome::quiet(ShotResult::Ignored);
    }
    let (Some(aim), Some(arena)) = (shot.aim, shot.arena) else {
        return ShotOutcome::quiet(ShotResult::Ignored);
    };
    if !arena.is_measurable() {
        return ShotOutcome::quiet(ShotResult::Ignored);
    }

    if !state.ledger.can_fire() {
        return ShotOutcome {
            result: ShotResult::DryFire,
            events: vec![GameEvent::DryFire],
        };
    }

    let mut events = vec![GameEvent::Shot];

    let hit = pick_target(aim, state.targets.targets(), &arena).and_then(|pick| {
        state
            .targets
            .get(pick.target_id)
            .filter(|t| !t.hit)
            .map(|t| (pick, t.value, t.pos))
    });

    let Some((pick, value, origin)) = hit else {
        state.ledger.consume_shot(0);
        state.scores.record_miss(shot.timestamp);
        log::debug!("Miss at {:?}", aim);
        events.push(GameEvent::Miss);
        push_round_over(state, &mut events);
        return ShotOutcome {
            result: ShotResult::Miss,
            events,
        };
    };

    let points = points_for(value, pick.kind);
    let mut ammo_bonus = 0;
    let mut children = Vec::new();

    if pick.kind == HitKind::Bullseye {
        events.push(GameEvent::Bullseye { value, points });
        match value.next_tier() {
            None => {
                if !state.ledger.unlimited_ammo {
                    ammo_bonus = BULLSEYE_AMMO_BONUS;
                    events.push(GameEvent::AmmoBonus { amount: ammo_bonus });
                }
            }
            Some(tier) if !state.settings.training_mode => {
                children = state.targets.spawn_split(rng, origin, tier);
                events.push(GameEvent::Split {
                    parent: pick.target_id,
                    children: children.clone(),
                });
            }
            Some(_) => {}
        }
    } else {
        events.push(GameEvent::Hit { value, points });
    }

    state.targets.mark_hit(pick.target_id);
    state.ledger.consume_shot(ammo_bonus);
    state
        .scores
        .record_hit(state.active_player, value, pick.kind, aim, shot.timestamp);
    log::debug!(
        "Hit target {} ({:?}) for {} pts, bonus ammo {}",
        pick.target_id,
        pick.kind,
        points,
        ammo_bonus
    );
    push_round_over(state, &mut events);

    ShotOutcome {
        result: ShotResult::Hit {
            target_id: pick.target_id,
            value,
            kind: pick.kind,
            points,
            ammo_bonus,
            children,
        },
        events,
    }
}

/// Drop a target whose despawn grace has elapsed. False if already gone.
pub fn remove_target(state: &mut GameState, id: u32) -> bool {
    state.targets.remove(id)
}

/// Leave RoundOver: next round (single) or next turn (versus)
pub fn advance(state: &mut GameState) -> Vec<GameEvent> {
    if state.is_suspended() || state.phase() != RoundPhase::RoundOver {
        return Vec::new();
    }

    if !state.settings.game_mode.is_multiplayer() {
        state.round += 1;
        state.reset_round_scope();
        log::info!("Round {} started", state.round);
        return vec![GameEvent::RoundStarted { round: state.round }];
    }

    if state.active_player == 0 {
        state.active_player = 1;
    } else {
        state.active_player = 0;
        state.round += 1;
    }
    state.turn = TurnState::Transition;
    state.reset_round_scope();
    log::info!(
        "Turn passes to {} (round {})",
        state.active_player_name(),
        state.round
    );

    vec![GameEvent::TurnTransition {
        player: state.active_player,
        round: state.round,
    }]
}

/// Leave TurnTransition. Fields were already reset on entry.
pub fn start_turn(state: &mut GameState) -> Vec<GameEvent> {
    if state.turn != TurnState::Transition {
        return Vec::new();
    }
    state.turn = TurnState::Playing;
    vec![GameEvent::TurnStarted {
        player: state.active_player,
    }]
}

/// Bank the score now: zero both counters and drop the unlimited flags.
/// Only an active, uncovered round can be finished.
pub fn finish_session(state: &mut GameState) -> Vec<GameEvent> {
    if state.is_suspended() || state.phase() != RoundPhase::Active {
        return Vec::new();
    }
    state.settings.unlimited_ammo = false;
    state.settings.unlimited_time = false;
    state.ledger.force_empty();

    let mut events = Vec::new();
    push_round_over(state, &mut events);
    events
}

/// What a settings commit did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsChange {
    /// Mode or a name changed: the session restarted
    SessionReset,
    /// Training toggled: targets cleared
    TargetsCleared,
    Updated,
}

/// Swap in edited settings, restarting the session when identity changed.
/// A reward still in play keeps its unlimited limits over the new settings.
pub fn commit_settings(state: &mut GameState, next: PlayerSettings) -> SettingsChange {
    let next = next.normalized();
    let keep_reward = state.reward_in_play();

    let change = if state.settings.resets_session(&next) {
        log::info!(
            "Session reset ({} -> {})",
            state.settings.game_mode.as_str(),
            next.game_mode.as_str()
        );
        restart(state, next);
        SettingsChange::SessionReset
    } else {
        let training_toggled = state.settings.training_mode != next.training_mode;
        state.settings = next;
        if training_toggled {
            state.targets.clear();
            SettingsChange::TargetsCleared
        } else {
            SettingsChange::Updated
        }
    };

    if keep_reward {
        apply_reward_limits(state);
    } else {
        state.sync_limits();
    }
    change
}

/// Start over with the current settings
pub fn reset_session(state: &mut GameState) -> Vec<GameEvent> {
    let settings = state.settings.clone();
    restart(state, settings);
    vec![GameEvent::SessionReset]
}

fn restart(state: &mut GameState, settings: PlayerSettings) {
    let overlays = state.overlays;
    let reward_active = state.reward_active;
    *state = GameState::new(settings);
    state.overlays = overlays;
    state.reward_active = reward_active;
}

fn apply_reward_limits(state: &mut GameState) {
    state.settings.unlimited_ammo = true;
    state.settings.unlimited_time = true;
    state.sync_limits();
}

/// Accept the interstitial reward: unlimited ammo and time for the session
pub fn grant_reward(state: &mut GameState) -> Vec<GameEvent> {
    state.overlays.prompt_shown = false;
    state.reward_active = true;
    apply_reward_limits(state);
    log::info!("Session reward granted");
    vec![GameEvent::RewardGranted]
}
