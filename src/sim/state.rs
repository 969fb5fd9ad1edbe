//! Session state and round phase
//!
//! Everything a running session needs lives here. Round-scoped fields are
//! reset at every round/turn boundary, totals live for the whole session.

use serde::{Deserialize, Serialize};

use super::ledger::ResourceLedger;
use super::scoring::ScoreLedger;
use super::target::TargetRegistry;
use crate::settings::PlayerSettings;

/// Where the round machine is. `RoundOver` is derived from the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Targets moving, shots allowed
    Active,
    /// Ammo or time ran out; waiting for "advance"
    RoundOver,
    /// Versus only: waiting for the next player to start their turn
    TurnTransition,
}

/// Stored half of the phase; `RoundOver` is never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TurnState {
    #[default]
    Playing,
    Transition,
}

/// UI layers that suspend play while shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Overlays {
    pub settings_open: bool,
    pub prompt_shown: bool,
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: PlayerSettings,
    /// 1-based round number
    pub round: u32,
    pub ledger: ResourceLedger,
    pub scores: ScoreLedger,
    pub targets: TargetRegistry,
    /// 0 or 1
    pub active_player: usize,
    pub turn: TurnState,
    pub overlays: Overlays,
    /// Session reward (unlimited ammo/time) has been granted
    pub reward_active: bool,
    /// Frames simulated
    pub frame_ticks: u64,
}

impl GameState {
    pub fn new(settings: PlayerSettings) -> Self {
        let settings = settings.normalized();
        Self {
            round: 1,
            ledger: ResourceLedger::new(
                settings.max_ammo,
                settings.round_duration,
                settings.unlimited_ammo,
                settings.unlimited_time,
            ),
            scores: ScoreLedger::new(&settings.nickname, &settings.nickname2),
            targets: TargetRegistry::new(),
            active_player: 0,
            turn: TurnState::Playing,
            overlays: Overlays::default(),
            reward_active: false,
            frame_ticks: 0,
            settings,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        if self.turn == TurnState::Transition {
            RoundPhase::TurnTransition
        } else if self.ledger.is_depleted() {
            RoundPhase::RoundOver
        } else {
            RoundPhase::Active
        }
    }

    pub fn is_round_over(&self) -> bool {
        self.phase() == RoundPhase::RoundOver
    }

    /// Anything covering the arena (settings, prompt, turn hand-over)
    pub fn is_suspended(&self) -> bool {
        self.overlays.settings_open
            || self.overlays.prompt_shown
            || self.turn == TurnState::Transition
    }

    /// Whether targets move and spawn this frame
    pub fn is_simulating(&self) -> bool {
        !self.is_suspended() && self.ledger.can_fire()
    }

    /// Whether the 1 Hz countdown should be running. Halts on overlays and
    /// once the round is over, so idle time on the results screen is not counted.
    pub fn clock_running(&self) -> bool {
        !self.is_suspended() && self.ledger.can_fire()
    }

    pub fn active_player_name(&self) -> &str {
        &self.scores.players[self.active_player.min(1)].name
    }

    /// Reward granted and its unlimited limits not yet banked by a finish
    pub fn reward_in_play(&self) -> bool {
        self.reward_active && self.settings.unlimited_ammo && self.settings.unlimited_time
    }

    /// Copy the unlimited flags from settings into the ledger
    pub fn sync_limits(&mut self) {
        self.ledger.unlimited_ammo = self.settings.unlimited_ammo;
        self.ledger.unlimited_time = self.settings.unlimited_time;
    }

    /// Clear everything scoped to one round or turn
    pub fn reset_round_scope(&mut self) {
        self.ledger
            .refill(self.settings.max_ammo, self.settings.round_duration);
        self.scores.reset_round();
        if let Some(player) = self.scores.players.get_mut(self.active_player) {
            player.round_score = 0;
        }
        self.targets.clear();
    }
}
