//! Player settings
//!
//! Persisted under the `settings` key. Every field has a default, so saves
//! written by older versions load with the new fields filled in.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAX_AMMO, DEFAULT_ROUND_SECONDS};
use crate::persistence::{KeyValueStore, SETTINGS_KEY, load_json, save_json_best_effort};

/// Single player or local hot-seat versus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    #[default]
    #[serde(rename = "SINGLE")]
    Single,
    #[serde(rename = "MULTI_LOCAL")]
    MultiLocal,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Single => "SINGLE",
            GameMode::MultiLocal => "MULTI_LOCAL",
        }
    }

    pub fn is_multiplayer(&self) -> bool {
        *self == GameMode::MultiLocal
    }
}

/// Player settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerSettings {
    /// Player 1 name
    pub nickname: String,
    /// Player 2 name (versus only)
    pub nickname2: String,
    /// Opaque reference to an uploaded target image
    pub custom_image: Option<String>,

    // === Round limits ===
    /// Seconds per round
    pub round_duration: u32,
    /// Shots per round
    pub max_ammo: u32,
    pub unlimited_ammo: bool,
    pub unlimited_time: bool,

    // === Mode ===
    /// Slow single targets, no splits, never ranked
    pub training_mode: bool,
    pub game_mode: GameMode,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            nickname: "PLAYER 1".to_string(),
            nickname2: "PLAYER 2".to_string(),
            custom_image: None,

            round_duration: DEFAULT_ROUND_SECONDS,
            max_ammo: DEFAULT_MAX_AMMO,
            unlimited_ammo: false,
            unlimited_time: false,

            training_mode: false,
            game_mode: GameMode::Single,
        }
    }
}

impl PlayerSettings {
    /// Whether switching from `self` to `next` starts a new session
    pub fn resets_session(&self, next: &PlayerSettings) -> bool {
        self.game_mode != next.game_mode
            || self.nickname != next.nickname
            || self.nickname2 != next.nickname2
    }

    /// Versus games never run in training mode
    pub fn normalized(mut self) -> Self {
        if self.game_mode.is_multiplayer() {
            self.training_mode = false;
        }
        self
    }

    /// Sessions that may enter the leaderboard
    pub fn is_ranked(&self) -> bool {
        !self.training_mode && self.game_mode == GameMode::Single
    }

    pub fn load(store: &impl KeyValueStore) -> Self {
        match load_json::<PlayerSettings>(store, SETTINGS_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings.normalized()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        save_json_best_effort(store, SETTINGS_KEY, self);
        log::info!("Settings saved");
    }
}
