//! Reward prompt pacing
//!
//! The interstitial reward is offered at most [`AD_DAILY_CAP`] times per
//! calendar day. The counter is persisted under `ad-tracker` and starts over
//! whenever the stored date is not today.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{AD_CHANCE, AD_DAILY_CAP};
use crate::persistence::{AD_TRACKER_KEY, KeyValueStore, load_json, save_json_best_effort};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AdTracker {
    /// Day the count belongs to (YYYY-MM-DD)
    pub date: String,
    /// Prompts shown on `date`
    pub count: u32,
}

impl AdTracker {
    /// Load today's tracker, starting a fresh count on a new day
    pub fn load(store: &impl KeyValueStore, today: &str) -> Self {
        let tracker = load_json::<AdTracker>(store, AD_TRACKER_KEY).unwrap_or_default();
        tracker.for_day(today)
    }

    /// Same tracker if it belongs to `today`, else a zeroed one
    pub fn for_day(self, today: &str) -> Self {
        if self.date == today {
            self
        } else {
            Self {
                date: today.to_string(),
                count: 0,
            }
        }
    }

    pub fn eligible(&self) -> bool {
        self.count < AD_DAILY_CAP
    }

    /// Roll for a prompt. Eligible trackers pass with [`AD_CHANCE`].
    pub fn roll(&self, rng: &mut impl Rng) -> bool {
        self.eligible() && rng.random_bool(AD_CHANCE)
    }

    /// Count one prompt against today and persist it
    pub fn record_shown(&mut self, store: &mut impl KeyValueStore, today: &str) {
        *self = std::mem::take(self).for_day(today);
        self.count += 1;
        save_json_best_effort(store, AD_TRACKER_KEY, self);
        log::info!("Reward prompt shown ({}/{} today)", self.count, AD_DAILY_CAP);
    }
}
