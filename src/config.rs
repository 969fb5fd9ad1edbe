//! Runtime configuration for the native runner
//!
//! Read from the environment; gameplay tuning lives in [`crate::consts`].

use std::env;
use std::path::PathBuf;

use env_logger::{Builder, Env};
use log::LevelFilter;

const DEFAULT_VOLUME: f32 = 0.8;

/// Directory backing the file store
pub fn data_dir() -> PathBuf {
    env::var("SNIPER_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./sniper-data"))
}

/// RNG seed, None when unset or unparsable
pub fn seed() -> Option<u64> {
    env::var("SNIPER_SEED").ok().and_then(|v| v.parse().ok())
}

/// Rounds the demo session autoplays
pub fn rounds() -> u32 {
    env::var("SNIPER_ROUNDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3)
}

/// Master volume for sound cues, 0.0 - 1.0
pub fn volume() -> f32 {
    parse_volume(env::var("SNIPER_VOLUME").ok().as_deref())
}

/// Whether sound cues are muted (`SNIPER_MUTE` set to anything but 0/false)
pub fn muted() -> bool {
    parse_flag(env::var("SNIPER_MUTE").ok().as_deref())
}

fn parse_volume(raw: Option<&str>) -> f32 {
    raw.and_then(|v| v.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
        .unwrap_or(DEFAULT_VOLUME)
}

fn parse_flag(raw: Option<&str>) -> bool {
    match raw.map(str::trim) {
        None | Some("") | Some("0") => false,
        Some(v) => !v.eq_ignore_ascii_case("false"),
    }
}

/// Initializes the global logger.
///
/// `RUST_LOG` wins; otherwise debug when `verbose`, info if not.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    // try_init only fails when a logger is already installed
    let _ = Builder::from_env(env).try_init();
}
