//! Sniper Range entry point
//!
//! Headless runner: plays a seeded demo session against the file store,
//! aiming at live targets, and logs the results.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use glam::Vec2;
use sniper_range::audio::AudioCues;
use sniper_range::persistence::FileStore;
use sniper_range::platform::{Clock, ManualScheduler, SystemClock};
use sniper_range::sim::RoundPhase;
use sniper_range::{Game, config};

type DemoGame = Game<ManualScheduler, FileStore, SystemClock>;

const ARENA_WIDTH: f32 = 1280.0;
const ARENA_HEIGHT: f32 = 720.0;
/// Reaction time between shots
const STEP_MS: u64 = 400;
/// Give up on rounds that never end (unlimited ammo and time)
const MAX_STEPS_PER_ROUND: u32 = 500;
/// Aim scatter in pixels
const AIM_SPREAD: f32 = 12.0;

fn main() {
    config::init_logging(false);
    log::info!("Sniper Range (native) starting...");

    let clock = SystemClock;
    let seed = config::seed().unwrap_or_else(|| clock.now_ms());
    let data_dir = config::data_dir();
    log::info!("Seed {}, data in {}", seed, data_dir.display());

    let mut game = Game::new(ManualScheduler::new(), FileStore::new(data_dir), clock, seed);
    let mut cues = AudioCues::default();
    cues.set_master_volume(config::volume());
    cues.set_muted(config::muted());
    game.set_observer(Box::new(cues));
    game.resize(ARENA_WIDTH, ARENA_HEIGHT);
    game.start();

    let mut hand = Pcg32::seed_from_u64(seed ^ 0x5eed);
    let rounds = config::rounds();
    for i in 0..rounds {
        play_round(&mut game, &mut hand);
        report_round(&game);
        if i + 1 < rounds {
            if game.state().overlays.prompt_shown {
                game.dismiss_prompt();
            }
            game.advance();
        }
    }

    game.stop();
    report_session(&game);
}

fn play_round(game: &mut DemoGame, hand: &mut Pcg32) {
    for _ in 0..MAX_STEPS_PER_ROUND {
        if game.state().overlays.prompt_shown {
            game.dismiss_prompt();
        }
        match game.state().phase() {
            RoundPhase::RoundOver => return,
            RoundPhase::TurnTransition => game.start_turn(),
            RoundPhase::Active => {}
        }

        game.run_for(STEP_MS);
        if let Some(aim) = pick_aim(game, hand) {
            game.aim_down(aim);
            let result = game.aim_up();
            log::debug!("Shot at {:?}: {:?}", aim, result);
        }
    }

    log::info!("Round dragging on, finishing");
    game.finish_session();
}

/// Newest live target's centre plus some hand shake
fn pick_aim(game: &DemoGame, hand: &mut Pcg32) -> Option<Vec2> {
    let arena = game.arena()?;
    let target = game.state().targets.active().last()?;
    let shake = Vec2::new(
        hand.random_range(-AIM_SPREAD..=AIM_SPREAD),
        hand.random_range(-AIM_SPREAD..=AIM_SPREAD),
    );
    Some(arena.to_pixels(target.pos) + shake)
}

fn report_round(game: &DemoGame) {
    let state = game.state();
    log::info!(
        "Round {} ({}): {} pts, {} shots, {} bullseyes, avg {:.1}",
        state.round,
        state.active_player_name(),
        state.scores.current_score,
        state.scores.history.len(),
        state.scores.bullseye_count(),
        state.scores.average_score()
    );
}

fn report_session(game: &DemoGame) {
    let state = game.state();
    log::info!(
        "Session {} total {} pts in {}s",
        game.session_id(),
        state.scores.total_score,
        state.ledger.total_time_played
    );
    if state.settings.game_mode.is_multiplayer() {
        match state.scores.leader() {
            Some(leader) => log::info!("{} leads with {}", leader.name, leader.total_score),
            None => log::info!("Players are tied"),
        }
    }
    for (rank, entry) in game.highscores().entries.iter().enumerate() {
        log::info!(
            "#{} {} {} pts ({:.1}/shot, {}s) {}",
            rank + 1,
            entry.name,
            entry.score,
            entry.average(),
            entry.time,
            entry.date
        );
    }
}
