//! Game driver
//!
//! Wires the pure simulation to its ports: timers from a [`Scheduler`],
//! persistence through a [`KeyValueStore`], wall time from a [`Clock`] and
//! events out to an optional [`GameObserver`]. Every public operation applies
//! one sim transition and then settles the side effects (clock subscription,
//! reward prompt, leaderboard upsert, observer notification).

use std::collections::HashMap;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;
use uuid::Uuid;

use crate::audio::GameObserver;
use crate::consts::{CLOCK_MS, DESPAWN_DELAY_MS, FRAME_MS};
use crate::highscores::{HighScoreEntry, HighScores};
use crate::persistence::KeyValueStore;
use crate::platform::{Clock, ManualScheduler, Scheduler, TimerId, TimerSpec};
use crate::reward::AdTracker;
use crate::settings::PlayerSettings;
use crate::sim::{
    self, Arena, GameEvent, GameState, LastHit, PlayerState, RoundPhase, SettingsChange, Shot,
    ShotResult, TargetEntity,
};

/// Read-only view handed to the renderer each frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub targets: Vec<TargetEntity>,
    /// Crosshair in pixels, None when not aiming
    pub aim: Option<Vec2>,
    pub phase: RoundPhase,
    pub round: u32,
    pub shots_left: u32,
    pub time_left: u32,
    pub unlimited_ammo: bool,
    pub unlimited_time: bool,
    pub current_score: u32,
    pub total_score: u32,
    pub average_score: f32,
    pub active_player: usize,
    pub players: [PlayerState; 2],
    pub last_hit: Option<LastHit>,
    pub training_mode: bool,
    pub settings_open: bool,
    pub prompt_shown: bool,
    pub custom_image: Option<String>,
}

fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Game instance holding the session and its ports
pub struct Game<S: Scheduler, K: KeyValueStore, C: Clock> {
    state: GameState,
    session_id: String,
    highscores: HighScores,
    ad_tracker: AdTracker,
    rng: Pcg32,
    /// Settings as last written to the store
    persisted: PlayerSettings,

    // === Input ===
    aim: Option<Vec2>,
    holding: bool,
    arena: Option<Arena>,

    // === Ports ===
    scheduler: S,
    store: K,
    clock: C,
    observer: Option<Box<dyn GameObserver>>,

    // === Timers ===
    frame_timer: Option<TimerId>,
    second_timer: Option<TimerId>,
    /// Pending removals: timer -> target id
    despawns: HashMap<TimerId, u32>,

    // === Edge tracking ===
    /// Cleared once a round-over has been considered for the reward prompt
    prompt_armed: bool,
    last_entry: Option<HighScoreEntry>,
    last_rank: Option<usize>,
}

impl<S: Scheduler, K: KeyValueStore, C: Clock> Game<S, K, C> {
    /// Build a session from whatever the store holds
    pub fn new(scheduler: S, store: K, clock: C, seed: u64) -> Self {
        let settings = PlayerSettings::load(&store);
        let highscores = HighScores::load(&store);
        let ad_tracker = AdTracker::load(&store, &clock.today());
        let session_id = new_session_id();
        log::info!("Session {} ({})", session_id, settings.game_mode.as_str());

        Self {
            state: GameState::new(settings.clone()),
            persisted: settings,
            session_id,
            highscores,
            ad_tracker,
            rng: Pcg32::seed_from_u64(seed),
            aim: None,
            holding: false,
            arena: None,
            scheduler,
            store,
            clock,
            observer: None,
            frame_timer: None,
            second_timer: None,
            despawns: HashMap::new(),
            prompt_armed: true,
            last_entry: None,
            last_rank: None,
        }
    }

    pub fn set_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observer = Some(observer);
    }

    /// Subscribe to the frame and clock timers
    pub fn start(&mut self) {
        if self.frame_timer.is_none() {
            self.frame_timer = Some(self.scheduler.schedule(TimerSpec::Every(FRAME_MS)));
        }
        self.refresh_clock();
    }

    /// Drop every subscription
    pub fn stop(&mut self) {
        if let Some(id) = self.frame_timer.take() {
            self.scheduler.cancel(id);
        }
        if let Some(id) = self.second_timer.take() {
            self.scheduler.cancel(id);
        }
        self.cancel_despawns();
    }

    /// Deliver a fired timer
    pub fn on_timer(&mut self, id: TimerId) {
        if self.frame_timer == Some(id) {
            sim::tick(&mut self.state, &mut self.rng);
        } else if self.second_timer == Some(id) {
            let events = sim::clock_tick(&mut self.state);
            self.settle(events);
        } else if let Some(target) = self.despawns.remove(&id) {
            sim::remove_target(&mut self.state, target);
        } else {
            log::trace!("Ignoring stale timer {:?}", id);
        }
    }

    // === Input ===

    /// Rendering surface size changed
    pub fn resize(&mut self, width: f32, height: f32) {
        self.arena = Some(Arena::new(width, height));
    }

    pub fn aim_down(&mut self, pos: Vec2) {
        if self.state.is_suspended() {
            return;
        }
        self.aim = Some(pos);
        self.holding = true;
    }

    pub fn aim_move(&mut self, pos: Vec2) {
        if self.holding || self.aim.is_some() {
            self.aim = Some(pos);
        }
    }

    /// Pointer left the surface: drop the aim without firing
    pub fn aim_cancel(&mut self) {
        self.aim = None;
        self.holding = false;
    }

    /// Release the trigger at the current aim point
    pub fn aim_up(&mut self) -> ShotResult {
        self.holding = false;
        let shot = Shot {
            aim: self.aim.take(),
            arena: self.arena,
            timestamp: self.clock.now_ms(),
        };

        let outcome = sim::fire(&mut self.state, &mut self.rng, shot);
        if let Some(target) = outcome.hit_target() {
            let timer = self.scheduler.schedule(TimerSpec::Once(DESPAWN_DELAY_MS));
            self.despawns.insert(timer, target);
        }
        self.settle(outcome.events);
        outcome.result
    }

    // === Round flow ===

    /// Next round, or next player's turn in versus
    pub fn advance(&mut self) {
        let events = sim::advance(&mut self.state);
        if !events.is_empty() {
            self.aim_cancel();
            self.cancel_despawns();
        }
        self.settle(events);
    }

    pub fn start_turn(&mut self) {
        let events = sim::start_turn(&mut self.state);
        self.settle(events);
    }

    /// End the round now, even with unlimited ammo and time
    pub fn finish_session(&mut self) {
        let events = sim::finish_session(&mut self.state);
        self.settle(events);
    }

    /// Full restart with the current settings
    pub fn reset_session(&mut self) {
        let events = sim::reset_session(&mut self.state);
        self.begin_new_session();
        self.settle(events);
    }

    // === Settings ===

    /// Show the editor and hand back a draft of the live settings. Limits
    /// lifted by the reward show as their stored values.
    pub fn open_settings(&mut self) -> PlayerSettings {
        self.state.overlays.settings_open = true;
        self.aim_cancel();
        self.settle(Vec::new());

        let mut draft = self.state.settings.clone();
        if self.state.reward_in_play() {
            draft.unlimited_ammo = self.persisted.unlimited_ammo;
            draft.unlimited_time = self.persisted.unlimited_time;
        }
        draft
    }

    /// Close the editor without changes
    pub fn close_settings(&mut self) {
        self.state.overlays.settings_open = false;
        self.settle(Vec::new());
    }

    /// Persist and apply edited settings, closing the editor
    pub fn commit_settings(&mut self, next: PlayerSettings) -> SettingsChange {
        let next = next.normalized();
        next.save(&mut self.store);
        self.persisted = next.clone();

        let change = sim::commit_settings(&mut self.state, next);
        self.state.overlays.settings_open = false;

        let mut events = Vec::new();
        if change == SettingsChange::SessionReset {
            self.begin_new_session();
            events.push(GameEvent::SessionReset);
        }
        self.settle(events);
        change
    }

    // === Reward ===

    pub fn accept_reward(&mut self) {
        let events = sim::grant_reward(&mut self.state);
        self.settle(events);
    }

    pub fn dismiss_prompt(&mut self) {
        self.state.overlays.prompt_shown = false;
        self.settle(Vec::new());
    }

    // === Accessors ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for staging a session in tests
    #[cfg(any(test, feature = "test-support"))]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn highscores(&self) -> &HighScores {
        &self.highscores
    }

    pub fn ad_tracker(&self) -> &AdTracker {
        &self.ad_tracker
    }

    pub fn aim(&self) -> Option<Vec2> {
        self.aim
    }

    pub fn arena(&self) -> Option<Arena> {
        self.arena
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn pending_despawns(&self) -> usize {
        self.despawns.len()
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let state = &self.state;
        RenderSnapshot {
            targets: state.targets.targets().to_vec(),
            aim: self.aim,
            phase: state.phase(),
            round: state.round,
            shots_left: state.ledger.shots_left,
            time_left: state.ledger.time_left,
            unlimited_ammo: state.ledger.unlimited_ammo,
            unlimited_time: state.ledger.unlimited_time,
            current_score: state.scores.current_score,
            total_score: state.scores.total_score,
            average_score: state.scores.average_score(),
            active_player: state.active_player,
            players: state.scores.players.clone(),
            last_hit: state.scores.last_hit,
            training_mode: state.settings.training_mode,
            settings_open: state.overlays.settings_open,
            prompt_shown: state.overlays.prompt_shown,
            custom_image: state.settings.custom_image.clone(),
        }
    }

    // === Settling ===

    fn begin_new_session(&mut self) {
        self.session_id = new_session_id();
        self.cancel_despawns();
        self.aim_cancel();
        self.prompt_armed = true;
        self.last_entry = None;
        self.last_rank = None;
        log::info!("New session {}", self.session_id);
    }

    fn cancel_despawns(&mut self) {
        for (timer, _) in self.despawns.drain() {
            self.scheduler.cancel(timer);
        }
    }

    fn settle(&mut self, mut events: Vec<GameEvent>) {
        self.refresh_clock();
        self.maybe_offer_reward();
        if let Some(rank) = self.sync_highscores() {
            events.push(GameEvent::HighScore { rank });
        }
        self.emit(&events);
    }

    /// Keep the 1 Hz subscription in step with the round
    fn refresh_clock(&mut self) {
        let running = self.state.clock_running();
        match (running, self.second_timer) {
            (true, None) => {
                self.second_timer = Some(self.scheduler.schedule(TimerSpec::Every(CLOCK_MS)));
            }
            (false, Some(id)) => {
                self.scheduler.cancel(id);
                self.second_timer = None;
            }
            _ => {}
        }
    }

    /// Roll for the reward prompt once per round-over
    fn maybe_offer_reward(&mut self) {
        if !self.state.is_round_over() {
            self.prompt_armed = true;
            return;
        }
        if !self.prompt_armed
            || self.state.reward_active
            || self.state.overlays.settings_open
            || self.state.overlays.prompt_shown
        {
            return;
        }
        self.prompt_armed = false;

        let today = self.clock.today();
        self.ad_tracker = std::mem::take(&mut self.ad_tracker).for_day(&today);
        if self.ad_tracker.roll(&mut self.rng) {
            self.state.overlays.prompt_shown = true;
            self.ad_tracker.record_shown(&mut self.store, &today);
        }
    }

    /// Upsert the live session into the leaderboard. Returns a rank when the
    /// session entered the board or moved on it.
    fn sync_highscores(&mut self) -> Option<usize> {
        let state = &self.state;
        if !state.settings.is_ranked() || state.scores.total_score == 0 {
            return None;
        }

        let entry = HighScoreEntry::new(
            self.session_id.as_str(),
            state.settings.nickname.as_str(),
            state.scores.total_score,
            state.scores.history.len() as u32,
            state.ledger.total_time_played,
            self.clock.today(),
        );
        if self.last_entry.as_ref() == Some(&entry) {
            return None;
        }

        let rank = self.highscores.merge(entry.clone());
        self.highscores.save(&mut self.store);
        self.last_entry = Some(entry);

        let moved = rank.is_some() && rank != self.last_rank;
        self.last_rank = rank;
        if moved {
            log::info!("High score rank {:?} for {}", rank, self.session_id);
        }
        rank.filter(|_| moved)
    }

    fn emit(&mut self, events: &[GameEvent]) {
        for event in events {
            log::debug!("Event {:?}", event);
            if let Some(observer) = self.observer.as_mut() {
                observer.notify(event);
            }
        }
    }
}

impl<K: KeyValueStore, C: Clock> Game<ManualScheduler, K, C> {
    /// Step scheduler time by `ms`, delivering timers as they come due
    pub fn run_for(&mut self, ms: u64) {
        let until = self.scheduler.now() + ms;
        while let Some(id) = self.scheduler.next_due(until) {
            self.on_timer(id);
        }
        self.scheduler.settle(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{AD_TRACKER_KEY, MemoryStore, save_json};
    use crate::platform::FixedClock;
    use crate::settings::GameMode;
    use crate::sim::TargetValue;
    use std::cell::RefCell;
    use std::rc::Rc;

    type TestGame = Game<ManualScheduler, MemoryStore, FixedClock>;

    // 2026-10-18T12:00:00Z
    const NOW: u64 = 1_792_324_800_000;

    fn game_with(settings: PlayerSettings) -> TestGame {
        let mut store = MemoryStore::new();
        settings.save(&mut store);
        let mut game = Game::new(ManualScheduler::new(), store, FixedClock { now_ms: NOW }, 42);
        game.resize(1000.0, 1000.0);
        game.start();
        game
    }

    fn game() -> TestGame {
        game_with(PlayerSettings::default())
    }

    /// Still target at percent coords, returning its pixel centre
    fn place(game: &mut TestGame, x: f32, y: f32, value: TargetValue) -> (u32, Vec2) {
        let id = game
            .state_mut()
            .targets
            .insert(Vec2::new(x, y), Vec2::ZERO, value);
        (id, Vec2::new(x * 10.0, y * 10.0))
    }

    fn shoot(game: &mut TestGame, at: Vec2) -> ShotResult {
        game.aim_down(at);
        game.aim_up()
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<GameEvent>>>);

    impl GameObserver for Recorder {
        fn notify(&mut self, event: &GameEvent) {
            self.0.borrow_mut().push(event.clone());
        }
    }

    #[test]
    fn test_start_subscribes_timers() {
        let game = game();
        assert_eq!(game.scheduler().active_count(), 2);
    }

    #[test]
    fn test_clock_counts_down_and_halts() {
        let mut game = game_with(PlayerSettings {
            round_duration: 3,
            ..Default::default()
        });
        game.run_for(10_000);
        assert_eq!(game.state().ledger.time_left, 0);
        assert_eq!(game.state().ledger.total_time_played, 3);
        assert_eq!(game.state().phase(), RoundPhase::RoundOver);
    }

    #[test]
    fn test_settings_overlay_pauses_everything() {
        let mut game = game();
        game.run_for(2_000);
        let draft = game.open_settings();
        assert_eq!(draft, game.state().settings);

        let time_left = game.state().ledger.time_left;
        let ticks = game.state().frame_ticks;
        game.run_for(5_000);
        assert_eq!(game.state().ledger.time_left, time_left);
        assert_eq!(game.state().frame_ticks, ticks);

        // aiming is refused while the editor is up
        game.aim_down(Vec2::new(1.0, 1.0));
        assert_eq!(game.aim(), None);

        game.close_settings();
        game.run_for(1_000);
        assert_eq!(game.state().ledger.time_left, time_left - 1);
    }

    #[test]
    fn test_hit_despawns_after_grace() {
        let mut game = game();
        let (id, centre) = place(&mut game, 30.0, 30.0, TargetValue::V50);

        assert!(matches!(shoot(&mut game, centre), ShotResult::Hit { .. }));
        assert!(game.state().targets.get(id).unwrap().hit);
        assert_eq!(game.pending_despawns(), 1);

        game.run_for(DESPAWN_DELAY_MS - 1);
        assert!(game.state().targets.get(id).is_some());
        game.run_for(1);
        assert!(game.state().targets.get(id).is_none());
        assert_eq!(game.pending_despawns(), 0);
    }

    #[test]
    fn test_advance_cancels_pending_despawn() {
        let mut game = game_with(PlayerSettings {
            max_ammo: 1,
            ..Default::default()
        });
        let (_, centre) = place(&mut game, 30.0, 30.0, TargetValue::V50);
        shoot(&mut game, centre);
        assert_eq!(game.state().phase(), RoundPhase::RoundOver);
        game.dismiss_prompt();

        game.advance();
        assert_eq!(game.pending_despawns(), 0);
        assert_eq!(game.state().round, 2);
        // frame + clock only
        assert_eq!(game.scheduler().active_count(), 2);
    }

    #[test]
    fn test_fire_without_geometry_is_noop() {
        let mut store = MemoryStore::new();
        PlayerSettings::default().save(&mut store);
        let mut game = Game::new(ManualScheduler::new(), store, FixedClock { now_ms: NOW }, 1);
        game.start();

        assert_eq!(shoot(&mut game, Vec2::new(10.0, 10.0)), ShotResult::Ignored);
        game.resize(800.0, 600.0);
        // released without pressing
        assert_eq!(game.aim_up(), ShotResult::Ignored);
        assert_eq!(game.state().ledger.shots_left, 5);
    }

    #[test]
    fn test_observer_sees_shot_events() {
        let mut game = game();
        let recorder = Recorder::default();
        game.set_observer(Box::new(recorder.clone()));
        let (_, centre) = place(&mut game, 50.0, 50.0, TargetValue::V100);

        shoot(&mut game, centre);
        let events = recorder.0.borrow().clone();
        assert_eq!(events[0], GameEvent::Shot);
        assert!(events.contains(&GameEvent::AmmoBonus { amount: 2 }));
        assert!(events.contains(&GameEvent::HighScore { rank: 1 }));
    }

    #[test]
    fn test_leaderboard_upserts_live_session() {
        let mut game = game_with(PlayerSettings {
            max_ammo: 10,
            ..Default::default()
        });
        let (_, a) = place(&mut game, 20.0, 20.0, TargetValue::V25);
        shoot(&mut game, a + Vec2::new(30.0, 0.0));
        let (_, b) = place(&mut game, 70.0, 70.0, TargetValue::V75);
        shoot(&mut game, b + Vec2::new(10.0, 0.0));

        let board = game.highscores();
        assert_eq!(board.len(), 1);
        let entry = board.top().unwrap();
        assert_eq!(entry.id, game.session_id());
        assert_eq!(entry.score, 100);
        assert_eq!(entry.shots, 2);
        assert_eq!(entry.date, "2026-10-18");

        let stored = HighScores::load(game.store());
        assert_eq!(&stored, game.highscores());
    }

    #[test]
    fn test_unranked_sessions_stay_off_board() {
        let mut game = game_with(PlayerSettings {
            training_mode: true,
            ..Default::default()
        });
        let (_, centre) = place(&mut game, 50.0, 50.0, TargetValue::V25);
        shoot(&mut game, centre);
        assert!(game.highscores().is_empty());

        let mut versus = game_with(PlayerSettings {
            game_mode: GameMode::MultiLocal,
            ..Default::default()
        });
        let (_, centre) = place(&mut versus, 50.0, 50.0, TargetValue::V25);
        shoot(&mut versus, centre);
        assert!(versus.highscores().is_empty());
    }

    #[test]
    fn test_rename_starts_new_session() {
        let mut game = game();
        let (_, centre) = place(&mut game, 50.0, 50.0, TargetValue::V25);
        shoot(&mut game, centre);
        let first = game.session_id().to_string();

        let mut draft = game.open_settings();
        draft.nickname = "ACE".to_string();
        assert_eq!(game.commit_settings(draft), SettingsChange::SessionReset);

        assert_ne!(game.session_id(), first);
        assert_eq!(game.state().scores.total_score, 0);
        assert_eq!(game.pending_despawns(), 0);
        assert!(!game.state().overlays.settings_open);
        assert_eq!(PlayerSettings::load(game.store()).nickname, "ACE");
        // old session keeps its row
        assert_eq!(game.highscores().rank_of(&first), Some(1));
    }

    #[test]
    fn test_capped_tracker_never_prompts() {
        let mut store = MemoryStore::new();
        let capped = AdTracker {
            date: "2026-10-18".to_string(),
            count: 5,
        };
        save_json(&mut store, AD_TRACKER_KEY, &capped).unwrap();
        PlayerSettings {
            max_ammo: 1,
            ..Default::default()
        }
        .save(&mut store);
        let mut game = Game::new(ManualScheduler::new(), store, FixedClock { now_ms: NOW }, 9);
        game.resize(1000.0, 1000.0);
        game.start();

        for _ in 0..30 {
            shoot(&mut game, Vec2::new(1.0, 1.0));
            assert!(!game.state().overlays.prompt_shown);
            game.advance();
        }
    }

    #[test]
    fn test_prompt_respects_daily_cap() {
        let mut game = game_with(PlayerSettings {
            max_ammo: 1,
            ..Default::default()
        });
        let mut shown = 0;
        for _ in 0..60 {
            shoot(&mut game, Vec2::new(1.0, 1.0));
            if game.state().overlays.prompt_shown {
                shown += 1;
                game.dismiss_prompt();
            }
            game.advance();
        }
        assert!(shown >= 1);
        assert!(shown <= 5);
        assert_eq!(game.ad_tracker().count, shown);
    }

    #[test]
    fn test_accept_reward_reopens_round() {
        let mut game = game_with(PlayerSettings {
            max_ammo: 1,
            ..Default::default()
        });
        shoot(&mut game, Vec2::new(1.0, 1.0));
        assert_eq!(game.state().phase(), RoundPhase::RoundOver);

        game.accept_reward();
        assert_eq!(game.state().phase(), RoundPhase::Active);
        assert!(game.state().reward_active);
        assert!(!game.state().overlays.prompt_shown);
        // live only, never persisted
        assert!(!PlayerSettings::load(game.store()).unlimited_ammo);

        game.finish_session();
        assert_eq!(game.state().phase(), RoundPhase::RoundOver);
        // reward already used this session
        assert!(!game.state().overlays.prompt_shown);
    }

    #[test]
    fn test_reward_survives_settings_edit_unsaved() {
        let mut game = game_with(PlayerSettings {
            max_ammo: 1,
            ..Default::default()
        });
        shoot(&mut game, Vec2::new(1.0, 1.0));
        game.accept_reward();

        let mut draft = game.open_settings();
        assert!(!draft.unlimited_ammo);
        assert!(!draft.unlimited_time);
        draft.round_duration = 60;
        assert_eq!(game.commit_settings(draft), SettingsChange::Updated);

        let stored = PlayerSettings::load(game.store());
        assert_eq!(stored.round_duration, 60);
        assert!(!stored.unlimited_ammo);
        assert!(!stored.unlimited_time);

        let state = game.state();
        assert!(state.reward_active);
        assert!(state.settings.unlimited_ammo && state.settings.unlimited_time);
        assert_eq!(state.phase(), RoundPhase::Active);
    }

    #[test]
    fn test_finish_ignored_during_hand_over() {
        let mut game = game_with(PlayerSettings {
            game_mode: GameMode::MultiLocal,
            max_ammo: 1,
            ..Default::default()
        });
        shoot(&mut game, Vec2::new(1.0, 1.0));
        game.dismiss_prompt();
        game.advance();
        assert_eq!(game.state().phase(), RoundPhase::TurnTransition);

        game.finish_session();
        game.start_turn();
        assert_eq!(game.state().phase(), RoundPhase::Active);
        assert_eq!(game.state().ledger.shots_left, 1);
        assert_eq!(game.state().ledger.time_left, 30);
    }

    #[test]
    fn test_advance_blocked_by_prompt() {
        let mut game = game_with(PlayerSettings {
            max_ammo: 1,
            ..Default::default()
        });
        shoot(&mut game, Vec2::new(1.0, 1.0));
        game.state_mut().overlays.prompt_shown = true;

        game.advance();
        assert_eq!(game.state().round, 1);
        assert!(game.state().overlays.prompt_shown);

        game.dismiss_prompt();
        game.advance();
        assert_eq!(game.state().round, 2);
        assert!(!game.state().overlays.prompt_shown);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut game = game();
        place(&mut game, 50.0, 50.0, TargetValue::V75);
        game.aim_down(Vec2::new(3.0, 4.0));
        game.aim_move(Vec2::new(5.0, 6.0));

        let snap = game.snapshot();
        assert_eq!(snap.targets.len(), 1);
        assert_eq!(snap.aim, Some(Vec2::new(5.0, 6.0)));
        assert_eq!(snap.phase, RoundPhase::Active);
        assert_eq!(snap.shots_left, 5);
        assert_eq!(snap.players[0].name, "PLAYER 1");

        game.aim_cancel();
        assert_eq!(game.snapshot().aim, None);
    }

    #[test]
    fn test_stop_drops_timers() {
        let mut game = game();
        game.stop();
        assert_eq!(game.scheduler().active_count(), 0);
        game.run_for(5_000);
        assert_eq!(game.state().ledger.time_left, 30);
    }
}
