//! Audio and celebration cues
//!
//! The core never synthesizes sound. It hands every [`GameEvent`] to an
//! optional [`GameObserver`]; [`AudioCues`] maps events to sound effects and
//! forwards them to whatever backend the host plugs in.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Gunshot
    Shot,
    /// Trigger pulled on an empty magazine
    EmptyClick,
    /// Target hit outside the bullseye
    Hit,
    /// Bullseye chime
    Bullseye,
    /// Bonus rounds credited
    Reload,
    /// Target burst into fragments
    Split,
    RoundOver,
    /// New high score
    HighScore,
    /// Reward unlocked
    Unlock,
}

impl SoundEffect {
    /// Cue for an event, None for silent events
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Shot => Some(Self::Shot),
            GameEvent::DryFire => Some(Self::EmptyClick),
            GameEvent::Hit { .. } => Some(Self::Hit),
            GameEvent::Bullseye { .. } => Some(Self::Bullseye),
            GameEvent::AmmoBonus { .. } => Some(Self::Reload),
            GameEvent::Split { .. } => Some(Self::Split),
            GameEvent::RoundOver { .. } => Some(Self::RoundOver),
            GameEvent::HighScore { .. } => Some(Self::HighScore),
            GameEvent::RewardGranted => Some(Self::Unlock),
            GameEvent::Miss
            | GameEvent::TurnTransition { .. }
            | GameEvent::TurnStarted { .. }
            | GameEvent::RoundStarted { .. }
            | GameEvent::SessionReset => None,
        }
    }
}

/// Informational sink for gameplay events. Nothing it returns reaches the core.
pub trait GameObserver {
    fn notify(&mut self, event: &GameEvent);
}

/// Where [`AudioCues`] sends effects
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl SoundSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("Sound {:?} at {:.2}", effect, volume);
    }
}

/// Observer that turns events into sound effects
pub struct AudioCues<S: SoundSink> {
    sink: S,
    master_volume: f32,
    muted: bool,
}

impl Default for AudioCues<LogSink> {
    fn default() -> Self {
        Self::new(LogSink)
    }
}

impl<S: SoundSink> AudioCues<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: SoundSink> GameObserver for AudioCues<S> {
    fn notify(&mut self, event: &GameEvent) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        if let Some(effect) = SoundEffect::for_event(event) {
            self.sink.play(effect, vol);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TargetValue;

    #[derive(Default)]
    struct Recorder(Vec<(SoundEffect, f32)>);

    impl SoundSink for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.push((effect, volume));
        }
    }

    #[test]
    fn test_events_map_to_cues() {
        let mut cues = AudioCues::new(Recorder::default());
        cues.notify(&GameEvent::Shot);
        cues.notify(&GameEvent::Miss);
        cues.notify(&GameEvent::Bullseye {
            value: TargetValue::V25,
            points: 50,
        });
        let effects: Vec<SoundEffect> = cues.sink().0.iter().map(|(e, _)| *e).collect();
        assert_eq!(effects, vec![SoundEffect::Shot, SoundEffect::Bullseye]);
        assert!((cues.sink().0[0].1 - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut cues = AudioCues::new(Recorder::default());
        cues.set_muted(true);
        cues.notify(&GameEvent::DryFire);
        assert!(cues.sink().0.is_empty());

        cues.set_muted(false);
        cues.notify(&GameEvent::DryFire);
        assert_eq!(cues.sink().0, vec![(SoundEffect::EmptyClick, 0.8)]);
    }

    #[test]
    fn test_master_volume_clamps() {
        let mut cues = AudioCues::new(Recorder::default());
        cues.set_master_volume(2.0);
        cues.notify(&GameEvent::Shot);
        cues.set_master_volume(0.0);
        cues.notify(&GameEvent::Shot);
        assert_eq!(cues.sink().0, vec![(SoundEffect::Shot, 1.0)]);
    }
}
