//! Platform abstraction layer
//!
//! Ports the driver needs from its host:
//! - [`Clock`]: wall time and calendar date
//! - [`Scheduler`]: cancellable periodic and one-shot timers
//!
//! [`ManualScheduler`] steps time explicitly, used by the demo binary and tests.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

const MS_PER_DAY: u64 = 86_400_000;

// Port for retrieving the current time.
pub trait Clock {
    /// Milliseconds since the unix epoch
    fn now_ms(&self) -> u64;

    /// Calendar date in UTC as YYYY-MM-DD
    fn today(&self) -> String {
        civil_date(self.now_ms())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub now_ms: u64,
}

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

/// Format epoch milliseconds as a UTC calendar date
pub fn civil_date(epoch_ms: u64) -> String {
    // days-from-civil inverse, proleptic Gregorian
    let z = (epoch_ms / MS_PER_DAY) as i64 + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    format!("{year:04}-{month:02}-{day:02}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSpec {
    /// Fires every `n` ms until cancelled
    Every(u64),
    /// Fires once after `n` ms
    Once(u64),
}

// Port for timed callbacks. Fired ids are delivered back to the driver.
pub trait Scheduler {
    fn schedule(&mut self, spec: TimerSpec) -> TimerId;
    /// False if the timer already fired or was cancelled
    fn cancel(&mut self, id: TimerId) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    due: u64,
    period: Option<u64>,
}

/// Scheduler driven by explicit [`ManualScheduler::next_due`] calls
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: u64,
    next_id: u64,
    timers: BTreeMap<TimerId, Timer>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed scheduler time in ms
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Pop the earliest timer due at or before `until`, moving time to it.
    /// Periodic timers are re-armed, one-shots dropped. Ties fire in
    /// creation order. Returns None once nothing is due; see [`Self::settle`].
    pub fn next_due(&mut self, until: u64) -> Option<TimerId> {
        let (id, timer) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(id, t)| (t.due, **id))
            .map(|(id, t)| (*id, *t))?;

        self.now = self.now.max(timer.due);
        match timer.period {
            Some(period) => {
                if let Some(t) = self.timers.get_mut(&id) {
                    t.due += period.max(1);
                }
            }
            None => {
                self.timers.remove(&id);
            }
        }
        Some(id)
    }

    /// Fire everything due within `ms`, in order
    pub fn advance(&mut self, ms: u64) -> Vec<TimerId> {
        let until = self.now + ms;
        let fired: Vec<TimerId> = std::iter::from_fn(|| self.next_due(until)).collect();
        self.now = until;
        fired
    }

    /// Move time forward after draining with [`Self::next_due`]
    pub fn settle(&mut self, until: u64) {
        self.now = self.now.max(until);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, spec: TimerSpec) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let timer = match spec {
            TimerSpec::Every(ms) => Timer {
                due: self.now + ms,
                period: Some(ms),
            },
            TimerSpec::Once(ms) => Timer {
                due: self.now + ms,
                period: None,
            },
        };
        self.timers.insert(id, timer);
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }
}
