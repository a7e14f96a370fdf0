//! Tick-driven countdowns for quiz sections and the breaks between them.
//!
//! Only one countdown exists at a time. Every `start`/`stop` moves the timer to a
//! new [`TimerEpoch`]; a tick must present the epoch it was scheduled for, so ticks
//! belonging to an abandoned section or break are rejected as [`Tick::Stale`].

use std::fmt;

/// Generation counter for the active countdown.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerEpoch(u64);

impl TimerEpoch {
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Debug for TimerEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimerEpoch({})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownKind {
    Section,
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    kind: CountdownKind,
    remaining_secs: u32,
    expired: bool,
}

impl Countdown {
    #[must_use]
    pub fn kind(&self) -> CountdownKind {
        self.kind
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

/// Result of delivering one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Wrong epoch, nothing running, or already expired. Nothing changed.
    Stale,
    Running {
        kind: CountdownKind,
        remaining_secs: u32,
    },
    /// Reached zero on this tick. Reported exactly once per countdown.
    Expired(CountdownKind),
}

#[derive(Debug, Clone, Default)]
pub struct SectionTimer {
    epoch: TimerEpoch,
    active: Option<Countdown>,
}

impl SectionTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any running countdown with a fresh one of `secs` seconds.
    pub fn start(&mut self, kind: CountdownKind, secs: u32) -> TimerEpoch {
        self.epoch = self.epoch.next();
        self.active = Some(Countdown {
            kind,
            remaining_secs: secs,
            expired: false,
        });
        self.epoch
    }

    /// Cancel the running countdown; outstanding ticks become stale.
    pub fn stop(&mut self) {
        self.epoch = self.epoch.next();
        self.active = None;
    }

    pub fn tick(&mut self, epoch: TimerEpoch) -> Tick {
        if epoch != self.epoch {
            return Tick::Stale;
        }
        let Some(countdown) = self.active.as_mut() else {
            return Tick::Stale;
        };
        if countdown.expired {
            return Tick::Stale;
        }

        countdown.remaining_secs = countdown.remaining_secs.saturating_sub(1);
        if countdown.remaining_secs == 0 {
            countdown.expired = true;
            return Tick::Expired(countdown.kind);
        }
        Tick::Running {
            kind: countdown.kind,
            remaining_secs: countdown.remaining_secs,
        }
    }

    #[must_use]
    pub fn epoch(&self) -> TimerEpoch {
        self.epoch
    }

    #[must_use]
    pub fn active(&self) -> Option<Countdown> {
        self.active
    }

    /// True while a countdown is live and has not yet expired.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.is_some_and(|c| !c.expired)
    }

    /// Remaining seconds of the countdown of `kind`, if that is the active one.
    #[must_use]
    pub fn remaining(&self, kind: CountdownKind) -> Option<u32> {
        self.active
            .filter(|c| c.kind == kind)
            .map(|c| c.remaining_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_and_expires_once() {
        let mut timer = SectionTimer::new();
        let epoch = timer.start(CountdownKind::Break, 3);

        assert_eq!(
            timer.tick(epoch),
            Tick::Running {
                kind: CountdownKind::Break,
                remaining_secs: 2
            }
        );
        assert_eq!(
            timer.tick(epoch),
            Tick::Running {
                kind: CountdownKind::Break,
                remaining_secs: 1
            }
        );
        assert_eq!(timer.tick(epoch), Tick::Expired(CountdownKind::Break));
        assert_eq!(timer.tick(epoch), Tick::Stale);
        assert_eq!(timer.remaining(CountdownKind::Break), Some(0));
        assert!(!timer.is_running());
    }

    #[test]
    fn restart_invalidates_previous_epoch() {
        let mut timer = SectionTimer::new();
        let old = timer.start(CountdownKind::Section, 1);
        let new = timer.start(CountdownKind::Break, 30);

        assert_ne!(old, new);
        assert_eq!(timer.tick(old), Tick::Stale);
        assert_eq!(timer.remaining(CountdownKind::Break), Some(30));
        assert_eq!(timer.remaining(CountdownKind::Section), None);
    }

    #[test]
    fn stop_cancels_outstanding_ticks() {
        let mut timer = SectionTimer::new();
        let epoch = timer.start(CountdownKind::Section, 10);
        timer.stop();

        assert_eq!(timer.tick(epoch), Tick::Stale);
        assert_eq!(timer.tick(timer.epoch()), Tick::Stale);
        assert!(timer.active().is_none());
    }
}
