//! Status poller for runs submitted in the background.
//!
//! The poller is a plain state machine driven by the dashboard loop: the loop
//! calls [`RunPoller::tick`] with the current time and dispatches a status
//! fetch whenever one comes due. It never sleeps or spawns anything itself,
//! which keeps it deterministic under test.

use std::time::{Duration, Instant};

/// Percentage shown while a run is in flight; never reaches 100 until the
/// API reports a terminal status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunProgress(u8);

impl RunProgress {
    /// Step added for every `running` response.
    pub const STEP: u8 = 10;
    /// Ceiling while the run is not terminal.
    pub const IN_FLIGHT_CAP: u8 = 90;

    pub fn percent(&self) -> u8 {
        self.0
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }

    /// Advance by one step, capped below completion.
    pub fn advance(&mut self) {
        self.0 = self.0.saturating_add(Self::STEP).min(Self::IN_FLIGHT_CAP);
    }

    pub fn complete(&mut self) {
        self.0 = 100;
    }

    pub fn as_ratio(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

/// Lifecycle of the poller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Polling {
        run_id: String,
        next_due: Instant,
        in_flight: bool,
    },
    /// Stopped on a terminal status or after a failed fetch.
    Terminal { run_id: String, abandoned: bool },
}

#[derive(Debug, Clone)]
pub struct RunPoller {
    interval: Duration,
    state: PollerState,
}

impl RunPoller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: PollerState::Idle,
        }
    }

    pub fn state(&self) -> &PollerState {
        &self.state
    }

    pub fn is_polling(&self) -> bool {
        matches!(self.state, PollerState::Polling { .. })
    }

    /// The run being polled, if any.
    pub fn active_run(&self) -> Option<&str> {
        match &self.state {
            PollerState::Polling { run_id, .. } => Some(run_id),
            _ => None,
        }
    }

    /// Start polling `run_id`. Any previous poll is dropped; its late
    /// responses no longer match [`Self::active_run`].
    pub fn start(&mut self, run_id: impl Into<String>, now: Instant) {
        self.state = PollerState::Polling {
            run_id: run_id.into(),
            next_due: now + self.interval,
            in_flight: false,
        };
    }

    /// Returns the run to fetch if a tick is due.
    ///
    /// A tick that comes due while the previous fetch is unresolved is
    /// skipped rather than queued.
    pub fn tick(&mut self, now: Instant) -> Option<String> {
        let interval = self.interval;
        let PollerState::Polling {
            run_id,
            next_due,
            in_flight,
        } = &mut self.state
        else {
            return None;
        };

        if now < *next_due {
            return None;
        }
        while *next_due <= now {
            *next_due += interval;
        }
        if *in_flight {
            return None;
        }
        *in_flight = true;
        Some(run_id.clone())
    }

    /// Record that the fetch for `run_id` resolved.
    ///
    /// Returns false if the response belongs to a poll that is no longer
    /// active and must be discarded.
    pub fn resolve(&mut self, run_id: &str) -> bool {
        match &mut self.state {
            PollerState::Polling {
                run_id: active,
                in_flight,
                ..
            } if active == run_id => {
                *in_flight = false;
                true
            }
            _ => false,
        }
    }

    /// Stop after a terminal status.
    pub fn finish(&mut self) {
        if let Some(run_id) = self.active_run().map(str::to_string) {
            self.state = PollerState::Terminal {
                run_id,
                abandoned: false,
            };
        }
    }

    /// Stop after a failed fetch.
    pub fn abandon(&mut self) {
        if let Some(run_id) = self.active_run().map(str::to_string) {
            self.state = PollerState::Terminal {
                run_id,
                abandoned: true,
            };
        }
    }

    /// Drop the poll entirely, e.g. when the dashboard closes.
    pub fn cancel(&mut self) {
        self.state = PollerState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(2000);

    #[test]
    fn test_progress_advances_by_ten_and_caps_at_ninety() {
        let mut progress = RunProgress::default();
        let mut seen = Vec::new();
        for _ in 0..12 {
            progress.advance();
            seen.push(progress.percent());
        }
        assert_eq!(seen, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 90, 90, 90]);
        progress.complete();
        assert_eq!(progress.percent(), 100);
        progress.reset();
        assert_eq!(progress.percent(), 0);
        progress.advance();
        assert_eq!(progress.percent(), 10);
    }

    #[test]
    fn test_idle_poller_never_fires() {
        let mut poller = RunPoller::new(INTERVAL);
        assert_eq!(poller.tick(Instant::now() + INTERVAL * 10), None);
        assert!(!poller.is_polling());
    }

    #[test]
    fn test_first_tick_fires_after_one_interval() {
        let t0 = Instant::now();
        let mut poller = RunPoller::new(INTERVAL);
        poller.start("abc", t0);

        assert_eq!(poller.tick(t0), None);
        assert_eq!(poller.tick(t0 + Duration::from_millis(1999)), None);
        assert_eq!(poller.tick(t0 + INTERVAL), Some("abc".to_string()));
    }

    #[test]
    fn test_tick_skipped_while_fetch_in_flight() {
        let t0 = Instant::now();
        let mut poller = RunPoller::new(INTERVAL);
        poller.start("abc", t0);

        assert!(poller.tick(t0 + INTERVAL).is_some());
        assert_eq!(poller.tick(t0 + INTERVAL * 2), None);

        assert!(poller.resolve("abc"));
        // Missed tick is not replayed; next one fires on schedule.
        assert_eq!(poller.tick(t0 + INTERVAL * 2 + Duration::from_millis(10)), None);
        assert_eq!(poller.tick(t0 + INTERVAL * 3), Some("abc".to_string()));
    }

    #[test]
    fn test_late_wakeup_fires_once() {
        let t0 = Instant::now();
        let mut poller = RunPoller::new(INTERVAL);
        poller.start("abc", t0);

        assert!(poller.tick(t0 + INTERVAL * 5).is_some());
        poller.resolve("abc");
        assert_eq!(poller.tick(t0 + INTERVAL * 5), None);
        assert!(poller.tick(t0 + INTERVAL * 6).is_some());
    }

    #[test]
    fn test_resolve_rejects_stale_run() {
        let t0 = Instant::now();
        let mut poller = RunPoller::new(INTERVAL);
        poller.start("old", t0);
        poller.tick(t0 + INTERVAL);
        poller.start("new", t0 + INTERVAL);

        assert!(!poller.resolve("old"));
        assert_eq!(poller.active_run(), Some("new"));
    }

    #[test]
    fn test_finish_and_abandon_stop_polling() {
        let t0 = Instant::now();
        let mut poller = RunPoller::new(INTERVAL);
        poller.start("abc", t0);
        poller.finish();
        assert_eq!(
            poller.state(),
            &PollerState::Terminal {
                run_id: "abc".to_string(),
                abandoned: false
            }
        );
        assert_eq!(poller.tick(t0 + INTERVAL * 3), None);

        poller.start("def", t0);
        poller.abandon();
        assert_eq!(
            poller.state(),
            &PollerState::Terminal {
                run_id: "def".to_string(),
                abandoned: true
            }
        );
        assert!(!poller.resolve("def"));
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut poller = RunPoller::new(INTERVAL);
        poller.start("abc", Instant::now());
        poller.cancel();
        assert_eq!(poller.state(), &PollerState::Idle);
        assert_eq!(poller.active_run(), None);
    }
}
