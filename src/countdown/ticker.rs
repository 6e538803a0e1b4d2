//! Periodic countdown recomputation
//!
//! The ticker's task lives exactly as long as the [`CountdownTicker`] value:
//! dropping the ticker aborts it.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::clock::Clock;
use super::remaining::{time_remaining, TimeRemaining};

/// Recompute cadence for a displayed countdown
pub const COUNTDOWN_CADENCE: Duration = Duration::from_secs(1);

pub struct CountdownTicker {
    target: Option<DateTime<Utc>>,
    receiver: watch::Receiver<TimeRemaining>,
    handle: JoinHandle<()>,
}

impl CountdownTicker {
    /// Start ticking at [`COUNTDOWN_CADENCE`]. Must be called within a Tokio
    /// runtime.
    pub fn start(target: Option<DateTime<Utc>>, clock: Arc<dyn Clock>) -> Self {
        Self::with_cadence(target, clock, COUNTDOWN_CADENCE)
    }

    pub fn with_cadence(
        target: Option<DateTime<Utc>>,
        clock: Arc<dyn Clock>,
        cadence: Duration,
    ) -> Self {
        let (sender, receiver) = watch::channel(time_remaining(target, clock.now()));

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(cadence);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            // The first tick completes immediately; the initial value is
            // already published.
            interval.tick().await;

            loop {
                interval.tick().await;

                let remaining = time_remaining(target, clock.now());
                sender.send_if_modified(|current| {
                    if *current == remaining {
                        false
                    } else {
                        *current = remaining;
                        true
                    }
                });
            }
        });

        tracing::debug!(surgery_at = ?target, "Countdown ticker started");

        Self {
            target,
            receiver,
            handle,
        }
    }

    pub fn target(&self) -> Option<DateTime<Utc>> {
        self.target
    }

    /// Latest computed value
    pub fn current(&self) -> TimeRemaining {
        *self.receiver.borrow()
    }

    /// Receiver notified whenever the value changes. Reports closed once the
    /// ticker is dropped.
    pub fn subscribe(&self) -> watch::Receiver<TimeRemaining> {
        self.receiver.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!(surgery_at = ?self.target, "Countdown ticker stopped");
    }
}
