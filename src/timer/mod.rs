//! Round countdown timer.
//!
//! `RoundTimer` runs a 1-second tick loop on a spawned task, independent
//! of the thread handling player selections. The timer knows nothing
//! about rounds or sessions: each elapsed second it invokes a callback,
//! and the callback decides whether the countdown continues. Pausing
//! parks the loop on a watch channel without consuming remaining time;
//! resuming restarts the interval so a full second elapses before the
//! next tick.
//!
//! The task stops itself when the callback returns `Stop` (the round
//! ended) and is aborted by `cancel` or by dropping the timer, so a
//! stale countdown can never outlive its round.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::error::EngineError;

/// Whether the countdown keeps running after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep ticking.
    Continue,
    /// The round is over; stop the task.
    Stop,
}

/// Handle to a running countdown task.
pub struct RoundTimer {
    paused: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl RoundTimer {
    /// Spawn the countdown task on the current tokio runtime.
    ///
    /// `on_tick` runs once per elapsed (unpaused) second. Fails with
    /// `EngineError::Scheduler` when called outside a runtime.
    pub fn spawn<F>(mut on_tick: F) -> Result<Self, EngineError>
    where
        F: FnMut() -> TickOutcome + Send + 'static,
    {
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| EngineError::Scheduler)?;
        let (paused, mut paused_rx) = watch::channel(false);

        let task = runtime.spawn(async move {
            let mut ticker = interval(Duration::from_secs(1));
            // A tick that fires late must not be followed by a catch-up
            // burst; the next one waits a full second again.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first interval tick completes immediately.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                if *paused_rx.borrow_and_update() {
                    // Park until resumed. Ticks that would have fired in
                    // the meantime are discarded, not queued.
                    loop {
                        if paused_rx.changed().await.is_err() {
                            return;
                        }
                        if !*paused_rx.borrow_and_update() {
                            break;
                        }
                    }
                    ticker.reset();
                    continue;
                }

                if on_tick() == TickOutcome::Stop {
                    return;
                }
            }
        });

        Ok(Self { paused, task })
    }

    /// Suspend ticking without consuming remaining time.
    pub fn pause(&self) {
        let _ = self.paused.send(true);
    }

    /// Restart ticking from the current remaining time.
    pub fn resume(&self) {
        let _ = self.paused.send(false);
    }

    /// Abort the countdown task.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Has the task finished (stopped itself or been aborted)?
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for RoundTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
