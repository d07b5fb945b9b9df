//! Reconcile loop.
//!
//! The loop is a two-state machine. It starts in [`State::Running`]; every
//! pass, successful or not, moves it to [`State::Idle`] with a delay picked
//! from the [`Schedule`]; the sleep elapsing moves it back to running. There
//! is no terminal state. Sleeping goes through [`Sleeper`] so tests can run
//! cycles without waiting.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info};

use crate::core::config::Schedule;
use crate::core::sync::Reconcile;
use crate::core::types::SyncOutcome;

/// Waits out the interval between cycles.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// A reconcile pass is due.
    Running,
    /// Waiting for the given delay before the next pass.
    Idle(Duration),
}

/// Drives a [`Reconcile`] forever.
pub struct Scheduler<R, S> {
    reconciler: R,
    sleeper: S,
    schedule: Schedule,
    state: State,
}

impl<R: Reconcile, S: Sleeper> Scheduler<R, S> {
    pub fn new(reconciler: R, sleeper: S, schedule: Schedule) -> Self {
        Self {
            reconciler,
            sleeper,
            schedule,
            state: State::Running,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Perform one transition and return the new state.
    pub async fn step(&mut self) -> State {
        self.state = match self.state {
            State::Running => State::Idle(self.run_once().await),
            State::Idle(delay) => {
                self.sleeper.sleep(delay).await;
                State::Running
            }
        };
        self.state
    }

    /// Run forever.
    pub async fn run(mut self) {
        loop {
            self.step().await;
        }
    }

    /// One reconcile pass. Returns the delay before the next one.
    async fn run_once(&self) -> Duration {
        info!("starting worker");

        match self.reconciler.reconcile().await {
            Ok(outcome) => {
                let delay = self.schedule.refresh;
                info!(
                    outcome = outcome_name(outcome),
                    "worker finished, next run in {}",
                    describe(delay)
                );
                delay
            }
            Err(e) => {
                let delay = self.schedule.retry;
                error!("{}", e);
                info!("worker will rerun in {}", describe(delay));
                delay
            }
        }
    }
}

fn outcome_name(outcome: SyncOutcome) -> &'static str {
    match outcome {
        SyncOutcome::Created => "created",
        SyncOutcome::Updated => "updated",
    }
}

/// Human-friendly rendering of a whole-minute or whole-hour delay.
fn describe(delay: Duration) -> String {
    let secs = delay.as_secs();
    if secs >= 3600 && secs % 3600 == 0 {
        format!("{} hours", secs / 3600)
    } else if secs >= 60 && secs % 60 == 0 {
        format!("{} minutes", secs / 60)
    } else {
        format!("{} seconds", secs)
    }
}
