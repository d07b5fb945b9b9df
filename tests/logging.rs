//! Logging tests.
//!
//! These tests capture the scheduler's log output and check what a failed
//! or successful cycle reports.

mod support;

use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing_subscriber::fmt::MakeWriter;

use rancher_ecr_sync::error::RancherError;
use rancher_ecr_sync::{Reconcile, Result, Schedule, Scheduler, State, SyncOutcome};

use crate::support::*;

/// In-memory log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

struct Failing;

#[async_trait]
impl Reconcile for Failing {
    async fn reconcile(&self) -> Result<SyncOutcome> {
        Err(RancherError::ProjectNotFound("Default".into()).into())
    }
}

struct Succeeding;

#[async_trait]
impl Reconcile for Succeeding {
    async fn reconcile(&self) -> Result<SyncOutcome> {
        Ok(SyncOutcome::Created)
    }
}

fn capture() -> (Captured, tracing::subscriber::DefaultGuard) {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_ansi(false)
        .without_time()
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (captured, guard)
}

#[tokio::test]
async fn test_failed_cycle_logs_error_before_retry_notice() {
    let (captured, _guard) = capture();
    let mut scheduler = Scheduler::new(Failing, RecordingSleeper::default(), Schedule::default());

    assert!(matches!(scheduler.step().await, State::Idle(_)));

    let logs = captured.contents();
    let started = logs.find("starting worker").expect("start line");
    let error = logs.find("project not found: Default").expect("error line");
    let retry = logs
        .find("worker will rerun in 2 minutes")
        .expect("retry line");

    assert!(started < error, "start should precede error:\n{}", logs);
    assert!(error < retry, "error should precede retry notice:\n{}", logs);
    assert!(logs.contains("ERROR"), "error should be logged at ERROR:\n{}", logs);
}

#[tokio::test]
async fn test_successful_cycle_logs_next_run() {
    let (captured, _guard) = capture();
    let mut scheduler = Scheduler::new(Succeeding, RecordingSleeper::default(), Schedule::default());

    scheduler.step().await;

    let logs = captured.contents();
    assert!(logs.contains("next run in 6 hours"), "got:\n{}", logs);
    assert!(!logs.contains("ERROR"), "got:\n{}", logs);
    assert!(!logs.contains("rerun"), "got:\n{}", logs);
}
