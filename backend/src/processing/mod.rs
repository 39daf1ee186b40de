//! Deferred status transitions for the bulk processing endpoint.
//!
//! `POST /api/process-all` moves every pending item into `processing`
//! synchronously, then hands the same ids to this worker. The worker waits a
//! fixed delay and marks them `completed`, standing in for a real processing
//! pipeline.
//!
//! The main components are:
//! - `ProcessingQueue`: a clonable handle request handlers use to schedule
//!   completion jobs. It is injected into the Actix application state in
//!   `main.rs`.
//! - `CompletionJob`: the message carrying the ids to complete.
//! - `start_completion_worker`: a long-running task, spawned once from
//!   `main`, that owns every pending timer. Aborting it cancels the timers,
//!   which ties the deferred transitions to process lifetime: if the process
//!   exits before a delay elapses, the affected items stay in `processing`.

use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use common::model::content::ContentStatus;

use crate::model::ContentModel;

/// Delay between the `processing` and `completed` transitions.
pub const COMPLETION_DELAY: Duration = Duration::from_secs(3);

/// Ids scheduled for completion after the fixed delay.
#[derive(Debug)]
pub struct CompletionJob {
    pub ids: Vec<String>,
}

/// Clonable handle used by request handlers to queue completion jobs.
#[derive(Clone)]
pub struct ProcessingQueue {
    tx: mpsc::Sender<CompletionJob>,
}

impl ProcessingQueue {
    pub fn new(tx: mpsc::Sender<CompletionJob>) -> Self {
        Self { tx }
    }

    /// Queues `ids` for completion. Delivery is best-effort: when the worker
    /// is gone the items simply stay in `processing`.
    pub async fn schedule(&self, ids: Vec<String>) {
        if self.tx.send(CompletionJob { ids }).await.is_err() {
            log::warn!("completion worker is not running; items stay in processing");
        }
    }
}

/// Runs until the sender side is dropped. Each job gets its own timer inside
/// the worker's `JoinSet`, so jobs scheduled close together complete
/// independently rather than queueing behind one another.
pub async fn start_completion_worker(model: ContentModel, mut rx: mpsc::Receiver<CompletionJob>) {
    let mut timers = JoinSet::new();

    loop {
        tokio::select! {
            received = rx.recv() => match received {
                Some(job) => {
                    timers.spawn(complete_after_delay(model.clone(), job));
                }
                None => break,
            },
            Some(_) = timers.join_next(), if !timers.is_empty() => {}
        }
    }

    while timers.join_next().await.is_some() {}
}

async fn complete_after_delay(model: ContentModel, job: CompletionJob) {
    tokio::time::sleep(COMPLETION_DELAY).await;

    let updates = job
        .ids
        .iter()
        .map(|id| model.update_content_status(id, ContentStatus::Completed));
    for (id, result) in job.ids.iter().zip(join_all(updates).await) {
        if let Err(err) = result {
            log::warn!("failed to complete content {id}: {err}");
        }
    }
}
