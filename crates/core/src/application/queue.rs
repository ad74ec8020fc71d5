// Job Queue - single-producer, multi-consumer channel with close semantics

use crate::domain::Job;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Sending half, held by discovery. Dropping it closes the queue.
pub struct JobSender {
    tx: mpsc::Sender<Job>,
}

impl JobSender {
    /// Enqueue one job, suspending while the queue is full.
    ///
    /// Returns false when every receiver is gone (all workers exited).
    pub async fn send(&self, job: Job) -> bool {
        self.tx.send(job).await.is_ok()
    }
}

/// Receiving half, shared by the worker pool.
///
/// Each job is delivered to exactly one worker; once the sender is dropped
/// and the buffer drains, every receiver observes end-of-stream.
#[derive(Clone)]
pub struct JobReceiver {
    rx: Arc<Mutex<mpsc::Receiver<Job>>>,
}

impl JobReceiver {
    /// Take the next job, or None once the queue is closed and empty.
    pub async fn recv(&self) -> Option<Job> {
        self.rx.lock().await.recv().await
    }
}

/// Create a bounded job queue.
pub fn job_queue(capacity: usize) -> (JobSender, JobReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        JobSender { tx },
        JobReceiver {
            rx: Arc::new(Mutex::new(rx)),
        },
    )
}
