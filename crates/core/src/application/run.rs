// Batch Run Orchestration
// Availability check -> spawn worker pool -> discovery -> close -> barrier

use crate::application::discovery;
use crate::application::queue::job_queue;
use crate::application::worker::{ShutdownToken, Worker, WorkerTally};
use crate::domain::RunConfig;
use crate::error::{BatchError, Result};
use crate::port::DocumentService;
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info};

/// Aggregate statistics for one completed run.
///
/// Per-file failures land here instead of failing the run.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct RunSummary {
    /// Jobs handed to a worker
    pub submitted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Outputs that already existed before the run
    pub skipped: usize,
}

impl RunSummary {
    fn absorb(&mut self, tally: WorkerTally) {
        self.submitted += tally.succeeded + tally.failed + tally.skipped;
        self.succeeded += tally.succeeded;
        self.failed += tally.failed;
        self.skipped += tally.skipped;
    }
}

/// One batch run over a directory tree.
pub struct BatchRun {
    config: Arc<RunConfig>,
    service: Arc<dyn DocumentService>,
}

impl BatchRun {
    pub fn new(config: RunConfig, service: Arc<dyn DocumentService>) -> Self {
        Self {
            config: Arc::new(config),
            service,
        }
    }

    /// Execute the run to completion.
    ///
    /// Aborts before spawning any worker when the liveness probe fails.
    /// Returns only after every worker has exited, even when discovery
    /// finishes (or fails) first.
    pub async fn execute(&self, mut shutdown: ShutdownToken) -> Result<RunSummary> {
        self.service
            .is_alive()
            .await
            .map_err(BatchError::ServiceUnavailable)?;
        info!("GROBID service is up and running");

        let worker_count = self.config.worker_count.max(1);
        let (jobs_tx, jobs_rx) = job_queue(worker_count);

        // The pool is primed before discovery so jobs drain as they appear.
        let mut pool = JoinSet::new();
        for id in 1..=worker_count {
            let worker = Worker::new(id, Arc::clone(&self.config), Arc::clone(&self.service));
            let queue = jobs_rx.clone();
            let token = shutdown.clone();
            pool.spawn(async move { worker.run(queue, token).await });
        }
        // Workers hold the only receiver handles now; if every worker exits,
        // discovery observes a closed queue instead of blocking on a full one.
        drop(jobs_rx);

        let walked = discovery::discover(&self.config.input_dir, &jobs_tx, &mut shutdown).await;

        // Dropping the sender closes the queue; workers drain what is left
        // and exit, whatever the traversal verdict was.
        drop(jobs_tx);

        let mut summary = RunSummary::default();
        while let Some(joined) = pool.join_next().await {
            match joined {
                Ok(tally) => summary.absorb(tally),
                Err(err) => {
                    error!(%err, "worker task aborted");
                    return Err(BatchError::Internal(format!("worker task aborted: {err}")));
                }
            }
        }

        walked?;

        info!(
            submitted = summary.submitted,
            succeeded = summary.succeeded,
            failed = summary.failed,
            skipped = summary.skipped,
            "batch run complete"
        );
        Ok(summary)
    }
}
