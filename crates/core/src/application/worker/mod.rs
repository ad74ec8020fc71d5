// Worker - job consumption loop and the per-job submit-and-save operation

mod shutdown;

pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};

use crate::application::queue::JobReceiver;
use crate::domain::{Job, RunConfig};
use crate::error::JobError;
use crate::port::DocumentService;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::{error, info, warn};

/// Per-worker tally, merged into the run summary at the barrier.
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkerTally {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// One concurrent execution unit pulling jobs until the queue closes.
///
/// Workers share nothing mutable beyond the queue; configuration and the
/// service handle are read-only after construction.
pub struct Worker {
    id: usize,
    config: Arc<RunConfig>,
    service: Arc<dyn DocumentService>,
}

impl Worker {
    pub fn new(id: usize, config: Arc<RunConfig>, service: Arc<dyn DocumentService>) -> Self {
        Self {
            id,
            config,
            service,
        }
    }

    /// Run the consumption loop until the queue closes or shutdown fires.
    ///
    /// Jobs are handled one at a time; a job taken before shutdown is
    /// always carried through to its outcome.
    pub async fn run(&self, queue: JobReceiver, mut shutdown: ShutdownToken) -> WorkerTally {
        let mut tally = WorkerTally::default();

        loop {
            if shutdown.is_shutdown() {
                info!(worker = self.id, "worker shutting down");
                break;
            }

            let job = tokio::select! {
                job = queue.recv() => match job {
                    Some(job) => job,
                    // queue closed and drained
                    None => break,
                },
                _ = shutdown.wait() => {
                    info!(worker = self.id, "worker interrupted while idle");
                    break;
                }
            };

            info!(worker = self.id, file = %job.source_path.display(), "started job");
            match self.submit_and_save(&job).await {
                Ok(()) => {
                    tally.succeeded += 1;
                    info!(worker = self.id, file = %job.source_path.display(), "finished job");
                }
                Err(err) if err.is_already_exists() => {
                    tally.skipped += 1;
                    warn!(worker = self.id, %err, "skipped job");
                }
                Err(err) => {
                    tally.failed += 1;
                    error!(worker = self.id, %err, "job failed");
                }
            }
        }

        tally
    }

    /// Submit one file to the remote service and persist the response.
    ///
    /// Exactly one attempt; every failure here is a per-job error that
    /// leaves the rest of the run untouched.
    async fn submit_and_save(&self, job: &Job) -> std::result::Result<(), JobError> {
        let out_path = job.output_path(&self.config.output_dir);

        // Idempotent re-run: an existing artifact means skip, before any
        // network traffic.
        if tokio::fs::try_exists(&out_path).await.unwrap_or(false) {
            return Err(JobError::OutputExists(out_path));
        }

        let payload = tokio::fs::read(&job.source_path)
            .await
            .map_err(|source| JobError::SourceOpen {
                path: job.source_path.clone(),
                source,
            })?;

        let body = self
            .service
            .process_document(self.config.service, &job.file_name, payload)
            .await
            .map_err(|source| JobError::Upload {
                file_name: job.file_name.clone(),
                source,
            })?;

        let mut out = tokio::fs::File::create(&out_path)
            .await
            .map_err(|source| JobError::OutputCreate {
                path: out_path.clone(),
                source,
            })?;
        out.write_all(&body)
            .await
            .map_err(|source| JobError::OutputWrite {
                path: out_path.clone(),
                source,
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GrobidService;
    use crate::port::document_service::mocks::MockDocumentService;
    use std::fs;
    use std::path::Path;

    fn test_worker(output_dir: &Path, service: Arc<MockDocumentService>) -> Worker {
        let config = RunConfig::new("/unused", output_dir, GrobidService::FullTextDocument);
        Worker::new(1, Arc::new(config), service)
    }

    #[tokio::test]
    async fn writes_the_response_body_verbatim() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let src = input.path().join("paper.pdf");
        fs::write(&src, b"%PDF-1.4").unwrap();

        let mock = Arc::new(MockDocumentService::new(b"<TEI>x</TEI>".to_vec()));
        let worker = test_worker(output.path(), mock.clone());

        worker
            .submit_and_save(&Job::new(&src, "paper.pdf"))
            .await
            .unwrap();

        assert_eq!(
            fs::read(output.path().join("paper.pdf.tei.xml")).unwrap(),
            b"<TEI>x</TEI>"
        );
        assert_eq!(mock.uploads(), ["paper.pdf"]);
    }

    #[tokio::test]
    async fn existing_output_short_circuits_before_any_upload() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let src = input.path().join("paper.pdf");
        fs::write(&src, b"%PDF-1.4").unwrap();
        fs::write(output.path().join("paper.pdf.tei.xml"), b"OLD").unwrap();

        let mock = Arc::new(MockDocumentService::new(b"NEW".to_vec()));
        let worker = test_worker(output.path(), mock.clone());

        let err = worker
            .submit_and_save(&Job::new(&src, "paper.pdf"))
            .await
            .unwrap_err();

        assert!(err.is_already_exists());
        assert_eq!(mock.upload_count(), 0, "no upload may be attempted");
        assert_eq!(
            fs::read(output.path().join("paper.pdf.tei.xml")).unwrap(),
            b"OLD"
        );
    }

    #[tokio::test]
    async fn missing_source_is_a_per_job_error() {
        let output = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockDocumentService::new(Vec::new()));
        let worker = test_worker(output.path(), mock.clone());

        let err = worker
            .submit_and_save(&Job::new("/nonexistent/paper.pdf", "paper.pdf"))
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::SourceOpen { .. }));
        assert_eq!(mock.upload_count(), 0);
    }

    #[tokio::test]
    async fn failed_upload_leaves_no_artifact() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let src = input.path().join("paper.pdf");
        fs::write(&src, b"%PDF-1.4").unwrap();

        let mock = Arc::new(MockDocumentService::new(b"body".to_vec()).fail_on("paper.pdf"));
        let worker = test_worker(output.path(), mock);

        let err = worker
            .submit_and_save(&Job::new(&src, "paper.pdf"))
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::Upload { .. }));
        assert!(!output.path().join("paper.pdf.tei.xml").exists());
    }
}
