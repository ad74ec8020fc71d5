// File Discovery - recursive walk feeding the job queue

use crate::application::queue::JobSender;
use crate::application::worker::ShutdownToken;
use crate::domain::Job;
use crate::error::Result;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Selection rule: exactly the `.pdf` and `.PDF` suffixes, nothing else.
pub fn is_pdf(file_name: &str) -> bool {
    file_name.ends_with(".pdf") || file_name.ends_with(".PDF")
}

/// Walk `input_dir` and emit a Job for every matching non-directory entry.
///
/// Directories produce no job; traversal continues into them without
/// following symlinks. Any traversal error is fatal for the whole run.
/// Sending suspends while the queue is full, which throttles discovery to
/// the pace of consumption.
pub async fn discover(
    input_dir: &Path,
    jobs: &JobSender,
    shutdown: &mut ShutdownToken,
) -> Result<()> {
    for entry in WalkDir::new(input_dir).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !is_pdf(&file_name) {
            continue;
        }

        let job = Job::new(entry.path(), file_name.as_ref());
        debug!(path = %job.source_path.display(), "discovered input file");

        tokio::select! {
            sent = jobs.send(job) => {
                if !sent {
                    // every worker is gone, nothing left to feed
                    break;
                }
            }
            _ = shutdown.wait() => {
                info!("discovery interrupted by shutdown");
                break;
            }
        }
    }

    Ok(())
}
