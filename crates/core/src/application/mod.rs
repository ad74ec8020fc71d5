// Application Layer - Batch run orchestration

pub mod discovery;
pub mod queue;
pub mod run;
pub mod worker;


// Re-exports
pub use queue::{job_queue, JobReceiver, JobSender};
pub use run::{BatchRun, RunSummary};
pub use worker::{shutdown_channel, ShutdownSender, ShutdownToken, Worker, WorkerTally};
