// grobid-batch Core - Dispatch Logic & Ports
// NO infrastructure dependencies: the HTTP adapter lives in its own crate

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{BatchError, JobError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
