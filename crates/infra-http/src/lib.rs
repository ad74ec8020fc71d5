// grobid-batch Infrastructure - HTTP Adapter
// Implements: DocumentService over reqwest

pub mod client;
pub mod endpoint;

pub use client::GrobidClient;
pub use endpoint::Endpoint;
