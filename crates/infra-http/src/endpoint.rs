// Service Endpoint Configuration

const HOST_ENV: &str = "GROBID_HOST";
const PORT_ENV: &str = "GROBID_PORT";
const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: &str = "8070";

/// Base location of the GROBID API, fixed for the lifetime of a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base_url: String,
}

impl Endpoint {
    /// Endpoint for an explicit host and port.
    pub fn new(host: impl AsRef<str>, port: impl AsRef<str>) -> Self {
        Self {
            base_url: format!("http://{}:{}/api/", host.as_ref(), port.as_ref()),
        }
    }

    /// Endpoint from `GROBID_HOST` / `GROBID_PORT`, defaulting to
    /// `localhost:8070`.
    pub fn from_env() -> Self {
        let host = std::env::var(HOST_ENV).unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = std::env::var(PORT_ENV).unwrap_or_else(|_| DEFAULT_PORT.to_string());
        Self::new(host, port)
    }

    /// Full URL for a path under the API base.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
