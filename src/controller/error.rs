// ABOUTME: Controller error types with SNAFU pattern.
// ABOUTME: Every non-success exchange with the MAAS API surfaces as one of these.

use snafu::Snafu;
use std::time::Duration;

/// Failure of a single call to the provisioning controller.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ControllerError {
    #[snafu(display("invalid controller URL {url}: {reason}"))]
    InvalidUrl { url: String, reason: String },

    #[snafu(display("failed to connect to {authority}: {source}"))]
    Connect {
        authority: String,
        source: std::io::Error,
    },

    #[snafu(display("{method} {path} timed out after {timeout:?}"))]
    Timeout {
        method: String,
        path: String,
        timeout: Duration,
    },

    #[snafu(display("HTTP exchange for {path} failed: {source}"))]
    Http { path: String, source: hyper::Error },

    #[snafu(display("failed to build request for {path}: {source}"))]
    Request {
        path: String,
        source: hyper::http::Error,
    },

    #[snafu(display("{method} {path} returned {status}: {body}"))]
    Status {
        method: String,
        path: String,
        status: u16,
        body: String,
    },

    #[snafu(display("failed to decode response from {path}: {source}"))]
    Decode {
        path: String,
        source: serde_json::Error,
    },
}

impl ControllerError {
    /// HTTP status code when the controller answered with a non-2xx response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ControllerError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
