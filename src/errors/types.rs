//! Error type definitions for the sitemap generator

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Top-level application error type
///
/// Variants map onto the failure classes a run can surface. Only
/// [`AppError::Api`] is ever downgraded (secondary metaobject fetch of the
/// image run); everything else unwinds to the run driver.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request could not be sent, or the response body could not be decoded
    #[error("Transport error: {endpoint} - {message}")]
    Transport { endpoint: String, message: String },

    /// The API answered with a GraphQL error list
    #[error("API error: {endpoint} - {}", .messages.join("; "))]
    Api {
        endpoint: String,
        messages: Vec<String>,
    },

    /// No response arrived before the configured deadline
    #[error("Request timed out after {}: {endpoint}", format_after(.after))]
    Timeout { endpoint: String, after: Duration },

    /// The request was abandoned because the run was cancelled
    #[error("Request cancelled: {endpoint}")]
    Cancelled { endpoint: String },

    /// Writing the sitemap file failed
    #[error("Output error: {} - {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid settings or missing credentials
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The rendered document is not well-formed XML
    #[error("Invalid sitemap document: {message}")]
    InvalidDocument { message: String },
}

fn format_after(after: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*after)
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a transport error for an endpoint
    pub fn transport<E: Into<String>, M: Into<String>>(endpoint: E, message: M) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create an API error from the GraphQL error messages
    pub fn api<E: Into<String>>(endpoint: E, messages: Vec<String>) -> Self {
        Self::Api {
            endpoint: endpoint.into(),
            messages,
        }
    }

    /// Create a timeout error
    pub fn timeout<E: Into<String>>(endpoint: E, after: Duration) -> Self {
        Self::Timeout {
            endpoint: endpoint.into(),
            after,
        }
    }

    /// Create a cancellation error
    pub fn cancelled<E: Into<String>>(endpoint: E) -> Self {
        Self::Cancelled {
            endpoint: endpoint.into(),
        }
    }

    /// Create an output error for the file being written
    pub fn output<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid document error
    pub fn invalid_document<S: Into<String>>(message: S) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    /// True for GraphQL-level failures, the only class a caller may tolerate
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}
