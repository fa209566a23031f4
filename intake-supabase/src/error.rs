//! Error types for the Supabase adapter.

use intake_types::RemoteError;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A required configuration section is not configured.
    #[error("Configuration section '{section}' is not configured (missing required fields)")]
    NotConfigured { section: String },

    /// The project URL does not parse.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Errors from talking to Supabase.
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The request never got a response.
    #[error("HTTP error on {endpoint}: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Supabase answered with a non-2xx status.
    #[error("Supabase returned {status} on {endpoint}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// The response body was not what the endpoint documents.
    #[error("Failed to decode response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}

impl From<SupabaseError> for RemoteError {
    fn from(err: SupabaseError) -> Self {
        match err {
            SupabaseError::Api { status, message, .. } => RemoteError::rejected(status, message),
            SupabaseError::Http { source, .. } => RemoteError::Transport(source.to_string()),
            other => RemoteError::unexpected(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_become_rejections() {
        let err = SupabaseError::Api {
            endpoint: "POST /rest/v1/signups".into(),
            status: 409,
            message: "duplicate key".into(),
        };
        let remote = RemoteError::from(err);
        assert!(matches!(remote, RemoteError::Rejected { status: 409, ref message } if message == "duplicate key"));
    }

    #[test]
    fn decode_errors_are_unexpected() {
        let err = SupabaseError::Decode {
            endpoint: "POST /auth/v1/verify".into(),
            reason: "missing user".into(),
        };
        assert!(RemoteError::from(err).is_unexpected());
    }
}
