// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Audit Error Types
 * Separates adapter faults from configuration faults; findings are never errors
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use thiserror::Error;
use std::time::Duration;

/// Main harness error type. Any of these aborts a run under the default fault policy.
#[derive(Error, Debug)]
pub enum AuditError {
    /// Raised by the target adapter itself (network, protocol)
    #[error("Adapter error: {0}")]
    Adapter(#[from] AdapterError),

    /// A freshly issued token did not validate; nothing can be inferred from further tests
    #[error("Supplied creds did not yield valid session token (identity #{identity}).")]
    InvalidSession {
        identity: usize,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Faults raised by target adapters
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Connection to {url} failed: {reason}")]
    Connection {
        url: String,
        reason: String,
    },

    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout {
        url: String,
        timeout: Duration,
    },

    #[error("HTTP {status_code} from {url}")]
    UnexpectedStatus {
        status_code: u16,
        url: String,
    },

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Credential is missing field '{0}'")]
    MissingField(String),

    #[error("Adapter error: {0}")]
    Other(String),
}

impl AdapterError {
    /// Whether the fault came from the transport rather than the target's answer
    pub fn is_transport(&self) -> bool {
        matches!(self, AdapterError::Connection { .. } | AdapterError::Timeout { .. })
    }
}

impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());

        if err.is_timeout() {
            AdapterError::Timeout {
                url,
                timeout: Duration::ZERO,
            }
        } else if err.is_connect() {
            AdapterError::Connection {
                url,
                reason: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            AdapterError::UnexpectedStatus {
                status_code: status.as_u16(),
                url,
            }
        } else {
            AdapterError::Other(err.to_string())
        }
    }
}

/// Result type alias for harness operations
pub type AuditResult<T> = Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuditError::InvalidSession { identity: 0 };
        assert!(err.to_string().contains("did not yield valid session token"));

        let err = AuditError::Configuration("credential set is empty".to_string());
        assert_eq!(err.to_string(), "Configuration error: credential set is empty");
    }

    #[test]
    fn test_adapter_error_conversion() {
        let adapter_err = AdapterError::Protocol("unexpected login page".to_string());
        let err: AuditError = adapter_err.into();
        assert!(matches!(err, AuditError::Adapter(_)));
        assert_eq!(err.to_string(), "Adapter error: Protocol error: unexpected login page");
    }

    #[test]
    fn test_transport_classification() {
        let timeout = AdapterError::Timeout {
            url: "http://127.0.0.1/login".to_string(),
            timeout: Duration::from_secs(30),
        };
        assert!(timeout.is_transport());
        assert!(!AdapterError::MissingField("user".to_string()).is_transport());
    }
}
