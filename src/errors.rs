//! Error types for the wallet-adapter-rs library.
//!
//! This module defines the error taxonomy for wallet discovery and connection
//! operations.

use crate::types::WalletId;
use thiserror::Error;

/// Main error type for wallet adapter operations.
///
/// Only [`connect`](crate::adapter::WalletAdapter::connect) and
/// [`actor`](crate::adapter::WalletAdapter::actor) surface these to callers.
/// The advisory queries (`is_installed`, `is_connected`, `principal`,
/// `disconnect`) collapse every internal fault to a safe default instead.
#[derive(Error, Debug)]
pub enum WalletError {
    /// No injected provider matched the brand and no deep-link path applies
    #[error("no injected provider found for {0}")]
    ProviderUnavailable(WalletId),

    /// The end user explicitly rejected the authorization prompt.
    ///
    /// Raised from the active-request strategy on rejection code 4001 and
    /// never retried.
    #[error("connection request rejected by the user")]
    UserRejected,

    /// Retries exhausted without any provider returning a non-empty account list
    #[error("no account authorized after {attempts} attempts")]
    NoAccount {
        /// How many full strategy-ladder attempts ran before giving up
        attempts: u32,
    },

    /// Mobile deep-link navigation was initiated instead of an in-page connect.
    ///
    /// A control-flow signal, not a true failure: the browser is expected to
    /// navigate away, so the caller should not surface this as an error toast.
    #[error("deep link navigation attempted for {0}")]
    DeepLinkAttempted(WalletId),

    /// The operation is not supported by this brand
    #[error("{wallet} does not support {operation}")]
    UnsupportedOperation {
        /// The brand the operation was invoked on
        wallet: WalletId,
        /// Name of the unsupported operation
        operation: &'static str,
    },

    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error parsing a URL (page URL or deep-link template output)
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
}

impl WalletError {
    /// Returns true when the error is the mobile deep-link control-flow signal.
    pub fn is_deep_link(&self) -> bool {
        matches!(self, WalletError::DeepLinkAttempted(_))
    }
}

/// Result type alias for wallet adapter operations.
pub type Result<T> = std::result::Result<T, WalletError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WalletError::NoAccount { attempts: 3 };
        assert_eq!(err.to_string(), "no account authorized after 3 attempts");

        let err = WalletError::ProviderUnavailable(WalletId::MetaMask);
        assert_eq!(err.to_string(), "no injected provider found for metamask");
    }

    #[test]
    fn test_deep_link_is_control_flow() {
        assert!(WalletError::DeepLinkAttempted(WalletId::Trust).is_deep_link());
        assert!(!WalletError::UserRejected.is_deep_link());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: WalletError = json_err.into();
        assert!(matches!(err, WalletError::JsonError(_)));
    }
}
