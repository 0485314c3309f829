//! The injected-provider RPC surface consumed by the adapters.
//!
//! A browser extension places a request/response object into the host page's
//! global scope; this module expresses that surface as a trait so the core
//! never touches host globals directly and can be exercised against fakes.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// EIP-1193 rejection code returned when the user dismisses a prompt.
pub const USER_REJECTED_CODE: i64 = 4001;

/// A shared handle to one injected provider.
///
/// Always obtained fresh through the locator; adapters never store one,
/// because the underlying global slot can change between calls.
pub type ProviderRef = Arc<dyn InjectedProvider>;

/// A single RPC call against an injected provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcCall {
    /// RPC method name (e.g. `eth_accounts`)
    pub method: &'static str,

    /// JSON-encoded parameters
    pub params: Value,
}

impl RpcCall {
    /// Passive account query: returns only already-authorized accounts,
    /// never prompts the user.
    pub fn accounts() -> Self {
        Self {
            method: "eth_accounts",
            params: Value::Array(vec![]),
        }
    }

    /// Active account request: may trigger a user-facing authorization prompt.
    pub fn request_accounts() -> Self {
        Self {
            method: "eth_requestAccounts",
            params: Value::Array(vec![]),
        }
    }

    /// Explicit request for the `eth_accounts` permission.
    pub fn request_permissions() -> Self {
        Self {
            method: "wallet_requestPermissions",
            params: serde_json::json!([{ "eth_accounts": {} }]),
        }
    }
}

/// A failed RPC call, carrying the provider's numeric error code when the
/// provider supplied one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcFault {
    /// Provider-reported error code, if any
    pub code: Option<i64>,

    /// Human-readable message from the provider
    pub message: String,
}

impl RpcFault {
    /// Builds a fault with a numeric code.
    pub fn coded(code: i64, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }

    /// Builds a fault without a code (thrown value, dead port, etc.).
    pub fn other(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    /// True when this fault is the user-rejection signal.
    pub fn is_user_rejection(&self) -> bool {
        self.code == Some(USER_REJECTED_CODE)
    }
}

impl fmt::Display for RpcFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "provider error {}: {}", code, self.message),
            None => write!(f, "provider error: {}", self.message),
        }
    }
}

/// Optional listener-teardown capability of a provider.
///
/// Most extensions expose `removeAllListeners`; some do not. Adapters probe
/// for the capability through [`InjectedProvider::listeners`] and invoke it
/// only when present.
pub trait ListenerControl: Send + Sync {
    /// Removes all registered listeners for the given event name.
    fn remove_all(&self, event: &str);
}

/// An injected wallet provider as seen by the adapter core.
///
/// Implementations wrap a raw host-page provider object (or a test fake).
/// The handle is borrowed from host-controlled global state: its lifetime
/// and identity are owned by the browser/extension runtime, so nothing in
/// this crate caches one across operations.
#[async_trait]
pub trait InjectedProvider: Send + Sync {
    /// Reads a boolean brand-marker property (e.g. `isMetaMask`).
    ///
    /// Missing properties read as `false`; reflection failures must never
    /// escape this method.
    fn has_flag(&self, flag: &str) -> bool;

    /// Issues one RPC call and awaits the provider's response.
    async fn request(&self, call: RpcCall) -> std::result::Result<Value, RpcFault>;

    /// Returns the listener-teardown capability when the provider has one.
    fn listeners(&self) -> Option<&dyn ListenerControl> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_code_detection() {
        assert!(RpcFault::coded(4001, "User rejected the request").is_user_rejection());
        assert!(!RpcFault::coded(-32603, "Internal error").is_user_rejection());
        assert!(!RpcFault::other("port closed").is_user_rejection());
    }

    #[test]
    fn test_rpc_call_methods() {
        assert_eq!(RpcCall::accounts().method, "eth_accounts");
        assert_eq!(RpcCall::request_accounts().method, "eth_requestAccounts");

        let perms = RpcCall::request_permissions();
        assert_eq!(perms.method, "wallet_requestPermissions");
        assert!(perms.params[0].get("eth_accounts").is_some());
    }

    #[test]
    fn test_fault_display() {
        let fault = RpcFault::coded(4001, "User rejected the request");
        assert_eq!(
            fault.to_string(),
            "provider error 4001: User rejected the request"
        );
    }
}
