//! Account negotiation with bounded retry.
//!
//! Wallet extensions are inconsistent about which RPC method succeeds first
//! after page load, so each attempt runs a three-strategy ladder (passive
//! query, active request, permission re-request) and the whole attempt is
//! retried with a fixed delay. Every attempt re-locates the provider: a
//! late-injecting extension can replace the slot occupant mid-negotiation,
//! and a cached handle would then point at a dead object.

use crate::brands::BrandDescriptor;
use crate::errors::{Result, WalletError};
use crate::host::HostEnv;
use crate::locator::locate;
use crate::provider::{ProviderRef, RpcCall};
use crate::types::normalize_address;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Retry policy for one `connect()` negotiation.
///
/// The delay is fixed rather than growing: the usual cause of an empty
/// result is a provider that simply is not ready yet right after injection,
/// and backoff growth would only slow the recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of full strategy-ladder attempts
    pub max_attempts: u32,

    /// Fixed pause between attempts
    pub inter_attempt_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            inter_attempt_delay: Duration::from_millis(300),
        }
    }
}

impl RetryPolicy {
    /// Sets the maximum attempt count.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the fixed inter-attempt delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.inter_attempt_delay = delay;
        self
    }
}

/// Which rung of the negotiation ladder last ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Strategy {
    /// `eth_accounts` without prompting
    Passive,
    /// `eth_requestAccounts`, may prompt
    Active,
    /// `wallet_requestPermissions` then a passive re-query
    Repermission,
}

/// Ephemeral per-`connect()` negotiation state. Never shared across calls;
/// concurrent connects on one adapter each own their own.
#[derive(Debug)]
pub(crate) struct ConnectionAttempt {
    pub attempts: u32,
    pub waited: Duration,
    pub last_strategy: Option<Strategy>,
}

impl ConnectionAttempt {
    fn new() -> Self {
        Self {
            attempts: 0,
            waited: Duration::ZERO,
            last_strategy: None,
        }
    }
}

/// Extracts normalized addresses from an accounts RPC result.
///
/// Anything that is not an array of valid address strings contributes
/// nothing; a misbehaving provider degrades to an empty list, not an error.
fn parse_accounts(value: &Value) -> Vec<String> {
    match value {
        Value::Array(entries) => entries
            .iter()
            .filter_map(|entry| entry.as_str())
            .filter_map(normalize_address)
            .collect(),
        _ => Vec::new(),
    }
}

/// Single passive account query against an already-located provider.
///
/// Shared by `is_connected` and `principal`, which probe exactly once with
/// no retry. `None` means the query itself failed.
pub(crate) async fn passive_accounts(provider: &ProviderRef) -> Option<Vec<String>> {
    match provider.request(RpcCall::accounts()).await {
        Ok(value) => Some(parse_accounts(&value)),
        Err(fault) => {
            debug!(%fault, "passive account query failed");
            None
        }
    }
}

/// Runs the three-strategy ladder once against one provider handle.
///
/// Returns the first non-empty account list. A user rejection from the
/// active strategy aborts the whole negotiation. Any other strategy fault
/// short-circuits the remainder of this attempt's ladder; the outer retry
/// loop decides whether another attempt follows.
async fn run_ladder(provider: &ProviderRef, state: &mut ConnectionAttempt) -> Result<Vec<String>> {
    // a. Passive query: already-authorized accounts, no prompt.
    state.last_strategy = Some(Strategy::Passive);
    match provider.request(RpcCall::accounts()).await {
        Ok(value) => {
            let accounts = parse_accounts(&value);
            if !accounts.is_empty() {
                return Ok(accounts);
            }
        }
        Err(fault) => {
            debug!(%fault, "passive strategy failed, abandoning ladder for this attempt");
            return Ok(Vec::new());
        }
    }

    // b. Active request: may put a prompt in front of the user.
    state.last_strategy = Some(Strategy::Active);
    match provider.request(RpcCall::request_accounts()).await {
        Ok(value) => {
            let accounts = parse_accounts(&value);
            if !accounts.is_empty() {
                return Ok(accounts);
            }
        }
        Err(fault) if fault.is_user_rejection() => {
            debug!("user rejected the authorization prompt");
            return Err(WalletError::UserRejected);
        }
        Err(fault) => {
            debug!(%fault, "active strategy failed, abandoning ladder for this attempt");
            return Ok(Vec::new());
        }
    }

    // c. Permission re-request, then ask passively again.
    state.last_strategy = Some(Strategy::Repermission);
    match provider.request(RpcCall::request_permissions()).await {
        Ok(_) => match provider.request(RpcCall::accounts()).await {
            Ok(value) => Ok(parse_accounts(&value)),
            Err(fault) => {
                debug!(%fault, "post-permission query failed");
                Ok(Vec::new())
            }
        },
        Err(fault) => {
            debug!(%fault, "permission re-request failed");
            Ok(Vec::new())
        }
    }
}

/// Negotiates a non-empty account list for a brand.
///
/// Bounded to `policy.max_attempts` ladder runs with a fixed cooperative
/// pause in between. The provider is re-located before every attempt.
/// Fails with [`WalletError::UserRejected`] immediately on an explicit
/// refusal and with [`WalletError::NoAccount`] once attempts are exhausted.
pub(crate) async fn negotiate_accounts(
    host: &dyn HostEnv,
    brand: &BrandDescriptor,
    policy: &RetryPolicy,
) -> Result<Vec<String>> {
    let mut state = ConnectionAttempt::new();

    while state.attempts < policy.max_attempts {
        state.attempts += 1;

        // Re-locate: the slot occupant may have changed since last attempt.
        if let Some(provider) = locate(host, brand) {
            let accounts = run_ladder(&provider, &mut state).await?;
            if !accounts.is_empty() {
                debug!(
                    wallet = %brand.id,
                    attempts = state.attempts,
                    "account negotiation succeeded"
                );
                return Ok(accounts);
            }
        } else {
            debug!(
                wallet = %brand.id,
                attempt = state.attempts,
                "provider not locatable this attempt"
            );
        }

        if state.attempts < policy.max_attempts {
            tokio::time::sleep(policy.inter_attempt_delay).await;
            state.waited += policy.inter_attempt_delay;
        }
    }

    debug!(
        wallet = %brand.id,
        attempts = state.attempts,
        waited_ms = state.waited.as_millis() as u64,
        last_strategy = ?state.last_strategy,
        "account negotiation exhausted"
    );
    Err(WalletError::NoAccount {
        attempts: state.attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_accounts_normalizes_and_filters() {
        let value = json!([
            "0x742D35Cc6634C0532925a3b844Bc9e7595F0bEb1",
            "not an address",
            42,
            "0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae"
        ]);
        let accounts = parse_accounts(&value);
        assert_eq!(
            accounts,
            vec![
                "0x742d35cc6634c0532925a3b844bc9e7595f0beb1".to_string(),
                "0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_accounts_non_array_is_empty() {
        assert!(parse_accounts(&json!("0xabc")).is_empty());
        assert!(parse_accounts(&json!(null)).is_empty());
        assert!(parse_accounts(&json!({})).is_empty());
    }

    #[test]
    fn test_retry_policy_defaults_and_builders() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.inter_attempt_delay, Duration::from_millis(300));

        let policy = RetryPolicy::default()
            .with_max_attempts(5)
            .with_delay(Duration::from_millis(100));
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.inter_attempt_delay, Duration::from_millis(100));
    }
}
