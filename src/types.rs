//! Core type definitions for the wallet adapter layer.
//!
//! This module contains the data structures shared across the locator,
//! resolver, and adapter: brand identifiers, connected accounts, and the
//! deep-link notification payload.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a supported wallet brand.
///
/// One variant per injected-provider brand the widget knows how to locate.
/// The string form is the stable id used for UI dispatch and in deep-link
/// notifications.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WalletId {
    /// MetaMask browser extension / mobile app
    MetaMask,
    /// Trust Wallet
    Trust,
    /// Coinbase Wallet
    Coinbase,
    /// OKX Wallet
    Okx,
    /// Bitget Wallet (formerly BitKeep)
    Bitget,
    /// TokenPocket
    TokenPocket,
}

impl WalletId {
    /// Returns the stable string id for this brand.
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletId::MetaMask => "metamask",
            WalletId::Trust => "trust",
            WalletId::Coinbase => "coinbase",
            WalletId::Okx => "okx",
            WalletId::Bitget => "bitget",
            WalletId::TokenPocket => "tokenpocket",
        }
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A connected wallet account, produced by a successful `connect()`.
///
/// For EVM-style brands `owner == principal == hex address`. The account is
/// never persisted by the adapter; it is discarded on disconnect and
/// re-derived from the live provider on demand.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WalletAccount {
    /// Owner address (lowercased `0x`-prefixed hex for EVM brands)
    pub owner: String,

    /// Principal identifier; equal to `owner` for EVM brands
    pub principal: String,

    /// Whether the account is currently connected
    pub connected: bool,
}

impl WalletAccount {
    /// Builds a connected EVM account where owner and principal coincide.
    pub fn evm(address: impl Into<String>) -> Self {
        let address = address.into();
        Self {
            owner: address.clone(),
            principal: address,
            connected: true,
        }
    }
}

/// Notification emitted when a mobile connect falls back to a deep link.
///
/// Consumed by a UI layer that may render the link or let the in-progress
/// navigation proceed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeepLinkEvent {
    /// The brand whose deep link was built
    pub wallet: WalletId,

    /// The brand-specific URI, with the current page URL percent-encoded in
    pub url: String,
}

/// Options for requesting a canister actor from an adapter.
///
/// EVM-style brands cannot furnish one; the field set exists for the
/// non-EVM adapters layered on top of this crate.
#[derive(Debug, Clone, Default)]
pub struct ActorOptions {
    /// Target canister id
    pub canister_id: String,

    /// Override for the agent host URL
    pub host_url: Option<String>,
}

/// Normalizes an EVM address string: lowercases it and validates that it is
/// `0x` followed by exactly 20 hex-encoded bytes. Returns `None` for
/// anything else, including non-address junk a misbehaving provider might
/// put in an accounts array.
pub(crate) fn normalize_address(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let body = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X"))?;
    let decoded = hex::decode(body).ok()?;
    if decoded.len() != 20 {
        return None;
    }
    Some(format!("0x{}", hex::encode(decoded)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_id_roundtrip() {
        let json = serde_json::to_string(&WalletId::MetaMask).unwrap();
        assert_eq!(json, "\"metamask\"");
        let back: WalletId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, WalletId::MetaMask);
    }

    #[test]
    fn test_evm_account_owner_equals_principal() {
        let account = WalletAccount::evm("0x742d35cc6634c0532925a3b844bc9e7595f0beb1");
        assert_eq!(account.owner, account.principal);
        assert!(account.connected);
    }

    #[test]
    fn test_normalize_address() {
        assert_eq!(
            normalize_address("0x742D35Cc6634C0532925a3b844Bc9e7595F0bEb1"),
            Some("0x742d35cc6634c0532925a3b844bc9e7595f0beb1".to_string())
        );
        assert_eq!(normalize_address("0x1234"), None);
        assert_eq!(normalize_address("not an address"), None);
        assert_eq!(normalize_address(""), None);
    }

    #[test]
    fn test_deep_link_event_serialization() {
        let event = DeepLinkEvent {
            wallet: WalletId::Trust,
            url: "https://link.trustwallet.com/open_url?coin_id=60&url=x".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"wallet\":\"trust\""));
    }
}
