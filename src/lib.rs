//! # wallet-adapter-rs
//!
//! Wallet adapter resolution and connection retry for browser-injected
//! crypto wallet providers.
//!
//! A payment widget that accepts wallet payments has to answer three ugly
//! questions before it can do anything useful: which of the possibly many
//! competing injected providers actually belongs to the wallet the user
//! picked, how to coax a connected account out of a provider whose RPC
//! surface is asynchronous, unreliable, and inconsistent right after page
//! load, and how to expose all of that behind one contract so the rest of
//! the widget never special-cases a wallet brand. This crate is that layer.
//!
//! ## Features
//!
//! - **Provider location**: marker-flag selection among competing injected
//!   providers, brand-dedicated globals, and a deliberate mobile-lenient
//!   fallback for in-app browsers that omit brand flags
//! - **Account negotiation**: a bounded retry loop over a three-strategy
//!   ladder (passive query, active request, permission re-request), with
//!   provider re-location on every attempt
//! - **Uniform adapter contract**: install check, connection check, connect,
//!   disconnect, principal lookup, and actor factory, identical for every
//!   brand modulo a static descriptor table
//! - **Mobile deep links**: when no provider exists on a mobile runtime,
//!   `connect()` hands off to the wallet's native app instead of failing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wallet_adapter_rs::{HostEnv, WalletId, WalletRegistry};
//!
//! # async fn example(host: Arc<dyn HostEnv>) -> anyhow::Result<()> {
//! let registry = WalletRegistry::new(host);
//!
//! for id in registry.installed() {
//!     println!("detected wallet: {id}");
//! }
//!
//! let account = registry.connect(WalletId::MetaMask).await?;
//! println!("connected as {}", account.owner);
//! # Ok(())
//! # }
//! ```
//!
//! ## Design
//!
//! The adapter is a stateless facade over volatile external state. Provider
//! handles are borrowed from a host-controlled global slot that a
//! later-loading extension may overwrite at any time, so every operation
//! re-runs the locator instead of caching a handle, and no account state
//! survives between calls. Only `connect` and `actor` surface typed errors;
//! the advisory queries collapse every fault to `false`/`None`/no-op so a
//! flaky extension can never destabilize the UI.
//!
//! Out of scope: transaction signing and broadcasting, balance formatting,
//! and the server-side payment-intent lifecycle. DOM rendering and asset
//! loading live above this crate, behind [`HostEnv`].

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod adapter;
pub mod brands;
pub mod errors;
pub mod host;
pub mod locator;
pub mod mobile;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod types;

// Re-export commonly used items
pub use adapter::WalletAdapter;
pub use brands::{brand, BrandDescriptor, BRANDS};
pub use errors::{Result, WalletError};
pub use host::{HostEnv, InjectionSlot};
pub use provider::{
    InjectedProvider, ListenerControl, ProviderRef, RpcCall, RpcFault, USER_REJECTED_CODE,
};
pub use registry::{ActiveConnection, ConnectDisposition, WalletRegistry};
pub use resolver::RetryPolicy;
pub use types::{ActorOptions, DeepLinkEvent, WalletAccount, WalletId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_code_constant() {
        assert_eq!(USER_REJECTED_CODE, 4001);
    }

    #[test]
    fn test_brand_table_size() {
        assert_eq!(BRANDS.len(), 6);
    }
}
