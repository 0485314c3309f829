//! The generic, brand-parameterized wallet adapter.
//!
//! One [`WalletAdapter`] per brand, all sharing one implementation driven by
//! the [`BrandDescriptor`] table. The adapter is a stateless facade over
//! volatile host state: every query re-derives truth from the live provider,
//! because the underlying extension can silently change accounts or chains
//! outside the adapter's control.

use crate::brands::{brand, BrandDescriptor};
use crate::errors::{Result, WalletError};
use crate::host::HostEnv;
use crate::locator::locate;
use crate::mobile::{deep_link_or_unavailable, is_mobile};
use crate::provider::RpcCall;
use crate::resolver::{negotiate_accounts, passive_accounts, RetryPolicy};
use crate::types::{ActorOptions, DeepLinkEvent, WalletAccount, WalletId};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Event names torn down on disconnect.
const CHANGE_EVENTS: [&str; 3] = ["accountsChanged", "chainChanged", "disconnect"];

/// A wallet adapter for one brand.
///
/// Holds no provider handle and no account state; both are re-read from the
/// host on every call. Concurrent operations on one adapter proceed
/// independently against the same underlying provider.
pub struct WalletAdapter {
    descriptor: &'static BrandDescriptor,
    host: Arc<dyn HostEnv>,
    policy: RetryPolicy,
    deep_link_tx: Option<UnboundedSender<DeepLinkEvent>>,
}

impl WalletAdapter {
    /// Creates an adapter for the given brand over a host environment.
    pub fn new(id: WalletId, host: Arc<dyn HostEnv>) -> Self {
        Self {
            descriptor: brand(id),
            host,
            policy: RetryPolicy::default(),
            deep_link_tx: None,
        }
    }

    /// Overrides the connection retry policy.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Registers a sink for mobile deep-link notifications.
    pub fn with_deep_link_sink(mut self, sink: UnboundedSender<DeepLinkEvent>) -> Self {
        self.deep_link_tx = Some(sink);
        self
    }

    /// The brand this adapter serves.
    pub fn id(&self) -> WalletId {
        self.descriptor.id
    }

    /// Human-readable brand label for pickers.
    pub fn label(&self) -> &'static str {
        self.descriptor.label
    }

    /// True iff a provider for this brand is currently locatable.
    ///
    /// Never fails; advisory only.
    pub fn is_installed(&self) -> bool {
        locate(self.host.as_ref(), self.descriptor).is_some()
    }

    /// True iff a provider is locatable and a single passive query returns a
    /// non-empty account list.
    ///
    /// Exactly one probe, no retry. Every fault collapses to `false`.
    pub async fn is_connected(&self) -> bool {
        match locate(self.host.as_ref(), self.descriptor) {
            Some(provider) => passive_accounts(&provider)
                .await
                .is_some_and(|accounts| !accounts.is_empty()),
            None => false,
        }
    }

    /// Connects to the wallet and returns the negotiated account.
    ///
    /// With no locatable provider: on a mobile runtime with a deep-link
    /// template, emits one [`DeepLinkEvent`], attempts direct navigation,
    /// and fails with [`WalletError::DeepLinkAttempted`]; otherwise fails
    /// with [`WalletError::ProviderUnavailable`]. With a provider, runs the
    /// bounded negotiation of the resolver and surfaces its
    /// [`WalletError::UserRejected`] / [`WalletError::NoAccount`] outcomes.
    pub async fn connect(&self) -> Result<WalletAccount> {
        if locate(self.host.as_ref(), self.descriptor).is_none() {
            if is_mobile(&self.host.user_agent()) && self.descriptor.deep_link.is_some() {
                return Err(self.attempt_deep_link()?);
            }
            return Err(WalletError::ProviderUnavailable(self.descriptor.id));
        }

        let accounts =
            negotiate_accounts(self.host.as_ref(), self.descriptor, &self.policy).await?;
        let owner = accounts.into_iter().next().ok_or(WalletError::NoAccount {
            attempts: self.policy.max_attempts,
        })?;
        debug!(wallet = %self.descriptor.id, %owner, "wallet connected");
        Ok(WalletAccount::evm(owner))
    }

    /// Best-effort disconnect.
    ///
    /// Injected wallet APIs have no authoritative disconnect primitive, so
    /// this re-requests permissions (most extensions render that as a
    /// revoke/switch prompt) and tears down change listeners when the
    /// provider supports it. Never fails; disconnection must not block the
    /// UI flow.
    pub async fn disconnect(&self) {
        let Some(provider) = locate(self.host.as_ref(), self.descriptor) else {
            return;
        };

        if let Err(fault) = provider.request(RpcCall::request_permissions()).await {
            debug!(wallet = %self.descriptor.id, %fault, "permission re-request during disconnect failed");
        }

        if let Some(listeners) = provider.listeners() {
            for event in CHANGE_EVENTS {
                listeners.remove_all(event);
            }
        }
    }

    /// First already-authorized address, or `None`.
    ///
    /// Single passive probe; empty results and provider faults both read as
    /// `None`.
    pub async fn principal(&self) -> Option<String> {
        let provider = locate(self.host.as_ref(), self.descriptor)?;
        passive_accounts(&provider)
            .await
            .and_then(|accounts| accounts.into_iter().next())
    }

    /// Requests a canister actor.
    ///
    /// EVM-style providers cannot furnish an Internet-Computer-style actor,
    /// so for every brand in this crate the call fails with
    /// [`WalletError::UnsupportedOperation`].
    pub fn actor<T>(&self, _options: &ActorOptions) -> Result<T> {
        Err(WalletError::UnsupportedOperation {
            wallet: self.descriptor.id,
            operation: "canister actor",
        })
    }

    /// Builds the deep link, notifies the sink, attempts navigation, and
    /// returns the control-flow signal for `connect()` to propagate.
    fn attempt_deep_link(&self) -> Result<WalletError> {
        let url = deep_link_or_unavailable(self.descriptor, &self.host.page_url())?;

        if let Some(sink) = &self.deep_link_tx {
            // A dropped receiver just means nobody is listening anymore.
            let _ = sink.send(DeepLinkEvent {
                wallet: self.descriptor.id,
                url: url.clone(),
            });
        }

        debug!(wallet = %self.descriptor.id, %url, "deep link navigation attempted");
        self.host.navigate(&url);
        Ok(WalletError::DeepLinkAttempted(self.descriptor.id))
    }
}
