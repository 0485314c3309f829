//! Adapter registry.
//!
//! Holds one adapter per supported brand, dispatches wallet selection by
//! [`WalletId`], and tracks the widget's current connection. The registry is
//! the seam the UI layer talks to; it adds no wallet logic of its own.

use crate::adapter::WalletAdapter;
use crate::brands::BRANDS;
use crate::errors::{Result, WalletError};
use crate::host::HostEnv;
use crate::resolver::RetryPolicy;
use crate::types::{DeepLinkEvent, WalletAccount, WalletId};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc::UnboundedSender;

/// The registry's view of the active connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveConnection {
    /// Which brand the account came from
    pub wallet: WalletId,

    /// The connected account
    pub account: WalletAccount,
}

/// Registry of all brand adapters plus the current connection state.
pub struct WalletRegistry {
    adapters: BTreeMap<WalletId, WalletAdapter>,
    current: RwLock<Option<ActiveConnection>>,
}

impl WalletRegistry {
    /// Builds a registry with one adapter per brand in the static table.
    pub fn new(host: Arc<dyn HostEnv>) -> Self {
        let adapters = BRANDS
            .iter()
            .map(|b| (b.id, WalletAdapter::new(b.id, host.clone())))
            .collect();
        Self {
            adapters,
            current: RwLock::new(None),
        }
    }

    /// Applies a retry policy to every adapter.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.adapters = self
            .adapters
            .into_iter()
            .map(|(id, adapter)| (id, adapter.with_retry_policy(policy)))
            .collect();
        self
    }

    /// Registers a deep-link sink on every adapter.
    pub fn with_deep_link_sink(mut self, sink: UnboundedSender<DeepLinkEvent>) -> Self {
        self.adapters = self
            .adapters
            .into_iter()
            .map(|(id, adapter)| (id, adapter.with_deep_link_sink(sink.clone())))
            .collect();
        self
    }

    /// The adapter for a brand.
    pub fn adapter(&self, id: WalletId) -> &WalletAdapter {
        // The table covers every WalletId variant.
        &self.adapters[&id]
    }

    /// Brands whose provider is currently locatable, for the picker.
    pub fn installed(&self) -> Vec<WalletId> {
        self.adapters
            .values()
            .filter(|adapter| adapter.is_installed())
            .map(|adapter| adapter.id())
            .collect()
    }

    /// Connects the selected brand and records the result as current.
    pub async fn connect(&self, id: WalletId) -> Result<WalletAccount> {
        let account = self.adapter(id).connect().await?;
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = Some(ActiveConnection {
            wallet: id,
            account: account.clone(),
        });
        Ok(account)
    }

    /// Disconnects the current brand, if any, and clears the recorded state.
    pub async fn disconnect(&self) {
        let wallet = {
            let current = self.current.read().unwrap_or_else(|e| e.into_inner());
            current.as_ref().map(|c| c.wallet)
        };
        if let Some(wallet) = wallet {
            self.adapter(wallet).disconnect().await;
        }
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = None;
    }

    /// The recorded active connection, if any.
    pub fn current(&self) -> Option<ActiveConnection> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Re-derives connection truth from the live provider for a brand,
    /// bypassing the recorded state.
    pub async fn is_connected(&self, id: WalletId) -> bool {
        self.adapter(id).is_connected().await
    }

    /// Maps a connect failure to the UI-facing disposition: install prompt,
    /// rejection message, app hand-off, or generic retry.
    pub fn disposition(error: &WalletError) -> ConnectDisposition {
        match error {
            WalletError::ProviderUnavailable(_) => ConnectDisposition::NotInstalled,
            WalletError::UserRejected => ConnectDisposition::Rejected,
            WalletError::DeepLinkAttempted(_) => ConnectDisposition::OpenedApp,
            _ => ConnectDisposition::Retryable,
        }
    }
}

/// How the UI should present a connect failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectDisposition {
    /// "Wallet not installed"
    NotInstalled,
    /// "Connection rejected"
    Rejected,
    /// "Open the app to continue" — not an error toast
    OpenedApp,
    /// Transient; offer a retry
    Retryable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disposition_mapping() {
        assert_eq!(
            WalletRegistry::disposition(&WalletError::ProviderUnavailable(WalletId::Okx)),
            ConnectDisposition::NotInstalled
        );
        assert_eq!(
            WalletRegistry::disposition(&WalletError::UserRejected),
            ConnectDisposition::Rejected
        );
        assert_eq!(
            WalletRegistry::disposition(&WalletError::DeepLinkAttempted(WalletId::Trust)),
            ConnectDisposition::OpenedApp
        );
        assert_eq!(
            WalletRegistry::disposition(&WalletError::NoAccount { attempts: 3 }),
            ConnectDisposition::Retryable
        );
    }
}
