//! Example wallet connect flow.
//!
//! Drives the full locate → negotiate → connect pipeline against an
//! in-memory host standing in for a browser page, so the flow can be run
//! without a wasm shell.
//!
//! Run with:
//! ```bash
//! cargo run --example connect
//! ```

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use wallet_adapter_rs::{
    HostEnv, InjectedProvider, InjectionSlot, ProviderRef, RpcCall, RpcFault, WalletId,
    WalletRegistry,
};

/// A fake MetaMask-flavored provider with one pre-authorized account.
struct DemoProvider;

#[async_trait]
impl InjectedProvider for DemoProvider {
    fn has_flag(&self, flag: &str) -> bool {
        flag == "isMetaMask"
    }

    async fn request(&self, call: RpcCall) -> Result<Value, RpcFault> {
        match call.method {
            "eth_accounts" | "eth_requestAccounts" => {
                Ok(json!(["0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb1"]))
            }
            "wallet_requestPermissions" => Ok(json!([{ "parentCapability": "eth_accounts" }])),
            other => Err(RpcFault::other(format!("unknown method {other}"))),
        }
    }
}

/// A fake desktop page with the demo provider sitting in the slot.
struct DemoHost;

impl HostEnv for DemoHost {
    fn injection_slot(&self) -> Option<InjectionSlot> {
        Some(InjectionSlot::Single(Arc::new(DemoProvider) as ProviderRef))
    }

    fn dedicated_global(&self, _key: &str) -> Option<ProviderRef> {
        None
    }

    fn user_agent(&self) -> String {
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36".to_string()
    }

    fn page_url(&self) -> String {
        "https://pay.example/checkout?intent=demo".to_string()
    }

    fn navigate(&self, url: &str) {
        println!("   (would navigate to {url})");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let registry = WalletRegistry::new(Arc::new(DemoHost));

    println!("🔎 Detected wallets:");
    for id in registry.installed() {
        println!("   - {} ({})", registry.adapter(id).label(), id);
    }
    println!();

    println!("🔌 Connecting to MetaMask...");
    let account = registry.connect(WalletId::MetaMask).await?;
    println!("   connected as {}", account.owner);

    if let Some(active) = registry.current() {
        println!("   registry now tracks {} as active", active.wallet);
    }

    let principal = registry.adapter(WalletId::MetaMask).principal().await;
    println!("   principal lookup: {principal:?}");

    println!();
    println!("🔌 Disconnecting...");
    registry.disconnect().await;
    println!("   current connection: {:?}", registry.current());

    Ok(())
}
