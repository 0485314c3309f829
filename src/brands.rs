//! The static brand table.
//!
//! One [`BrandDescriptor`] per supported wallet, defined at process start and
//! never mutated. The six near-identical per-brand adapters of a typical
//! widget collapse into one generic [`WalletAdapter`](crate::adapter::WalletAdapter)
//! parameterized by a row of this table.

use crate::types::WalletId;

/// Static description of one wallet brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandDescriptor {
    /// Stable brand id
    pub id: WalletId,

    /// Human-readable label for pickers
    pub label: &'static str,

    /// Boolean marker property the brand sets on its injected provider to
    /// self-identify among competing providers (e.g. `isMetaMask`)
    pub marker_flag: &'static str,

    /// Brand-dedicated secondary global, checked after the generic slot.
    /// Dotted paths address nested objects.
    pub dedicated_global: Option<&'static str>,

    /// Whether, on a mobile runtime, a generic provider lacking the marker
    /// flag is acceptable as a last resort. Certain mobile in-app browsers
    /// omit brand flags; false positives are tolerated only there.
    pub mobile_lenient: bool,

    /// Deep-link template for the mobile no-provider fallback, with `{url}`
    /// standing for the percent-encoded current page URL
    pub deep_link: Option<&'static str>,
}

/// All supported brands.
pub const BRANDS: [BrandDescriptor; 6] = [
    BrandDescriptor {
        id: WalletId::MetaMask,
        label: "MetaMask",
        marker_flag: "isMetaMask",
        dedicated_global: None,
        mobile_lenient: false,
        deep_link: Some("https://metamask.app.link/dapp/{url}"),
    },
    BrandDescriptor {
        id: WalletId::Trust,
        label: "Trust Wallet",
        marker_flag: "isTrust",
        dedicated_global: Some("trustwallet"),
        mobile_lenient: true,
        deep_link: Some("https://link.trustwallet.com/open_url?coin_id=60&url={url}"),
    },
    BrandDescriptor {
        id: WalletId::Coinbase,
        label: "Coinbase Wallet",
        marker_flag: "isCoinbaseWallet",
        dedicated_global: Some("coinbaseWalletExtension"),
        mobile_lenient: false,
        deep_link: Some("https://go.cb-w.com/dapp?cb_url={url}"),
    },
    BrandDescriptor {
        id: WalletId::Okx,
        label: "OKX Wallet",
        marker_flag: "isOkxWallet",
        dedicated_global: Some("okxwallet"),
        mobile_lenient: true,
        deep_link: Some("okx://wallet/dapp/url?dappUrl={url}"),
    },
    BrandDescriptor {
        id: WalletId::Bitget,
        label: "Bitget Wallet",
        marker_flag: "isBitKeep",
        dedicated_global: Some("bitkeep.ethereum"),
        mobile_lenient: true,
        deep_link: Some("https://bkcode.vip/?action=dapp&url={url}"),
    },
    BrandDescriptor {
        id: WalletId::TokenPocket,
        label: "TokenPocket",
        marker_flag: "isTokenPocket",
        dedicated_global: Some("tokenpocket.ethereum"),
        mobile_lenient: true,
        deep_link: Some("tpdapp://open?params={url}"),
    },
];

/// Looks up the descriptor for a brand id.
pub fn brand(id: WalletId) -> &'static BrandDescriptor {
    // BRANDS covers every WalletId variant, so the lookup cannot miss.
    BRANDS
        .iter()
        .find(|b| b.id == id)
        .unwrap_or(&BRANDS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_id() {
        for id in [
            WalletId::MetaMask,
            WalletId::Trust,
            WalletId::Coinbase,
            WalletId::Okx,
            WalletId::Bitget,
            WalletId::TokenPocket,
        ] {
            assert_eq!(brand(id).id, id);
        }
    }

    #[test]
    fn test_ids_and_markers_unique() {
        for (i, a) in BRANDS.iter().enumerate() {
            for b in &BRANDS[i + 1..] {
                assert_ne!(a.id, b.id);
                assert_ne!(a.marker_flag, b.marker_flag);
            }
        }
    }

    #[test]
    fn test_deep_link_templates_carry_placeholder() {
        for b in &BRANDS {
            if let Some(template) = b.deep_link {
                assert!(template.contains("{url}"), "{} template lacks {{url}}", b.id);
            }
        }
    }
}
