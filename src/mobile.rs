//! Mobile runtime detection and deep-link construction.
//!
//! When no provider can be located on a mobile runtime, `connect()` falls
//! back to opening the wallet's native app through a brand deep link built
//! from the current page URL.

use crate::brands::BrandDescriptor;
use crate::errors::{Result, WalletError};
use once_cell::sync::Lazy;
use regex::Regex;

static MOBILE_UA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)android|iphone|ipad|ipod|webos|blackberry|iemobile|opera mini|mobile")
        .expect("mobile user-agent pattern is valid")
});

/// Classifies a user-agent string as a mobile runtime.
pub fn is_mobile(user_agent: &str) -> bool {
    MOBILE_UA.is_match(user_agent)
}

/// Builds the brand's deep-link URI for the given page URL.
///
/// The page URL is percent-encoded and substituted for the `{url}`
/// placeholder in the brand template. Returns `None` for brands without a
/// deep link.
pub fn deep_link_uri(brand: &BrandDescriptor, page_url: &str) -> Result<Option<String>> {
    let Some(template) = brand.deep_link else {
        return Ok(None);
    };
    // Validate before embedding; a malformed page URL would produce a link
    // the wallet app cannot resolve back to the page.
    url::Url::parse(page_url)?;
    let encoded: String = url::form_urlencoded::byte_serialize(page_url.as_bytes()).collect();
    Ok(Some(template.replace("{url}", &encoded)))
}

/// Convenience wrapper used by `connect()`: deep link or `ProviderUnavailable`.
pub(crate) fn deep_link_or_unavailable(brand: &BrandDescriptor, page_url: &str) -> Result<String> {
    deep_link_uri(brand, page_url)?.ok_or(WalletError::ProviderUnavailable(brand.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brands::brand;
    use crate::types::WalletId;

    #[test]
    fn test_mobile_user_agents() {
        assert!(is_mobile(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15"
        ));
        assert!(is_mobile(
            "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Mobile Safari/537.36"
        ));
        assert!(is_mobile("Mozilla/5.0 (iPad; CPU OS 16_0 like Mac OS X)"));
        assert!(!is_mobile(
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36"
        ));
        assert!(!is_mobile(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
        ));
    }

    #[test]
    fn test_deep_link_percent_encodes_page_url() {
        let uri = deep_link_uri(brand(WalletId::Trust), "https://shop.example/checkout?id=42")
            .unwrap()
            .unwrap();
        assert!(uri.starts_with("https://link.trustwallet.com/open_url?coin_id=60&url="));
        assert!(uri.contains("https%3A%2F%2Fshop.example%2Fcheckout%3Fid%3D42"));
    }

    #[test]
    fn test_deep_link_rejects_malformed_page_url() {
        let err = deep_link_uri(brand(WalletId::MetaMask), "not a url").unwrap_err();
        assert!(matches!(err, WalletError::UrlParseError(_)));
    }
}
