//! Provider location.
//!
//! Given a brand, find "the" provider among possibly multiple competing
//! injected providers. Synchronous, side-effect-free, and total: every
//! failure mode degrades to `None`.

use crate::brands::BrandDescriptor;
use crate::host::{HostEnv, InjectionSlot};
use crate::mobile::is_mobile;
use crate::provider::ProviderRef;
use tracing::debug;

/// Locates the injected provider for a brand, or `None`.
///
/// Strict priority order:
/// 1. If the generic slot holds an array of candidates, the first whose
///    brand marker is truthy wins.
/// 2. Else, a single slot occupant carrying the marker wins.
/// 3. Else, the brand-dedicated secondary global, when the brand has one.
/// 4. Else, on a mobile runtime and only for lenient brands, any generic
///    slot occupant is accepted without a marker.
///
/// Callers must invoke this fresh for every operation; the slot is
/// host-controlled state that can change between calls.
pub fn locate(host: &dyn HostEnv, brand: &BrandDescriptor) -> Option<ProviderRef> {
    let slot = host.injection_slot();

    if let Some(slot) = &slot {
        match slot {
            InjectionSlot::Many(candidates) => {
                if let Some(found) = candidates.iter().find(|p| p.has_flag(brand.marker_flag)) {
                    debug!(wallet = %brand.id, "located provider in multi-injection slot");
                    return Some(found.clone());
                }
            }
            InjectionSlot::Single(provider) => {
                if provider.has_flag(brand.marker_flag) {
                    debug!(wallet = %brand.id, "located provider in slot");
                    return Some(provider.clone());
                }
            }
        }
    }

    if let Some(key) = brand.dedicated_global {
        if let Some(provider) = host.dedicated_global(key) {
            debug!(wallet = %brand.id, global = key, "located provider via dedicated global");
            return Some(provider);
        }
    }

    // Last resort on mobile: certain in-app browsers inject a provider that
    // omits brand flags, so lenient brands accept a generic occupant.
    if brand.mobile_lenient && is_mobile(&host.user_agent()) {
        if let Some(provider) = slot.as_ref().and_then(InjectionSlot::any) {
            debug!(wallet = %brand.id, "accepting unflagged provider on mobile runtime");
            return Some(provider);
        }
    }

    None
}
