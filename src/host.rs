//! Host-page environment seam.
//!
//! The adapter core reads everything it needs about the surrounding page —
//! the injected-provider slot, brand-dedicated globals, the user agent, and
//! the current URL — through [`HostEnv`]. A wasm shell implements this over
//! the real `window`; tests implement it over fixtures.

use crate::provider::ProviderRef;

/// Shape of the generic injection slot.
///
/// The well-known global may hold a single provider, or an array of
/// competing providers when several extensions injected themselves.
#[derive(Clone)]
pub enum InjectionSlot {
    /// Exactly one provider occupies the slot
    Single(ProviderRef),

    /// Multiple extensions are competing for the slot
    Many(Vec<ProviderRef>),
}

impl InjectionSlot {
    /// First provider in the slot regardless of brand markers.
    ///
    /// Used only by the mobile-lenient fallback, where certain in-app
    /// browsers omit brand flags entirely.
    pub fn any(&self) -> Option<ProviderRef> {
        match self {
            InjectionSlot::Single(p) => Some(p.clone()),
            InjectionSlot::Many(list) => list.first().cloned(),
        }
    }
}

/// The host-page environment the adapters run inside.
///
/// Every method is a live read: the injection slot is host-controlled
/// mutable state that a later-loading extension may overwrite or append to,
/// so callers must re-read it on every operation rather than caching the
/// result.
pub trait HostEnv: Send + Sync {
    /// Reads the generic injection slot, fresh.
    fn injection_slot(&self) -> Option<InjectionSlot>;

    /// Reads a brand-dedicated secondary global by key.
    ///
    /// Keys may be dotted paths (e.g. `bitkeep.ethereum`); a missing link
    /// anywhere in the chain reads as `None`.
    fn dedicated_global(&self, key: &str) -> Option<ProviderRef>;

    /// The host runtime's user-agent string.
    fn user_agent(&self) -> String;

    /// The current page URL, as the deep-link target.
    fn page_url(&self) -> String;

    /// Best-effort navigation to a URI. Failures are the host's to swallow;
    /// the adapter never observes them.
    fn navigate(&self, url: &str);
}
