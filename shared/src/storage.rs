//! Cache or storage routing for list requests
//!
//! The apiserver serves a list either from the in-memory watch cache or by
//! delegating to the backing store. Both the list handler and the request
//! width estimator route through [`should_list_from_storage`], so a cost
//! estimate always matches where the list is actually served.

use crate::api::{ListOptions, ResourceVersionMatch};

/// Resource version asking for the most recent cached snapshot.
pub const CACHED_RESOURCE_VERSION: &str = "0";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ListServing {
    Cache,
    Storage,
}

/// True when the list must be delegated to the backing store.
///
/// - unset resource version needs the latest state
/// - continuation tokens always target storage (paging only)
/// - a limit without the cached snapshot sentinel goes to storage (paging only)
/// - exact resource version matches need storage
pub fn should_list_from_storage(opts: &ListOptions, paging_enabled: bool) -> bool {
    let resource_version = opts.resource_version.as_str();
    let has_continuation = paging_enabled && opts.has_continuation();
    let has_limit =
        paging_enabled && opts.limit > 0 && resource_version != CACHED_RESOURCE_VERSION;

    resource_version.is_empty()
        || has_continuation
        || has_limit
        || opts.resource_version_match() == ResourceVersionMatch::Exact
}

pub fn list_serving(opts: &ListOptions, paging_enabled: bool) -> ListServing {
    if should_list_from_storage(opts, paging_enabled) {
        ListServing::Storage
    } else {
        ListServing::Cache
    }
}
