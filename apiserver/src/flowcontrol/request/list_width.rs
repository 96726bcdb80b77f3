use std::sync::Arc;

use actix_web::HttpRequest;
use shared::storage::should_list_from_storage;

use super::{
    context::{list_options_from, request_info_from},
    counts::ObjectCountSource,
    width::{Width, WidthEstimate},
};
use crate::features::FeatureGate;

/// Width of list requests, driven by the number of objects the list processes.
pub struct ListWidthEstimator {
    object_counts: Arc<dyn ObjectCountSource>,
    features: Arc<dyn FeatureGate>,
}

impl ListWidthEstimator {
    pub fn new(object_counts: Arc<dyn ObjectCountSource>, features: Arc<dyn FeatureGate>) -> Self {
        Self {
            object_counts,
            features,
        }
    }
}

impl WidthEstimate for ListWidthEstimator {
    fn estimate(&self, req: &HttpRequest) -> Width {
        let Some(info) = request_info_from(req) else {
            return Width::MAX;
        };

        // malformed options take the minimum
        let opts = match list_options_from(req) {
            Ok(opts) => opts,
            Err(err) => {
                tracing::error!(
                    error=%err,
                    "Failed to convert options while calculating request width"
                );
                return Width::MIN;
            }
        };

        let key = info.group_resource().key();
        let count = self.object_counts.object_count(&key);
        let from_cache = !should_list_from_storage(&opts, self.features.paging_enabled());

        // unknown count with no limit or a cached list, cost is unbounded
        if (opts.limit == 0 || from_cache) && count == 0 {
            tracing::trace!(%key, from_cache, "Object count unknown");
            return Width::MAX;
        }

        // the cache walks every object regardless of limit,
        // a storage chunk holds at most <limit> objects
        let estimated_objects = if from_cache || opts.limit <= 0 {
            count
        } else {
            opts.limit
        };

        let width = Width::from_cost(u64::try_from(estimated_objects).unwrap_or(0));
        tracing::trace!(%key, count, from_cache, seats = width.seats(), "Estimated list width");
        width
    }
}

#[cfg(test)]
mod tests {

    //! - test_missing_request_info
    //! - test_malformed_options
    //!     fall back to the minimum, unlike missing request info
    //! - test_cache_uses_count
    //!     limit is ignored for the cached snapshot
    //! - test_storage_uses_limit
    //! - test_unknown_count
    //! - test_paging_disabled
    //!     limit and continue no longer force storage
    //! - test_negative_count

    use super::*;
    use crate::flowcontrol::request::test_sources::{TestSources, request};
    use shared::api::RequestInfo;

    fn list_info() -> Option<RequestInfo> {
        Some(RequestInfo::new("list", "foo.bar", "resource"))
    }

    #[test]
    fn test_missing_request_info() {
        let estimator = TestSources::new()
            .with_objects("resource.foo.bar", 99)
            .list_estimator();
        assert_eq!(estimator.estimate(&request("/foos?limit=1", None)), Width::MAX);
    }

    #[test]
    fn test_malformed_options() {
        let estimator = TestSources::new().list_estimator();
        let width = estimator.estimate(&request("/foos?limit=abc", list_info()));
        assert_eq!(width, Width::MIN);
    }

    #[test]
    fn test_cache_uses_count() {
        let estimator = TestSources::new()
            .with_objects("resource.foo.bar", 799)
            .list_estimator();
        for uri in ["/foos?resourceVersion=0&limit=799", "/foos?resourceVersion=0&limit=1"] {
            assert_eq!(estimator.estimate(&request(uri, list_info())).seats(), 8, "{uri}");
        }
    }

    #[test]
    fn test_storage_uses_limit() {
        let estimator = TestSources::new()
            .with_objects("resource.foo.bar", 799)
            .list_estimator();
        let width = estimator.estimate(&request("/foos?resourceVersion=1&limit=499", list_info()));
        assert_eq!(width.seats(), 5);

        // no limit, fall back to count
        let width = estimator.estimate(&request("/foos", list_info()));
        assert_eq!(width.seats(), 8);
    }

    #[test]
    fn test_unknown_count() {
        let estimator = TestSources::new().list_estimator();
        for uri in ["/foos", "/foos?resourceVersion=0&limit=799", "/foos?resourceVersion=5"] {
            assert_eq!(estimator.estimate(&request(uri, list_info())), Width::MAX, "{uri}");
        }

        // bounded by limit from storage
        let width = estimator.estimate(&request("/foos?resourceVersion=1&limit=250", list_info()));
        assert_eq!(width.seats(), 3);
    }

    #[test]
    fn test_paging_disabled() {
        let estimator = TestSources::new()
            .with_objects("resource.foo.bar", 799)
            .with_paging(false)
            .list_estimator();
        for uri in [
            "/foos?resourceVersion=1&limit=499",
            "/foos?resourceVersion=1&limit=499&continue=token",
        ] {
            assert_eq!(estimator.estimate(&request(uri, list_info())).seats(), 8, "{uri}");
        }
    }

    #[test]
    fn test_negative_count() {
        let estimator = TestSources::new()
            .with_objects("resource.foo.bar", -5)
            .list_estimator();
        let width = estimator.estimate(&request("/foos?resourceVersion=0", list_info()));
        assert_eq!(width, Width::MIN);
    }
}
