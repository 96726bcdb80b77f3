use std::sync::Arc;

use actix_web::HttpRequest;

use super::{
    context::request_info_from,
    counts::WatchCountSource,
    width::{Width, WidthEstimate},
};

/// Width of create, update, patch and delete requests.
///
/// The write itself is cheap compared to fanning the resulting event out to
/// every interested watcher, so seats follow the watcher count.
pub struct MutatingWidthEstimator {
    watch_counts: Arc<dyn WatchCountSource>,
}

impl MutatingWidthEstimator {
    pub fn new(watch_counts: Arc<dyn WatchCountSource>) -> Self {
        Self { watch_counts }
    }
}

impl WidthEstimate for MutatingWidthEstimator {
    fn estimate(&self, req: &HttpRequest) -> Width {
        let Some(info) = request_info_from(req) else {
            return Width::MAX;
        };

        let watch_count = self.watch_counts.watch_count(&info);
        let width = Width::from_cost(watch_count);
        tracing::trace!(
            verb=%info.verb,
            watch_count,
            seats = width.seats(),
            "Estimated mutating width"
        );
        width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flowcontrol::request::test_sources::{TestSources, request};
    use shared::api::RequestInfo;

    #[test]
    fn test_missing_request_info() {
        let estimator = TestSources::new().mutating_estimator();
        assert_eq!(estimator.estimate(&request("/foos/1", None)), Width::MAX);
    }

    #[test]
    fn test_watch_counts() {
        let sources = TestSources::new()
            .with_watchers("resource.foo.bar", 299)
            .with_watchers("big.foo.bar", 1999);
        let estimator = sources.mutating_estimator();

        let cases = [("resource", 3), ("big", 10), ("unwatched", 1)];
        for (resource, seats) in cases {
            for verb in ["create", "update", "patch", "delete"] {
                let info = RequestInfo::new(verb, "foo.bar", resource);
                let width = estimator.estimate(&request("/foos/1", Some(info)));
                assert_eq!(width.seats(), seats, "{verb} {resource}");
            }
        }
    }
}
