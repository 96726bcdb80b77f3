use std::sync::Arc;

use actix_web::{HttpRequest, test::TestRequest};
use dashmap::DashMap;
use shared::api::RequestInfo;

use super::{
    context::with_request_info, list_width::ListWidthEstimator,
    mutating_width::MutatingWidthEstimator, width::WidthEstimator,
};
use crate::features::{Feature, Features};

/// In-memory object and watcher counts keyed by group resource.
pub struct TestSources {
    pub objects: Arc<DashMap<String, i64>>,
    pub watchers: Arc<DashMap<String, u64>>,
    pub features: Features,
}

impl TestSources {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(DashMap::new()),
            watchers: Arc::new(DashMap::new()),
            features: Features::new(),
        }
    }

    pub fn with_objects(self, key: &str, count: i64) -> Self {
        self.objects.insert(key.to_string(), count);
        self
    }

    pub fn with_watchers(self, key: &str, count: u64) -> Self {
        self.watchers.insert(key.to_string(), count);
        self
    }

    pub fn with_paging(mut self, enabled: bool) -> Self {
        self.features = self.features.with(Feature::ApiListChunking, enabled);
        self
    }

    pub fn estimator(&self) -> WidthEstimator {
        WidthEstimator::new(
            self.objects.clone(),
            Arc::new(self.watch_counts()),
            Arc::new(self.features.clone()),
        )
    }

    pub fn list_estimator(&self) -> ListWidthEstimator {
        ListWidthEstimator::new(self.objects.clone(), Arc::new(self.features.clone()))
    }

    pub fn mutating_estimator(&self) -> MutatingWidthEstimator {
        MutatingWidthEstimator::new(Arc::new(self.watch_counts()))
    }

    fn watch_counts(&self) -> impl Fn(&RequestInfo) -> u64 + Send + Sync + 'static {
        let watchers = self.watchers.clone();
        move |info: &RequestInfo| {
            watchers
                .get(&info.group_resource().key())
                .map(|count| *count)
                .unwrap_or(0)
        }
    }
}

/// Builds a request for `uri`, with request info attached when given.
pub fn request(uri: &str, info: Option<RequestInfo>) -> HttpRequest {
    let req = TestRequest::default().uri(uri).to_http_request();
    if let Some(info) = info {
        with_request_info(&req, info);
    }
    req
}
