use std::sync::Arc;

use actix_web::HttpRequest;
use shared::api::VerbCategory;

use super::{
    context::request_info_from,
    counts::{ObjectCountSource, WatchCountSource},
    list_width::ListWidthEstimator,
    mutating_width::MutatingWidthEstimator,
};
use crate::{
    errors::FlowControlError,
    features::{FeatureGate, Features},
};

/// The minimum number of seats a request must occupy
pub const MINIMUM_SEATS: u32 = 1;
/// The maximum number of seats a request can occupy
pub const MAXIMUM_SEATS: u32 = 10;
/// Objects or watchers that account for one seat
pub const UNITS_PER_SEAT: u64 = 100;

/// Number of seats a request occupies, always in `[MINIMUM_SEATS, MAXIMUM_SEATS]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Width {
    seats: u32,
}

impl Width {
    pub const MIN: Width = Width {
        seats: MINIMUM_SEATS,
    };
    pub const MAX: Width = Width {
        seats: MAXIMUM_SEATS,
    };

    /// One seat per started hundred units, clamped into the seat range.
    pub fn from_cost(units: u64) -> Self {
        let seats = units
            .div_ceil(UNITS_PER_SEAT)
            .clamp(u64::from(MINIMUM_SEATS), u64::from(MAXIMUM_SEATS));
        Self {
            seats: u32::try_from(seats).unwrap_or(MAXIMUM_SEATS),
        }
    }

    pub fn seats(&self) -> u32 {
        self.seats
    }
}

/// Estimates the width of a request before it is executed.
pub trait WidthEstimate: Send + Sync {
    fn estimate(&self, req: &HttpRequest) -> Width;
}

/// Dispatches a request to the estimator of its verb.
///
/// Lists and mutating requests get a dedicated estimate, every other verb
/// occupies the minimum.
pub struct WidthEstimator {
    list: ListWidthEstimator,
    mutating: MutatingWidthEstimator,
}

impl WidthEstimator {
    pub fn new(
        object_counts: Arc<dyn ObjectCountSource>,
        watch_counts: Arc<dyn WatchCountSource>,
        features: Arc<dyn FeatureGate>,
    ) -> Self {
        Self {
            list: ListWidthEstimator::new(object_counts, features),
            mutating: MutatingWidthEstimator::new(watch_counts),
        }
    }

    /// Builds an estimator with feature gates read from `CR8S_FEATURE_GATES`.
    pub fn from_env(
        object_counts: Arc<dyn ObjectCountSource>,
        watch_counts: Arc<dyn WatchCountSource>,
    ) -> Self {
        Self::new(object_counts, watch_counts, Arc::new(Features::from_env()))
    }

    pub fn estimate_width(&self, req: &HttpRequest) -> Width {
        let Some(category) = request_info_from(req).map(|info| info.verb_category()) else {
            let err = FlowControlError::MissingRequestInfo(req.uri().to_string());
            tracing::error!(error=%err, "Failed to estimate width for the request");
            // should never happen, assume the worst
            return Width::MAX;
        };

        match category {
            VerbCategory::List => self.list.estimate(req),
            VerbCategory::Mutating => self.mutating.estimate(req),
            VerbCategory::Other => Width::MIN,
        }
    }
}

impl WidthEstimate for WidthEstimator {
    fn estimate(&self, req: &HttpRequest) -> Width {
        self.estimate_width(req)
    }
}
