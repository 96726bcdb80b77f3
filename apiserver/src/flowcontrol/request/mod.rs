//! Request width estimation for priority and fairness
//!
//! Before a request executes, the fairness scheduler reserves a number of
//! concurrency seats for it. The estimators here turn cheap, local signals
//! (verb, list options, object and watcher counts) into that number.
//!
//! - list: seats follow the number of objects the list has to process
//! - create, update, patch, delete: seats follow the number of watchers notified
//! - anything else: a single seat

mod context;
mod counts;
mod list_width;
mod mutating_width;
#[cfg(test)]
pub mod test_sources;
mod width;

pub use context::{list_options_from, request_info_from, with_request_info};
pub use counts::{ObjectCountSource, WatchCountSource};
pub use list_width::ListWidthEstimator;
pub use mutating_width::MutatingWidthEstimator;
pub use width::{
    MAXIMUM_SEATS, MINIMUM_SEATS, UNITS_PER_SEAT, Width, WidthEstimate, WidthEstimator,
};
