//! Store metrics.
//!
//! The store records through the [`metrics`] facade. Nothing is exported
//! unless the application installs a recorder; without one every call is a
//! no-op.
//!
//! | Metric | Kind | Labels |
//! |---|---|---|
//! | `store_actions_dispatched_total` | counter | `store`, `action_type` |
//! | `store_actions_rejected_total` | counter | `store`, `action_type` |
//! | `store_listeners_notified_total` | counter | `store` |
//! | `store_reduce_duration_seconds` | histogram | `store` |
//! | `store_listeners` | gauge | `store` |
//!
//! # Example
//!
//! ```
//! // Call once at startup, after installing a recorder.
//! redux_lite_runtime::metrics::describe_metrics();
//! ```

use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};

// Re-export metrics macros for use in other modules
pub use metrics::{counter, gauge, histogram};

/// Register descriptions for every store metric.
pub fn describe_metrics() {
    describe_counter!(
        "store_actions_dispatched_total",
        "Total number of actions reduced by a store"
    );
    describe_counter!(
        "store_actions_rejected_total",
        "Total number of unrecognized actions rejected by a strict store"
    );
    describe_counter!(
        "store_listeners_notified_total",
        "Total number of listener invocations"
    );
    describe_histogram!(
        "store_reduce_duration_seconds",
        Unit::Seconds,
        "Time taken by the root reducer for one action"
    );
    describe_gauge!(
        "store_listeners",
        "Number of listeners currently subscribed to a store"
    );
}
