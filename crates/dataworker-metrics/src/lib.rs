//! A thin, cheaply-cloneable wrapper around the `metrics` crate's global
//! recorder, scoped to the handful of counters/histograms the Dataworker
//! needs (cycle counts, leaf counts, dispute counts): a single struct
//! threaded through the controllers so call sites don't each have to know
//! the metric name strings.

use std::time::Duration;

use metrics::{counter, gauge, histogram};

/// Cheap to clone: the `metrics` crate's macros resolve against the global
/// recorder, so this struct carries no state of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataworkerMetrics;

impl DataworkerMetrics {
    pub fn new() -> Self {
        Self
    }

    /// Records that a propose cycle ran to completion.
    pub fn increment_propose_cycles(&self) {
        counter!("dataworker_propose_cycles_total").increment(1);
    }

    /// Records that a validate cycle ran to completion.
    pub fn increment_validate_cycles(&self) {
        counter!("dataworker_validate_cycles_total").increment(1);
    }

    /// Records that a validate cycle ended in a dispute.
    pub fn increment_disputes(&self) {
        counter!("dataworker_disputes_total").increment(1);
    }

    /// Records the leaf count of a freshly built root, tagged by root kind.
    pub fn set_leaf_count(&self, root: &'static str, count: usize) {
        gauge!("dataworker_leaf_count", "root" => root).set(count as f64);
    }

    /// Records how long building all three roots took for one cycle.
    pub fn record_root_build_time(&self, elapsed: Duration) {
        histogram!("dataworker_root_build_seconds").record(elapsed.as_secs_f64());
    }
}
