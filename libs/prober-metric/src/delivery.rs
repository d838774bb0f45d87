use std::fmt;
use std::time::SystemTime;

use crate::metric::{Field, Metric, Tag};
use crate::traits::{MetricRead, MetricWrite};
use crate::types::ValueKind;
use crate::value::FieldValue;

/// Acknowledgment hooks called by the last pipeline stage that handles a
/// metric. All hooks default to no-ops.
pub trait Delivery {
    /// The metric was written successfully.
    fn accept(&mut self) {}

    /// The metric could not be written.
    fn reject(&mut self) {}

    /// The metric was filtered out or otherwise dropped on purpose.
    fn discard(&mut self) {}
}

/// A plain metric carries no tracking state.
impl Delivery for Metric {}

/// Final delivery state of a tracked metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Discarded,
}

/// A metric paired with delivery tracking.
///
/// The first resolution wins: once the outcome leaves `Pending`, later
/// `accept`/`reject`/`discard` calls are ignored. Read and write calls are
/// forwarded to the wrapped metric.
#[derive(Debug, Clone)]
pub struct Tracked<M> {
    metric: M,
    outcome: Outcome,
}

impl<M> Tracked<M> {
    pub fn new(metric: M) -> Self {
        Self {
            metric,
            outcome: Outcome::Pending,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    pub fn metric_mut(&mut self) -> &mut M {
        &mut self.metric
    }

    /// Drop the tracking state and return the metric.
    pub fn into_inner(self) -> M {
        self.metric
    }

    fn resolve(&mut self, outcome: Outcome) {
        if self.outcome == Outcome::Pending {
            self.outcome = outcome;
        }
    }
}

impl<M> Delivery for Tracked<M> {
    fn accept(&mut self) {
        self.resolve(Outcome::Accepted);
    }

    fn reject(&mut self) {
        self.resolve(Outcome::Rejected);
    }

    fn discard(&mut self) {
        self.resolve(Outcome::Discarded);
    }
}

impl<M: MetricRead> fmt::Display for Tracked<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.metric, f)
    }
}

impl<M: MetricRead> MetricRead for Tracked<M> {
    fn name(&self) -> &str {
        self.metric.name()
    }

    fn tag_list(&self) -> &[Tag] {
        self.metric.tag_list()
    }

    fn field_list(&self) -> &[Field] {
        self.metric.field_list()
    }

    fn time(&self) -> SystemTime {
        self.metric.time()
    }

    fn value_kind(&self) -> ValueKind {
        self.metric.value_kind()
    }

    fn is_aggregate(&self) -> bool {
        self.metric.is_aggregate()
    }
}

impl<M: MetricWrite> MetricWrite for Tracked<M> {
    fn set_name(&mut self, name: String) {
        self.metric.set_name(name);
    }

    fn add_prefix(&mut self, prefix: &str) {
        self.metric.add_prefix(prefix);
    }

    fn add_suffix(&mut self, suffix: &str) {
        self.metric.add_suffix(suffix);
    }

    fn add_tag(&mut self, key: String, value: String) {
        self.metric.add_tag(key, value);
    }

    fn remove_tag(&mut self, key: &str) {
        self.metric.remove_tag(key);
    }

    fn add_field(&mut self, key: String, value: FieldValue<'_>) {
        self.metric.add_field(key, value);
    }

    fn remove_field(&mut self, key: &str) {
        self.metric.remove_field(key);
    }

    fn set_time(&mut self, time: SystemTime) {
        self.metric.set_time(time);
    }

    fn set_aggregate(&mut self, aggregate: bool) {
        self.metric.set_aggregate(aggregate);
    }
}
