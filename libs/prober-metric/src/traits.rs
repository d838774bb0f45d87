use std::collections::HashMap;
use std::time::SystemTime;

use crate::metric::{Field, Tag};
use crate::types::ValueKind;
use crate::value::FieldValue;

/// Read surface of a metric, as seen by encoders, writers and aggregators.
///
/// Only the list accessors are required. The map views and the identity
/// hash are derived from them, so every implementor hashes identically to
/// `Metric` for the same name and tags.
pub trait MetricRead: std::fmt::Display {
    fn name(&self) -> &str;

    /// Tags sorted ascending by key.
    fn tag_list(&self) -> &[Tag];

    /// Fields in first-insertion order.
    fn field_list(&self) -> &[Field];

    fn time(&self) -> SystemTime;

    fn value_kind(&self) -> ValueKind;

    fn is_aggregate(&self) -> bool;

    fn tags(&self) -> HashMap<String, String> {
        self.tag_list()
            .iter()
            .map(|t| (t.key.clone(), t.value.clone()))
            .collect()
    }

    fn fields(&self) -> HashMap<String, Option<f64>> {
        self.field_list()
            .iter()
            .map(|f| (f.key.clone(), f.value))
            .collect()
    }

    fn has_tag(&self, key: &str) -> bool {
        self.tag_list().iter().any(|t| t.key == key)
    }

    fn get_tag(&self, key: &str) -> Option<&str> {
        self.tag_list()
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.value.as_str())
    }

    fn has_field(&self, key: &str) -> bool {
        self.field_list().iter().any(|f| f.key == key)
    }

    /// `None` if the key is absent, `Some(None)` if the key is present but
    /// holds no value.
    fn get_field(&self, key: &str) -> Option<Option<f64>> {
        self.field_list()
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value)
    }

    fn hash_id(&self) -> u64 {
        crate::hash::hash_id(self.name(), self.tag_list())
    }
}

/// Mutation surface of a metric.
///
/// Object-safe: field upserts take a `FieldValue` rather than a generic.
pub trait MetricWrite {
    fn set_name(&mut self, name: String);
    fn add_prefix(&mut self, prefix: &str);
    fn add_suffix(&mut self, suffix: &str);

    fn add_tag(&mut self, key: String, value: String);
    fn remove_tag(&mut self, key: &str);

    fn add_field(&mut self, key: String, value: FieldValue<'_>);
    fn remove_field(&mut self, key: &str);

    fn set_time(&mut self, time: SystemTime);

    /// Marks the metric as aggregated. The argument is ignored.
    fn set_aggregate(&mut self, aggregate: bool);
}
