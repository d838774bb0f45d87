use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::traits::{MetricRead, MetricWrite};
use crate::types::ValueKind;
use crate::value::FieldValue;

/// A single dimension of a metric.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// A single measured value. `None` marks a field whose input had no
/// numeric form.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: Option<f64>,
}

/// The record passed between collectors, processors, aggregators and
/// writers.
///
/// Invariants:
/// - tag keys are unique and `tags` stays sorted ascending by key
/// - field keys are unique and `fields` keeps first-insertion order
/// - field values are always normalized (`f64` or the `None` marker)
///
/// `Clone` is a deep copy; no entry is shared with the original.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    name: String,
    tags: Vec<Tag>,
    fields: Vec<Field>,
    time: SystemTime,
    kind: ValueKind,
    aggregate: bool,
}

impl Metric {
    /// Build a metric from raw tag and field pairs.
    ///
    /// Never fails. Fields whose value has no numeric form are skipped
    /// entirely. Duplicate keys resolve last-wins.
    pub fn new<'v, T, TK, TV, F, FK, FV>(
        name: impl Into<String>,
        tags: T,
        fields: F,
        time: SystemTime,
    ) -> Self
    where
        T: IntoIterator<Item = (TK, TV)>,
        TK: Into<String>,
        TV: Into<String>,
        F: IntoIterator<Item = (FK, FV)>,
        FK: Into<String>,
        FV: Into<FieldValue<'v>>,
    {
        let tags = tags.into_iter();
        let fields = fields.into_iter();
        let mut m = Self {
            name: name.into(),
            tags: Vec::with_capacity(tags.size_hint().0),
            fields: Vec::with_capacity(fields.size_hint().0),
            time,
            kind: ValueKind::Untyped,
            aggregate: false,
        };

        for (k, v) in tags {
            m.add_tag(k, v);
        }

        for (k, v) in fields {
            let v: FieldValue<'v> = v.into();
            if let Some(n) = v.normalize() {
                m.upsert_field(k.into(), Some(n));
            }
        }

        m
    }

    /// Replace the value kind (defaults to `Untyped`).
    pub fn with_value_kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    /// Deep copy of any readable metric. Tracking or acknowledgment state
    /// the source may carry is not copied.
    pub fn from_existing<M: MetricRead + ?Sized>(other: &M) -> Self {
        Self {
            name: other.name().to_string(),
            tags: other.tag_list().to_vec(),
            fields: other.field_list().to_vec(),
            time: other.time(),
            kind: other.value_kind(),
            aggregate: other.is_aggregate(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn add_prefix(&mut self, prefix: &str) {
        self.name.insert_str(0, prefix);
    }

    pub fn add_suffix(&mut self, suffix: &str) {
        self.name.push_str(suffix);
    }

    /// Insert or overwrite a tag, keeping the list sorted by key.
    pub fn add_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.tags.iter().position(|t| t.key >= key) {
            Some(i) if self.tags[i].key == key => self.tags[i].value = value,
            Some(i) => self.tags.insert(i, Tag { key, value }),
            None => self.tags.push(Tag { key, value }),
        }
    }

    pub fn remove_tag(&mut self, key: &str) {
        if let Some(i) = self.tags.iter().position(|t| t.key == key) {
            self.tags.remove(i);
        }
    }

    /// Insert or replace a field in place.
    ///
    /// Unlike [`Metric::new`], an unconvertible value is still stored, as a
    /// field with no value.
    pub fn add_field<'v>(&mut self, key: impl Into<String>, value: impl Into<FieldValue<'v>>) {
        let value: FieldValue<'v> = value.into();
        self.upsert_field(key.into(), value.normalize());
    }

    pub fn remove_field(&mut self, key: &str) {
        if let Some(i) = self.fields.iter().position(|f| f.key == key) {
            self.fields.remove(i);
        }
    }

    pub fn set_time(&mut self, time: SystemTime) {
        self.time = time;
    }

    /// Mark the metric as an aggregation result.
    ///
    /// The flag can only be raised: `set_aggregate(false)` also sets it.
    pub fn set_aggregate(&mut self, _aggregate: bool) {
        self.aggregate = true;
    }

    fn upsert_field(&mut self, key: String, value: Option<f64>) {
        match self.fields.iter_mut().find(|f| f.key == key) {
            Some(field) => field.value = value,
            None => self.fields.push(Field { key, value }),
        }
    }
}

impl MetricRead for Metric {
    fn name(&self) -> &str {
        &self.name
    }

    fn tag_list(&self) -> &[Tag] {
        &self.tags
    }

    fn field_list(&self) -> &[Field] {
        &self.fields
    }

    fn time(&self) -> SystemTime {
        self.time
    }

    fn value_kind(&self) -> ValueKind {
        self.kind
    }

    fn is_aggregate(&self) -> bool {
        self.aggregate
    }
}

impl MetricWrite for Metric {
    fn set_name(&mut self, name: String) {
        Metric::set_name(self, name);
    }

    fn add_prefix(&mut self, prefix: &str) {
        Metric::add_prefix(self, prefix);
    }

    fn add_suffix(&mut self, suffix: &str) {
        Metric::add_suffix(self, suffix);
    }

    fn add_tag(&mut self, key: String, value: String) {
        Metric::add_tag(self, key, value);
    }

    fn remove_tag(&mut self, key: &str) {
        Metric::remove_tag(self, key);
    }

    fn add_field(&mut self, key: String, value: FieldValue<'_>) {
        Metric::add_field(self, key, value);
    }

    fn remove_field(&mut self, key: &str) {
        Metric::remove_field(self, key);
    }

    fn set_time(&mut self, time: SystemTime) {
        Metric::set_time(self, time);
    }

    fn set_aggregate(&mut self, aggregate: bool) {
        Metric::set_aggregate(self, aggregate);
    }
}

/// Debug rendering: `name {k=v, ..} {k=v, ..} <unix nanos>`.
///
/// Not a wire format.
impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.name)?;
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", tag.key, tag.value)?;
        }
        f.write_str("} {")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match field.value {
                Some(v) => write!(f, "{}={v}", field.key)?,
                None => write!(f, "{}=<none>", field.key)?,
            }
        }
        write!(f, "}} {}", unix_nanos(self.time))
    }
}

/// Signed nanoseconds since the Unix epoch.
pub fn unix_nanos(time: SystemTime) -> i128 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_nanos() as i128,
        Err(e) => -(e.duration().as_nanos() as i128),
    }
}
