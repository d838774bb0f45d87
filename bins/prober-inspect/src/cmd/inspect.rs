use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use prober_metric::{FieldValue, Metric, MetricRead};

use crate::config::{Cli, Defaults, MetricConfig, ProbeFile};
use crate::error::InspectError;

pub fn run(cli: &Cli) -> Result<(), InspectError> {
    tracing::info!(config = %cli.config, "loading probe file");
    let file = ProbeFile::load(&cli.config)?;
    if file.metrics.is_empty() {
        return Err(InspectError::NoMetrics(cli.config.clone()));
    }

    let metrics = build_metrics(&file, SystemTime::now());
    tracing::info!(metrics = metrics.len(), "probe file loaded");

    let lines = if cli.group {
        render_groups(&metrics)
    } else {
        render_each(&metrics)
    };
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

/// Build every configured metric, then apply the file-level defaults.
pub fn build_metrics(file: &ProbeFile, now: SystemTime) -> Vec<Metric> {
    file.metrics
        .iter()
        .map(|cfg| {
            let mut m = build_metric(cfg, now);
            apply_defaults(&mut m, &file.defaults);
            tracing::debug!(name = m.name(), hash = m.hash_id(), "built metric");
            m
        })
        .collect()
}

fn build_metric(cfg: &MetricConfig, now: SystemTime) -> Metric {
    let time = cfg.timestamp_ns.map_or(now, from_unix_nanos);
    let fields = cfg.fields.iter().map(|(k, v)| (k.as_str(), field_value(v)));
    let mut m = Metric::new(cfg.name.as_str(), &cfg.tags, fields, time).with_value_kind(cfg.kind);

    let dropped = cfg.fields.len() - m.field_list().len();
    if dropped > 0 {
        tracing::debug!(metric = %cfg.name, dropped, "fields without numeric value skipped");
    }

    if cfg.aggregate {
        m.set_aggregate(true);
    }
    m
}

fn apply_defaults(m: &mut Metric, defaults: &Defaults) {
    if let Some(prefix) = &defaults.name_prefix {
        m.add_prefix(prefix);
    }
    if let Some(suffix) = &defaults.name_suffix {
        m.add_suffix(suffix);
    }
    for (k, v) in &defaults.tags {
        if !m.has_tag(k) {
            m.add_tag(k.as_str(), v.as_str());
        }
    }
}

/// TOML scalar → field input. Datetimes, arrays and tables have no numeric
/// form.
fn field_value(v: &toml::Value) -> FieldValue<'_> {
    match v {
        toml::Value::Integer(i) => FieldValue::Int64(*i),
        toml::Value::Float(f) => FieldValue::Float64(*f),
        toml::Value::Boolean(b) => FieldValue::Bool(*b),
        toml::Value::String(s) => FieldValue::from(s),
        toml::Value::Datetime(_) | toml::Value::Array(_) | toml::Value::Table(_) => {
            FieldValue::Unsupported
        }
    }
}

fn from_unix_nanos(ns: i64) -> SystemTime {
    if ns >= 0 {
        UNIX_EPOCH + Duration::from_nanos(ns.unsigned_abs())
    } else {
        UNIX_EPOCH - Duration::from_nanos(ns.unsigned_abs())
    }
}

fn render_each(metrics: &[Metric]) -> Vec<String> {
    metrics
        .iter()
        .map(|m| format!("{m}  hash={:#018x}", m.hash_id()))
        .collect()
}

/// Groups in order of first appearance.
fn render_groups(metrics: &[Metric]) -> Vec<String> {
    let mut index: HashMap<u64, usize> = HashMap::new();
    let mut groups: Vec<(u64, Vec<&Metric>)> = Vec::new();
    for m in metrics {
        let id = m.hash_id();
        match index.get(&id) {
            Some(&i) => groups[i].1.push(m),
            None => {
                index.insert(id, groups.len());
                groups.push((id, vec![m]));
            }
        }
    }

    let mut lines = Vec::new();
    for (id, members) in groups {
        lines.push(format!("group {id:#018x} ({} metrics)", members.len()));
        lines.extend(members.iter().map(|m| format!("  {m}")));
    }
    lines
}
