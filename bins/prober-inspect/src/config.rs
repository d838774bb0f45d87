use std::collections::BTreeMap;

use clap::Parser;
use serde::Deserialize;

use prober_metric::ValueKind;

use crate::error::InspectError;

#[derive(Parser)]
#[command(name = "prober-inspect", about = "Build probe metrics from a TOML file and show their identity")]
pub struct Cli {
    /// Path to TOML probe file.
    #[arg(long, default_value = "probes.toml", env = "PROBER_CONFIG")]
    pub config: String,

    /// Group metrics sharing an identity hash.
    #[arg(long)]
    pub group: bool,
}

// ---- TOML Config ----

#[derive(Debug, Default, Deserialize)]
pub struct ProbeFile {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub metrics: Vec<MetricConfig>,
}

/// Applied to every metric after it is built.
#[derive(Debug, Default, Deserialize)]
pub struct Defaults {
    pub name_prefix: Option<String>,
    pub name_suffix: Option<String>,
    /// Added only where the metric does not already carry the key.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct MetricConfig {
    pub name: String,
    #[serde(default)]
    pub kind: ValueKind,
    #[serde(default)]
    pub aggregate: bool,
    /// Unix nanoseconds. Missing → time of loading.
    pub timestamp_ns: Option<i64>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    #[serde(default)]
    pub fields: toml::Table,
}

impl ProbeFile {
    pub fn load(path: &str) -> Result<Self, InspectError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| InspectError::Config { context: "read", detail: format!("'{path}': {e}") })?;
        Self::parse(&content)
            .map_err(|e| InspectError::Config { context: "parse", detail: format!("'{path}': {e}") })
    }

    pub fn parse(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
