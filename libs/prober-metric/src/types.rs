use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════
//  Value Kind
// ════════════════════════════════════════════════════════════════

/// Semantic type of a measurement.
///
/// Carried through the pipeline untouched; the record itself never
/// interprets it. Aggregators and writers downstream decide what it means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    #[default]
    Untyped,
    Counter,
    Gauge,
    Summary,
    Histogram,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueKind::Untyped => write!(f, "untyped"),
            ValueKind::Counter => write!(f, "counter"),
            ValueKind::Gauge => write!(f, "gauge"),
            ValueKind::Summary => write!(f, "summary"),
            ValueKind::Histogram => write!(f, "histogram"),
        }
    }
}
