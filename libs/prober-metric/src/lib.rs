pub mod delivery;
pub mod hash;
pub mod metric;
pub mod traits;
pub mod types;
pub mod value;

pub use delivery::{Delivery, Outcome, Tracked};
pub use metric::{Field, Metric, Tag};
pub use traits::{MetricRead, MetricWrite};
pub use types::ValueKind;
pub use value::FieldValue;
