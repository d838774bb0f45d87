use std::borrow::Cow;

/// Raw field input, before normalization.
///
/// One variant per scalar width a collector can hand over. Every variant
/// normalizes to `f64` or to "unconvertible" (`None`):
/// - floats and integers: widened/converted with `as`-style semantics
/// - `Bool`: `true -> 1.0`, `false -> 0.0`
/// - `Text`, `Bytes`: parsed as a base-10 float literal
/// - `Null`, `Unsupported`: always unconvertible
///
/// Optional inputs collapse into this enum through `From<Option<T>>`:
/// `Some(v)` becomes `v`'s variant, `None` becomes `Null`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Float32(f32),
    Float64(f64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Isize(isize),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Usize(usize),
    Bool(bool),

    /// Textual number, e.g. scraped from a status page.
    Text(Cow<'a, str>),
    /// Byte buffer holding a textual number. Must be UTF-8.
    Bytes(Cow<'a, [u8]>),

    /// Absent optional value.
    Null,
    /// Composite or otherwise non-scalar input (arrays, maps, objects).
    Unsupported,
}

impl FieldValue<'_> {
    /// Canonical numeric form of this value, or `None` if it has none.
    pub fn normalize(&self) -> Option<f64> {
        match self {
            FieldValue::Float32(v) => Some(f64::from(*v)),
            FieldValue::Float64(v) => Some(*v),
            FieldValue::Int8(v) => Some(f64::from(*v)),
            FieldValue::Int16(v) => Some(f64::from(*v)),
            FieldValue::Int32(v) => Some(f64::from(*v)),
            FieldValue::Int64(v) => Some(*v as f64),
            FieldValue::Isize(v) => Some(*v as f64),
            FieldValue::UInt8(v) => Some(f64::from(*v)),
            FieldValue::UInt16(v) => Some(f64::from(*v)),
            FieldValue::UInt32(v) => Some(f64::from(*v)),
            FieldValue::UInt64(v) => Some(*v as f64),
            FieldValue::Usize(v) => Some(*v as f64),
            FieldValue::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            FieldValue::Text(s) => parse_float(s),
            FieldValue::Bytes(b) => std::str::from_utf8(b).ok().and_then(parse_float),
            FieldValue::Null | FieldValue::Unsupported => None,
        }
    }

    /// Map a JSON value onto the closest scalar variant.
    ///
    /// Arrays and objects are `Unsupported`.
    pub fn from_json(value: &serde_json::Value) -> FieldValue<'_> {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int64(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::UInt64(u)
                } else {
                    n.as_f64().map_or(FieldValue::Unsupported, FieldValue::Float64)
                }
            }
            serde_json::Value::String(s) => FieldValue::Text(Cow::Borrowed(s.as_str())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => FieldValue::Unsupported,
        }
    }
}

/// Base-10 float literal. A literal too large for `f64` is rejected rather
/// than saturated to infinity; only the explicit `inf`/`infinity` spellings
/// yield an infinite value.
fn parse_float(s: &str) -> Option<f64> {
    let v: f64 = s.parse().ok()?;
    if v.is_infinite() && !is_infinity_literal(s) {
        return None;
    }
    Some(v)
}

fn is_infinity_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

// ---------------------------------------------------------------------------
// From impls: native scalars → FieldValue
// ---------------------------------------------------------------------------

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for FieldValue<'_> {
                fn from(v: $ty) -> Self {
                    FieldValue::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    f32 => Float32,
    f64 => Float64,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    isize => Isize,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    usize => Usize,
    bool => Bool,
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(s: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(s: &'a String) -> Self {
        FieldValue::Text(Cow::Borrowed(s.as_str()))
    }
}

impl From<String> for FieldValue<'_> {
    fn from(s: String) -> Self {
        FieldValue::Text(Cow::Owned(s))
    }
}

impl<'a> From<&'a [u8]> for FieldValue<'a> {
    fn from(b: &'a [u8]) -> Self {
        FieldValue::Bytes(Cow::Borrowed(b))
    }
}

impl From<Vec<u8>> for FieldValue<'_> {
    fn from(b: Vec<u8>) -> Self {
        FieldValue::Bytes(Cow::Owned(b))
    }
}

impl<'a, T: Into<FieldValue<'a>>> From<Option<T>> for FieldValue<'a> {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}
