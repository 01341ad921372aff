use super::record::Record;
use super::value::Value;

/// One positional argument of an operation call.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Lookup value or any other scalar
    Value(Value),
    /// Field map for `insert*` columns and `update*` SET clauses
    Fields(Record),
}

impl Argument {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::Fields(_) => "field map",
        }
    }
}

impl From<Value> for Argument {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl From<Record> for Argument {
    fn from(r: Record) -> Self {
        Self::Fields(r)
    }
}

impl From<i64> for Argument {
    fn from(v: i64) -> Self {
        Self::Value(v.into())
    }
}

impl From<i32> for Argument {
    fn from(v: i32) -> Self {
        Self::Value(v.into())
    }
}

impl From<f64> for Argument {
    fn from(v: f64) -> Self {
        Self::Value(v.into())
    }
}

impl From<bool> for Argument {
    fn from(v: bool) -> Self {
        Self::Value(v.into())
    }
}

impl From<&str> for Argument {
    fn from(v: &str) -> Self {
        Self::Value(v.into())
    }
}

impl From<String> for Argument {
    fn from(v: String) -> Self {
        Self::Value(v.into())
    }
}
