use serde::Serialize;
use crate::core::Record;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum QueryResult {
    /// `get*` matched nothing
    NoRows,
    /// `get*` matched exactly one row
    SingleRecord(Record),
    /// `get*` matched two or more rows, in backend order
    RecordSet(Vec<Record>),
    /// Rows touched by `insert*`, `update*` or `delete*`
    AffectedCount(u64),
    /// `lastInsertId`
    GeneratedId(i64),
}

impl QueryResult {
    /// Picks the result shape for a `get*` by row count
    pub(crate) fn from_rows(mut rows: Vec<Record>) -> Self {
        match rows.len() {
            0 => Self::NoRows,
            1 => rows.pop().map_or(Self::NoRows, Self::SingleRecord),
            _ => Self::RecordSet(rows),
        }
    }

    /// Rows regardless of shape; empty for non-query results
    #[must_use]
    pub fn records(&self) -> Vec<&Record> {
        match self {
            Self::SingleRecord(record) => vec![record],
            Self::RecordSet(records) => records.iter().collect(),
            Self::NoRows | Self::AffectedCount(_) | Self::GeneratedId(_) => Vec::new(),
        }
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        match self {
            Self::SingleRecord(record) => vec![record],
            Self::RecordSet(records) => records,
            Self::NoRows | Self::AffectedCount(_) | Self::GeneratedId(_) => Vec::new(),
        }
    }

    #[must_use]
    pub const fn affected_count(&self) -> Option<u64> {
        match self {
            Self::AffectedCount(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub const fn generated_id(&self) -> Option<i64> {
        match self {
            Self::GeneratedId(id) => Some(*id),
            _ => None,
        }
    }
}
