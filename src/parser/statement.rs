#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Insert,
    Update,
    Delete,
    LastInsertId,
}

impl Verb {
    /// Whether the operation name carries a `By<Field>` suffix
    #[must_use]
    pub const fn has_field(self) -> bool {
        matches!(self, Self::Get | Self::Update | Self::Delete)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::LastInsertId => "lastInsertId",
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded operation name. Tokens borrow from the name and are not yet
/// normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor<'a> {
    pub verb: Verb,
    /// Empty only for `lastInsertId`
    pub table: &'a str,
    pub field: Option<&'a str>,
}
