use super::error::CrudError;

/// A table or column name that is safe to splice into SQL text.
///
/// The only way to obtain one is [`Identifier::normalize`], which guarantees
/// the `^[a-z][a-z0-9_]*$` shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Identifier(String);

impl Identifier {
    /// camelCase -> snake_case: an underscore goes between every lowercase
    /// letter that is directly followed by an uppercase one, then everything
    /// is lowercased. Acronym runs stay together (`UserID` -> `user_id`,
    /// `HTTPRequest` -> `httprequest`).
    pub fn normalize(token: &str) -> Result<Self, CrudError> {
        let mut out = String::with_capacity(token.len() + 4);
        let mut chars = token.chars().peekable();
        while let Some(c) = chars.next() {
            out.push(c.to_ascii_lowercase());
            if c.is_ascii_lowercase() && chars.peek().is_some_and(char::is_ascii_uppercase) {
                out.push('_');
            }
        }

        if is_safe(&out) {
            Ok(Self(out))
        } else {
            Err(CrudError::InvalidIdentifier(token.to_string()))
        }
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_safe(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
