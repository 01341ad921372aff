use super::common::non_empty_rest;
use super::statement::{OperationDescriptor, Verb};
use crate::core::CrudError;
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_until},
    combinator::{all_consuming, value, verify},
    sequence::separated_pair,
};

const LAST_INSERT_ID: &str = "lastInsertId";
const FIELD_SEPARATOR: &str = "By";

fn verb(input: &str) -> IResult<&str, Verb> {
    alt((
        value(Verb::Get, tag("get")),
        value(Verb::Insert, tag("insert")),
        value(Verb::Update, tag("update")),
        value(Verb::Delete, tag("delete")),
    ))(input)
}

/// `<Table>By<Field>`, split on the first `By`
fn table_by_field(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(
        verify(take_until(FIELD_SEPARATOR), |s: &str| !s.is_empty()),
        tag(FIELD_SEPARATOR),
        non_empty_rest,
    )(input)
}

/// Decodes `get<Table>By<Field>`, `insert<Table>`, `update<Table>By<Field>`,
/// `delete<Table>By<Field>` and the literal `lastInsertId`.
///
/// Verb prefixes are case-sensitive. A table or field token that itself
/// contains `By` cannot be expressed: everything after the first `By` is the
/// field token.
pub fn parse_operation(name: &str) -> Result<OperationDescriptor<'_>, CrudError> {
    if name == LAST_INSERT_ID {
        return Ok(OperationDescriptor {
            verb: Verb::LastInsertId,
            table: "",
            field: None,
        });
    }

    let invalid = || CrudError::InvalidOperationName(name.to_string());

    let (remainder, verb) = verb(name).map_err(|_| invalid())?;
    if verb.has_field() {
        let (_, (table, field)) = all_consuming(table_by_field)(remainder).map_err(|_| invalid())?;
        Ok(OperationDescriptor {
            verb,
            table,
            field: Some(field),
        })
    } else {
        let (_, table) = non_empty_rest(remainder).map_err(|_| invalid())?;
        Ok(OperationDescriptor {
            verb,
            table,
            field: None,
        })
    }
}
