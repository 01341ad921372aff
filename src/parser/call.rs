use super::common::ws;
use crate::core::{Argument, CrudError, Record, Value};
use nom::{
    IResult,
    character::complete::{alphanumeric1, char},
    combinator::{all_consuming, map_opt, opt, rest},
    sequence::{pair, preceded},
};

/// An operation call written as text, e.g. `updateUsersById(7, {"age": 31})`
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub operation: String,
    pub args: Vec<Argument>,
}

/// `name` or `name(<args>)`; returns the raw argument list text
fn call_shape(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    all_consuming(pair(
        ws(alphanumeric1),
        opt(preceded(
            char('('),
            map_opt(rest, |s: &str| s.trim_end().strip_suffix(')')),
        )),
    ))(input)
}

/// Parses call text into an operation name and arguments.
///
/// Each argument is a JSON literal: objects become field maps (key order is
/// kept), everything else becomes a scalar value. Nested arrays or objects
/// inside an argument are rejected.
pub fn parse_call(input: &str) -> Result<Call, CrudError> {
    let input = input.trim().trim_end_matches(';');
    let (_, (operation, body)) = call_shape(input)
        .map_err(|_| CrudError::InvalidArgument(format!("cannot parse call '{input}'")))?;

    let args = match body {
        Some(body) if !body.trim().is_empty() => {
            let items: Vec<serde_json::Value> = serde_json::from_str(&format!("[{body}]"))
                .map_err(|e| CrudError::InvalidArgument(format!("bad argument list: {e}")))?;
            items.into_iter().map(argument).collect::<Result<Vec<_>, _>>()?
        }
        _ => Vec::new(),
    };

    Ok(Call {
        operation: operation.to_string(),
        args,
    })
}

fn argument(json: serde_json::Value) -> Result<Argument, CrudError> {
    match json {
        serde_json::Value::Object(map) => {
            let mut record = Record::with_capacity(map.len());
            for (name, value) in map {
                record.insert(name, scalar(value)?);
            }
            Ok(Argument::Fields(record))
        }
        other => Ok(Argument::Value(scalar(other)?)),
    }
}

fn scalar(json: serde_json::Value) -> Result<Value, CrudError> {
    match json {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Bool(b) => Ok(Value::Boolean(b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Integer(i))
            } else if n.is_f64() {
                n.as_f64()
                    .map(Value::Real)
                    .ok_or_else(|| CrudError::InvalidArgument(format!("number {n} is out of range")))
            } else {
                // u64 above i64::MAX
                Err(CrudError::InvalidArgument(format!("integer {n} is out of range")))
            }
        }
        serde_json::Value::String(s) => Ok(Value::Text(s)),
        nested => Err(CrudError::InvalidArgument(format!(
            "nested value {nested} cannot be bound as a parameter"
        ))),
    }
}
