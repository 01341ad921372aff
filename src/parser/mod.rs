// Module declarations
mod statement;
mod common;
mod operation;
mod call;

pub(crate) use statement::Verb;
pub(crate) use operation::parse_operation;
pub use call::{Call, parse_call};

#[cfg(test)]
mod tests {
    use super::*;
    use super::statement::OperationDescriptor;
    use crate::core::{Argument, CrudError, Record, Value};

    #[test]
    fn test_parse_get() {
        let op = parse_operation("getUserNameById").unwrap();
        assert_eq!(
            op,
            OperationDescriptor {
                verb: Verb::Get,
                table: "UserName",
                field: Some("Id"),
            }
        );
    }

    #[test]
    fn test_parse_insert() {
        let op = parse_operation("insertOrder").unwrap();
        assert_eq!(op.verb, Verb::Insert);
        assert_eq!(op.table, "Order");
        assert_eq!(op.field, None);
    }

    #[test]
    fn test_parse_insert_keeps_by_in_table_token() {
        // Insert has no field part, so nothing is split
        let op = parse_operation("insertStandBy").unwrap();
        assert_eq!(op.table, "StandBy");
        assert_eq!(op.field, None);
    }

    #[test]
    fn test_parse_update_and_delete() {
        let op = parse_operation("updateUsersByEmail").unwrap();
        assert_eq!((op.verb, op.table, op.field), (Verb::Update, "Users", Some("Email")));

        let op = parse_operation("deleteOrderItemsByOrderId").unwrap();
        assert_eq!((op.verb, op.table, op.field), (Verb::Delete, "OrderItems", Some("OrderId")));
    }

    #[test]
    fn test_parse_splits_on_first_by() {
        let op = parse_operation("getUsersByCreatedByName").unwrap();
        assert_eq!(op.table, "Users");
        assert_eq!(op.field, Some("CreatedByName"));
    }

    #[test]
    fn test_parse_last_insert_id() {
        let op = parse_operation("lastInsertId").unwrap();
        assert_eq!(op.verb, Verb::LastInsertId);
        assert_eq!(op.field, None);
    }

    #[test]
    fn test_parse_rejects_bad_names() {
        for name in [
            "fooBar",
            "",
            "get",
            "insert",
            "getUsers",
            "getByName",
            "getUsersBy",
            "deleteUsers",
            "updateBy",
            "GetUsersById",
            "LastInsertId",
            "lastInsertIdNow",
            "selectUsersById",
        ] {
            assert!(
                matches!(parse_operation(name), Err(CrudError::InvalidOperationName(ref n)) if n == name),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_call_with_scalar() {
        let call = parse_call("getUsersById(7)").unwrap();
        assert_eq!(call.operation, "getUsersById");
        assert_eq!(call.args, vec![Argument::Value(Value::Integer(7))]);
    }

    #[test]
    fn test_parse_call_with_field_map_keeps_order() {
        let call = parse_call(r#"updateUsersById( 7 , {"name": "Alice", "age": 30, "score": 1.5, "vip": true, "note": null});"#)
            .unwrap();
        assert_eq!(call.operation, "updateUsersById");
        let expected = Record::new()
            .with("name", "Alice")
            .with("age", 30)
            .with("score", 1.5)
            .with("vip", true)
            .with("note", Value::Null);
        assert_eq!(call.args, vec![Argument::from(7), Argument::Fields(expected)]);
    }

    #[test]
    fn test_parse_call_without_arguments() {
        assert!(parse_call("lastInsertId").unwrap().args.is_empty());
        assert!(parse_call("lastInsertId()").unwrap().args.is_empty());
    }

    #[test]
    fn test_parse_call_text_with_parentheses() {
        let call = parse_call(r#"getUsersByName("a) b")"#).unwrap();
        assert_eq!(call.args, vec![Argument::from("a) b")]);
    }

    #[test]
    fn test_parse_call_rejects_integers_beyond_i64() {
        assert!(matches!(
            parse_call("getUsersById(18446744073709551615)"),
            Err(CrudError::InvalidArgument(_))
        ));
        assert!(matches!(
            parse_call(r#"insertUsers({"id": 9223372036854775808})"#),
            Err(CrudError::InvalidArgument(_))
        ));

        let call = parse_call("getUsersById(9223372036854775807, -9223372036854775808, 2.5e3)").unwrap();
        assert_eq!(
            call.args,
            vec![
                Argument::from(i64::MAX),
                Argument::from(i64::MIN),
                Argument::from(2500.0),
            ]
        );
    }

    #[test]
    fn test_parse_call_errors() {
        assert!(matches!(parse_call("getUsersById(7"), Err(CrudError::InvalidArgument(_))));
        assert!(matches!(parse_call("getUsersById(7, )"), Err(CrudError::InvalidArgument(_))));
        assert!(matches!(parse_call("getUsersById([1, 2])"), Err(CrudError::InvalidArgument(_))));
        assert!(matches!(
            parse_call(r#"insertUsers({"tags": ["a"]})"#),
            Err(CrudError::InvalidArgument(_))
        ));
        assert!(matches!(parse_call("get users"), Err(CrudError::InvalidArgument(_))));
    }
}
