//! Output formatting tests for query command.

#[cfg(test)]
mod tests {
    use super::super::execute::QueryResult;
    use crate::types::Value;
    use rstest::{fixture, rstest};

    const EMPTY_TABLE: &str = "(0 rows)";

    const SINGLE_TABLE: &str = "\
7  Ann

(1 row)";

    const MULTIPLE_TABLE: &str = "\
7   Ann
12  NULL

(2 rows)";

    #[fixture]
    fn empty_result() -> QueryResult {
        QueryResult {
            sql: "SELECT id, name FROM users".to_string(),
            row_count: 0,
            rows: vec![],
        }
    }

    #[fixture]
    fn single_result() -> QueryResult {
        QueryResult {
            sql: "SELECT id, name FROM users".to_string(),
            row_count: 1,
            rows: vec![vec![Value::BigInt(7), Value::from("Ann")]],
        }
    }

    #[fixture]
    fn multiple_result() -> QueryResult {
        QueryResult {
            sql: "SELECT id, name FROM users".to_string(),
            row_count: 2,
            rows: vec![
                vec![Value::BigInt(7), Value::from("Ann")],
                vec![Value::BigInt(12), Value::Null],
            ],
        }
    }

    crate::output_table_test! {
        test_name: test_to_table_empty,
        fixture: empty_result,
        fixture_type: QueryResult,
        expected: EMPTY_TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_single,
        fixture: single_result,
        fixture_type: QueryResult,
        expected: SINGLE_TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_multiple,
        fixture: multiple_result,
        fixture_type: QueryResult,
        expected: MULTIPLE_TABLE,
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: multiple_result,
        fixture_type: QueryResult,
        assertions: {
            "row_count": 2,
            "rows": serde_json::json!([[7, "Ann"], [12, null]]),
        },
    }
}
