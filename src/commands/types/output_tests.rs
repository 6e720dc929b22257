//! Output formatting tests for types command.

#[cfg(test)]
mod tests {
    use super::super::execute::{TypeEntry, TypesResult};
    use crate::types::HostType;
    use rstest::{fixture, rstest};

    const TABLE: &str = "\
Type mappings (2):
  BIGINT  -> i64
  BIT     -> bool";

    #[fixture]
    fn types_result() -> TypesResult {
        TypesResult {
            entries: vec![
                TypeEntry {
                    column_type: "BIGINT".into(),
                    host_type: HostType::BigInt,
                },
                TypeEntry {
                    column_type: "BIT".into(),
                    host_type: HostType::Bool,
                },
            ],
        }
    }

    crate::output_table_test! {
        test_name: test_to_table,
        fixture: types_result,
        fixture_type: TypesResult,
        expected: TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_empty,
        fixture: empty,
        fixture_type: TypesResult,
        expected: "Type mappings (0):",
    }

    #[fixture]
    fn empty() -> TypesResult {
        TypesResult::default()
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: types_result,
        fixture_type: TypesResult,
        assertions: {
            "entries": serde_json::json!([
                {"column_type": "BIGINT", "host_type": "bigint"},
                {"column_type": "BIT", "host_type": "bool"},
            ]),
        },
    }
}
