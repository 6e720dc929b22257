//! Execute tests for types command.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::{TypeEntry, TypesCmd};
    use crate::commands::{Context, Execute};
    use crate::db::{Session, SqliteProvider};
    use crate::diagnostics::NullSink;
    use crate::executor::Executor;
    use crate::test_utils::memory_context;
    use crate::type_table::TypeTable;
    use crate::types::HostType;
    use rstest::rstest;

    #[rstest]
    fn test_lists_default_mappings() {
        let mut ctx = memory_context();
        let result = TypesCmd {}.execute(&mut ctx).unwrap();

        assert!(result.entries.contains(&TypeEntry {
            column_type: "BIGINT".into(),
            host_type: HostType::BigInt,
        }));
        assert!(result.entries.contains(&TypeEntry {
            column_type: "BIT".into(),
            host_type: HostType::Bool,
        }));
    }

    #[rstest]
    fn test_lists_custom_table_sorted() {
        let types = TypeTable::empty();
        types.add_type("money", HostType::Double);
        types.add_type("CLOB", HostType::Text);

        let mut ctx = Context::new(
            Session::new(Arc::new(SqliteProvider::in_memory())),
            Executor::new()
                .with_type_table(Arc::new(types))
                .with_sink(Arc::new(NullSink)),
        );
        let result = TypesCmd {}.execute(&mut ctx).unwrap();

        let names: Vec<_> = result.entries.iter().map(|e| e.column_type.as_str()).collect();
        assert_eq!(names, vec!["CLOB", "MONEY"]);
    }
}
