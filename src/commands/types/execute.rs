use std::error::Error;

use serde::Serialize;

use super::TypesCmd;
use crate::commands::{Context, Execute};
use crate::types::HostType;

/// One row of the type table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeEntry {
    pub column_type: String,
    pub host_type: HostType,
}

/// Result of the types command execution
#[derive(Debug, Default, Serialize)]
pub struct TypesResult {
    pub entries: Vec<TypeEntry>,
}

impl Execute for TypesCmd {
    type Output = TypesResult;

    fn execute(self, ctx: &mut Context) -> Result<Self::Output, Box<dyn Error>> {
        let entries = ctx
            .executor
            .type_table()
            .entries()
            .into_iter()
            .map(|(column_type, host_type)| TypeEntry {
                column_type,
                host_type,
            })
            .collect();

        Ok(TypesResult { entries })
    }
}
