use std::error::Error;

use serde::Serialize;

use super::UpdateCmd;
use crate::commands::params::to_source;
use crate::commands::{Context, Execute};

/// Result of the update command execution
#[derive(Debug, Default, Serialize)]
pub struct UpdateResult {
    pub sql: String,
    pub affected: u64,
}

impl Execute for UpdateCmd {
    type Output = UpdateResult;

    fn execute(self, ctx: &mut Context) -> Result<Self::Output, Box<dyn Error>> {
        let Context { session, executor } = ctx;
        let affected = if self.params.is_empty() {
            executor.execute_update(session, &self.sql, &[])?
        } else {
            executor.execute_update_with(session, &self.sql, &to_source(&self.params))?
        };

        Ok(UpdateResult {
            sql: self.sql,
            affected,
        })
    }
}
