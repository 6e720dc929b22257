//! Output formatting for types command results.

use super::execute::TypesResult;
use crate::output::Outputable;

impl Outputable for TypesResult {
    fn to_table(&self) -> String {
        let mut lines = vec![format!("Type mappings ({}):", self.entries.len())];
        let width = self
            .entries
            .iter()
            .map(|e| e.column_type.len())
            .max()
            .unwrap_or(0);

        for entry in &self.entries {
            lines.push(format!(
                "  {:<width$}  -> {}",
                entry.column_type,
                entry.host_type.name(),
                width = width
            ));
        }

        lines.join("\n")
    }
}
