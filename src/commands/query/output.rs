//! Output formatting for query command results.

use super::execute::QueryResult;
use crate::output::{format_rows, Outputable};

impl Outputable for QueryResult {
    fn to_table(&self) -> String {
        let mut lines = format_rows(&self.rows);
        if !lines.is_empty() {
            lines.push(String::new());
        }
        let noun = if self.row_count == 1 { "row" } else { "rows" };
        lines.push(format!("({} {})", self.row_count, noun));
        lines.join("\n")
    }
}
