//! Output formatting for update command results.

use super::execute::UpdateResult;
use crate::output::Outputable;

impl Outputable for UpdateResult {
    fn to_table(&self) -> String {
        let noun = if self.affected == 1 { "row" } else { "rows" };
        format!("{} {} affected", self.affected, noun)
    }
}
