mod execute;
mod output;
mod output_tests;

pub use execute::QueryResult;

use std::error::Error;

use clap::Args;

use super::{parse_param, CommandRunner, Context, Execute, Param};
use crate::output::{OutputFormat, Outputable};

/// Run a query and print its rows
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  rowbind query 'SELECT id, name FROM users'
  rowbind query 'SELECT * FROM users WHERE id = #{id}' -p id=7
  rowbind query 'SELECT count(*) FROM users' --scalar")]
pub struct QueryCmd {
    /// SQL to run; with -p it is a template with #{name} placeholders
    pub sql: String,

    /// Template parameter as name=value (repeatable)
    #[arg(short = 'p', long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
    pub params: Vec<Param>,

    /// Read the first column of every row as an integer
    #[arg(long, default_value_t = false)]
    pub scalar: bool,
}

impl CommandRunner for QueryCmd {
    fn run(self, ctx: &mut Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(ctx)?;
        Ok(result.format(format))
    }
}
