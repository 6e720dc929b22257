mod execute;
mod output;

pub use execute::UpdateResult;

use std::error::Error;

use clap::Args;

use super::{parse_param, CommandRunner, Context, Execute, Param};
use crate::output::{OutputFormat, Outputable};

/// Run an insert, update or delete and print the affected row count
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  rowbind update 'CREATE TABLE users (id BIGINT, name VARCHAR(40))'
  rowbind update 'INSERT INTO users VALUES (#{id}, #{name})' -p id=7 -p name=Ann
  rowbind update 'DELETE FROM users WHERE id = #{id}' -p id=7")]
pub struct UpdateCmd {
    /// SQL to run; with -p it is a template with #{name} placeholders
    pub sql: String,

    /// Template parameter as name=value (repeatable)
    #[arg(short = 'p', long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
    pub params: Vec<Param>,
}

impl CommandRunner for UpdateCmd {
    fn run(self, ctx: &mut Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(ctx)?;
        Ok(result.format(format))
    }
}
