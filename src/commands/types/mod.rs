mod execute;
mod execute_tests;
mod output;
mod output_tests;

pub use execute::{TypeEntry, TypesResult};

use std::error::Error;

use clap::Args;

use super::{CommandRunner, Context, Execute};
use crate::output::{OutputFormat, Outputable};

/// List the column type to host type mappings in effect
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  rowbind types
  rowbind types -o json

Extra mappings can be declared under \"types\" in .rowbind.json.")]
pub struct TypesCmd {}

impl CommandRunner for TypesCmd {
    fn run(self, ctx: &mut Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(ctx)?;
        Ok(result.format(format))
    }
}
