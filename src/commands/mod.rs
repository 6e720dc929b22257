//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - An `execute` module producing a serializable result
//! - An `output` module rendering that result as a table

mod params;
mod query;
mod types;
mod update;

pub use params::{parse_param, parse_value, Param};
pub use query::{QueryCmd, QueryResult};
pub use types::{TypeEntry, TypesCmd, TypesResult};
pub use update::{UpdateCmd, UpdateResult};

use std::error::Error;

use clap::Subcommand;
use enum_dispatch::enum_dispatch;

use crate::db::Session;
use crate::executor::Executor;
use crate::output::{OutputFormat, Outputable};

/// What a command runs against: the caller's session and the executor configured for it.
#[derive(Debug)]
pub struct Context {
    pub session: Session,
    pub executor: Executor,
}

impl Context {
    pub fn new(session: Session, executor: Executor) -> Self {
        Self { session, executor }
    }
}

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, ctx: &mut Context) -> Result<Self::Output, Box<dyn Error>>;
}

/// Run a parsed command and render its result.
#[enum_dispatch]
pub trait CommandRunner {
    fn run(self, ctx: &mut Context, format: OutputFormat) -> Result<String, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
#[enum_dispatch(CommandRunner)]
pub enum Command {
    /// Run a query and print its rows
    Query(QueryCmd),

    /// Run an insert, update or delete and print the affected row count
    Update(UpdateCmd),

    /// Print the column type mapping table
    Types(TypesCmd),
}
