//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and the glue that turns parsed
//! arguments into a session and executor. Individual command definitions are in the
//! `commands` module.

use std::error::Error;
use std::sync::Arc;

use clap::Parser;

use crate::commands::{Command, CommandRunner, Context};
use crate::config::{ConfigError, ConfigFile};
use crate::db::{DatabaseConfig, Session};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::executor::Executor;
use crate::output::OutputFormat;
use crate::type_table::TypeTable;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Database to use: a SQLite path, :memory:, sqlite://PATH or postgres://URL.
    /// Defaults to .rowbind.json, then DATABASE_URL, then ./rowbind.sqlite
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// The database selected by `--db`, or by the usual resolution order without it.
    pub fn database(&self) -> Result<DatabaseConfig, Box<dyn Error>> {
        match &self.db {
            Some(url) => DatabaseConfig::from_url(url),
            None => DatabaseConfig::resolve(),
        }
    }

    /// Run the parsed command and return its rendered output.
    ///
    /// Type mappings from `.rowbind.json` are added to the global type table before the
    /// command runs. The session is closed afterwards whether or not the command succeeded.
    pub fn run(self) -> Result<String, Box<dyn Error>> {
        let sink: Arc<dyn DiagnosticSink> = match ConfigFile::load() {
            Ok(file) => {
                file.apply_types(TypeTable::global());
                file.diagnostics.sink()
            }
            Err(ConfigError::NotFound { .. }) => Arc::new(TracingSink),
            Err(e) => return Err(e.into()),
        };

        let database = self.database()?;

        let Args { format, command, .. } = self;
        let mut ctx = Context::new(
            Session::new(database.connect()?),
            Executor::new().with_sink(sink),
        );

        let output = command.run(&mut ctx, format);
        let closed = ctx.session.close();
        let output = output?;
        closed?;
        Ok(output)
    }
}
