//! Command-line arguments and resolved configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use ddic_core::SqlDialect;

use crate::formatter::OutputFormat;

/// Default location of the persisted catalog.
pub const DEFAULT_CATALOG_PATH: &str = "./data/dictionary.json";

/// Resolved CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Path of the persisted catalog.
    pub catalog_path: PathBuf,

    /// Bootstrap the sample schema when no catalog exists at `catalog_path`.
    pub bootstrap_sample: bool,

    /// Output format.
    pub format: OutputFormat,
}

impl CliConfig {
    /// Create a configuration for the given catalog path.
    pub fn new(catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            bootstrap_sample: false,
            format: OutputFormat::Table,
        }
    }

    /// Bootstrap the sample schema when the catalog is missing.
    pub fn with_sample(mut self) -> Self {
        self.bootstrap_sample = true;
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_PATH)
    }
}

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "ddic")]
#[command(version, about = "Data dictionary catalog tool", long_about = None)]
pub struct Args {
    /// Path of the persisted catalog.
    #[arg(short, long, global = true, default_value = DEFAULT_CATALOG_PATH)]
    pub catalog: PathBuf,

    /// Load the patient sample schema if the catalog file does not exist.
    #[arg(long, global = true)]
    pub sample: bool,

    /// Output format.
    #[arg(long, global = true, default_value = "table", value_enum)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Split the arguments into configuration and the command to run.
    pub fn into_config(self) -> (CliConfig, Command) {
        let config = CliConfig {
            catalog_path: self.catalog,
            bootstrap_sample: self.sample,
            format: self.format,
        };
        (config, self.command)
    }
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Check referential consistency; exits with status 1 on errors.
    Validate,

    /// Generate DDL.
    Ddl {
        #[command(subcommand)]
        target: DdlTarget,
    },

    /// Show where an entity is used.
    WhereUsed {
        #[command(subcommand)]
        target: WhereUsedTarget,
    },

    /// List registered entities of one kind.
    List {
        #[arg(value_enum)]
        kind: ListKind,
    },

    /// Write the catalog as JSON to another path.
    Export {
        /// Target file.
        path: PathBuf,
    },

    /// Write the sample schema to the catalog path.
    Init {
        /// Overwrite an existing catalog.
        #[arg(long)]
        force: bool,
    },
}

/// DDL targets.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum DdlTarget {
    /// CREATE TABLE for a registered table.
    Table {
        name: String,
        #[arg(short, long, default_value_t = SqlDialect::Postgresql)]
        dialect: SqlDialect,
    },
    /// CREATE VIEW for a registered view.
    View {
        name: String,
        #[arg(short, long, default_value_t = SqlDialect::Postgresql)]
        dialect: SqlDialect,
    },
}

/// Where-used targets.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum WhereUsedTarget {
    /// Data elements, tables and structures built on a domain.
    Domain { name: String },
    /// Tables and structures with fields on a data element.
    DataElement { name: String },
    /// Views, search helps and lock objects over a table.
    Table { name: String },
}

/// Entity kinds accepted by `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Domains,
    DataElements,
    Tables,
    Structures,
    Views,
    SearchHelps,
    LockObjects,
}
