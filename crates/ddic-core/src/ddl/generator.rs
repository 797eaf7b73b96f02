//! `CREATE TABLE` and `CREATE VIEW` rendering.

use super::SqlDialect;
use crate::catalog::{Domain, TableDefinition, ViewDefinition};
use crate::error::{Error, Result};

/// Renders DDL statements from dictionary definitions.
///
/// Statements carry no trailing semicolon. Only column types depend on the
/// dialect; view statements are identical for every dialect.
pub struct DdlGenerator;

impl DdlGenerator {
    /// Generate a `CREATE TABLE` statement.
    ///
    /// Non-nullable columns get `NOT NULL`; key fields are collected into a
    /// trailing `PRIMARY KEY` clause in declaration order. Fails if the table
    /// has no fields.
    pub fn generate_create_table(table: &TableDefinition, dialect: SqlDialect) -> Result<String> {
        let fields = table.fields();
        if fields.is_empty() {
            return Err(Error::invalid(format!(
                "Table '{}' has no fields defined",
                table.name()
            )));
        }

        let keys: Vec<&str> = table.key_fields().map(|f| f.name()).collect();

        let mut lines: Vec<String> = fields
            .iter()
            .map(|field| {
                let mut line = format!(
                    "    {} {}",
                    field.name(),
                    dialect.sql_type(field.domain())
                );
                if !field.is_nullable() {
                    line.push_str(" NOT NULL");
                }
                line
            })
            .collect();
        if !keys.is_empty() {
            lines.push(format!("    PRIMARY KEY ({})", keys.join(", ")));
        }

        Ok(format!(
            "CREATE TABLE {} (\n{}\n)",
            table.name(),
            lines.join(",\n")
        ))
    }

    /// Generate a `CREATE VIEW` statement.
    ///
    /// Without selected fields the view selects `*`; multiple base tables are
    /// listed comma-separated in the `FROM` clause. Fails if the view has no
    /// base tables.
    pub fn generate_create_view(view: &ViewDefinition, _dialect: SqlDialect) -> Result<String> {
        let tables = view.base_tables();
        if tables.is_empty() {
            return Err(Error::invalid(format!(
                "View '{}' has no base tables defined",
                view.name()
            )));
        }

        let projection = if view.selected_fields().is_empty() {
            "*".to_string()
        } else {
            view.selected_fields().join(", ")
        };
        let from = tables
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!(
            "CREATE VIEW {} AS\nSELECT {}\nFROM {}",
            view.name(),
            projection,
            from
        ))
    }

    /// Column type for a domain in the given dialect.
    pub fn to_sql_type(domain: &Domain, dialect: SqlDialect) -> String {
        dialect.sql_type(domain)
    }
}
