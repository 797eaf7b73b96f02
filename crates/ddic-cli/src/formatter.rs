//! Output formatters for command results.

use clap::ValueEnum;
use comfy_table::{Cell, Color, Table};
use ddic_core::{Severity, SqlDialect, Usages, ValidationResult};

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Rows of a `list` command, one column per header.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Listing {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

/// Trait for formatting output.
pub trait Formatter {
    /// Format a consistency check result.
    fn format_validation(&self, result: &ValidationResult) -> String;

    /// Format where-used results for `subject`.
    fn format_usages(&self, subject: &str, usages: &Usages) -> String;

    /// Format a listing of entities.
    fn format_listing(&self, listing: &Listing) -> String;

    /// Format a generated DDL statement.
    fn format_ddl(&self, name: &str, dialect: SqlDialect, sql: &str) -> String;

    /// Format a simple message.
    fn format_message(&self, message: &str) -> String;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Table formatter using comfy-table.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_validation(&self, result: &ValidationResult) -> String {
        if result.findings().is_empty() {
            return "Catalog is consistent: 0 error(s), 0 warning(s)".to_string();
        }

        let mut table = Table::new();
        table.set_header(vec!["Severity", "Message"]);
        for finding in result.findings() {
            let color = match finding.severity {
                Severity::Error => Color::Red,
                Severity::Warning => Color::Yellow,
            };
            table.add_row(vec![
                Cell::new(finding.severity).fg(color),
                Cell::new(&finding.message),
            ]);
        }

        format!("{table}\n{result}")
    }

    fn format_usages(&self, subject: &str, usages: &Usages) -> String {
        if usages.is_empty() {
            return format!("No usages of {subject}");
        }

        let mut table = Table::new();
        table.set_header(vec!["Used by", "Name"]);
        for (kind, names) in usages.iter() {
            for name in names {
                table.add_row(vec![kind.to_string(), name.clone()]);
            }
        }
        table.to_string()
    }

    fn format_listing(&self, listing: &Listing) -> String {
        if listing.rows.is_empty() {
            return "No entries".to_string();
        }

        let mut table = Table::new();
        table.set_header(listing.headers.clone());
        for row in &listing.rows {
            table.add_row(row.clone());
        }
        format!("{table}\n{} row(s)", listing.rows.len())
    }

    fn format_ddl(&self, _name: &str, _dialect: SqlDialect, sql: &str) -> String {
        format!("{sql};")
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_validation(&self, result: &ValidationResult) -> String {
        let value = serde_json::json!({
            "valid": result.is_valid(),
            "errors": result.errors().count(),
            "warnings": result.warnings().count(),
            "findings": result.findings(),
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_usages(&self, subject: &str, usages: &Usages) -> String {
        let value = serde_json::json!({
            "name": subject,
            "usages": usages,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_listing(&self, listing: &Listing) -> String {
        let rows: Vec<serde_json::Value> = listing
            .rows
            .iter()
            .map(|row| {
                let obj: serde_json::Map<String, serde_json::Value> = listing
                    .headers
                    .iter()
                    .zip(row)
                    .map(|(header, cell)| (json_key(header), serde_json::Value::from(cell.clone())))
                    .collect();
                serde_json::Value::Object(obj)
            })
            .collect();
        serde_json::to_string_pretty(&rows).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_ddl(&self, name: &str, dialect: SqlDialect, sql: &str) -> String {
        serde_json::json!({
            "name": name,
            "dialect": dialect,
            "sql": sql,
        })
        .to_string()
    }

    fn format_message(&self, message: &str) -> String {
        serde_json::json!({
            "message": message
        })
        .to_string()
    }
}

/// "Delivery class" -> "deliveryClass".
fn json_key(header: &str) -> String {
    let mut key = String::with_capacity(header.len());
    for (i, word) in header.split_whitespace().enumerate() {
        let word = word.to_ascii_lowercase();
        if i == 0 {
            key.push_str(&word);
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                key.push(first.to_ascii_uppercase());
                key.push_str(chars.as_str());
            }
        }
    }
    key
}
