//! Target SQL dialects and the type mapping table.

use serde::{Deserialize, Serialize};

use crate::catalog::{DataType, Domain};
use crate::error::Error;

/// Supported SQL dialects for DDL generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SqlDialect {
    /// PostgreSQL.
    #[default]
    Postgresql,
    /// H2 embedded database.
    H2,
    /// SAP HANA column store.
    Hana,
}

impl SqlDialect {
    /// All dialects.
    pub const ALL: [SqlDialect; 3] = [SqlDialect::Postgresql, SqlDialect::H2, SqlDialect::Hana];

    /// Map a domain's data type, length and decimals to a column type.
    ///
    /// | type         | PostgreSQL   | H2           | HANA         |
    /// |--------------|--------------|--------------|--------------|
    /// | CHAR(n)      | CHAR(n)      | CHAR(n)      | NCHAR(n)     |
    /// | STRING(n)    | VARCHAR(n)   | VARCHAR(n)   | NVARCHAR(n)  |
    /// | NUMC(n)      | CHAR(n)      | CHAR(n)      | NCHAR(n)     |
    /// | INTEGER      | INTEGER      | INTEGER      | INTEGER      |
    /// | DECIMAL(p,s) | DECIMAL(p, s)| DECIMAL(p, s)| DECIMAL(p, s)|
    /// | DATE/TIME/TIMESTAMP | same  | same         | same         |
    /// | RAW(n)       | BYTEA        | BINARY(n)    | VARBINARY(n) |
    pub fn sql_type(self, domain: &Domain) -> String {
        let length = domain.length();
        match (domain.data_type(), self) {
            (DataType::Char | DataType::Numc, SqlDialect::Hana) => format!("NCHAR({length})"),
            (DataType::Char | DataType::Numc, _) => format!("CHAR({length})"),
            (DataType::String, SqlDialect::Hana) => format!("NVARCHAR({length})"),
            (DataType::String, _) => format!("VARCHAR({length})"),
            (DataType::Integer, _) => "INTEGER".to_string(),
            (DataType::Decimal, _) => format!("DECIMAL({length}, {})", domain.decimals()),
            (DataType::Date, _) => "DATE".to_string(),
            (DataType::Time, _) => "TIME".to_string(),
            (DataType::Timestamp, _) => "TIMESTAMP".to_string(),
            (DataType::Raw, SqlDialect::Postgresql) => "BYTEA".to_string(),
            (DataType::Raw, SqlDialect::H2) => format!("BINARY({length})"),
            (DataType::Raw, SqlDialect::Hana) => format!("VARBINARY({length})"),
        }
    }

    /// Upper-case name of the dialect.
    pub fn as_str(&self) -> &'static str {
        match self {
            SqlDialect::Postgresql => "POSTGRESQL",
            SqlDialect::H2 => "H2",
            SqlDialect::Hana => "HANA",
        }
    }
}

impl std::fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SqlDialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SqlDialect::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::invalid(format!("unknown SQL dialect: {s}")))
    }
}
