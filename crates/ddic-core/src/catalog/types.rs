//! Core type definitions for the catalog.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Built-in data types of a [`Domain`](super::Domain).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    /// Fixed-length character string.
    Char,
    /// Variable-length character string.
    String,
    /// Numeric text (digits stored as characters).
    Numc,
    /// 4-byte integer.
    Integer,
    /// Packed decimal with precision and scale.
    Decimal,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Timestamp.
    Timestamp,
    /// Raw byte sequence.
    Raw,
}

impl DataType {
    /// Check if the domain length is meaningful in the rendered SQL type.
    pub fn is_length_bound(&self) -> bool {
        matches!(
            self,
            DataType::Char | DataType::String | DataType::Numc | DataType::Decimal | DataType::Raw
        )
    }

    /// Upper-case literal as used in snapshots and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Char => "CHAR",
            DataType::String => "STRING",
            DataType::Numc => "NUMC",
            DataType::Integer => "INTEGER",
            DataType::Decimal => "DECIMAL",
            DataType::Date => "DATE",
            DataType::Time => "TIME",
            DataType::Timestamp => "TIMESTAMP",
            DataType::Raw => "RAW",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery class of a transparent table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeliveryClass {
    /// Application table (master and transaction data).
    #[default]
    A,
    /// Customizing table, maintained by the customer only.
    C,
    /// Table for storing temporary data.
    L,
    /// Customizing table, protected against SAP updates.
    G,
    /// Control table.
    E,
    /// System table.
    S,
    /// System table maintained by its own transport objects.
    W,
}

/// Kind of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewType {
    /// Mapped one-to-one onto an SQL view.
    Database,
    /// Column subset of a single table.
    Projection,
    /// Used for table maintenance.
    Maintenance,
    /// Used together with search helps.
    Help,
}

/// Lock mode of a lock object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LockMode {
    /// Shared (read) lock.
    Shared,
    /// Exclusive (write) lock.
    #[default]
    Exclusive,
    /// Exclusive lock that cannot be requested again by the same owner.
    ExclusiveNonCumulative,
}

/// The kinds of entity the catalog registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// [`Domain`](super::Domain).
    Domain,
    /// [`DataElement`](super::DataElement).
    DataElement,
    /// [`TableDefinition`](super::TableDefinition).
    Table,
    /// [`Structure`](super::Structure).
    Structure,
    /// [`ViewDefinition`](super::ViewDefinition).
    View,
    /// [`SearchHelp`](super::SearchHelp).
    SearchHelp,
    /// [`LockObject`](super::LockObject).
    LockObject,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EntityKind::Domain => "Domain",
            EntityKind::DataElement => "Data element",
            EntityKind::Table => "Table",
            EntityKind::Structure => "Structure",
            EntityKind::View => "View",
            EntityKind::SearchHelp => "Search help",
            EntityKind::LockObject => "Lock object",
        };
        f.write_str(label)
    }
}

/// Reject blank names, returning the owned name otherwise.
pub(crate) fn require_name(label: &str, name: impl Into<String>) -> Result<String> {
    let name = name.into();
    if name.trim().is_empty() {
        return Err(Error::invalid(format!("{label} must not be blank")));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_bound_types() {
        assert!(DataType::Char.is_length_bound());
        assert!(DataType::Decimal.is_length_bound());
        assert!(DataType::Raw.is_length_bound());
        assert!(!DataType::Integer.is_length_bound());
        assert!(!DataType::Date.is_length_bound());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DeliveryClass::default(), DeliveryClass::A);
        assert_eq!(LockMode::default(), LockMode::Exclusive);
    }

    #[test]
    fn test_enum_literals() {
        assert_eq!(
            serde_json::to_string(&LockMode::ExclusiveNonCumulative).unwrap(),
            "\"EXCLUSIVE_NON_CUMULATIVE\""
        );
        assert_eq!(serde_json::to_string(&DataType::Numc).unwrap(), "\"NUMC\"");
        assert_eq!(serde_json::to_string(&DeliveryClass::G).unwrap(), "\"G\"");
        let parsed: ViewType = serde_json::from_str("\"PROJECTION\"").unwrap();
        assert_eq!(parsed, ViewType::Projection);
    }

    #[test]
    fn test_require_name() {
        assert_eq!(require_name("Domain name", "ZCHAR").unwrap(), "ZCHAR");
        assert!(matches!(
            require_name("Domain name", "   "),
            Err(Error::InvalidArgument(_))
        ));
        assert!(require_name("Domain name", "").is_err());
    }
}
