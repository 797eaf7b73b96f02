//! DDIC Core - Data dictionary catalog and its coherence engine.
//!
//! The catalog models a three-layer schema dictionary:
//!
//! - **Internal** - [`Domain`]s and [`DataElement`]s
//! - **Conceptual** - [`TableDefinition`]s and [`Structure`]s
//! - **External** - [`ViewDefinition`]s, [`SearchHelp`]s and [`LockObject`]s
//!
//! On top of the [`Catalog`] sit the [`ConsistencyValidator`], the
//! [`WhereUsedAnalyzer`] and the [`DdlGenerator`], each a read-only pass over
//! the registered entities.

pub mod catalog;
pub mod ddl;
pub mod error;
pub mod sample;
pub mod snapshot;
pub mod validation;
pub mod where_used;

pub use catalog::{
    Catalog, CatalogReader, DataElement, DataType, DeliveryClass, Domain, EntityKind,
    FieldDefinition, LockMode, LockObject, SearchHelp, Structure, TableDefinition, ValueRange,
    ViewDefinition, ViewType,
};
pub use ddl::{DdlGenerator, SqlDialect};
pub use error::{Error, Result};
pub use snapshot::{CatalogRepository, CatalogSnapshot};
pub use validation::{ConsistencyValidator, Finding, Severity, ValidationResult};
pub use where_used::{UsageKind, Usages, WhereUsedAnalyzer};
