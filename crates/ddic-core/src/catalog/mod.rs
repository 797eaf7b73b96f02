//! Dictionary catalog.
//!
//! The catalog stores the entities of all three schema layers and hands out
//! shared handles to them. Identity of a handle (`Arc::ptr_eq`) is what the
//! consistency validator compares, never structural equality.

mod catalog;
mod domain;
mod external;
mod field;
mod table;
mod types;

pub use catalog::{Catalog, CatalogReader, Registered};
pub use domain::{DataElement, Domain, ValueRange};
pub use external::{LockObject, SearchHelp, ViewDefinition};
pub use field::FieldDefinition;
pub use table::{Structure, TableDefinition};
pub use types::{DataType, DeliveryClass, EntityKind, LockMode, ViewType};
