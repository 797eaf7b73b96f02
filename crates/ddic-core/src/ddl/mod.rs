//! DDL generation.

mod dialect;
mod generator;

pub use dialect::SqlDialect;
pub use generator::DdlGenerator;
