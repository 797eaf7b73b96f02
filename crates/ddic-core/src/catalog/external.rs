//! External layer: views, search helps and lock objects.

use std::sync::Arc;

use super::table::TableDefinition;
use super::types::{require_name, LockMode, ViewType};
use crate::error::Result;

/// A view over one or more base tables.
///
/// Selected fields are plain names; whether they exist in a base table is
/// checked by the consistency validator, not here.
#[derive(Debug, Clone)]
pub struct ViewDefinition {
    name: String,
    view_type: ViewType,
    base_tables: Vec<Arc<TableDefinition>>,
    selected_fields: Vec<String>,
    description: Option<String>,
}

impl ViewDefinition {
    /// Create an empty view.
    pub fn new(name: impl Into<String>, view_type: ViewType) -> Result<Self> {
        Ok(Self {
            name: require_name("View name", name)?,
            view_type,
            base_tables: Vec::new(),
            selected_fields: Vec::new(),
            description: None,
        })
    }

    /// Add a base table. The same table may appear more than once.
    pub fn with_base_table(mut self, table: Arc<TableDefinition>) -> Self {
        self.base_tables.push(table);
        self
    }

    /// Add a selected field name.
    pub fn with_selected_field(mut self, field: impl Into<String>) -> Result<Self> {
        self.selected_fields.push(require_name("Field name", field)?);
        Ok(self)
    }

    /// Add several selected field names.
    pub fn with_selected_fields<I, S>(mut self, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for field in fields {
            self = self.with_selected_field(field)?;
        }
        Ok(self)
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn view_type(&self) -> ViewType {
        self.view_type
    }

    pub fn base_tables(&self) -> &[Arc<TableDefinition>] {
        &self.base_tables
    }

    pub fn selected_fields(&self) -> &[String] {
        &self.selected_fields
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Check if any base table has the given name.
    pub fn reads_table(&self, table: &str) -> bool {
        self.base_tables.iter().any(|t| t.name() == table)
    }
}

/// An elementary search help bound to a single selection table.
#[derive(Debug, Clone)]
pub struct SearchHelp {
    name: String,
    selection_method: Option<Arc<TableDefinition>>,
    display_fields: Vec<String>,
    export_fields: Vec<String>,
    description: Option<String>,
}

impl SearchHelp {
    /// Create a search help without a selection method.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: require_name("Search help name", name)?,
            selection_method: None,
            display_fields: Vec::new(),
            export_fields: Vec::new(),
            description: None,
        })
    }

    /// Set the selection-method table.
    pub fn with_selection_method(mut self, table: Arc<TableDefinition>) -> Self {
        self.selection_method = Some(table);
        self
    }

    /// Add a field shown in the hit list.
    pub fn with_display_field(mut self, field: impl Into<String>) -> Result<Self> {
        self.display_fields
            .push(require_name("Display field name", field)?);
        Ok(self)
    }

    /// Add a field returned to the caller.
    pub fn with_export_field(mut self, field: impl Into<String>) -> Result<Self> {
        self.export_fields
            .push(require_name("Export field name", field)?);
        Ok(self)
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn selection_method(&self) -> Option<&Arc<TableDefinition>> {
        self.selection_method.as_ref()
    }

    pub fn display_fields(&self) -> &[String] {
        &self.display_fields
    }

    pub fn export_fields(&self) -> &[String] {
        &self.export_fields
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A lock object: the tables locked together by one enqueue request.
#[derive(Debug, Clone)]
pub struct LockObject {
    name: String,
    primary_table: Arc<TableDefinition>,
    secondary_tables: Vec<Arc<TableDefinition>>,
    lock_mode: LockMode,
    description: Option<String>,
}

impl LockObject {
    /// Create a lock object on a primary table, in exclusive mode.
    pub fn new(name: impl Into<String>, primary_table: Arc<TableDefinition>) -> Result<Self> {
        Ok(Self {
            name: require_name("Lock object name", name)?,
            primary_table,
            secondary_tables: Vec::new(),
            lock_mode: LockMode::default(),
            description: None,
        })
    }

    /// Add a secondary table.
    pub fn with_secondary_table(mut self, table: Arc<TableDefinition>) -> Self {
        self.secondary_tables.push(table);
        self
    }

    /// Set the lock mode.
    pub fn with_lock_mode(mut self, lock_mode: LockMode) -> Self {
        self.lock_mode = lock_mode;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn primary_table(&self) -> &Arc<TableDefinition> {
        &self.primary_table
    }

    pub fn secondary_tables(&self) -> &[Arc<TableDefinition>] {
        &self.secondary_tables
    }

    pub fn lock_mode(&self) -> LockMode {
        self.lock_mode
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Check if the table is locked, as primary or secondary table.
    pub fn locks_table(&self, table: &str) -> bool {
        self.primary_table.name() == table
            || self.secondary_tables.iter().any(|t| t.name() == table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str) -> Arc<TableDefinition> {
        Arc::new(TableDefinition::new(name).unwrap())
    }

    #[test]
    fn test_view_builder() {
        let customer = table("ZCUSTOMER");
        let view = ViewDefinition::new("ZCUST_V", ViewType::Database)
            .unwrap()
            .with_base_table(Arc::clone(&customer))
            .with_base_table(Arc::clone(&customer))
            .with_selected_fields(["ID", "NAME"])
            .unwrap()
            .with_description("Customer view");

        assert_eq!(view.view_type(), ViewType::Database);
        assert_eq!(view.base_tables().len(), 2);
        assert_eq!(view.selected_fields(), ["ID", "NAME"]);
        assert!(view.reads_table("ZCUSTOMER"));
        assert!(!view.reads_table("ZORDER"));
    }

    #[test]
    fn test_view_rejects_blank_field() {
        let view = ViewDefinition::new("ZV", ViewType::Projection).unwrap();
        assert!(view.with_selected_field(" ").is_err());
        assert!(ViewDefinition::new("", ViewType::Help).is_err());
    }

    #[test]
    fn test_search_help() {
        let help = SearchHelp::new("ZSH_CUST").unwrap();
        assert!(help.selection_method().is_none());

        let help = help
            .with_selection_method(table("ZCUSTOMER"))
            .with_display_field("ID")
            .unwrap()
            .with_display_field("NAME")
            .unwrap()
            .with_export_field("ID")
            .unwrap();

        assert_eq!(help.selection_method().unwrap().name(), "ZCUSTOMER");
        assert_eq!(help.display_fields(), ["ID", "NAME"]);
        assert_eq!(help.export_fields(), ["ID"]);
        assert!(SearchHelp::new("ZSH").unwrap().with_export_field("").is_err());
    }

    #[test]
    fn test_lock_object() {
        let lock = LockObject::new("EZCUSTOMER", table("ZCUSTOMER")).unwrap();
        assert_eq!(lock.lock_mode(), LockMode::Exclusive);

        let lock = lock
            .with_secondary_table(table("ZORDER"))
            .with_lock_mode(LockMode::Shared);
        assert_eq!(lock.lock_mode(), LockMode::Shared);
        assert!(lock.locks_table("ZCUSTOMER"));
        assert!(lock.locks_table("ZORDER"));
        assert!(!lock.locks_table("ZITEM"));
    }
}
