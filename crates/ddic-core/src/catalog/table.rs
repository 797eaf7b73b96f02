//! Conceptual layer: transparent tables and structures.

use super::field::{FieldDefinition, FieldList};
use super::types::{require_name, DeliveryClass};
use crate::error::Result;

/// A transparent table definition.
///
/// Fields keep their declaration order, which is also the column order of
/// the generated DDL. Field names are unique within a table.
#[derive(Debug, Clone)]
pub struct TableDefinition {
    name: String,
    fields: FieldList,
    description: Option<String>,
    delivery_class: DeliveryClass,
    buffered: bool,
}

impl TableDefinition {
    /// Create an empty table definition.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: require_name("Table name", name)?,
            fields: FieldList::default(),
            description: None,
            delivery_class: DeliveryClass::default(),
            buffered: false,
        })
    }

    /// Add a field. Duplicate field names are rejected.
    pub fn add_field(&mut self, field: FieldDefinition) -> Result<()> {
        self.fields.push(field)
    }

    /// Add a field, builder style.
    pub fn with_field(mut self, field: FieldDefinition) -> Result<Self> {
        self.add_field(field)?;
        Ok(self)
    }

    /// Add multiple fields.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldDefinition>) -> Result<Self> {
        for field in fields {
            self.add_field(field)?;
        }
        Ok(self)
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the delivery class.
    pub fn with_delivery_class(mut self, delivery_class: DeliveryClass) -> Self {
        self.delivery_class = delivery_class;
        self
    }

    /// Enable or disable table buffering.
    pub fn with_buffering(mut self, buffered: bool) -> Self {
        self.buffered = buffered;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> &[FieldDefinition] {
        self.fields.as_slice()
    }

    /// Get a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    /// Key fields in declaration order.
    pub fn key_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields().iter().filter(|f| f.is_key())
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn delivery_class(&self) -> DeliveryClass {
        self.delivery_class
    }

    pub fn is_buffered(&self) -> bool {
        self.buffered
    }

    pub(crate) fn uses_data_element(&self, name: &str) -> bool {
        self.fields.uses_data_element(name)
    }
}

/// A structure: a field grouping with no database table behind it.
#[derive(Debug, Clone)]
pub struct Structure {
    name: String,
    fields: FieldList,
    description: Option<String>,
}

impl Structure {
    /// Create an empty structure.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: require_name("Structure name", name)?,
            fields: FieldList::default(),
            description: None,
        })
    }

    /// Add a field. Duplicate field names are rejected.
    pub fn add_field(&mut self, field: FieldDefinition) -> Result<()> {
        self.fields.push(field)
    }

    /// Add a field, builder style.
    pub fn with_field(mut self, field: FieldDefinition) -> Result<Self> {
        self.add_field(field)?;
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

    pub fn fields(&self) -> &[FieldDefinition] {
        self.fields.as_slice()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub(crate) fn uses_data_element(&self, name: &str) -> bool {
        self.fields.uses_data_element(name)
    }
}
