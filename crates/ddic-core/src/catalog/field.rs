//! Field definitions for tables and structures.

use std::sync::Arc;

use super::domain::{DataElement, Domain};
use super::types::require_name;
use crate::error::{Error, Result};

/// A field within a table or structure.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    name: String,
    data_element: Arc<DataElement>,
    key_field: bool,
    nullable: bool,
}

impl FieldDefinition {
    /// Create a field with explicit key and nullability flags.
    pub fn new(
        name: impl Into<String>,
        data_element: Arc<DataElement>,
        key_field: bool,
        nullable: bool,
    ) -> Result<Self> {
        Ok(Self {
            name: require_name("Field name", name)?,
            data_element,
            key_field,
            nullable,
        })
    }

    /// Create a non-nullable key field.
    pub fn key(name: impl Into<String>, data_element: Arc<DataElement>) -> Result<Self> {
        Self::new(name, data_element, true, false)
    }

    /// Create a non-nullable, non-key field.
    pub fn required(name: impl Into<String>, data_element: Arc<DataElement>) -> Result<Self> {
        Self::new(name, data_element, false, false)
    }

    /// Create a nullable, non-key field.
    pub fn optional(name: impl Into<String>, data_element: Arc<DataElement>) -> Result<Self> {
        Self::new(name, data_element, false, true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_element(&self) -> &Arc<DataElement> {
        &self.data_element
    }

    /// The domain behind this field's data element.
    pub fn domain(&self) -> &Arc<Domain> {
        self.data_element.domain()
    }

    pub fn is_key(&self) -> bool {
        self.key_field
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// Ordered fields with unique names.
#[derive(Debug, Clone, Default)]
pub(crate) struct FieldList {
    fields: Vec<FieldDefinition>,
}

impl FieldList {
    pub(crate) fn push(&mut self, field: FieldDefinition) -> Result<()> {
        if self.get(field.name()).is_some() {
            return Err(Error::invalid(format!("Duplicate field: {}", field.name())));
        }
        self.fields.push(field);
        Ok(())
    }

    pub(crate) fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub(crate) fn as_slice(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub(crate) fn uses_data_element(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.data_element().name() == name)
    }
}
