//! Name-keyed serialisable forms of catalog entities.
//!
//! References between entities are stored by name so a snapshot has no
//! shared ownership and can be written as plain JSON. The `*Name` aliases
//! read files that spell the entity name after its kind.

use serde::{Deserialize, Serialize};

use super::keyed::Keyed;

use crate::catalog::{
    DataElement, DataType, DeliveryClass, Domain, FieldDefinition, LockMode, LockObject,
    SearchHelp, Structure, TableDefinition, ViewDefinition, ViewType,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainDto {
    pub name: String,
    pub data_type: DataType,
    pub length: u32,
    #[serde(default)]
    pub decimals: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Empty when the domain has no value range.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixed_values: Vec<String>,
}

impl From<&Domain> for DomainDto {
    fn from(domain: &Domain) -> Self {
        Self {
            name: domain.name().to_string(),
            data_type: domain.data_type(),
            length: domain.length(),
            decimals: domain.decimals(),
            description: domain.description().map(str::to_string),
            fixed_values: domain
                .value_range()
                .map(|range| range.fixed_values().to_vec())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataElementDto {
    pub name: String,
    pub domain_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl From<&DataElement> for DataElementDto {
    fn from(element: &DataElement) -> Self {
        Self {
            name: element.name().to_string(),
            domain_name: element.domain().name().to_string(),
            short_label: element.short_label().map(str::to_string),
            medium_label: element.medium_label().map(str::to_string),
            long_label: element.long_label().map(str::to_string),
            documentation: element.documentation().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDto {
    #[serde(alias = "fieldName")]
    pub name: String,
    pub data_element_name: String,
    #[serde(default)]
    pub key_field: bool,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

fn default_nullable() -> bool {
    true
}

impl From<&FieldDefinition> for FieldDto {
    fn from(field: &FieldDefinition) -> Self {
        Self {
            name: field.name().to_string(),
            data_element_name: field.data_element().name().to_string(),
            key_field: field.is_key(),
            nullable: field.is_nullable(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDto {
    #[serde(alias = "tableName")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub delivery_class: DeliveryClass,
    #[serde(default)]
    pub buffered: bool,
    #[serde(default)]
    pub fields: Vec<FieldDto>,
}

impl From<&TableDefinition> for TableDto {
    fn from(table: &TableDefinition) -> Self {
        Self {
            name: table.name().to_string(),
            description: table.description().map(str::to_string),
            delivery_class: table.delivery_class(),
            buffered: table.is_buffered(),
            fields: table.fields().iter().map(FieldDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureDto {
    #[serde(alias = "structureName")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDto>,
}

impl From<&Structure> for StructureDto {
    fn from(structure: &Structure) -> Self {
        Self {
            name: structure.name().to_string(),
            description: structure.description().map(str::to_string),
            fields: structure.fields().iter().map(FieldDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDto {
    #[serde(alias = "viewName")]
    pub name: String,
    pub view_type: ViewType,
    #[serde(default)]
    pub base_table_names: Vec<String>,
    #[serde(default)]
    pub selected_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&ViewDefinition> for ViewDto {
    fn from(view: &ViewDefinition) -> Self {
        Self {
            name: view.name().to_string(),
            view_type: view.view_type(),
            base_table_names: view
                .base_tables()
                .iter()
                .map(|t| t.name().to_string())
                .collect(),
            selected_fields: view.selected_fields().to_vec(),
            description: view.description().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHelpDto {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_method_name: Option<String>,
    #[serde(default)]
    pub display_fields: Vec<String>,
    #[serde(default)]
    pub export_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&SearchHelp> for SearchHelpDto {
    fn from(help: &SearchHelp) -> Self {
        Self {
            name: help.name().to_string(),
            selection_method_name: help.selection_method().map(|t| t.name().to_string()),
            display_fields: help.display_fields().to_vec(),
            export_fields: help.export_fields().to_vec(),
            description: help.description().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockObjectDto {
    pub name: String,
    pub primary_table_name: String,
    #[serde(default)]
    pub secondary_table_names: Vec<String>,
    #[serde(default)]
    pub lock_mode: LockMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&LockObject> for LockObjectDto {
    fn from(lock: &LockObject) -> Self {
        Self {
            name: lock.name().to_string(),
            primary_table_name: lock.primary_table().name().to_string(),
            secondary_table_names: lock
                .secondary_tables()
                .iter()
                .map(|t| t.name().to_string())
                .collect(),
            lock_mode: lock.lock_mode(),
            description: lock.description().map(str::to_string),
        }
    }
}

macro_rules! impl_keyed {
    ($($dto:ty),* $(,)?) => {
        $(
            impl Keyed for $dto {
                fn key(&self) -> &str {
                    &self.name
                }
            }
        )*
    };
}

impl_keyed!(
    DomainDto,
    DataElementDto,
    TableDto,
    StructureDto,
    ViewDto,
    SearchHelpDto,
    LockObjectDto,
);
