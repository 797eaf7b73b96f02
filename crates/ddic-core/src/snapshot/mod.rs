//! Catalog snapshots and JSON persistence.
//!
//! A [`CatalogSnapshot`] is the by-name form of a catalog. Restoring one
//! replays registrations in dependency order (domains, data elements,
//! tables, structures, views, search helps, lock objects), resolving every
//! name against what has already been registered, so the restored catalog
//! shares instances exactly the way a hand-built one would.

mod dto;
mod keyed;
mod repository;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use dto::{
    DataElementDto, DomainDto, FieldDto, LockObjectDto, SearchHelpDto, StructureDto, TableDto,
    ViewDto,
};
pub use repository::CatalogRepository;

use crate::catalog::{
    Catalog, DataElement, Domain, EntityKind, FieldDefinition, LockObject, SearchHelp, Structure,
    TableDefinition, ValueRange, ViewDefinition,
};
use crate::error::{Error, Result};

/// Current snapshot format version.
///
/// Version 2 writes each kind as an object keyed by entity name; version 1
/// lists are still read.
pub const SNAPSHOT_VERSION: u32 = 2;

/// Serialisable image of a catalog.
///
/// Each kind is kept in registration order and written as a JSON object
/// from entity name to entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    /// Snapshot format version.
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, with = "keyed")]
    pub domains: Vec<DomainDto>,
    #[serde(default, with = "keyed")]
    pub data_elements: Vec<DataElementDto>,
    #[serde(default, with = "keyed")]
    pub tables: Vec<TableDto>,
    #[serde(default, with = "keyed")]
    pub structures: Vec<StructureDto>,
    #[serde(default, with = "keyed")]
    pub views: Vec<ViewDto>,
    #[serde(default, with = "keyed")]
    pub search_helps: Vec<SearchHelpDto>,
    #[serde(default, with = "keyed")]
    pub lock_objects: Vec<LockObjectDto>,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            domains: Vec::new(),
            data_elements: Vec::new(),
            tables: Vec::new(),
            structures: Vec::new(),
            views: Vec::new(),
            search_helps: Vec::new(),
            lock_objects: Vec::new(),
        }
    }
}

impl CatalogSnapshot {
    /// Capture the current contents of a catalog, preserving registration order.
    pub fn capture(catalog: &Catalog) -> Self {
        let reader = catalog.read();
        Self {
            version: SNAPSHOT_VERSION,
            domains: reader.domains().iter().map(|d| DomainDto::from(&**d)).collect(),
            data_elements: reader
                .data_elements()
                .iter()
                .map(|e| DataElementDto::from(&**e))
                .collect(),
            tables: reader.tables().iter().map(|t| TableDto::from(&**t)).collect(),
            structures: reader
                .structures()
                .iter()
                .map(|s| StructureDto::from(&**s))
                .collect(),
            views: reader.views().iter().map(|v| ViewDto::from(&**v)).collect(),
            search_helps: reader
                .search_helps()
                .iter()
                .map(|h| SearchHelpDto::from(&**h))
                .collect(),
            lock_objects: reader
                .lock_objects()
                .iter()
                .map(|l| LockObjectDto::from(&**l))
                .collect(),
        }
    }

    /// Rebuild a catalog from this snapshot.
    ///
    /// Fails with [`Error::UnresolvedReference`] when a referenced name is not
    /// part of the snapshot, and with the usual construction errors for
    /// malformed entries.
    pub fn restore(&self) -> Result<Catalog> {
        let catalog = Catalog::new();

        for dto in &self.domains {
            let mut domain =
                Domain::with_decimals(&dto.name, dto.data_type, dto.length, dto.decimals)?;
            if let Some(description) = &dto.description {
                domain = domain.with_description(description);
            }
            if !dto.fixed_values.is_empty() {
                domain = domain.with_value_range(ValueRange::from_values(&dto.fixed_values));
            }
            catalog.register_domain(domain)?;
        }

        for dto in &self.data_elements {
            let domain = resolve(
                catalog.domain(&dto.domain_name),
                EntityKind::Domain,
                &dto.domain_name,
            )?;
            let mut element = DataElement::new(&dto.name, domain)?;
            if let Some(label) = &dto.short_label {
                element = element.with_short_label(label);
            }
            if let Some(label) = &dto.medium_label {
                element = element.with_medium_label(label);
            }
            if let Some(label) = &dto.long_label {
                element = element.with_long_label(label);
            }
            if let Some(documentation) = &dto.documentation {
                element = element.with_documentation(documentation);
            }
            catalog.register_data_element(element)?;
        }

        for dto in &self.tables {
            let mut table = TableDefinition::new(&dto.name)?
                .with_fields(restore_fields(&catalog, &dto.fields)?)?
                .with_delivery_class(dto.delivery_class)
                .with_buffering(dto.buffered);
            if let Some(description) = &dto.description {
                table = table.with_description(description);
            }
            catalog.register_table(table)?;
        }

        for dto in &self.structures {
            let mut structure = Structure::new(&dto.name)?;
            for field in restore_fields(&catalog, &dto.fields)? {
                structure.add_field(field)?;
            }
            if let Some(description) = &dto.description {
                structure = structure.with_description(description);
            }
            catalog.register_structure(structure)?;
        }

        for dto in &self.views {
            let mut view = ViewDefinition::new(&dto.name, dto.view_type)?;
            for name in &dto.base_table_names {
                view = view.with_base_table(resolve_table(&catalog, name)?);
            }
            view = view.with_selected_fields(&dto.selected_fields)?;
            if let Some(description) = &dto.description {
                view = view.with_description(description);
            }
            catalog.register_view(view)?;
        }

        for dto in &self.search_helps {
            let mut help = SearchHelp::new(&dto.name)?;
            if let Some(name) = &dto.selection_method_name {
                help = help.with_selection_method(resolve_table(&catalog, name)?);
            }
            for field in &dto.display_fields {
                help = help.with_display_field(field)?;
            }
            for field in &dto.export_fields {
                help = help.with_export_field(field)?;
            }
            if let Some(description) = &dto.description {
                help = help.with_description(description);
            }
            catalog.register_search_help(help)?;
        }

        for dto in &self.lock_objects {
            let primary = resolve_table(&catalog, &dto.primary_table_name)?;
            let mut lock = LockObject::new(&dto.name, primary)?.with_lock_mode(dto.lock_mode);
            for name in &dto.secondary_table_names {
                lock = lock.with_secondary_table(resolve_table(&catalog, name)?);
            }
            if let Some(description) = &dto.description {
                lock = lock.with_description(description);
            }
            catalog.register_lock_object(lock)?;
        }

        debug!(entities = catalog.len(), "catalog restored from snapshot");
        Ok(catalog)
    }

    /// Capture a catalog as pretty-printed JSON.
    pub fn to_json(catalog: &Catalog) -> Result<String> {
        Ok(serde_json::to_string_pretty(&Self::capture(catalog))?)
    }

    /// Restore a catalog from JSON produced by [`CatalogSnapshot::to_json`].
    pub fn from_json(json: &str) -> Result<Catalog> {
        let snapshot: CatalogSnapshot = serde_json::from_str(json)?;
        snapshot.restore()
    }
}

fn resolve<T>(entity: Option<Arc<T>>, kind: EntityKind, name: &str) -> Result<Arc<T>> {
    entity.ok_or_else(|| Error::UnresolvedReference {
        kind,
        name: name.to_string(),
    })
}

fn resolve_table(catalog: &Catalog, name: &str) -> Result<Arc<TableDefinition>> {
    resolve(catalog.table(name), EntityKind::Table, name)
}

fn restore_fields(catalog: &Catalog, fields: &[FieldDto]) -> Result<Vec<FieldDefinition>> {
    fields
        .iter()
        .map(|dto| {
            let element = resolve(
                catalog.data_element(&dto.data_element_name),
                EntityKind::DataElement,
                &dto.data_element_name,
            )?;
            FieldDefinition::new(&dto.name, element, dto.key_field, dto.nullable)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::{DataType, DeliveryClass, LockMode, ViewType};
    use crate::validation::ConsistencyValidator;

    fn build_catalog() -> Catalog {
        let catalog = Catalog::new();
        let char10 = catalog
            .register_domain(
                Domain::new("ZCHAR10", DataType::Char, 10)
                    .unwrap()
                    .with_description("Ten characters"),
            )
            .unwrap();
        catalog
            .register_domain(
                Domain::new("ZFLAG", DataType::Char, 1)
                    .unwrap()
                    .with_value_range(ValueRange::from_values(["X", " "])),
            )
            .unwrap();
        let amount = catalog
            .register_domain(Domain::with_decimals("ZAMOUNT", DataType::Decimal, 15, 2).unwrap())
            .unwrap();

        let id = catalog
            .register_data_element(
                DataElement::new("ZCUST_ID", char10)
                    .unwrap()
                    .with_short_label("ID")
                    .with_long_label("Customer ID"),
            )
            .unwrap();
        let credit = catalog
            .register_data_element(DataElement::new("ZCREDIT", amount).unwrap())
            .unwrap();

        let customer = catalog
            .register_table(
                TableDefinition::new("ZCUSTOMER")
                    .unwrap()
                    .with_field(FieldDefinition::key("ID", id.clone()).unwrap())
                    .unwrap()
                    .with_field(FieldDefinition::optional("CREDIT", credit).unwrap())
                    .unwrap()
                    .with_delivery_class(DeliveryClass::C)
                    .with_buffering(true),
            )
            .unwrap();
        catalog
            .register_structure(
                Structure::new("ZS_CUSTOMER_KEY")
                    .unwrap()
                    .with_field(FieldDefinition::required("ID", id).unwrap())
                    .unwrap(),
            )
            .unwrap();
        catalog
            .register_view(
                ViewDefinition::new("ZCUSTOMER_V", ViewType::Projection)
                    .unwrap()
                    .with_base_table(customer.clone())
                    .with_selected_field("ID")
                    .unwrap(),
            )
            .unwrap();
        catalog
            .register_search_help(
                SearchHelp::new("ZSH_CUSTOMER")
                    .unwrap()
                    .with_selection_method(customer.clone())
                    .with_display_field("ID")
                    .unwrap()
                    .with_export_field("ID")
                    .unwrap(),
            )
            .unwrap();
        catalog
            .register_lock_object(
                LockObject::new("EZCUSTOMER", customer)
                    .unwrap()
                    .with_lock_mode(LockMode::Shared)
                    .with_description("Customer lock"),
            )
            .unwrap();
        catalog
    }

    #[test]
    fn test_capture_preserves_order_and_references() {
        let snapshot = CatalogSnapshot::capture(&build_catalog());

        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        let domains: Vec<_> = snapshot.domains.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(domains, vec!["ZCHAR10", "ZFLAG", "ZAMOUNT"]);
        assert_eq!(snapshot.data_elements[0].domain_name, "ZCHAR10");
        assert_eq!(snapshot.tables[0].fields[0].data_element_name, "ZCUST_ID");
        assert_eq!(snapshot.views[0].base_table_names, vec!["ZCUSTOMER"]);
        assert_eq!(
            snapshot.search_helps[0].selection_method_name.as_deref(),
            Some("ZCUSTOMER")
        );
        assert_eq!(snapshot.lock_objects[0].primary_table_name, "ZCUSTOMER");
    }

    #[test]
    fn test_restore_rebuilds_shared_instances() {
        let restored = CatalogSnapshot::capture(&build_catalog()).restore().unwrap();

        assert_eq!(restored.len(), 10);
        let domain = restored.domain("ZCHAR10").unwrap();
        let element = restored.data_element("ZCUST_ID").unwrap();
        assert!(Arc::ptr_eq(element.domain(), &domain));

        let table = restored.table("ZCUSTOMER").unwrap();
        assert!(Arc::ptr_eq(table.fields()[0].data_element(), &element));
        let view = restored.view("ZCUSTOMER_V").unwrap();
        assert!(Arc::ptr_eq(&view.base_tables()[0], &table));

        let result = ConsistencyValidator::new(&restored).validate();
        assert!(result.is_valid(), "{:?}", result.findings());
    }

    #[test]
    fn test_restore_keeps_attributes() {
        let restored = CatalogSnapshot::capture(&build_catalog()).restore().unwrap();

        let flag = restored.domain("ZFLAG").unwrap();
        assert!(flag.accepts("X"));
        assert!(!flag.accepts("Y"));
        assert_eq!(restored.domain("ZAMOUNT").unwrap().decimals(), 2);
        assert_eq!(
            restored.domain("ZCHAR10").unwrap().description(),
            Some("Ten characters")
        );

        let element = restored.data_element("ZCUST_ID").unwrap();
        assert_eq!(element.short_label(), Some("ID"));
        assert_eq!(element.medium_label(), None);

        let table = restored.table("ZCUSTOMER").unwrap();
        assert_eq!(table.delivery_class(), DeliveryClass::C);
        assert!(table.is_buffered());
        assert!(table.field("ID").unwrap().is_key());
        assert!(table.field("CREDIT").unwrap().is_nullable());

        let lock = restored.lock_object("EZCUSTOMER").unwrap();
        assert_eq!(lock.lock_mode(), LockMode::Shared);
        assert_eq!(lock.description(), Some("Customer lock"));
    }

    #[test]
    fn test_json_round_trip() {
        let catalog = build_catalog();
        let json = CatalogSnapshot::to_json(&catalog).unwrap();

        assert!(json.contains("\"dataType\": \"CHAR\""));
        assert!(json.contains("\"lockMode\": \"SHARED\""));
        assert!(json.contains("\"viewType\": \"PROJECTION\""));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], SNAPSHOT_VERSION);
        assert!(value["domains"]["ZFLAG"].is_object());
        let positions: Vec<_> = ["\"ZCHAR10\": {", "\"ZFLAG\": {", "\"ZAMOUNT\": {"]
            .iter()
            .map(|key| json.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(value["tables"]["ZCUSTOMER"]["fields"][0]["name"], "ID");

        let restored = CatalogSnapshot::from_json(&json).unwrap();
        assert_eq!(
            CatalogSnapshot::capture(&restored),
            CatalogSnapshot::capture(&catalog)
        );
    }

    #[test]
    fn test_from_json_reads_kind_prefixed_names() {
        let json = r#"{
            "domains": {
                "ZCHAR10": {
                    "name": "ZCHAR10", "dataType": "CHAR", "length": 10, "decimals": 0,
                    "description": null, "fixedValues": []
                },
                "ZFLAG": {
                    "name": "ZFLAG", "dataType": "CHAR", "length": 1, "decimals": 0,
                    "description": "Flag", "fixedValues": ["X", " "]
                }
            },
            "dataElements": {
                "ZCUST_ID": {
                    "name": "ZCUST_ID", "domainName": "ZCHAR10", "shortLabel": "ID",
                    "mediumLabel": null, "longLabel": null, "documentation": null
                },
                "ZACTIVE": {
                    "name": "ZACTIVE", "domainName": "ZFLAG", "shortLabel": null,
                    "mediumLabel": null, "longLabel": null, "documentation": null
                }
            },
            "tables": {
                "ZCUSTOMER": {
                    "tableName": "ZCUSTOMER", "description": null, "deliveryClass": "A",
                    "buffered": false,
                    "fields": [
                        {"fieldName": "ID", "dataElementName": "ZCUST_ID", "keyField": true, "nullable": false},
                        {"fieldName": "ACTIVE", "dataElementName": "ZACTIVE", "keyField": false, "nullable": true}
                    ]
                }
            },
            "structures": {},
            "views": {
                "ZCUSTOMER_V": {
                    "viewName": "ZCUSTOMER_V", "viewType": "DATABASE",
                    "baseTableNames": ["ZCUSTOMER"], "selectedFields": ["ID"], "description": null
                }
            },
            "searchHelps": {
                "ZSH_CUSTOMER": {
                    "name": "ZSH_CUSTOMER", "selectionMethodName": null,
                    "displayFields": ["ID"], "exportFields": [], "description": null
                }
            },
            "lockObjects": {
                "EZCUSTOMER": {
                    "name": "EZCUSTOMER", "primaryTableName": "ZCUSTOMER",
                    "secondaryTableNames": [], "lockMode": "EXCLUSIVE", "description": null
                }
            }
        }"#;

        let catalog = CatalogSnapshot::from_json(json).unwrap();
        assert_eq!(catalog.len(), 8);

        let domains: Vec<_> = catalog.domains().iter().map(|d| d.name().to_string()).collect();
        assert_eq!(domains, vec!["ZCHAR10", "ZFLAG"]);
        assert_eq!(catalog.domain("ZCHAR10").unwrap().description(), None);
        assert!(catalog.domain("ZFLAG").unwrap().accepts("X"));

        let table = catalog.table("ZCUSTOMER").unwrap();
        assert!(table.field("ID").unwrap().is_key());
        assert!(table.field("ACTIVE").unwrap().is_nullable());
        assert_eq!(catalog.view("ZCUSTOMER_V").unwrap().view_type(), ViewType::Database);
        assert!(catalog
            .search_help("ZSH_CUSTOMER")
            .unwrap()
            .selection_method()
            .is_none());
        assert_eq!(
            catalog.lock_object("EZCUSTOMER").unwrap().lock_mode(),
            LockMode::Exclusive
        );

        let result = ConsistencyValidator::new(&catalog).validate();
        assert!(result.is_valid(), "{:?}", result.findings());
    }

    #[test]
    fn test_from_json_reads_list_form() {
        let json = r#"{
            "version": 1,
            "domains": [{"name": "ZCHAR10", "dataType": "CHAR", "length": 10}],
            "dataElements": [{"name": "ZNAME", "domainName": "ZCHAR10"}]
        }"#;

        let catalog = CatalogSnapshot::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.data_element("ZNAME").unwrap().domain().name(), "ZCHAR10");
    }

    #[test]
    fn test_from_json_rejects_mismatched_key() {
        let json = r#"{"domains": {"ZOTHER": {"name": "ZCHAR10", "dataType": "CHAR", "length": 10}}}"#;
        let err = CatalogSnapshot::from_json(json).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_empty_snapshot() {
        let restored = CatalogSnapshot::from_json("{}").unwrap();
        assert!(restored.is_empty());
    }

    #[test]
    fn test_unresolved_domain() {
        let mut snapshot = CatalogSnapshot::capture(&build_catalog());
        snapshot.domains.retain(|d| d.name != "ZCHAR10");

        let err = snapshot.restore().unwrap_err();
        assert!(matches!(
            err,
            Error::UnresolvedReference { kind: EntityKind::Domain, ref name } if name == "ZCHAR10"
        ));
    }

    #[test]
    fn test_unresolved_table() {
        let mut snapshot = CatalogSnapshot::capture(&build_catalog());
        snapshot.lock_objects[0].secondary_table_names.push("ZMISSING".into());

        let err = snapshot.restore().unwrap_err();
        assert_eq!(err.to_string(), "Table not found: ZMISSING");
    }

    #[test]
    fn test_duplicate_in_snapshot() {
        let mut snapshot = CatalogSnapshot::capture(&build_catalog());
        let copy = snapshot.domains[0].clone();
        snapshot.domains.push(copy);

        let err = snapshot.restore().unwrap_err();
        assert!(matches!(err, Error::DuplicateName { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = CatalogSnapshot::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
