//! Cross-layer referential integrity checks.
//!
//! The ConsistencyValidator walks the whole catalog and reports every
//! broken or divergent reference it can reach, never stopping at the first.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;

use super::result::ValidationResult;
use crate::catalog::{Catalog, CatalogReader, FieldDefinition};

/// Validates the catalog across all three schema layers.
///
/// Checks performed:
/// - every data element references the domain registered under its name,
///   as the same instance
/// - every field of a table or structure does the same for its data element
/// - every view reads registered tables and selects fields that exist in
///   one of them
/// - every search help with a selection method reads a registered table and
///   only names fields of that table
/// - views without tables or fields, and tables without fields, are flagged
///   as warnings
pub struct ConsistencyValidator<'a> {
    catalog: &'a Catalog,
}

impl<'a> ConsistencyValidator<'a> {
    /// Create a validator over a catalog.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Run all checks and return the combined findings.
    pub fn validate(&self) -> ValidationResult {
        let reader = self.catalog.read();
        let mut result = ValidationResult::default();

        validate_data_elements(&reader, &mut result);
        validate_table_fields(&reader, &mut result);
        validate_view_references(&reader, &mut result);
        validate_search_help_references(&reader, &mut result);
        validate_completeness(&reader, &mut result);

        info!(
            entities = reader.len(),
            errors = result.errors().count(),
            warnings = result.warnings().count(),
            "consistency check finished"
        );
        result
    }
}

fn validate_data_elements(reader: &CatalogReader<'_>, result: &mut ValidationResult) {
    for element in reader.data_elements() {
        let domain = element.domain();
        match reader.domain(domain.name()) {
            None => result.add_error(format!(
                "DataElement '{}' references Domain '{}' which is not registered in the dictionary",
                element.name(),
                domain.name()
            )),
            Some(registered) if !Arc::ptr_eq(registered, domain) => {
                result.add_error(format!(
                    "DataElement '{}' references a Domain instance '{}' that differs from the registered Domain with the same name",
                    element.name(),
                    domain.name()
                ))
            }
            Some(_) => {}
        }
    }
}

fn validate_table_fields(reader: &CatalogReader<'_>, result: &mut ValidationResult) {
    for table in reader.tables() {
        let owner = format!("Table '{}'", table.name());
        validate_field_list(reader, result, table.fields(), &owner);
    }
    for structure in reader.structures() {
        let owner = format!("Structure '{}'", structure.name());
        validate_field_list(reader, result, structure.fields(), &owner);
    }
}

fn validate_field_list(
    reader: &CatalogReader<'_>,
    result: &mut ValidationResult,
    fields: &[FieldDefinition],
    owner: &str,
) {
    for field in fields {
        let element = field.data_element();
        match reader.data_element(element.name()) {
            None => result.add_error(format!(
                "{owner}, field '{}' references DataElement '{}' which is not registered in the dictionary",
                field.name(),
                element.name()
            )),
            Some(registered) if !Arc::ptr_eq(registered, element) => {
                result.add_error(format!(
                    "{owner}, field '{}' references a DataElement instance '{}' that differs from the registered DataElement with the same name",
                    field.name(),
                    element.name()
                ))
            }
            Some(_) => {}
        }
    }
}

fn validate_view_references(reader: &CatalogReader<'_>, result: &mut ValidationResult) {
    for view in reader.views() {
        // A selected field may come from any of the base tables.
        let mut available: HashSet<&str> = HashSet::new();
        for base in view.base_tables() {
            if reader.table(base.name()).is_none() {
                result.add_error(format!(
                    "View '{}' references base table '{}' which is not registered in the dictionary",
                    view.name(),
                    base.name()
                ));
            }
            available.extend(base.fields().iter().map(|f| f.name()));
        }

        for selected in view.selected_fields() {
            if !available.contains(selected.as_str()) {
                result.add_error(format!(
                    "View '{}' selects field '{}' which does not exist in any of its base tables",
                    view.name(),
                    selected
                ));
            }
        }
    }
}

fn validate_search_help_references(reader: &CatalogReader<'_>, result: &mut ValidationResult) {
    for help in reader.search_helps() {
        let Some(table) = help.selection_method() else {
            continue;
        };

        if reader.table(table.name()).is_none() {
            result.add_error(format!(
                "SearchHelp '{}' references selection-method table '{}' which is not registered in the dictionary",
                help.name(),
                table.name()
            ));
        }

        let usages = help
            .display_fields()
            .iter()
            .map(|f| ("display", f))
            .chain(help.export_fields().iter().map(|f| ("export", f)));
        for (usage, field) in usages {
            if table.field(field).is_none() {
                result.add_error(format!(
                    "SearchHelp '{}' {usage} field '{}' does not exist in selection-method table '{}'",
                    help.name(),
                    field,
                    table.name()
                ));
            }
        }
    }
}

fn validate_completeness(reader: &CatalogReader<'_>, result: &mut ValidationResult) {
    for view in reader.views() {
        if view.base_tables().is_empty() {
            result.add_warning(format!("View '{}' has no base tables defined", view.name()));
        } else if view.selected_fields().is_empty() {
            result.add_warning(format!(
                "View '{}' has base tables but selects no fields",
                view.name()
            ));
        }
    }

    for table in reader.tables() {
        if table.fields().is_empty() {
            result.add_warning(format!("Table '{}' has no fields defined", table.name()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        DataElement, DataType, Domain, SearchHelp, Structure, TableDefinition, ViewDefinition,
        ViewType,
    };
    use crate::validation::Severity;

    struct Fixture {
        catalog: Catalog,
        name: Arc<DataElement>,
        id: Arc<DataElement>,
    }

    fn fixture() -> Fixture {
        let catalog = Catalog::new();
        let char10 = catalog
            .register_domain(Domain::new("ZCHAR10", DataType::Char, 10).unwrap())
            .unwrap();
        let numc3 = catalog
            .register_domain(Domain::new("ZNUMC3", DataType::Numc, 3).unwrap())
            .unwrap();
        let name = catalog
            .register_data_element(DataElement::new("ZNAME", char10).unwrap())
            .unwrap();
        let id = catalog
            .register_data_element(DataElement::new("ZID", numc3).unwrap())
            .unwrap();
        Fixture { catalog, name, id }
    }

    fn customer_table(f: &Fixture) -> TableDefinition {
        TableDefinition::new("ZCUSTOMER")
            .unwrap()
            .with_field(FieldDefinition::key("ID", Arc::clone(&f.id)).unwrap())
            .unwrap()
            .with_field(FieldDefinition::required("NAME", Arc::clone(&f.name)).unwrap())
            .unwrap()
    }

    fn messages(result: &ValidationResult) -> Vec<&str> {
        result.findings().iter().map(|f| f.message.as_str()).collect()
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = Catalog::new();
        let result = ConsistencyValidator::new(&catalog).validate();
        assert!(result.is_valid());
        assert!(result.findings().is_empty());
    }

    #[test]
    fn test_consistent_catalog_is_valid() {
        let f = fixture();
        let table = f.catalog.register_table(customer_table(&f)).unwrap();
        f.catalog
            .register_view(
                ViewDefinition::new("ZCUST_V", ViewType::Database)
                    .unwrap()
                    .with_base_table(table)
                    .with_selected_field("NAME")
                    .unwrap(),
            )
            .unwrap();

        let result = ConsistencyValidator::new(&f.catalog).validate();
        assert!(result.is_valid(), "unexpected findings: {:?}", messages(&result));
    }

    #[test]
    fn test_unregistered_domain() {
        let catalog = Catalog::new();
        let ghost = Arc::new(Domain::new("ZGHOST", DataType::Char, 1).unwrap());
        catalog
            .register_data_element(DataElement::new("ZDE", ghost).unwrap())
            .unwrap();

        let result = ConsistencyValidator::new(&catalog).validate();
        assert!(result.has_errors());
        assert_eq!(result.errors().count(), 1);
        assert!(messages(&result)[0].contains("ZGHOST' which is not registered"));
    }

    #[test]
    fn test_domain_identity_mismatch() {
        let catalog = Catalog::new();
        // Same name, different instance than the one that gets registered.
        let stale = Arc::new(Domain::new("ZCHAR10", DataType::Char, 10).unwrap());
        catalog
            .register_domain(Domain::new("ZCHAR10", DataType::Char, 10).unwrap())
            .unwrap();
        catalog
            .register_data_element(DataElement::new("ZA", Arc::clone(&stale)).unwrap())
            .unwrap();
        catalog
            .register_data_element(DataElement::new("ZB", stale).unwrap())
            .unwrap();

        let result = ConsistencyValidator::new(&catalog).validate();
        let differs: Vec<_> = result
            .errors()
            .filter(|f| f.message.contains("differs from the registered Domain"))
            .collect();
        assert_eq!(differs.len(), 2);
        assert!(differs[0].message.starts_with("DataElement 'ZA'"));
        assert!(differs[1].message.starts_with("DataElement 'ZB'"));
    }

    #[test]
    fn test_field_data_element_checks() {
        let f = fixture();
        let ghost = Arc::new(DataElement::new("ZGHOST", Arc::clone(f.name.domain())).unwrap());
        let copy = Arc::new((*f.name).clone());

        let table = TableDefinition::new("ZT")
            .unwrap()
            .with_field(FieldDefinition::required("A", ghost).unwrap())
            .unwrap()
            .with_field(FieldDefinition::required("B", Arc::clone(&copy)).unwrap())
            .unwrap();
        f.catalog.register_table(table).unwrap();

        let structure = Structure::new("ZS")
            .unwrap()
            .with_field(FieldDefinition::required("C", copy).unwrap())
            .unwrap();
        f.catalog.register_structure(structure).unwrap();

        let result = ConsistencyValidator::new(&f.catalog).validate();
        let msgs = messages(&result);
        assert_eq!(result.errors().count(), 3);
        assert!(msgs[0].starts_with("Table 'ZT', field 'A' references DataElement 'ZGHOST'"));
        assert!(msgs[1].starts_with("Table 'ZT', field 'B' references a DataElement instance"));
        assert!(msgs[2].starts_with("Structure 'ZS', field 'C'"));
    }

    #[test]
    fn test_view_field_union_across_base_tables() {
        let f = fixture();
        let customer = f.catalog.register_table(customer_table(&f)).unwrap();
        let order = f
            .catalog
            .register_table(
                TableDefinition::new("ZORDER")
                    .unwrap()
                    .with_field(FieldDefinition::key("ORDER_ID", Arc::clone(&f.id)).unwrap())
                    .unwrap(),
            )
            .unwrap();

        let view = ViewDefinition::new("ZJOIN_V", ViewType::Database)
            .unwrap()
            .with_base_table(customer)
            .with_base_table(order)
            .with_selected_fields(["NAME", "ORDER_ID", "MISSING"])
            .unwrap();
        f.catalog.register_view(view).unwrap();

        let result = ConsistencyValidator::new(&f.catalog).validate();
        assert_eq!(
            messages(&result),
            vec!["View 'ZJOIN_V' selects field 'MISSING' which does not exist in any of its base tables"]
        );
    }

    #[test]
    fn test_view_unregistered_base_table() {
        let f = fixture();
        let unregistered = Arc::new(customer_table(&f));
        f.catalog
            .register_view(
                ViewDefinition::new("ZV", ViewType::Projection)
                    .unwrap()
                    .with_base_table(unregistered)
                    .with_selected_field("ID")
                    .unwrap(),
            )
            .unwrap();

        let result = ConsistencyValidator::new(&f.catalog).validate();
        assert_eq!(result.errors().count(), 1);
        assert!(messages(&result)[0].contains("base table 'ZCUSTOMER' which is not registered"));
    }

    #[test]
    fn test_search_help_checks() {
        let f = fixture();
        let table = f.catalog.register_table(customer_table(&f)).unwrap();

        f.catalog
            .register_search_help(
                SearchHelp::new("ZSH_OK")
                    .unwrap()
                    .with_selection_method(Arc::clone(&table))
                    .with_display_field("NAME")
                    .unwrap()
                    .with_export_field("ID")
                    .unwrap(),
            )
            .unwrap();
        f.catalog
            .register_search_help(
                SearchHelp::new("ZSH_BAD")
                    .unwrap()
                    .with_selection_method(table)
                    .with_display_field("CITY")
                    .unwrap()
                    .with_export_field("ZIP")
                    .unwrap(),
            )
            .unwrap();
        f.catalog
            .register_search_help(SearchHelp::new("ZSH_NONE").unwrap())
            .unwrap();

        let result = ConsistencyValidator::new(&f.catalog).validate();
        assert_eq!(
            messages(&result),
            vec![
                "SearchHelp 'ZSH_BAD' display field 'CITY' does not exist in selection-method table 'ZCUSTOMER'",
                "SearchHelp 'ZSH_BAD' export field 'ZIP' does not exist in selection-method table 'ZCUSTOMER'",
            ]
        );
    }

    #[test]
    fn test_search_help_unregistered_table() {
        let f = fixture();
        f.catalog
            .register_search_help(
                SearchHelp::new("ZSH")
                    .unwrap()
                    .with_selection_method(Arc::new(customer_table(&f))),
            )
            .unwrap();

        let result = ConsistencyValidator::new(&f.catalog).validate();
        assert_eq!(result.errors().count(), 1);
        assert!(messages(&result)[0].contains("selection-method table 'ZCUSTOMER' which is not registered"));
    }

    #[test]
    fn test_empty_table_warning() {
        let catalog = Catalog::new();
        catalog
            .register_table(TableDefinition::new("ZEMPTY").unwrap())
            .unwrap();

        let result = ConsistencyValidator::new(&catalog).validate();
        assert!(!result.has_errors());
        assert_eq!(result.findings().len(), 1);
        assert_eq!(result.findings()[0].severity, Severity::Warning);
        assert!(result.findings()[0].message.contains("no fields"));
    }

    #[test]
    fn test_incomplete_view_warnings() {
        let f = fixture();
        let table = f.catalog.register_table(customer_table(&f)).unwrap();
        f.catalog
            .register_view(ViewDefinition::new("ZNO_TABLES", ViewType::Help).unwrap())
            .unwrap();
        f.catalog
            .register_view(
                ViewDefinition::new("ZNO_FIELDS", ViewType::Maintenance)
                    .unwrap()
                    .with_base_table(table),
            )
            .unwrap();

        let result = ConsistencyValidator::new(&f.catalog).validate();
        assert!(!result.has_errors());
        assert_eq!(
            result.warnings().map(|w| w.message.as_str()).collect::<Vec<_>>(),
            vec![
                "View 'ZNO_TABLES' has no base tables defined",
                "View 'ZNO_FIELDS' has base tables but selects no fields",
            ]
        );
    }

    #[test]
    fn test_reports_everything_in_one_pass() {
        let catalog = Catalog::new();
        let ghost = Arc::new(Domain::new("ZGHOST", DataType::Char, 1).unwrap());
        let element = Arc::new(DataElement::new("ZDE", ghost).unwrap());
        let table = TableDefinition::new("ZT")
            .unwrap()
            .with_field(FieldDefinition::required("F", element).unwrap())
            .unwrap();
        catalog.register_table(table).unwrap();
        catalog
            .register_table(TableDefinition::new("ZEMPTY").unwrap())
            .unwrap();

        let result = ConsistencyValidator::new(&catalog).validate();
        assert_eq!(result.errors().count(), 1);
        assert_eq!(result.warnings().count(), 1);
    }
}
