//! Patient registration sample schema.
//!
//! A small but complete dictionary spanning all three layers, used to
//! bootstrap an empty catalog and as a fixture for the engines.

use std::sync::Arc;

use crate::catalog::{
    Catalog, DataElement, DataType, DeliveryClass, Domain, EntityKind, FieldDefinition, LockMode,
    LockObject, SearchHelp, TableDefinition, ValueRange, ViewDefinition, ViewType,
};
use crate::error::{Error, Result};

/// Name of the patient table.
pub const PATIENT_TABLE: &str = "ZPATIENT";

// (name, type, length, description)
const DOMAINS: &[(&str, DataType, u32, &str)] = &[
    ("ZPATIENT_ID", DataType::Numc, 10, "Patient identifier"),
    ("ZNAME_40", DataType::Char, 40, "Name field (40 characters)"),
    ("ZDOB", DataType::Date, 8, "Date of birth (YYYYMMDD)"),
    ("ZGENDER", DataType::Char, 1, "Gender code (M/F/O)"),
    ("ZPHONE_20", DataType::Char, 20, "Phone number"),
    ("ZEMAIL_100", DataType::String, 100, "Email address"),
    ("ZADDRESS_100", DataType::Char, 100, "Postal address"),
];

const GENDER_VALUES: [&str; 3] = ["M", "F", "O"];

// (name, domain, short, medium, long)
const DATA_ELEMENTS: &[(&str, &str, &str, &str, &str)] = &[
    ("DE_PATIENT_ID", "ZPATIENT_ID", "Pat. ID", "Patient ID", "Patient Identifier"),
    ("DE_FIRST_NAME", "ZNAME_40", "First Nm", "First Name", "Patient First Name"),
    ("DE_LAST_NAME", "ZNAME_40", "Last Nm", "Last Name", "Patient Last Name"),
    ("DE_DATE_OF_BIRTH", "ZDOB", "DOB", "Date of Birth", "Patient Date of Birth"),
    ("DE_GENDER", "ZGENDER", "Gender", "Gender", "Patient Gender"),
    ("DE_PHONE", "ZPHONE_20", "Phone", "Phone Number", "Contact Phone Number"),
    ("DE_EMAIL", "ZEMAIL_100", "Email", "Email", "Email Address"),
    ("DE_ADDRESS", "ZADDRESS_100", "Address", "Address", "Patient Address"),
];

// (field, data element, key, nullable)
const PATIENT_FIELDS: &[(&str, &str, bool, bool)] = &[
    ("PATIENT_ID", "DE_PATIENT_ID", true, false),
    ("FIRST_NAME", "DE_FIRST_NAME", false, false),
    ("LAST_NAME", "DE_LAST_NAME", false, false),
    ("DATE_OF_BIRTH", "DE_DATE_OF_BIRTH", false, true),
    ("GENDER", "DE_GENDER", false, true),
    ("PHONE", "DE_PHONE", false, true),
    ("EMAIL", "DE_EMAIL", false, true),
    ("ADDRESS", "DE_ADDRESS", false, true),
];

/// Register the patient registration schema into `catalog`.
///
/// Registers seven domains, eight data elements, the `ZPATIENT` table, the
/// `ZPATIENT_LIST_V` projection view, the `ZSH_PATIENT` search help and the
/// `EZPATIENT` lock object. Fails with a duplicate error if any of them is
/// already registered.
pub fn register_patient_schema(catalog: &Catalog) -> Result<()> {
    for &(name, data_type, length, description) in DOMAINS {
        let mut domain = Domain::new(name, data_type, length)?.with_description(description);
        if name == "ZGENDER" {
            domain = domain.with_value_range(ValueRange::from_values(GENDER_VALUES));
        }
        catalog.register_domain(domain)?;
    }

    let mut elements = Vec::with_capacity(DATA_ELEMENTS.len());
    for &(name, domain, short, medium, long) in DATA_ELEMENTS {
        let domain = catalog
            .domain(domain)
            .ok_or_else(|| Error::UnresolvedReference {
                kind: EntityKind::Domain,
                name: domain.to_string(),
            })?;
        let element = DataElement::new(name, domain)?
            .with_short_label(short)
            .with_medium_label(medium)
            .with_long_label(long);
        elements.push(catalog.register_data_element(element)?);
    }

    let mut table = TableDefinition::new(PATIENT_TABLE)?
        .with_description("Patient Registration Table")
        .with_delivery_class(DeliveryClass::A);
    for &(field, element, key, nullable) in PATIENT_FIELDS {
        table.add_field(FieldDefinition::new(
            field,
            element_named(&elements, element)?,
            key,
            nullable,
        )?)?;
    }
    let table = catalog.register_table(table)?;

    catalog.register_view(
        ViewDefinition::new("ZPATIENT_LIST_V", ViewType::Projection)?
            .with_description("Patient List View (key fields only)")
            .with_base_table(table.clone())
            .with_selected_fields([
                "PATIENT_ID",
                "FIRST_NAME",
                "LAST_NAME",
                "DATE_OF_BIRTH",
                "GENDER",
            ])?,
    )?;

    catalog.register_search_help(
        SearchHelp::new("ZSH_PATIENT")?
            .with_description("Patient Search Help")
            .with_selection_method(table.clone())
            .with_display_field("PATIENT_ID")?
            .with_display_field("FIRST_NAME")?
            .with_display_field("LAST_NAME")?
            .with_export_field("PATIENT_ID")?,
    )?;

    catalog.register_lock_object(
        LockObject::new("EZPATIENT", table)?
            .with_lock_mode(LockMode::Exclusive)
            .with_description("Patient Record Lock"),
    )?;

    Ok(())
}

fn element_named(elements: &[Arc<DataElement>], name: &str) -> Result<Arc<DataElement>> {
    elements
        .iter()
        .find(|e| e.name() == name)
        .cloned()
        .ok_or_else(|| Error::UnresolvedReference {
            kind: EntityKind::DataElement,
            name: name.to_string(),
        })
}
