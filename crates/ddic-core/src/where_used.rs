//! Where-used (impact) analysis.
//!
//! Every query is a full scan of the catalog; no reverse index is kept.
//! Unknown or unused names simply produce empty results.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{Catalog, CatalogReader};

/// Category of dependent entity in a where-used result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UsageKind {
    DataElements,
    Tables,
    Structures,
    Views,
    SearchHelps,
    LockObjects,
}

impl std::fmt::Display for UsageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            UsageKind::DataElements => "dataElements",
            UsageKind::Tables => "tables",
            UsageKind::Structures => "structures",
            UsageKind::Views => "views",
            UsageKind::SearchHelps => "searchHelps",
            UsageKind::LockObjects => "lockObjects",
        };
        f.write_str(label)
    }
}

/// Dependent entity names grouped by kind.
///
/// A kind with no dependents is absent rather than present with an empty
/// list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Usages(BTreeMap<UsageKind, Vec<String>>);

impl Usages {
    /// Names recorded for a kind, if any.
    pub fn get(&self, kind: UsageKind) -> Option<&[String]> {
        self.0.get(&kind).map(Vec::as_slice)
    }

    /// Check if a kind is present.
    pub fn contains(&self, kind: UsageKind) -> bool {
        self.0.contains_key(&kind)
    }

    /// Check if nothing depends on the queried entity.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Present kinds and their names, in a fixed kind order.
    pub fn iter(&self) -> impl Iterator<Item = (UsageKind, &[String])> {
        self.0.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    fn put(&mut self, kind: UsageKind, names: Vec<String>) {
        if !names.is_empty() {
            self.0.insert(kind, names);
        }
    }
}

/// Finds the entities that reference a given entity.
pub struct WhereUsedAnalyzer<'a> {
    catalog: &'a Catalog,
}

impl<'a> WhereUsedAnalyzer<'a> {
    /// Create an analyzer over a catalog.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Data elements built on the given domain, in catalog order.
    pub fn data_elements_using_domain(&self, domain: &str) -> Vec<String> {
        data_elements_using_domain(&self.catalog.read(), domain)
    }

    /// Tables and structures with at least one field on the given data element.
    pub fn usages_of_data_element(&self, data_element: &str) -> Usages {
        let reader = self.catalog.read();
        let mut usages = Usages::default();
        let (tables, structures) = owners_of_data_element(&reader, data_element);
        usages.put(UsageKind::Tables, tables);
        usages.put(UsageKind::Structures, structures);
        usages
    }

    /// Views, search helps and lock objects that read the given table.
    pub fn usages_of_table(&self, table: &str) -> Usages {
        let reader = self.catalog.read();
        let mut usages = Usages::default();

        usages.put(
            UsageKind::Views,
            reader
                .views()
                .iter()
                .filter(|v| v.reads_table(table))
                .map(|v| v.name().to_string())
                .collect(),
        );
        usages.put(
            UsageKind::SearchHelps,
            reader
                .search_helps()
                .iter()
                .filter(|h| h.selection_method().is_some_and(|t| t.name() == table))
                .map(|h| h.name().to_string())
                .collect(),
        );
        usages.put(
            UsageKind::LockObjects,
            reader
                .lock_objects()
                .iter()
                .filter(|l| l.locks_table(table))
                .map(|l| l.name().to_string())
                .collect(),
        );
        usages
    }

    /// Data elements on the domain, plus the tables and structures using them.
    ///
    /// The analysis stops at the table/structure level: views, search helps
    /// and lock objects over those tables are not included.
    pub fn all_usages_of_domain(&self, domain: &str) -> Usages {
        let reader = self.catalog.read();
        let data_elements = data_elements_using_domain(&reader, domain);

        let mut tables: Vec<String> = Vec::new();
        let mut structures: Vec<String> = Vec::new();
        for element in &data_elements {
            let (t, s) = owners_of_data_element(&reader, element);
            push_unique(&mut tables, t);
            push_unique(&mut structures, s);
        }

        let mut usages = Usages::default();
        usages.put(UsageKind::DataElements, data_elements);
        usages.put(UsageKind::Tables, tables);
        usages.put(UsageKind::Structures, structures);
        usages
    }
}

fn data_elements_using_domain(reader: &CatalogReader<'_>, domain: &str) -> Vec<String> {
    reader
        .data_elements()
        .iter()
        .filter(|e| e.domain().name() == domain)
        .map(|e| e.name().to_string())
        .collect()
}

fn owners_of_data_element(
    reader: &CatalogReader<'_>,
    data_element: &str,
) -> (Vec<String>, Vec<String>) {
    let tables = reader
        .tables()
        .iter()
        .filter(|t| t.uses_data_element(data_element))
        .map(|t| t.name().to_string())
        .collect();
    let structures = reader
        .structures()
        .iter()
        .filter(|s| s.uses_data_element(data_element))
        .map(|s| s.name().to_string())
        .collect();
    (tables, structures)
}

/// Append names not seen yet, keeping first-seen order.
fn push_unique(target: &mut Vec<String>, names: Vec<String>) {
    for name in names {
        if !target.contains(&name) {
            target.push(name);
        }
    }
}
