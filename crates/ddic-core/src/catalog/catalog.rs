//! The catalog: central registry for all dictionary entities.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use tracing::debug;

use super::{
    DataElement, Domain, EntityKind, LockObject, SearchHelp, Structure, TableDefinition,
    ViewDefinition,
};
use crate::error::{Error, Result};

/// An entity that can be registered in the catalog.
pub trait Registered {
    /// Kind under which the entity is registered.
    const KIND: EntityKind;

    /// Name unique within the entity's kind.
    fn registered_name(&self) -> &str;
}

macro_rules! registered {
    ($ty:ty, $kind:expr) => {
        impl Registered for $ty {
            const KIND: EntityKind = $kind;

            fn registered_name(&self) -> &str {
                self.name()
            }
        }
    };
}

registered!(Domain, EntityKind::Domain);
registered!(DataElement, EntityKind::DataElement);
registered!(TableDefinition, EntityKind::Table);
registered!(Structure, EntityKind::Structure);
registered!(ViewDefinition, EntityKind::View);
registered!(SearchHelp, EntityKind::SearchHelp);
registered!(LockObject, EntityKind::LockObject);

/// Insertion-ordered name to entity mapping for one kind.
#[derive(Debug)]
struct Registry<T> {
    entries: Vec<Arc<T>>,
    index: HashMap<String, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Registered> Registry<T> {
    fn insert(&mut self, entity: Arc<T>) -> Result<Arc<T>> {
        let name = entity.registered_name();
        if self.index.contains_key(name) {
            return Err(Error::DuplicateName {
                kind: T::KIND,
                name: name.to_string(),
            });
        }
        debug!(kind = %T::KIND, name, "registered");
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(Arc::clone(&entity));
        Ok(entity)
    }

    fn get(&self, name: &str) -> Option<&Arc<T>> {
        self.index.get(name).map(|&i| &self.entries[i])
    }
}

#[derive(Debug, Default)]
struct CatalogState {
    // Internal layer
    domains: Registry<Domain>,
    data_elements: Registry<DataElement>,
    // Conceptual layer
    tables: Registry<TableDefinition>,
    structures: Registry<Structure>,
    // External layer
    views: Registry<ViewDefinition>,
    search_helps: Registry<SearchHelp>,
    lock_objects: Registry<LockObject>,
}

/// The data dictionary catalog.
///
/// Owns one insertion-ordered mapping per entity kind and enforces name
/// uniqueness within each kind. Registration is append-only; there is no
/// update or delete.
///
/// Embedded references are not checked at registration time, so an entity
/// may point at something that is not (yet) registered, or at a different
/// instance with the same name. [`ConsistencyValidator`] reports those.
///
/// All registrations go through a single write lock; readers share the
/// lock and may run concurrently once the entity set is stable.
///
/// [`ConsistencyValidator`]: crate::validation::ConsistencyValidator
#[derive(Debug, Default)]
pub struct Catalog {
    state: RwLock<CatalogState>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a consistent read view over all entity kinds.
    ///
    /// Registrations block while the returned reader is alive.
    pub fn read(&self) -> CatalogReader<'_> {
        CatalogReader {
            state: self.state.read(),
        }
    }

    // ---- Internal layer ----

    /// Register a domain.
    pub fn register_domain(&self, domain: impl Into<Arc<Domain>>) -> Result<Arc<Domain>> {
        self.state.write().domains.insert(domain.into())
    }

    /// Get a domain by name.
    pub fn domain(&self, name: &str) -> Option<Arc<Domain>> {
        self.read().domain(name).cloned()
    }

    /// All domains in registration order.
    pub fn domains(&self) -> Vec<Arc<Domain>> {
        self.read().domains().to_vec()
    }

    /// Register a data element.
    pub fn register_data_element(
        &self,
        element: impl Into<Arc<DataElement>>,
    ) -> Result<Arc<DataElement>> {
        self.state.write().data_elements.insert(element.into())
    }

    /// Get a data element by name.
    pub fn data_element(&self, name: &str) -> Option<Arc<DataElement>> {
        self.read().data_element(name).cloned()
    }

    /// All data elements in registration order.
    pub fn data_elements(&self) -> Vec<Arc<DataElement>> {
        self.read().data_elements().to_vec()
    }

    // ---- Conceptual layer ----

    /// Register a table.
    pub fn register_table(
        &self,
        table: impl Into<Arc<TableDefinition>>,
    ) -> Result<Arc<TableDefinition>> {
        self.state.write().tables.insert(table.into())
    }

    /// Get a table by name.
    pub fn table(&self, name: &str) -> Option<Arc<TableDefinition>> {
        self.read().table(name).cloned()
    }

    /// All tables in registration order.
    pub fn tables(&self) -> Vec<Arc<TableDefinition>> {
        self.read().tables().to_vec()
    }

    /// Register a structure.
    pub fn register_structure(&self, structure: impl Into<Arc<Structure>>) -> Result<Arc<Structure>> {
        self.state.write().structures.insert(structure.into())
    }

    /// Get a structure by name.
    pub fn structure(&self, name: &str) -> Option<Arc<Structure>> {
        self.read().structure(name).cloned()
    }

    /// All structures in registration order.
    pub fn structures(&self) -> Vec<Arc<Structure>> {
        self.read().structures().to_vec()
    }

    // ---- External layer ----

    /// Register a view.
    pub fn register_view(
        &self,
        view: impl Into<Arc<ViewDefinition>>,
    ) -> Result<Arc<ViewDefinition>> {
        self.state.write().views.insert(view.into())
    }

    /// Get a view by name.
    pub fn view(&self, name: &str) -> Option<Arc<ViewDefinition>> {
        self.read().view(name).cloned()
    }

    /// All views in registration order.
    pub fn views(&self) -> Vec<Arc<ViewDefinition>> {
        self.read().views().to_vec()
    }

    /// Register a search help.
    pub fn register_search_help(
        &self,
        search_help: impl Into<Arc<SearchHelp>>,
    ) -> Result<Arc<SearchHelp>> {
        self.state.write().search_helps.insert(search_help.into())
    }

    /// Get a search help by name.
    pub fn search_help(&self, name: &str) -> Option<Arc<SearchHelp>> {
        self.read().search_help(name).cloned()
    }

    /// All search helps in registration order.
    pub fn search_helps(&self) -> Vec<Arc<SearchHelp>> {
        self.read().search_helps().to_vec()
    }

    /// Register a lock object.
    pub fn register_lock_object(
        &self,
        lock_object: impl Into<Arc<LockObject>>,
    ) -> Result<Arc<LockObject>> {
        self.state.write().lock_objects.insert(lock_object.into())
    }

    /// Get a lock object by name.
    pub fn lock_object(&self, name: &str) -> Option<Arc<LockObject>> {
        self.read().lock_object(name).cloned()
    }

    /// All lock objects in registration order.
    pub fn lock_objects(&self) -> Vec<Arc<LockObject>> {
        self.read().lock_objects().to_vec()
    }

    /// Total number of registered entities across all kinds.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A read view over the catalog, holding its read lock.
///
/// Everything observed through one reader belongs to the same state of the
/// catalog.
pub struct CatalogReader<'a> {
    state: RwLockReadGuard<'a, CatalogState>,
}

impl CatalogReader<'_> {
    pub fn domain(&self, name: &str) -> Option<&Arc<Domain>> {
        self.state.domains.get(name)
    }

    pub fn domains(&self) -> &[Arc<Domain>] {
        &self.state.domains.entries
    }

    pub fn data_element(&self, name: &str) -> Option<&Arc<DataElement>> {
        self.state.data_elements.get(name)
    }

    pub fn data_elements(&self) -> &[Arc<DataElement>] {
        &self.state.data_elements.entries
    }

    pub fn table(&self, name: &str) -> Option<&Arc<TableDefinition>> {
        self.state.tables.get(name)
    }

    pub fn tables(&self) -> &[Arc<TableDefinition>] {
        &self.state.tables.entries
    }

    pub fn structure(&self, name: &str) -> Option<&Arc<Structure>> {
        self.state.structures.get(name)
    }

    pub fn structures(&self) -> &[Arc<Structure>] {
        &self.state.structures.entries
    }

    pub fn view(&self, name: &str) -> Option<&Arc<ViewDefinition>> {
        self.state.views.get(name)
    }

    pub fn views(&self) -> &[Arc<ViewDefinition>] {
        &self.state.views.entries
    }

    pub fn search_help(&self, name: &str) -> Option<&Arc<SearchHelp>> {
        self.state.search_helps.get(name)
    }

    pub fn search_helps(&self) -> &[Arc<SearchHelp>] {
        &self.state.search_helps.entries
    }

    pub fn lock_object(&self, name: &str) -> Option<&Arc<LockObject>> {
        self.state.lock_objects.get(name)
    }

    pub fn lock_objects(&self) -> &[Arc<LockObject>] {
        &self.state.lock_objects.entries
    }

    /// Total number of registered entities across all kinds.
    pub fn len(&self) -> usize {
        let s = &self.state;
        s.domains.entries.len()
            + s.data_elements.entries.len()
            + s.tables.entries.len()
            + s.structures.entries.len()
            + s.views.entries.len()
            + s.search_helps.entries.len()
            + s.lock_objects.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
