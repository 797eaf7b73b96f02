//! File-backed catalog storage.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::CatalogSnapshot;
use crate::catalog::Catalog;
use crate::error::Result;

/// Persists a catalog as a JSON snapshot at a fixed storage path.
///
/// `export_to` and `import_from` work on arbitrary paths; `save` and `load`
/// use the configured one.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    storage_path: PathBuf,
}

impl CatalogRepository {
    /// Create a repository storing the catalog at `storage_path`.
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: storage_path.into(),
        }
    }

    /// The configured storage path.
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// Whether a stored catalog exists.
    pub fn exists(&self) -> bool {
        self.storage_path.exists()
    }

    /// Write the catalog to the storage path.
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        self.export_to(catalog, &self.storage_path)
    }

    /// Read the catalog from the storage path.
    pub fn load(&self) -> Result<Catalog> {
        self.import_from(&self.storage_path)
    }

    /// Write the catalog to `target`, creating missing parent directories.
    pub fn export_to(&self, catalog: &Catalog, target: impl AsRef<Path>) -> Result<()> {
        let target = target.as_ref();
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = CatalogSnapshot::to_json(catalog)?;
        std::fs::write(target, &json)?;

        info!(
            path = %target.display(),
            entities = catalog.len(),
            bytes = json.len(),
            "catalog written"
        );
        Ok(())
    }

    /// Read a catalog from `source`.
    pub fn import_from(&self, source: impl AsRef<Path>) -> Result<Catalog> {
        let source = source.as_ref();
        debug!(path = %source.display(), "reading catalog");

        let json = std::fs::read_to_string(source)?;
        let catalog = CatalogSnapshot::from_json(&json)?;

        info!(
            path = %source.display(),
            entities = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }
}
