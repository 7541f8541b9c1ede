//! JSON file-backed catalog store.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use storefront_types::Product;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};
use crate::store::{CatalogDocument, CatalogStore, Snapshot};

/// Catalog persisted as one pretty-printed JSON document.
///
/// Saves write a sibling temp file and rename it over the document, so a
/// reader never sees a half-written catalog. The revision check and the
/// rename happen under one lock, which makes the compare-and-swap atomic
/// for every writer sharing this store.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens the store at `path`. The file does not have to exist yet; its
    /// parent directories are created on first save.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        if path.is_dir() {
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("catalog path is a directory: {}", path.display()),
            )));
        }
        info!(path = %path.display(), exists = path.exists(), "Opened catalog store");
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> StorageResult<CatalogDocument> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(CatalogDocument::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_document(&self, doc: &CatalogDocument) -> StorageResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, doc)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }
}

impl CatalogStore for JsonFileStore {
    fn load_all(&self) -> StorageResult<Snapshot> {
        self.read_document().map(Snapshot::from)
    }

    fn save_all(&self, products: Vec<Product>, expected_revision: u64) -> StorageResult<u64> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::LockPoisoned)?;

        let actual = self.read_document()?.revision;
        if actual != expected_revision {
            return Err(StorageError::Conflict {
                expected: expected_revision,
                actual,
            });
        }

        let doc = CatalogDocument {
            products,
            revision: expected_revision + 1,
        };
        self.write_document(&doc)?;
        debug!(
            path = %self.path.display(),
            revision = doc.revision,
            products = doc.products.len(),
            "Saved catalog"
        );
        Ok(doc.revision)
    }

    fn flush(&self) -> StorageResult<()> {
        // Every save is already synced; wait out any in-flight writer.
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::LockPoisoned)?;
        debug!(path = %self.path.display(), "Flushed catalog store");
        Ok(())
    }
}
