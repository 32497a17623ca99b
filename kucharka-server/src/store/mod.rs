//! JSON file storage
//!
//! Each collection lives in one JSON file holding a top-level array. Every
//! mutation reloads the whole file, changes it in memory and replaces the
//! whole file. Writers are serialized twice over: an async mutex inside the
//! process and an advisory lock on `<file>.lock` across processes. The new
//! contents go to a temp file in the same directory that is then renamed over
//! the old one, so readers never see a half-written array.

use fs2::FileExt;
use serde::{de::DeserializeOwned, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use kucharka_common::{Error, Result};

mod ingredients;
mod recipes;

pub use ingredients::IngredientStore;
pub use recipes::RecipeStore;

/// An item that can live in a [`JsonCollection`]
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> &str;
}

impl Entity for kucharka_common::Recipe {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for kucharka_common::Ingredient {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Whole-file JSON array of `T`
pub struct JsonCollection<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> JsonCollection<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole file.
    ///
    /// Fails with [`Error::StorageRead`] when the file is missing or corrupt.
    /// Nothing is created when the file is missing.
    pub async fn load_all(&self) -> Result<Vec<T>> {
        let bytes = tokio::fs::read(&self.path).await;
        decode(&self.path, bytes)
    }

    /// Run one locked read-modify-write cycle.
    ///
    /// The result of `mutate` is persisted only when it returns `Ok`.
    pub async fn update<R, F>(&self, mutate: F) -> Result<R>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let _guard = self.write_lock.lock().await;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || {
            let _file_lock = lock_exclusive(&path)?;
            let mut items = decode(&path, std::fs::read(&path))?;
            let result = mutate(&mut items)?;
            write_atomic(&path, &items)?;
            debug!("Persisted {} items to {}", items.len(), path.display());
            Ok(result)
        })
        .await
        .map_err(|e| Error::StorageWrite {
            path: self.path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::Other, e),
        })?
    }

    /// Write `[]` when the file does not exist yet
    pub async fn ensure_initialized(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || {
            let _file_lock = lock_exclusive(&path)?;
            if path.exists() {
                return Ok(());
            }
            write_atomic::<T>(&path, &[])?;
            info!("Created empty storage at {}", path.display());
            Ok(())
        })
        .await
        .map_err(|e| Error::StorageWrite {
            path: self.path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::Other, e),
        })?
    }

    /// Replace the whole collection
    pub async fn replace_all(&self, items: Vec<T>) -> Result<()> {
        self.update(move |current| {
            *current = items;
            Ok(())
        })
        .await
    }
}

fn decode<T: DeserializeOwned>(path: &Path, bytes: std::io::Result<Vec<u8>>) -> Result<Vec<T>> {
    let bytes = match bytes {
        Ok(bytes) => bytes,
        Err(e) => {
            if e.kind() == std::io::ErrorKind::NotFound {
                error!("No storage found at {}", path.display());
            } else {
                error!("Failed to read storage {}: {}", path.display(), e);
            }
            return Err(Error::StorageRead(path.to_path_buf()));
        }
    };

    serde_json::from_slice(&bytes).map_err(|e| {
        error!("Corrupt storage {}: {}", path.display(), e);
        Error::StorageRead(path.to_path_buf())
    })
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

/// Held for the duration of one write cycle; the lock is released on drop
fn lock_exclusive(path: &Path) -> Result<std::fs::File> {
    let lock_path = lock_path(path);
    let write_error = |source| Error::StorageWrite {
        path: lock_path.clone(),
        source,
    };

    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)
        .map_err(write_error)?;
    file.lock_exclusive().map_err(write_error)?;
    Ok(file)
}

fn write_atomic<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let write_error = |source| Error::StorageWrite {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_error)?;
    serde_json::to_writer_pretty(&mut tmp, items)?;
    tmp.write_all(b"\n").map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;
    tmp.persist(path).map_err(|e| {
        warn!("Rename onto {} failed", path.display());
        write_error(e.error)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kucharka_common::Recipe;
    use std::sync::Arc;

    fn collection_in(dir: &Path) -> Arc<JsonCollection<Recipe>> {
        Arc::new(JsonCollection::new(dir.join("recipes.json")))
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let collection = collection_in(dir.path());

        let err = collection.load_all().await.unwrap_err();
        assert!(matches!(err, Error::StorageRead(_)));
        assert!(!collection.path().exists(), "load must not create the file");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_same_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let collection = collection_in(dir.path());
        std::fs::write(collection.path(), "{ not json").unwrap();

        let err = collection.load_all().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Unable to read from storage. {}", collection.path().display())
        );
    }

    #[tokio::test]
    async fn test_written_file_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let collection = collection_in(dir.path());
        collection.ensure_initialized().await.unwrap();

        collection
            .replace_all(vec![Recipe::new("1", "Soup")])
            .await
            .unwrap();

        let text = std::fs::read_to_string(collection.path()).unwrap();
        assert!(text.starts_with("[\n  {\n    \"id\": \"1\""), "got: {text}");
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let collection = collection_in(dir.path());
        collection
            .ensure_initialized()
            .await
            .unwrap();
        collection
            .replace_all(vec![Recipe::new("1", "Soup")])
            .await
            .unwrap();

        let result: Result<()> = collection
            .update(|items| {
                items.clear();
                Err(Error::InvalidInput("rejected".to_string()))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(collection.load_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_initialized_keeps_existing_data() {
        let dir = tempfile::tempdir().unwrap();
        let collection = collection_in(dir.path());
        std::fs::write(collection.path(), r#"[{"id":"1","name":"Soup"}]"#).unwrap();

        collection.ensure_initialized().await.unwrap();

        assert_eq!(collection.load_all().await.unwrap(), vec![Recipe::new("1", "Soup")]);
    }

    #[test]
    fn test_lock_path_is_sibling() {
        assert_eq!(
            lock_path(Path::new("/data/recipes.json")),
            PathBuf::from("/data/recipes.json.lock")
        );
    }
}
