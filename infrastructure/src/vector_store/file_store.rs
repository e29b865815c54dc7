//! File-backed category indexes
//!
//! Layout: `<root>/<category token>/index.json`. Writes go to a temporary
//! file in the same directory and are renamed into place, so readers see
//! either the old or the new index. Loaded indexes are cached as shared
//! snapshots and reloaded when the file's modification time or length
//! changes.
//!
//! Writes are serialized within one process only. Two processes ingesting
//! into the same category at once can lose one of the updates.

use super::error::IndexStoreError;
use super::index::VectorIndex;
use async_trait::async_trait;
use docqa_application::{IndexEntry, IndexStats, IndexStore, ServiceError};
use docqa_domain::Category;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

pub const INDEX_FILE: &str = "index.json";

/// What the cache compares to decide whether the file changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: Option<SystemTime>,
    len: u64,
}

impl FileStamp {
    fn of(meta: &std::fs::Metadata) -> Self {
        Self {
            modified: meta.modified().ok(),
            len: meta.len(),
        }
    }
}

struct CachedIndex {
    stamp: FileStamp,
    index: Arc<VectorIndex>,
}

pub struct FileIndexStore {
    root: PathBuf,
    cache: RwLock<HashMap<Category, CachedIndex>>,
    write_lock: Mutex<()>,
}

impl FileIndexStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: RwLock::new(HashMap::new()),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.root.join(category.path_segment())
    }

    pub fn index_path(&self, category: Category) -> PathBuf {
        self.category_dir(category).join(INDEX_FILE)
    }

    /// Whether an index has been built for `category`
    pub async fn exists(&self, category: Category) -> bool {
        tokio::fs::try_exists(self.index_path(category))
            .await
            .unwrap_or(false)
    }

    /// Shared snapshot of the category index, or `None` if it was never built
    pub async fn load(&self, category: Category) -> Result<Option<Arc<VectorIndex>>, IndexStoreError> {
        let path = self.index_path(category);
        let stamp = match tokio::fs::metadata(&path).await {
            Ok(meta) => FileStamp::of(&meta),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(IndexStoreError::io(path, e)),
        };

        if let Some(cached) = self.cache.read().await.get(&category)
            && stamp.modified.is_some()
            && cached.stamp == stamp
        {
            return Ok(Some(Arc::clone(&cached.index)));
        }

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(IndexStoreError::io(path, e)),
        };
        let index: VectorIndex =
            serde_json::from_slice(&bytes).map_err(|e| IndexStoreError::Corrupt {
                path: path.clone(),
                message: e.to_string(),
            })?;

        debug!("Loaded {} index: {} entries", category, index.len());

        let index = Arc::new(index);
        self.cache.write().await.insert(
            category,
            CachedIndex {
                stamp,
                index: Arc::clone(&index),
            },
        );
        Ok(Some(index))
    }

    /// Merge `entries` into the category index and persist it atomically.
    pub async fn merge(&self, category: Category, entries: Vec<IndexEntry>) -> Result<usize, IndexStoreError> {
        let _guard = self.write_lock.lock().await;

        let mut index = match self.load(category).await? {
            Some(current) => VectorIndex::clone(&current),
            None => VectorIndex::default(),
        };
        index.merge(entries)?;

        let stamp = self.write_atomic(category, &index).await?;
        let total = index.len();

        info!(
            "Wrote {} index ({} entries) to {}",
            category,
            total,
            self.index_path(category).display()
        );

        self.cache.write().await.insert(
            category,
            CachedIndex {
                stamp,
                index: Arc::new(index),
            },
        );
        Ok(total)
    }

    async fn write_atomic(
        &self,
        category: Category,
        index: &VectorIndex,
    ) -> Result<FileStamp, IndexStoreError> {
        let dir = self.category_dir(category);
        let path = self.index_path(category);

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| IndexStoreError::io(&dir, e))?;

        let bytes = serde_json::to_vec(index).map_err(|e| IndexStoreError::Corrupt {
            path: path.clone(),
            message: e.to_string(),
        })?;

        tokio::task::spawn_blocking(move || -> Result<FileStamp, IndexStoreError> {
            let mut tmp =
                tempfile::NamedTempFile::new_in(&dir).map_err(|e| IndexStoreError::io(&dir, e))?;
            tmp.write_all(&bytes)
                .and_then(|()| tmp.as_file().sync_all())
                .map_err(|e| IndexStoreError::io(tmp.path(), e))?;
            let file = tmp
                .persist(&path)
                .map_err(|e| IndexStoreError::io(&path, e.error))?;
            let meta = file.metadata().map_err(|e| IndexStoreError::io(&path, e))?;
            Ok(FileStamp::of(&meta))
        })
        .await
        .map_err(|e| IndexStoreError::Task(e.to_string()))?
    }
}

#[async_trait]
impl IndexStore for FileIndexStore {
    async fn append(&self, category: Category, entries: Vec<IndexEntry>) -> Result<usize, ServiceError> {
        Ok(self.merge(category, entries).await?)
    }

    async fn stats(&self, category: Category) -> Result<Option<IndexStats>, ServiceError> {
        Ok(self.load(category).await?.map(|index| index.stats(category)))
    }
}
