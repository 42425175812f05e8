//! MessagePack implementation of the table store.
//!
//! Each table lives in its own `<key>.msgpack` file inside one directory.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    Result,
    error::Error,
    ports::{CacheKey, CacheStore, TableKey, TableStore},
    q_learning::SavedTable,
    search::MoveCache,
};

/// Directory of MessagePack-encoded tables, with search caches in a
/// `cache/` subdirectory.
///
/// # Examples
///
/// ```no_run
/// use boardgames::adapters::MsgPackStore;
/// use boardgames::board::{GridBoard, Seat};
/// use boardgames::ports::{TableKey, TableStore};
///
/// let store = MsgPackStore::new("tables");
/// let key = TableKey::new(&GridBoard::tic_tac_toe(), Seat::First);
/// if let Some(saved) = store.load(&key)? {
///     println!("trained for {} episodes", saved.metadata.episodes_trained);
/// }
/// # Ok::<(), boardgames::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct MsgPackStore {
    dir: PathBuf,
}

impl MsgPackStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds the table for `key`
    pub fn path_for(&self, key: &TableKey) -> PathBuf {
        self.dir.join(format!("{key}.msgpack"))
    }

    /// File that holds the move cache for `key`
    pub fn cache_path_for(&self, key: &CacheKey) -> PathBuf {
        self.dir.join("cache").join(format!("{key}.msgpack"))
    }
}

fn read_file<T: DeserializeOwned>(path: &Path, what: &str) -> Result<Option<T>> {
    if !path.exists() {
        debug!(?path, "no stored {what}");
        return Ok(None);
    }

    let file = File::open(path).map_err(|source| Error::Io {
        operation: format!("open file {path:?}"),
        source,
    })?;
    let value = rmp_serde::decode::from_read(BufReader::new(file)).map_err(|e| {
        Error::SerializationContext {
            operation: format!("deserialize {what} from {path:?}"),
            message: e.to_string(),
        }
    })?;
    debug!(?path, "loaded {what}");
    Ok(Some(value))
}

fn write_file<T: Serialize>(path: &Path, value: &T, what: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::Io {
            operation: format!("create directory {parent:?}"),
            source,
        })?;
    }

    let file = File::create(path).map_err(|source| Error::Io {
        operation: format!("create file {path:?}"),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    rmp_serde::encode::write(&mut writer, value).map_err(|e| Error::SerializationContext {
        operation: format!("serialize {what} to MessagePack"),
        message: e.to_string(),
    })?;
    writer.flush().map_err(|source| Error::Io {
        operation: format!("write file {path:?}"),
        source,
    })?;
    debug!(?path, "saved {what}");
    Ok(())
}

impl TableStore for MsgPackStore {
    fn load(&self, key: &TableKey) -> Result<Option<SavedTable>> {
        read_file(&self.path_for(key), "table")
    }

    fn save(&self, key: &TableKey, table: &SavedTable) -> Result<()> {
        write_file(&self.path_for(key), table, "table")
    }
}

impl CacheStore for MsgPackStore {
    fn load_cache(&self, key: &CacheKey) -> Result<Option<MoveCache>> {
        read_file(&self.cache_path_for(key), "move cache")
    }

    fn save_cache(&self, key: &CacheKey, cache: &MoveCache) -> Result<()> {
        write_file(&self.cache_path_for(key), cache, "move cache")
    }
}
