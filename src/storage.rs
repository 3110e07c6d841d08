//! Durable key-value storage for scoreboard state
//!
//! This module defines the trait through which the application state reads
//! and writes its persisted records. Each record is a whole JSON document
//! stored under a fixed string key and is always overwritten in full.
//! Implementations might use a browser's local storage, files on disk, or an
//! in-memory map for tests.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::trace;

/// Errors that can occur while reading or writing a record
#[derive(Error, Debug)]
pub enum Error {
    /// The backing store could not be read or written
    #[error("storage i/o failed for key `{key}`: {source}")]
    Io {
        /// Key of the record being accessed
        key: String,
        /// Underlying I/O error
        source: io::Error,
    },
    /// The record could not be encoded or decoded as JSON
    #[error("malformed record `{key}`: {source}")]
    Json {
        /// Key of the record being accessed
        key: String,
        /// Underlying serialization error
        source: serde_json::Error,
    },
}

/// Trait for reading and writing whole records by key
///
/// Values are opaque text; encoding is handled by [`read_json`] and
/// [`write_json`].
pub trait Storage {
    /// Reads the record stored under `key`
    ///
    /// # Returns
    ///
    /// `Ok(None)` if no record exists for the key
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Replaces the record stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

/// Reads and decodes a JSON record
///
/// # Returns
///
/// `Ok(None)` if the record is absent
///
/// # Errors
///
/// * `Error::Io` - The store could not be read
/// * `Error::Json` - The record exists but does not decode as `T`
pub fn read_json<T: DeserializeOwned, S: Storage + ?Sized>(
    storage: &S,
    key: &str,
) -> Result<Option<T>, Error> {
    storage
        .get(key)?
        .map(|text| {
            serde_json::from_str(&text).map_err(|source| Error::Json {
                key: key.to_owned(),
                source,
            })
        })
        .transpose()
}

/// Encodes a value as JSON and overwrites the record
///
/// # Errors
///
/// * `Error::Json` - The value could not be encoded
/// * `Error::Io` - The store could not be written
pub fn write_json<T: Serialize + ?Sized, S: Storage + ?Sized>(
    storage: &mut S,
    key: &str,
    value: &T,
) -> Result<(), Error> {
    let text = serde_json::to_string(value).map_err(|source| Error::Json {
        key: key.to_owned(),
        source,
    })?;
    trace!(key, bytes = text.len(), "writing record");
    storage.set(key, &text)
}

/// Storage backed by a plain in-process map
///
/// Nothing survives the process; useful for tests and for embedding the
/// scoreboard where another layer owns durability.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    records: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.records.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Storage keeping one `<key>.json` file per record inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens a file store rooted at `dir`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, Error> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| Error::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Returns the directory holding the record files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        match fs::read_to_string(self.path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        fs::write(self.path(key), value).map_err(|source| Error::Io {
            key: key.to_owned(),
            source,
        })
    }
}
