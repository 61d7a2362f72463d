use std::{
    collections::HashMap,
    fs::File,
    io::{ErrorKind, Read, Seek, SeekFrom, Write},
    path::PathBuf,
    sync::{Mutex, PoisonError},
};

use anyhow::Result;
use fs4::fs_std::FileExt;
use tracing::{debug, trace};

/// Interface for abstracting the key-value area the profile lives in. Reads and writes of a
/// single key are atomic; nothing spans several keys.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Stores every key in its own file inside `dir`. Several processes may use the same directory:
/// readers take a shared lock, writers an exclusive one.
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.key_path(key);
        trace!("Reading {path:?}");
        let mut file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => Err(e)?,
        };

        FileExt::lock_shared(&file)?;
        let mut buffer = Vec::new();
        let result = file.read_to_end(&mut buffer);
        FileExt::unlock(&file)?;
        result?;

        // A writer that died between truncating and writing leaves an empty file behind.
        if buffer.is_empty() {
            return Ok(None);
        }
        Ok(Some(buffer))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.key_path(key);
        debug!("Writing {} bytes into {path:?}", value.len());
        let mut file = File::options()
            .write(true)
            .create(true)
            .read(true)
            .truncate(false)
            .open(&path)?;

        // Truncating before the lock is held would let readers observe an empty value.
        FileExt::lock_exclusive(&file)?;
        let result = overwrite(&mut file, value);
        FileExt::unlock(&file)?;
        result
    }

    fn remove(&self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn overwrite(file: &mut File, value: &[u8]) -> Result<()> {
    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(value)?;
    file.sync_data()?;
    Ok(())
}

/// Lives only as long as the process. Used when no directory can be created at all.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}
