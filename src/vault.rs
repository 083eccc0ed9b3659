//! File-backed vault: one store file opened with a password
//!
//! Every operation re-reads the file, so two `Vault`s on one path see each
//! other's writes (but still race if they write concurrently).

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{self, Config};
use crate::core::text::{key_list, Plaintext};
use crate::core::{Cipher, RecordStore, Result};
use crate::file_ops;

#[derive(Debug)]
pub struct Vault {
    path: PathBuf,
    store: RecordStore,
    mask_percent: u8,
}

impl Vault {
    /// Open (creating if needed) `path`; a missing extension gets the
    /// configured default
    pub fn open<P: AsRef<Path>>(path: P, password: &str) -> Result<Self> {
        Self::open_with_config(path, password, config::load())
    }

    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        password: &str,
        config: &Config,
    ) -> Result<Self> {
        let path = file_ops::normalize_path(path, &config.store.default_extension);
        file_ops::ensure_file(&path)?;
        let store = RecordStore::with_config(Cipher::from_text(password)?, config);
        debug!(path = %path.display(), "opened vault");
        Ok(Vault {
            path,
            store,
            mask_percent: config.display.mask_percent,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn reload(&mut self) -> Result<()> {
        let raw = file_ops::read_all(&self.path)?;
        self.store.load(&raw)?;
        Ok(())
    }

    pub fn get(&mut self, key: &str) -> Result<Option<Plaintext>> {
        self.reload()?;
        self.store.get(key)
    }

    /// Load, `set`, save
    pub fn insert<V: AsRef<[u8]>>(&mut self, key: &str, value: V) -> Result<()> {
        self.reload()?;
        self.store.set(key, value)?;
        self.store.save(&self.path, None)
    }

    /// Load, `delete`, save
    pub fn remove(&mut self, key: &str) -> Result<()> {
        self.reload()?;
        self.store.delete(key)?;
        self.store.save(&self.path, None)
    }

    pub fn keys(&mut self) -> Result<Vec<Plaintext>> {
        self.reload()?;
        self.store.keys().collect()
    }

    pub fn len(&mut self) -> Result<usize> {
        self.reload()?;
        Ok(self.store.len())
    }

    pub fn is_empty(&mut self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// `Vault(filename=f.sd, password=****et, length=1, keys=['username'])`
    pub fn summary(&mut self) -> Result<String> {
        let keys = self.keys()?;
        let keys = if keys.is_empty() {
            "None".to_owned()
        } else {
            key_list(&keys)
        };
        Ok(format!(
            "Vault(filename={}, password={}, length={}, keys={})",
            self.path.display(),
            self.store.cipher().masked_password(self.mask_percent),
            self.store.len(),
            keys
        ))
    }
}
