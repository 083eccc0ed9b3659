//! Encrypted record store
//!
//! An ordered list of (encrypted key, encrypted value) pairs. Lookups
//! decrypt keys one at a time and compare them lower-cased; there is no
//! index, stores are small and a linear scan is the contract.
//!
//! Two encryption layers: every key and value is encrypted on insertion
//! with its own IV, and on save the listing of those encrypted pairs is
//! encrypted again as one blob, hiding the record count and structure.
//!
//! Not thread-safe and no file locking: concurrent `save`s to one path can
//! leave a corrupted blob.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::config::{self, Config};
use crate::core::crypto::Cipher;
use crate::core::listing;
use crate::core::record::Record;
use crate::core::text::{encode_text, key_list, Plaintext};
use crate::core::Result;
use crate::error::CoreError;
use crate::file_ops;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// No records in memory
    Empty,
    /// Records in memory that differ from (or were never written to) disk
    Populated,
    /// Last mutation has been written by `save`
    Persisted,
}

pub struct RecordStore {
    cipher: Cipher,
    records: Vec<Record>,
    state: StoreState,
    decrypt_attempts: u32,
    mask_percent: u8,
}

impl RecordStore {
    /// Empty store under `password`, using the global config
    pub fn new(password: &[u8]) -> Result<Self> {
        Ok(Self::with_config(Cipher::new(password)?, config::load()))
    }

    pub fn from_text(password: &str) -> Result<Self> {
        Self::new(&encode_text(password))
    }

    pub fn with_config(cipher: Cipher, config: &Config) -> Self {
        RecordStore {
            cipher,
            records: Vec::new(),
            state: StoreState::Empty,
            decrypt_attempts: config.store.decrypt_attempts.max(1),
            mask_percent: config.display.mask_percent,
        }
    }

    pub fn cipher(&self) -> &Cipher {
        &self.cipher
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    /// Ciphertext records in store order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn touch(&mut self) {
        self.state = if self.records.is_empty() {
            StoreState::Empty
        } else {
            StoreState::Populated
        };
    }

    fn encrypt_record(&self, key: &str, value: &[u8]) -> Result<Record> {
        let key = self.cipher.encrypt(&encode_text(key))?;
        let value = self.cipher.encrypt(value)?;
        Ok(Record::new(key, value))
    }

    fn decrypt_record(&self, record: &Record) -> Result<(Plaintext, Plaintext)> {
        Ok((
            self.cipher.decrypt(record.key())?,
            self.cipher.decrypt(record.value())?,
        ))
    }

    fn key_matches(&self, record: &Record, folded: &str) -> Result<bool> {
        let key = self.cipher.decrypt(record.key())?;
        Ok(key.folded().as_deref() == Some(folded))
    }

    fn position(&self, folded: &str) -> Result<Option<usize>> {
        for (index, record) in self.records.iter().enumerate() {
            if self.key_matches(record, folded)? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Insert or replace the value for `key` (case-insensitive)
    ///
    /// The first matching record is replaced in place and later records with
    /// the same key are dropped; matches *before* it cannot exist since this
    /// is the first one. Without a match the record is appended.
    pub fn set<V: AsRef<[u8]>>(&mut self, key: &str, value: V) -> Result<()> {
        let record = self.encrypt_record(key, value.as_ref())?;
        let folded = key.to_lowercase();

        match self.position(&folded)? {
            Some(index) => {
                let mut kept = Vec::new();
                for later in &self.records[index + 1..] {
                    if !self.key_matches(later, &folded)? {
                        kept.push(later.clone());
                    }
                }
                let dropped = self.records.len() - index - 1 - kept.len();
                self.records.truncate(index + 1);
                self.records[index] = record;
                self.records.extend(kept);
                debug!(index, dropped, "replaced record");
            }
            None => {
                self.records.push(record);
                debug!(index = self.records.len() - 1, "appended record");
            }
        }

        self.touch();
        Ok(())
    }

    /// Append a record without de-duplication
    ///
    /// Mixing `add` and `set` on one key is order-dependent: `set` keeps the
    /// first match and only purges duplicates after it.
    pub fn add<V: AsRef<[u8]>>(&mut self, key: &str, value: V) -> Result<()> {
        let record = self.encrypt_record(key, value.as_ref())?;
        self.records.push(record);
        self.touch();
        Ok(())
    }

    /// `set` the first value and `add` the rest; no values deletes the key
    pub fn set_list<I, V>(&mut self, key: &str, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: AsRef<[u8]>,
    {
        let mut values = values.into_iter();
        let Some(first) = values.next() else {
            return self.delete(key);
        };

        self.set(key, first)?;
        for value in values {
            self.add(key, value)?;
        }
        Ok(())
    }

    /// Value of the first record whose key matches, case-insensitively
    pub fn get(&self, key: &str) -> Result<Option<Plaintext>> {
        let folded = key.to_lowercase();
        for record in &self.records {
            if self.key_matches(record, &folded)? {
                return self.cipher.decrypt(record.value()).map(Some);
            }
        }
        Ok(None)
    }

    pub fn get_or(&self, key: &str, default: impl Into<Plaintext>) -> Result<Plaintext> {
        Ok(self.get(key)?.unwrap_or_else(|| default.into()))
    }

    /// Like `get`, but a missing key is `CoreError::KeyNotFound`
    pub fn require(&self, key: &str) -> Result<Plaintext> {
        self.get(key)?
            .ok_or_else(|| CoreError::KeyNotFound(key.to_owned()))
    }

    /// Parse the value as `T`, falling back to `default` when the key is
    /// missing or the value does not parse
    pub fn get_parsed<T: FromStr>(&self, key: &str, default: T) -> Result<T> {
        Ok(self
            .get(key)?
            .and_then(|value| value.as_text().and_then(|text| text.parse().ok()))
            .unwrap_or(default))
    }

    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.position(&key.to_lowercase())?.is_some())
    }

    /// Decrypted pair at `index`
    pub fn entry(&self, index: usize) -> Result<Option<(Plaintext, Plaintext)>> {
        self.records
            .get(index)
            .map(|record| self.decrypt_record(record))
            .transpose()
    }

    /// Remove every record whose key matches; a missing key is not an error
    pub fn delete(&mut self, key: &str) -> Result<()> {
        let folded = key.to_lowercase();
        let mut keep = Vec::with_capacity(self.records.len());
        for record in &self.records {
            keep.push(!self.key_matches(record, &folded)?);
        }

        let removed = keep.iter().filter(|kept| !**kept).count();
        if removed > 0 {
            let mut keep = keep.into_iter();
            self.records.retain(|_| keep.next().unwrap_or(true));
            self.touch();
        }
        debug!(removed, "deleted records");
        Ok(())
    }

    /// Remove `key` and return the value it had
    pub fn pop(&mut self, key: &str) -> Result<Option<Plaintext>> {
        let value = self.get(key)?;
        if value.is_some() {
            self.delete(key)?;
        }
        Ok(value)
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.touch();
    }

    /// Decrypted keys in record order; duplicates from `add` are kept
    pub fn keys(&self) -> impl Iterator<Item = Result<Plaintext>> + '_ {
        self.records
            .iter()
            .map(|record| self.cipher.decrypt(record.key()))
    }

    /// Decrypted `(key, value)` pairs in record order
    pub fn iter(&self) -> impl Iterator<Item = Result<(Plaintext, Plaintext)>> + '_ {
        self.records
            .iter()
            .map(|record| self.decrypt_record(record))
    }

    /// The outer blob: the listing of encrypted pairs, encrypted once more
    pub fn to_blob(&self) -> Result<Vec<u8>> {
        self.cipher
            .encrypt(listing::render(&self.records).as_bytes())
    }

    fn decrypt_blob(&self, blob: &[u8]) -> Result<Plaintext> {
        let mut attempt = 1;
        loop {
            match self.cipher.decrypt(blob) {
                Err(CoreError::Password(reason)) if attempt < self.decrypt_attempts => {
                    warn!(attempt, reason, "outer blob yielded no plaintext, retrying");
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    /// Replace the records with those stored in `blob`
    ///
    /// An empty blob is an empty store. A blob that does not decrypt to a
    /// well-formed listing is reported as `CoreError::Password`.
    pub fn load(&mut self, blob: &[u8]) -> Result<&mut Self> {
        if blob.is_empty() {
            self.clear();
            return Ok(self);
        }

        let text = match self.decrypt_blob(blob)? {
            Plaintext::Text(text) => text,
            Plaintext::Bytes(_) => return Err(CoreError::Password("stored listing is not text")),
        };
        let records = listing::parse(&text).map_err(|err| {
            debug!(error = %err, "stored listing rejected");
            CoreError::Password("stored listing is malformed")
        })?;

        debug!(records = records.len(), "loaded store");
        self.records = records;
        self.touch();
        Ok(self)
    }

    /// Write `data`, or the current blob, to `path` in one whole-file write
    pub fn save<P: AsRef<Path>>(&mut self, path: P, data: Option<&[u8]>) -> Result<()> {
        let blob = match data {
            Some(data) => Cow::Borrowed(data),
            None => Cow::Owned(self.to_blob()?),
        };
        file_ops::write_all(path.as_ref(), &blob)?;
        self.state = StoreState::Persisted;
        Ok(())
    }

    /// `RecordStore(password=****et, length=2, keys=['a', 'b'])`
    pub fn summary(&self) -> Result<String> {
        let keys = self.keys().collect::<Result<Vec<_>>>()?;
        Ok(format!(
            "RecordStore(password={}, length={}, keys={})",
            self.cipher.masked_password(self.mask_percent),
            self.len(),
            key_list(&keys)
        ))
    }
}

impl fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("records", &self.records.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
