//! Text/bytes boundary helpers
//!
//! All text crosses into the cipher through [`encode_text`] (UTF-8);
//! decrypted fields come back as [`Plaintext`].

use std::fmt;

use crate::core::listing::bytes_literal;

/// The single text → bytes conversion used by the crate (UTF-8)
pub fn encode_text(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// A decrypted field: text when it is valid UTF-8, raw bytes otherwise
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Plaintext {
    Text(String),
    Bytes(Vec<u8>),
}

impl Plaintext {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Plaintext::Text(text),
            Err(err) => Plaintext::Bytes(err.into_bytes()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Plaintext::Text(text) => Some(text),
            Plaintext::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Plaintext::Text(text) => text.as_bytes(),
            Plaintext::Bytes(bytes) => bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Plaintext::Text(text) => text.into_bytes(),
            Plaintext::Bytes(bytes) => bytes,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Plaintext::Text(_))
    }

    /// Lower-cased text used for key comparison; bytes never match a key
    pub(crate) fn folded(&self) -> Option<String> {
        self.as_text().map(str::to_lowercase)
    }
}

impl fmt::Display for Plaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plaintext::Text(text) => f.write_str(text),
            Plaintext::Bytes(bytes) => f.write_str(&bytes_literal(bytes)),
        }
    }
}

impl From<&str> for Plaintext {
    fn from(text: &str) -> Self {
        Plaintext::Text(text.to_owned())
    }
}

impl From<String> for Plaintext {
    fn from(text: String) -> Self {
        Plaintext::Text(text)
    }
}

impl From<Vec<u8>> for Plaintext {
    fn from(bytes: Vec<u8>) -> Self {
        Plaintext::from_bytes(bytes)
    }
}

impl PartialEq<str> for Plaintext {
    fn eq(&self, other: &str) -> bool {
        self.as_text() == Some(other)
    }
}

impl PartialEq<&str> for Plaintext {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}

/// Star out the password, keeping the last `percent` % of its characters
///
/// Passwords of two characters or fewer are fully starred.
pub fn mask_password(password: &str, percent: u8) -> String {
    let chars: Vec<char> = password.chars().collect();
    if chars.len() <= 2 {
        return "*".repeat(chars.len());
    }

    let visible = usize::from(percent.min(100)) * chars.len() / 100;
    let hidden = chars.len() - visible;
    let mut masked = "*".repeat(hidden);
    masked.extend(&chars[hidden..]);
    masked
}

/// `['a', 'b']`-style rendering of decrypted keys for summaries
pub(crate) fn key_list(keys: &[Plaintext]) -> String {
    let rendered: Vec<String> = keys
        .iter()
        .map(|key| match key {
            Plaintext::Text(text) => format!("'{text}'"),
            Plaintext::Bytes(bytes) => bytes_literal(bytes),
        })
        .collect();
    format!("[{}]", rendered.join(", "))
}
