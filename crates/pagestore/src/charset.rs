//! # Character Sets
//!
//! The store converts page names and page bodies to bytes with one configured
//! charset. Two are supported:
//!
//! | Charset | Labels | Repertoire |
//! |---------|--------|------------|
//! | [`Charset::Latin1`] | `ISO-8859-1`, `latin1`, `l1` | U+0000..=U+00FF, one byte per char |
//! | [`Charset::Utf8`] | `UTF-8`, `utf8` | all of Unicode, 1-4 bytes per char |
//!
//! Latin-1 is the default. Encoding a character outside its repertoire is an
//! error, never a silent substitution: a `?` in a filename would make two
//! different page names collide.

use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Charset {
    #[default]
    Latin1,
    Utf8,
}

impl Charset {
    /// Resolve a charset label, ignoring ASCII case.
    pub fn from_label(label: &str) -> Result<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "iso-8859-1" | "iso8859-1" | "iso_8859-1" | "latin1" | "latin-1" | "l1" => {
                Ok(Charset::Latin1)
            }
            "utf-8" | "utf8" => Ok(Charset::Utf8),
            other => Err(StoreError::Configuration(format!(
                "Unsupported encoding '{}'",
                other
            ))),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Charset::Latin1 => "ISO-8859-1",
            Charset::Utf8 => "UTF-8",
        }
    }

    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match self {
            Charset::Utf8 => Ok(text.as_bytes().to_vec()),
            Charset::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c)).map_err(|_| StoreError::Encoding {
                        charset: self.label().to_string(),
                        detail: format!("character {:?} (U+{:04X}) is not representable", c, c as u32),
                    })
                })
                .collect(),
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        match self {
            Charset::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Charset::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| StoreError::Encoding {
                charset: self.label().to_string(),
                detail: e.to_string(),
            }),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Charset {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        Charset::from_label(s)
    }
}
