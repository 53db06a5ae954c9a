//! # Domain Model
//!
//! A [`Page`] is a named text document with an optional author and a bag of
//! string attributes. Pages are plain values: callers build one and hand it to
//! [`PageProvider::put`](crate::store::PageProvider::put); the store builds a
//! fresh one on every read.
//!
//! ## Attribute Persistence
//!
//! Only attributes whose key starts with [`ATTRIBUTE_MARKER`] (`@`) are
//! written to disk. Everything else is a session-local annotation and does
//! not survive a round trip:
//!
//! ```text
//! {"@a": "x", "@b": "y", "c": "z"}  --put/get-->  {"@a": "x", "@b": "y"}
//! ```
//!
//! ## Versions
//!
//! The file-system store keeps a single revision per page. [`Version::Latest`]
//! is the sentinel for "whatever is current"; pages returned by the store
//! always carry it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Prefix marking an attribute key as persistable.
pub const ATTRIBUTE_MARKER: char = '@';

pub fn is_persistable_key(key: &str) -> bool {
    key.starts_with(ATTRIBUTE_MARKER)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Version {
    #[default]
    Latest,
    Exact(u32),
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Latest => f.write_str("latest"),
            Version::Exact(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Page {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    pub author: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub version: Version,
    /// Modification time of the content file. Filled in by the store.
    pub last_modified: Option<DateTime<Utc>>,
    /// Size of the content file in bytes. Filled in by the store.
    pub size: Option<u64>,
}

impl Page {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Attributes that survive persistence, in key order.
    pub fn persistable_attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .filter(|(k, _)| is_persistable_key(k))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
