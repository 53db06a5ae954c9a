//! # Configuration
//!
//! A store is built from one explicit [`StoreConfig`], read once at
//! construction. Nothing is looked up again afterwards.
//!
//! Configuration can be loaded with [`confique`] from a TOML file and
//! `PAGESTORE_*` environment variables (environment wins), or built in code
//! with [`StoreConfig::new`].
//!
//! ## Available Settings
//!
//! | Key | Env | Default | Description |
//! |-----|-----|---------|-------------|
//! | `page_dir` | `PAGESTORE_PAGE_DIR` | (required) | Directory holding all page files |
//! | `encoding` | `PAGESTORE_ENCODING` | `ISO-8859-1` | Charset for filenames and content (`ISO-8859-1` or `UTF-8`) |
//! | `file_ext` | `PAGESTORE_FILE_EXT` | `.txt` | Extension of content files |
//! | `max_attributes` | `PAGESTORE_MAX_ATTRIBUTES` | `200` | Persistable attributes per page |
//! | `max_attribute_key_len` | `PAGESTORE_MAX_ATTRIBUTE_KEY_LEN` | `255` | Characters per attribute key |
//! | `max_attribute_value_len` | `PAGESTORE_MAX_ATTRIBUTE_VALUE_LEN` | `4096` | Characters per attribute value |

use crate::charset::Charset;
use crate::error::{Result, StoreError};
use crate::sidecar::{SidecarLimits, SIDECAR_EXT};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding content and sidecar files
    #[config(env = "PAGESTORE_PAGE_DIR")]
    pub page_dir: Option<PathBuf>,

    /// Charset used for filenames and page content
    #[config(env = "PAGESTORE_ENCODING", default = "ISO-8859-1")]
    pub encoding: String,

    /// Extension for content files (e.g. ".txt", ".wiki")
    #[config(env = "PAGESTORE_FILE_EXT", default = ".txt")]
    pub file_ext: String,

    #[config(env = "PAGESTORE_MAX_ATTRIBUTES", default = 200)]
    pub max_attributes: usize,

    #[config(env = "PAGESTORE_MAX_ATTRIBUTE_KEY_LEN", default = 255)]
    pub max_attribute_key_len: usize,

    #[config(env = "PAGESTORE_MAX_ATTRIBUTE_VALUE_LEN", default = 4096)]
    pub max_attribute_value_len: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let limits = SidecarLimits::default();
        Self {
            page_dir: None,
            encoding: Charset::default().label().to_string(),
            file_ext: ".txt".to_string(),
            max_attributes: limits.max_attributes,
            max_attribute_key_len: limits.max_key_len,
            max_attribute_value_len: limits.max_value_len,
        }
    }
}

impl StoreConfig {
    pub fn new(page_dir: impl Into<PathBuf>) -> Self {
        Self {
            page_dir: Some(page_dir.into()),
            ..Default::default()
        }
    }

    /// Load from the environment and, if given, a TOML file.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = StoreConfig::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| StoreError::Configuration(e.to_string()))
    }

    pub fn with_encoding(mut self, encoding: &str) -> Self {
        self.encoding = encoding.to_string();
        self
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        self.file_ext = ext.to_string();
        self
    }

    pub fn page_dir(&self) -> Result<&Path> {
        self.page_dir
            .as_deref()
            .ok_or_else(|| StoreError::Configuration("page_dir is not set".to_string()))
    }

    pub fn charset(&self) -> Result<Charset> {
        Charset::from_label(&self.encoding)
    }

    /// The content file extension, normalized to start with a dot.
    pub fn file_ext(&self) -> Result<String> {
        let ext = if self.file_ext.starts_with('.') {
            self.file_ext.clone()
        } else {
            format!(".{}", self.file_ext)
        };
        if ext.len() < 2 || ext.contains(['/', '\\']) {
            return Err(StoreError::Configuration(format!(
                "Invalid file extension '{}'",
                self.file_ext
            )));
        }
        // `.x.properties` would make page `N` share a file with the sidecar of `N.x`
        if ext.to_ascii_lowercase().ends_with(SIDECAR_EXT) {
            return Err(StoreError::Configuration(format!(
                "Content extension cannot end in '{}', it is reserved for sidecar files",
                SIDECAR_EXT
            )));
        }
        Ok(ext)
    }

    pub fn limits(&self) -> SidecarLimits {
        SidecarLimits {
            max_attributes: self.max_attributes,
            max_key_len: self.max_attribute_key_len,
            max_value_len: self.max_attribute_value_len,
        }
    }
}
