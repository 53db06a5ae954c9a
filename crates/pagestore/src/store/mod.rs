//! # Storage Layer
//!
//! The [`PageProvider`] trait is the surface a wiki engine talks to. The
//! production implementation is [`fs::FileSystemStore`]; [`memory::MemoryStore`]
//! keeps pages in memory for testing callers without touching disk.
//!
//! ## Storage Layout
//!
//! ```text
//! pages/
//! ├── Main.txt                  # Content of "Main"
//! ├── Main.properties           # Author + @attributes of "Main" (optional)
//! ├── Test%2FFoobar.txt         # Content of "Test/Foobar"
//! └── %C5%E4Test.txt            # Content of "ÅäTest" (ISO-8859-1)
//! ```
//!
//! - The directory is flat. Filenames come from [`crate::codec::encode_name`].
//! - **The content file is the page.** It exists iff the page exists.
//! - The sidecar is written only when there is an author or a persistable
//!   attribute. A `put` with nothing to persist leaves an older sidecar alone.
//! - `delete` removes both files. Deleting an absent page is a no-op.
//!
//! ## Page Lifecycle
//!
//! ```text
//!            put                 put
//! absent ─────────▶ present ◀─────────┐
//!   ▲                  │  └───────────┘
//!   └──────────────────┘
//!          delete
//! ```
//!
//! `rename` moves a present page to a new, absent name.
//!
//! ## Consistency
//!
//! Operations are synchronous and hold no locks. Content and sidecar are two
//! independent writes, with no rename swap and no fsync: a reader racing a
//! writer of the same page may see the new content with the old sidecar.
//! Callers that need ordering must serialize writes per page name.

use crate::error::Result;
use crate::model::{Page, Version};
use chrono::{DateTime, Utc};

pub mod fs;
pub mod memory;

pub trait PageProvider {
    /// Create or overwrite a page.
    fn put(&self, page: &Page) -> Result<()>;

    /// Read a page with its content, author and persisted attributes.
    ///
    /// Only the current revision is kept, so every `version` resolves to it.
    fn get(&self, name: &str, version: Version) -> Result<Page>;

    /// Remove a page. Absent pages are not an error.
    fn delete(&self, name: &str) -> Result<()>;

    fn exists(&self, name: &str) -> Result<bool>;

    /// All pages, without content, sorted by name.
    fn list(&self) -> Result<Vec<Page>>;

    fn count(&self) -> Result<usize> {
        Ok(self.list()?.len())
    }

    /// Pages whose content changed at or after `since`.
    fn changed_since(&self, since: DateTime<Utc>) -> Result<Vec<Page>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|p| p.last_modified.is_some_and(|m| m >= since))
            .collect())
    }

    /// Move a page and its metadata to a new name.
    fn rename(&self, from: &str, to: &str) -> Result<()>;
}
