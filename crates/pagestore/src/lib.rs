//! # pagestore
//!
//! A file-system content store for wiki pages. Each page is a plain text file
//! in one flat directory, with an optional `.properties` sidecar holding its
//! author and custom attributes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  store::PageProvider  (put / get / delete / exists / list)  │
//! │  store::fs::FileSystemStore                                 │
//! └─────────────────────────────────────────────────────────────┘
//!        │                    │                     │
//!        ▼                    ▼                     ▼
//! ┌──────────────┐   ┌─────────────────┐   ┌──────────────────┐
//! │ codec        │   │ sidecar         │   │ root             │
//! │ name ⇄ file  │   │ author/@attrs ⇄ │   │ page directory   │
//! │ stem         │   │ key=value text  │   │ validation       │
//! └──────────────┘   └─────────────────┘   └──────────────────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │ charset      │
//! │ Latin-1/UTF-8│
//! └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use pagestore::{FileSystemStore, Page, PageProvider, StoreConfig, Version};
//!
//! # fn main() -> pagestore::Result<()> {
//! let store = FileSystemStore::open(&StoreConfig::new("/srv/wiki/pages"))?;
//!
//! let page = Page::new("Test/Foobar")
//!     .with_content("Hello")
//!     .with_author("Alice")
//!     .with_attribute("@summary", "kept on disk")
//!     .with_attribute("rendered", "dropped on put");
//! store.put(&page)?; // writes Test%2FFoobar.txt and Test%2FFoobar.properties
//!
//! let back = store.get("Test/Foobar", Version::Latest)?;
//! assert_eq!(back.attribute("rendered"), None);
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`debug` for page operations, `info` when
//! the page directory is created, `warn` for skipped sidecar lines and
//! undecodable filenames). It never installs a subscriber.

pub mod charset;
pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod root;
pub mod sidecar;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;

pub use charset::Charset;
pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use model::{Page, Version, ATTRIBUTE_MARKER};
pub use store::fs::FileSystemStore;
pub use store::memory::MemoryStore;
pub use store::PageProvider;
