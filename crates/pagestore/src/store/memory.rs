use super::PageProvider;
use crate::error::{Result, StoreError};
use crate::model::{Page, Version};
use crate::sidecar::{SidecarLimits, SidecarRecord};
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::collections::BTreeMap;

#[derive(Clone)]
struct StoredPage {
    content: String,
    record: SidecarRecord,
    mtime: DateTime<Utc>,
}

/// In-memory page store for testing code that sits on top of a [`PageProvider`].
///
/// Follows the same persistence rules as the file-system store (attribute
/// filtering, sidecar retention, idempotent delete) without touching disk.
/// Uses `RefCell` for interior mutability, so it is not `Sync`.
#[derive(Default)]
pub struct MemoryStore {
    pages: RefCell<BTreeMap<String, StoredPage>>,
    limits: SidecarLimits,
    simulate_write_error: RefCell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: SidecarLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Make every subsequent write fail with an I/O error.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    fn check_writable(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(StoreError::Io(std::io::Error::other(
                "Simulated write error",
            )));
        }
        Ok(())
    }

    fn check_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(StoreError::Format("Page name cannot be empty".to_string()));
        }
        Ok(())
    }

    fn to_page(name: &str, stored: &StoredPage, with_content: bool) -> Page {
        Page {
            name: name.to_string(),
            content: if with_content {
                stored.content.clone()
            } else {
                String::new()
            },
            author: stored.record.author.clone(),
            attributes: stored.record.attributes.clone(),
            version: Version::Latest,
            last_modified: Some(stored.mtime),
            size: Some(stored.content.len() as u64),
        }
    }
}

impl PageProvider for MemoryStore {
    fn put(&self, page: &Page) -> Result<()> {
        self.check_writable()?;
        Self::check_name(&page.name)?;
        let record = SidecarRecord::from_page(page);
        if !record.is_empty() {
            self.limits.check(&record)?;
        }

        let mut pages = self.pages.borrow_mut();
        let previous = pages.remove(&page.name).map(|p| p.record);
        let record = match previous {
            Some(old) if record.is_empty() => old,
            _ => record,
        };
        pages.insert(
            page.name.clone(),
            StoredPage {
                content: page.content.clone(),
                record,
                mtime: Utc::now(),
            },
        );
        Ok(())
    }

    fn get(&self, name: &str, _version: Version) -> Result<Page> {
        let pages = self.pages.borrow();
        pages
            .get(name)
            .map(|stored| Self::to_page(name, stored, true))
            .ok_or_else(|| StoreError::PageNotFound(name.to_string()))
    }

    fn delete(&self, name: &str) -> Result<()> {
        self.check_writable()?;
        self.pages.borrow_mut().remove(name);
        Ok(())
    }

    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.pages.borrow().contains_key(name))
    }

    fn list(&self) -> Result<Vec<Page>> {
        Ok(self
            .pages
            .borrow()
            .iter()
            .map(|(name, stored)| Self::to_page(name, stored, false))
            .collect())
    }

    fn rename(&self, from: &str, to: &str) -> Result<()> {
        self.check_writable()?;
        Self::check_name(to)?;
        let mut pages = self.pages.borrow_mut();
        if !pages.contains_key(from) {
            return Err(StoreError::PageNotFound(from.to_string()));
        }
        if from == to {
            return Ok(());
        }
        if pages.contains_key(to) {
            return Err(StoreError::PageExists(to.to_string()));
        }
        if let Some(stored) = pages.remove(from) {
            pages.insert(to.to_string(), stored);
        }
        Ok(())
    }
}
