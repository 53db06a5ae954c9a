use super::PageProvider;
use crate::charset::Charset;
use crate::codec::{decode_name, encode_name};
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::model::{Page, Version};
use crate::root::ensure_root;
use crate::sidecar::{SidecarLimits, SidecarRecord, SIDECAR_EXT};
use chrono::{DateTime, Utc};
use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Page store backed by a flat directory of content and sidecar files.
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    root: PathBuf,
    charset: Charset,
    file_ext: String,
    limits: SidecarLimits,
}

impl FileSystemStore {
    /// Validate `config` and prepare the page directory.
    ///
    /// Fails with [`StoreError::Configuration`] if the directory setting is
    /// missing, names a non-directory, or the charset or extension is invalid.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let charset = config.charset()?;
        let file_ext = config.file_ext()?;
        let root = ensure_root(config.page_dir()?)?;

        debug!(dir = %root.display(), %charset, ext = %file_ext, "Opened page store");
        Ok(Self {
            root,
            charset,
            file_ext,
            limits: config.limits(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn file_ext(&self) -> &str {
        &self.file_ext
    }

    pub fn content_path(&self, name: &str) -> Result<PathBuf> {
        Ok(self.paths(name)?.0)
    }

    pub fn sidecar_path(&self, name: &str) -> Result<PathBuf> {
        Ok(self.paths(name)?.1)
    }

    /// The empty name is rejected: its files would be the hidden `.txt` and `.properties`.
    fn stem(&self, name: &str) -> Result<String> {
        if name.is_empty() {
            return Err(StoreError::Format("Page name cannot be empty".to_string()));
        }
        encode_name(name, self.charset)
    }

    fn paths(&self, name: &str) -> Result<(PathBuf, PathBuf)> {
        let stem = self.stem(name)?;
        Ok((
            self.root.join(format!("{}{}", stem, self.file_ext)),
            self.root.join(format!("{}{}", stem, SIDECAR_EXT)),
        ))
    }

    /// Build a page from an existing content file, without reading the body.
    ///
    /// Returns `None` if the content file disappeared in the meantime.
    fn describe(
        &self,
        name: String,
        content_path: &Path,
        sidecar_path: &Path,
    ) -> Result<Option<Page>> {
        let meta = match fs::metadata(content_path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };
        let record = SidecarRecord::load(sidecar_path)?;
        Ok(Some(Page {
            name,
            content: String::new(),
            author: record.author,
            attributes: record.attributes,
            version: Version::Latest,
            last_modified: meta.modified().ok().map(DateTime::<Utc>::from),
            size: Some(meta.len()),
        }))
    }
}

impl PageProvider for FileSystemStore {
    fn put(&self, page: &Page) -> Result<()> {
        // Everything that can be rejected is checked before touching disk
        let (content_path, sidecar_path) = self.paths(&page.name)?;
        let bytes = self.charset.encode(&page.content)?;
        let record = SidecarRecord::from_page(page);
        if !record.is_empty() {
            self.limits.check(&record)?;
        }

        fs::write(&content_path, bytes)?;
        debug!(page = %page.name, file = %content_path.display(), "Wrote page content");

        if !record.is_empty() {
            record.save(&sidecar_path)?;
            debug!(page = %page.name, file = %sidecar_path.display(), "Wrote page properties");
        }
        Ok(())
    }

    fn get(&self, name: &str, version: Version) -> Result<Page> {
        let (content_path, sidecar_path) = self.paths(name)?;

        let mut file = match File::open(&content_path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::PageNotFound(name.to_string()))
            }
            Err(e) => return Err(StoreError::Io(e)),
        };
        let meta = file.metadata()?;
        let mut bytes = Vec::with_capacity(meta.len() as usize);
        file.read_to_end(&mut bytes)?;
        drop(file);

        let content = self.charset.decode(&bytes)?;
        let record = SidecarRecord::load(&sidecar_path)?;
        debug!(page = name, %version, file = %content_path.display(), "Read page");

        Ok(Page {
            name: name.to_string(),
            content,
            author: record.author,
            attributes: record.attributes,
            version: Version::Latest,
            last_modified: meta.modified().ok().map(DateTime::<Utc>::from),
            size: Some(bytes.len() as u64),
        })
    }

    fn delete(&self, name: &str) -> Result<()> {
        let (content_path, sidecar_path) = self.paths(name)?;
        let removed_content = remove_if_exists(&content_path)?;
        let removed_sidecar = remove_if_exists(&sidecar_path)?;
        if removed_content || removed_sidecar {
            debug!(page = name, "Deleted page");
        }
        Ok(())
    }

    fn exists(&self, name: &str) -> Result<bool> {
        let path = self.content_path(name)?;
        Ok(path.try_exists()?)
    }

    fn list(&self) -> Result<Vec<Page>> {
        let mut pages = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                warn!(file = ?entry.file_name(), "Skipping file with non UTF-8 name");
                continue;
            };
            let Some(stem) = file_name.strip_suffix(self.file_ext.as_str()) else {
                continue;
            };
            let name = match decode_name(stem, self.charset) {
                Ok(name) => name,
                Err(e) => {
                    warn!(file = file_name, error = %e, "Skipping file with undecodable name");
                    continue;
                }
            };
            // Only the canonical spelling is a page; `%41.txt` or `my page.txt` are not
            if name.is_empty() || encode_name(&name, self.charset)? != stem {
                warn!(file = file_name, "Skipping file with non-canonical name");
                continue;
            }

            let sidecar_path = self.root.join(format!("{}{}", stem, SIDECAR_EXT));
            if let Some(page) = self.describe(name, &entry.path(), &sidecar_path)? {
                pages.push(page);
            }
        }

        pages.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(pages)
    }

    fn rename(&self, from: &str, to: &str) -> Result<()> {
        let (from_content, from_sidecar) = self.paths(from)?;
        let (to_content, to_sidecar) = self.paths(to)?;

        if !from_content.try_exists()? {
            return Err(StoreError::PageNotFound(from.to_string()));
        }
        if from_content == to_content {
            return Ok(());
        }
        if to_content.try_exists()? {
            return Err(StoreError::PageExists(to.to_string()));
        }

        fs::rename(&from_content, &to_content)?;
        if from_sidecar.try_exists()? {
            fs::rename(&from_sidecar, &to_sidecar)?;
        } else {
            // A leftover sidecar must not attach itself to the moved page
            remove_if_exists(&to_sidecar)?;
        }

        debug!(from, to, "Renamed page");
        Ok(())
    }
}

/// Returns whether a file was removed.
fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StoreError::Io(e)),
    }
}
