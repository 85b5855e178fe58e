use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use tempfile::NamedTempFile;

use crate::errors::WikiError;
use crate::types::{Page, Title};

const PAGE_EXTENSION: &str = "txt";

/// File-backed page storage: one `<title>.txt` per page in a flat directory.
///
/// Every `load` reads from disk; nothing is cached.
#[derive(Debug, Clone)]
pub struct PageStore {
    data_dir: PathBuf,
}

impl PageStore {
    /// Create a page store over an existing directory
    pub fn new(data_dir: PathBuf) -> Self {
        debug!("Creating PageStore with data directory: {:?}", data_dir);
        Self { data_dir }
    }

    /// Create a page store, creating the data directory if needed
    pub fn open(data_dir: PathBuf) -> Result<Self, WikiError> {
        fs::create_dir_all(&data_dir).map_err(|e| {
            error!("Failed to create data directory {:?}: {}", data_dir, e);
            WikiError::Io(e)
        })?;
        Ok(Self::new(data_dir))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Storage location of `title`. Depends on nothing but the title.
    pub fn path_for(&self, title: &Title) -> PathBuf {
        self.data_dir.join(format!("{}.{}", title, PAGE_EXTENSION))
    }

    /// Read a page. Any read failure, missing file or otherwise, is reported
    /// as `NotFound`.
    pub fn load(&self, title: &Title) -> Result<Page, WikiError> {
        let path = self.path_for(title);
        match fs::read(&path) {
            Ok(body) => {
                debug!("Loaded page {} ({} bytes)", title, body.len());
                Ok(Page::new(title.clone(), body))
            }
            Err(e) => {
                debug!("Page {} unavailable at {:?}: {}", title, path, e);
                Err(WikiError::NotFound)
            }
        }
    }

    /// Replace the stored body of `page.title` with `page.body`.
    ///
    /// The body goes to an owner-only temp file in the data directory which is
    /// then renamed over the page file, so readers see either the old or the
    /// new content in full.
    pub fn save(&self, page: &Page) -> Result<(), WikiError> {
        let path = self.path_for(&page.title);
        let mut tmp = NamedTempFile::new_in(&self.data_dir).map_err(|e| {
            error!("Failed to create temp file in {:?}: {}", self.data_dir, e);
            WikiError::Io(e)
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file().set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        tmp.write_all(&page.body)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| {
            error!("Failed to persist page {} to {:?}: {}", page.title, path, e.error);
            WikiError::Io(e.error)
        })?;
        info!("Saved page {} ({} bytes)", page.title, page.body.len());
        Ok(())
    }
}
