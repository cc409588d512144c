//! Key-value configuration store backed by a TOML file.
//!
//! Values are addressed by `(section, key)`. Every write is flushed to disk
//! before [`ConfigStore::set`] returns, through a temp file and a rename so
//! a concurrent reader never sees a half-written document.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::error::{ResCliError, Result};

/// Handle on the on-disk configuration document.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    document: Table,
}

impl ConfigStore {
    /// Opens the store at `path`, creating an empty file if none exists.
    ///
    /// # Errors
    ///
    /// Returns `ResCliError::Io` if the file or its parent directory cannot
    /// be created or read, and `ResCliError::Config` if the file exists but
    /// is not a valid key-value document.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| ResCliError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
            fs::write(&path, "").map_err(|e| ResCliError::Io {
                path: path.clone(),
                source: e,
            })?;
            tracing::debug!(path = %path.display(), "initialized empty config file");
            return Ok(Self {
                path,
                document: Table::new(),
            });
        }

        tracing::debug!(path = %path.display(), "loading config file");
        let content = fs::read_to_string(&path).map_err(|e| ResCliError::Io {
            path: path.clone(),
            source: e,
        })?;
        let document = toml::from_str::<Table>(&content).map_err(|e| ResCliError::Config {
            message: format!("{} is not a valid config file: {e}", path.display()),
        })?;
        Ok(Self { path, document })
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Looks up the value stored under `[section] key`.
    ///
    /// # Errors
    ///
    /// Returns `ResCliError::Config` if `section` is not a table or the
    /// stored value is not a string.
    pub fn get(&self, section: &str, key: &str) -> Result<Option<String>> {
        let Some(entry) = self.document.get(section) else {
            return Ok(None);
        };
        let Value::Table(table) = entry else {
            return Err(malformed(&self.path, format!("[{section}] is not a section")));
        };
        match table.get(key) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(other) => Err(malformed(&self.path, format!(
                "{section}.{key} must be a string, found {}",
                other.type_str()
            ))),
        }
    }

    /// Stores `value` under `[section] key` and flushes the file.
    ///
    /// # Errors
    ///
    /// Returns `ResCliError::Config` if `section` exists but is not a
    /// table, and `ResCliError::Io` if the file cannot be written.
    pub fn set(&mut self, section: &str, key: &str, value: &str) -> Result<()> {
        let entry = self
            .document
            .entry(section.to_string())
            .or_insert(Value::Table(Table::new()));
        let Value::Table(table) = entry else {
            return Err(malformed(&self.path, format!("[{section}] is not a section")));
        };
        let _ = table.insert(key.to_string(), Value::String(value.to_string()));
        self.flush()
    }

    fn flush(&self) -> Result<()> {
        let content = toml::to_string(&self.document).map_err(|e| ResCliError::Config {
            message: format!("cannot encode config for {}: {e}", self.path.display()),
        })?;
        write_atomic(&self.path, &content)?;
        tracing::debug!(path = %self.path.display(), "config file written");
        Ok(())
    }
}

fn malformed(path: &Path, detail: String) -> ResCliError {
    ResCliError::Config {
        message: format!("{}: {detail}", path.display()),
    }
}

/// Writes `content` to a sibling temp file, syncs it, then renames it over
/// `path`. The temp file is removed if any step fails.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension(format!("tmp.{}", std::process::id()));
    let result = write_and_rename(&temp_path, path, content);
    if result.is_err() && temp_path.exists() {
        if let Err(e) = fs::remove_file(&temp_path) {
            tracing::warn!(path = %temp_path.display(), error = %e, "failed to remove temp file");
        }
    }
    result
}

fn write_and_rename(temp_path: &Path, path: &Path, content: &str) -> Result<()> {
    let io_err = |source: std::io::Error| ResCliError::Io {
        path: temp_path.to_path_buf(),
        source,
    };

    let mut file = fs::File::create(temp_path).map_err(io_err)?;
    file.write_all(content.as_bytes()).map_err(io_err)?;
    file.sync_all().map_err(io_err)?;
    drop(file);

    fs::rename(temp_path, path).map_err(|e| ResCliError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
