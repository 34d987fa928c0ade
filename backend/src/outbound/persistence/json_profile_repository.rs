//! Flat-file JSON adapter for the profile repository port.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::profile::ProfileName;

/// File name of the profile list inside the data directory.
pub const PROFILES_FILE: &str = "profiles.json";

/// Flat-file profile store: one JSON array of name strings.
#[derive(Debug)]
pub struct JsonProfileRepository {
    path: PathBuf,
    names: Mutex<Vec<ProfileName>>,
}

impl JsonProfileRepository {
    /// Open (or create) the profiles file under `data_dir`.
    pub fn open(data_dir: &Path) -> Result<Self, ProfileRepositoryError> {
        fs::create_dir_all(data_dir)
            .map_err(|err| ProfileRepositoryError::write(format!("create {data_dir:?}: {err}")))?;
        let path = data_dir.join(PROFILES_FILE);
        if !path.exists() {
            fs::write(&path, "[]")
                .map_err(|err| ProfileRepositoryError::write(format!("create {path:?}: {err}")))?;
            info!(path = %path.display(), "created profiles file");
        }

        let raw = fs::read_to_string(&path)
            .map_err(|err| ProfileRepositoryError::read(format!("read {path:?}: {err}")))?;
        let names: Vec<ProfileName> = if raw.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&raw)
                .map_err(|err| ProfileRepositoryError::read(format!("parse {path:?}: {err}")))?
        };

        Ok(Self {
            path,
            names: Mutex::new(names),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ProfileName>> {
        self.names.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, names: &[ProfileName]) -> Result<(), ProfileRepositoryError> {
        let body = serde_json::to_string_pretty(names)
            .map_err(|err| ProfileRepositoryError::write(format!("encode profiles: {err}")))?;
        fs::write(&self.path, body)
            .map_err(|err| ProfileRepositoryError::write(format!("write {:?}: {err}", self.path)))
    }
}

#[async_trait]
impl ProfileRepository for JsonProfileRepository {
    async fn list(&self) -> Result<Vec<ProfileName>, ProfileRepositoryError> {
        Ok(self.lock().clone())
    }

    async fn add(&self, name: ProfileName) -> Result<(), ProfileRepositoryError> {
        let mut names = self.lock();
        if names.contains(&name) {
            return Ok(());
        }
        names.push(name);
        if let Err(err) = self.persist(&names) {
            // Keep memory matching the disk: a name the file never took
            // must not be served from the cache.
            names.pop();
            return Err(err);
        }
        Ok(())
    }
}
