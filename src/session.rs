//! Persisted login sessions
//!
//! Admin and student logins are stored as two independent JSON files in the
//! data directory. A missing or unreadable file simply means "not logged in".

use crate::config::project_dirs;
use crate::state::{AdminIdentity, StudentIdentity};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const ADMIN_FILE: &str = "admin_session.json";
const STUDENT_FILE: &str = "student_session.json";

/// Who is logged in during this run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub admin: Option<AdminIdentity>,
    pub student: Option<StudentIdentity>,
}

/// Reads and writes session files under one directory
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: Option<PathBuf>,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Store in the platform data directory; sessions are kept in memory only when there is none
    pub fn in_data_dir() -> Self {
        project_dirs()
            .map(|dirs| Self::new(dirs.data_dir()))
            .unwrap_or_else(Self::ephemeral)
    }

    /// Store that never touches disk
    pub fn ephemeral() -> Self {
        Self { dir: None }
    }

    fn path(&self, file: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|dir| dir.join(file))
    }

    /// Restore both sessions
    pub fn load(&self) -> Session {
        Session {
            admin: self.read(ADMIN_FILE),
            student: self.read(STUDENT_FILE),
        }
    }

    pub fn save_admin(&self, admin: &AdminIdentity) -> Result<()> {
        self.write(ADMIN_FILE, admin)
    }

    pub fn save_student(&self, student: &StudentIdentity) -> Result<()> {
        self.write(STUDENT_FILE, student)
    }

    pub fn clear_admin(&self) -> Result<()> {
        self.remove(ADMIN_FILE)
    }

    pub fn clear_student(&self) -> Result<()> {
        self.remove(STUDENT_FILE)
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.path(file)?;
        let content = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring malformed session {}: {}", path.display(), e);
                None
            }
        }
    }

    fn write<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        let Some(path) = self.path(file) else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(value)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Saved session {}", path.display());
        Ok(())
    }

    fn remove(&self, file: &str) -> Result<()> {
        let Some(path) = self.path(file) else {
            return Ok(());
        };
        remove_if_exists(&path)
    }
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}
