//! Filesystem storage for the current session.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use slate_core::Result;
use slate_core::error::StoreError;
use slate_core::{Session, SessionStore};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

fn map_io(path: &Path, err: io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

/// The three persisted slots.
///
/// Every slot is optional on disk so that a file missing one of them is
/// read as "no session" instead of failing to parse.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

impl From<&Session> for StoredSession {
    fn from(session: &Session) -> Self {
        Self {
            access_token: Some(session.access_token().as_str().to_string()),
            refresh_token: Some(session.refresh_token().as_str().to_string()),
            role: Some(session.role().as_str().to_string()),
        }
    }
}

/// A [`SessionStore`] backed by a JSON file.
///
/// Writes go to a temporary file that is renamed over the session file, so
/// the three slots always change together. Readers and writers coordinate
/// through an advisory lock on a sibling `.lock` file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store persisting to the given file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a store at the per-user default location
    /// (`<data dir>/slate/session.json`).
    pub fn default_location() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "slate").ok_or_else(|| StoreError::Location {
            message: "could not determine data directory".to_string(),
        })?;

        Ok(Self::new(dirs.data_dir().join("session.json")))
    }

    /// Returns the session file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.sibling(".lock")
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling(".tmp")
    }

    /// `session.json` -> `session.json<suffix>`, never the session file itself.
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| map_io(parent, e))?;
        }
        Ok(())
    }

    fn open_lock(&self) -> Result<File> {
        let lock_path = self.lock_path();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| map_io(&lock_path, e))?;
        Ok(file)
    }

    fn write_locked(&self, stored: &StoredSession) -> Result<()> {
        let content = serde_json::to_string_pretty(stored).map_err(|e| StoreError::Encode {
            message: e.to_string(),
        })?;

        let temp_path = self.temp_path();
        let mut file = File::create(&temp_path).map_err(|e| map_io(&temp_path, e))?;

        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&temp_path, perms).map_err(|e| map_io(&temp_path, e))?;
        }

        file.write_all(content.as_bytes())
            .map_err(|e| map_io(&temp_path, e))?;
        file.sync_data().map_err(|e| map_io(&temp_path, e))?;

        fs::rename(&temp_path, &self.path).map_err(|e| map_io(&self.path, e))?;
        Ok(())
    }

    fn read_locked(&self) -> io::Result<Option<StoredSession>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl SessionStore for FileSessionStore {
    #[instrument(skip(self, session), fields(path = %self.path.display(), role = %session.role()))]
    fn set(&self, session: &Session) -> Result<()> {
        self.ensure_parent()?;

        let lock = self.open_lock()?;
        lock.lock_exclusive()
            .map_err(|e| map_io(&self.lock_path(), e))?;

        let result = self.write_locked(&StoredSession::from(session));

        let _ = lock.unlock();
        result?;

        debug!("Stored session");
        Ok(())
    }

    fn get(&self) -> Option<Session> {
        if !self.path.exists() {
            return None;
        }

        let lock = match self.open_lock() {
            Ok(lock) => lock,
            Err(e) => {
                warn!(error = %e, "Could not open session lock; treating as no session");
                return None;
            }
        };

        if let Err(e) = lock.lock_shared() {
            warn!(error = %e, "Could not lock session file; treating as no session");
            return None;
        }

        let stored = self.read_locked();
        let _ = lock.unlock();

        match stored {
            Ok(Some(stored)) => {
                Session::from_slots(stored.access_token, stored.refresh_token, stored.role)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Unreadable session file; treating as no session");
                None
            }
        }
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn clear(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        let lock = self.open_lock()?;
        lock.lock_exclusive()
            .map_err(|e| map_io(&self.lock_path(), e))?;

        let result = match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io(&self.path, e)),
        };

        let _ = lock.unlock();
        result?;

        debug!("Cleared session");
        Ok(())
    }
}
