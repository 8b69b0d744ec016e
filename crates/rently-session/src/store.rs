//! Durable storage for the bearer token.
//!
//! Exactly one opaque string lives in exactly one slot. The session
//! manager is the only writer: it saves after every successful sign-in and
//! clears on logout or failed verification.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::TokenStoreError;

/// File name of the token inside the `rently` config directory.
const TOKEN_FILE_NAME: &str = "auth_token";

/// A single persisted token slot.
///
/// The methods are synchronous: the slot is one small file (or one
/// in-memory string), read once at startup and written once per sign-in.
pub trait TokenStore: Send + Sync + 'static {
    /// Returns the stored token, or `None` if nothing is stored.
    fn load(&self) -> Result<Option<String>, TokenStoreError>;

    /// Replaces the stored token.
    fn save(&self, token: &str) -> Result<(), TokenStoreError>;

    /// Deletes the stored token. Clearing an empty slot is not an error.
    fn clear(&self) -> Result<(), TokenStoreError>;
}

// ---------------------------------------------------------------------------
// FileTokenStore
// ---------------------------------------------------------------------------

/// Keeps the token in a plain file, readable only by its owner on unix.
///
/// The token is stored verbatim. On load a single trailing newline is
/// dropped so a hand-edited file still works, and a blank file reads as
/// no token.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Uses the given file. Parent directories are created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `<config_dir>/rently/auth_token`.
    ///
    /// # Errors
    /// Returns [`TokenStoreError::NoConfigDir`] when the platform has no
    /// per-user configuration directory.
    pub fn default_location() -> Result<Self, TokenStoreError> {
        let dir = dirs::config_dir().ok_or(TokenStoreError::NoConfigDir)?;
        Ok(Self::new(dir.join("rently").join(TOKEN_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = strip_line_ending(&contents);
                Ok((!token.trim().is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(TokenStoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        let write_err = |source| TokenStoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        write_private(&self.path, token).map_err(write_err)?;
        tracing::debug!(path = %self.path.display(), "token saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "token removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(TokenStoreError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

fn strip_line_ending(contents: &str) -> &str {
    let contents = contents.strip_suffix('\n').unwrap_or(contents);
    contents.strip_suffix('\r').unwrap_or(contents)
}

/// Writes `token` to `path` with mode 0600 on unix. A file that already
/// exists with looser permissions is tightened too.
fn write_private(path: &Path, token: &str) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(token.as_bytes())
}

// ---------------------------------------------------------------------------
// MemoryTokenStore
// ---------------------------------------------------------------------------

/// Keeps the token in memory.
///
/// Clones share the same slot, so a test can hand one clone to the
/// manager and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `token`, as if saved by a previous run.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.into()))),
        }
    }

    /// The stored token, if any.
    pub fn get(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.get())
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
