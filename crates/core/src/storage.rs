//! Durable token storage
//!
//! The console keeps exactly two credential slots: the short-lived access
//! token and the longer-lived refresh token. Both are written together on
//! login/refresh success and cleared together on logout or unrecoverable
//! auth failure; the access slot alone is cleared when a refresh cannot even
//! be attempted.

use crate::error::CoreResult;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::warn;

/// File/key name of the access token slot
pub const ACCESS_TOKEN_KEY: &str = "sentinel-access-token";
/// File/key name of the refresh token slot
pub const REFRESH_TOKEN_KEY: &str = "sentinel-refresh-token";

/// Two-slot credential store shared by the gateway and the session store.
///
/// Reads are synchronous and re-taken on every request dispatch, so a token
/// rotated by one caller is visible to the next without extra coordination.
pub trait TokenStore: Send + Sync {
    fn access_token(&self) -> Option<String>;

    fn refresh_token(&self) -> Option<String>;

    /// Persist a freshly minted pair. Both slots are replaced together.
    fn store(&self, access_token: &str, refresh_token: &str);

    /// Drop only the access token, keeping the refresh token in place.
    fn clear_access(&self);

    /// Drop both slots.
    fn clear(&self);
}

#[derive(Debug, Default)]
struct Slots {
    access: Option<String>,
    refresh: Option<String>,
}

/// In-memory store for tests and single-process sessions
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slots: RwLock<Slots>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        self.slots.read().expect("token slots poisoned").access.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.slots.read().expect("token slots poisoned").refresh.clone()
    }

    fn store(&self, access_token: &str, refresh_token: &str) {
        let mut slots = self.slots.write().expect("token slots poisoned");
        slots.access = Some(access_token.to_owned());
        slots.refresh = Some(refresh_token.to_owned());
    }

    fn clear_access(&self) {
        self.slots.write().expect("token slots poisoned").access = None;
    }

    fn clear(&self) {
        let mut slots = self.slots.write().expect("token slots poisoned");
        slots.access = None;
        slots.refresh = None;
    }
}

/// File-backed store surviving process restarts.
///
/// Each slot is a plain-text file under the console data directory. IO
/// failures are reported through `tracing` and degrade to an absent slot
/// rather than surfacing to callers.
#[derive(Debug)]
pub struct FileTokenStore {
    access_path: PathBuf,
    refresh_path: PathBuf,
}

impl FileTokenStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> CoreResult<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            access_path: dir.join(ACCESS_TOKEN_KEY),
            refresh_path: dir.join(REFRESH_TOKEN_KEY),
        })
    }

    /// Default data directory: `SENTINEL_STATE_DIR` or the platform data dir.
    pub fn default_dir() -> PathBuf {
        if let Ok(state_dir) = std::env::var("SENTINEL_STATE_DIR") {
            PathBuf::from(state_dir)
        } else {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("sentinel")
        }
    }

    fn read_slot(path: &Path) -> Option<String> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let token = contents.trim_end_matches(['\r', '\n']).to_owned();
                (!token.is_empty()).then_some(token)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read token slot");
                None
            }
        }
    }

    fn write_slot(path: &Path, token: &str) {
        if let Err(err) = std::fs::write(path, token) {
            warn!(path = %path.display(), error = %err, "failed to write token slot");
        }
    }

    fn remove_slot(path: &Path) {
        match std::fs::remove_file(path) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to clear token slot");
            }
        }
    }
}

impl TokenStore for FileTokenStore {
    fn access_token(&self) -> Option<String> {
        Self::read_slot(&self.access_path)
    }

    fn refresh_token(&self) -> Option<String> {
        Self::read_slot(&self.refresh_path)
    }

    fn store(&self, access_token: &str, refresh_token: &str) {
        Self::write_slot(&self.access_path, access_token);
        Self::write_slot(&self.refresh_path, refresh_token);
    }

    fn clear_access(&self) {
        Self::remove_slot(&self.access_path);
    }

    fn clear(&self) {
        Self::remove_slot(&self.access_path);
        Self::remove_slot(&self.refresh_path);
    }
}
