//! Session flag store.
//!
//! A single durable boolean meaning "a session was established at least
//! once". It gates navigation only — it never authorizes a request (the
//! credential cookie does that). Mutated by exactly three events: login
//! success (`set`), logout (`clear`), and a terminal auth failure (`clear`).

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Storage backend for the session flag.
///
/// `clear` reports whether the flag was previously set so a terminal auth
/// failure can run its redirect side effects exactly once even when many
/// requests hit the terminal branch concurrently.
pub trait SessionFlagStore: Send + Sync {
    /// Record that a session was established.
    fn set(&self);

    /// Clear the flag. Returns `true` if it was set before this call.
    fn clear(&self) -> bool;

    /// Whether a session is currently considered established.
    fn is_active(&self) -> bool;
}

/// In-memory flag store. No durability; useful for tests and short-lived
/// embedders.
#[derive(Debug, Default)]
pub struct MemoryFlagStore {
    active: AtomicBool,
}

impl MemoryFlagStore {
    /// Create a store with the flag cleared.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionFlagStore for MemoryFlagStore {
    fn set(&self) {
        self.active.store(true, Ordering::SeqCst);
    }

    fn clear(&self) -> bool {
        self.active.swap(false, Ordering::SeqCst)
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct FlagRecord {
    active: bool,
}

/// File-backed flag store: one named JSON entry in client-local storage,
/// read at startup and on every guard evaluation.
///
/// I/O failures are logged and degrade to "no session" — the guard then
/// redirects to login, which is the safe direction.
pub struct FileFlagStore {
    path: PathBuf,
    // File read/modify/write is not atomic on its own.
    io: Mutex<()>,
}

impl FileFlagStore {
    /// Create a store persisting to `path`. The file is created on the first
    /// `set`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), io: Mutex::new(()) }
    }

    fn read(&self) -> bool {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return false,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read session flag");
                return false;
            }
        };
        match serde_json::from_str::<FlagRecord>(&contents) {
            Ok(record) => record.active,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "corrupt session flag entry");
                false
            }
        }
    }

    fn write(&self, active: bool) {
        let record = FlagRecord { active };
        let contents = match serde_json::to_string(&record) {
            Ok(contents) => contents,
            Err(err) => {
                warn!(error = %err, "failed to encode session flag");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, contents) {
            warn!(path = %self.path.display(), error = %err, "failed to persist session flag");
        }
    }
}

impl SessionFlagStore for FileFlagStore {
    fn set(&self) {
        let _guard = self.io.lock();
        self.write(true);
    }

    fn clear(&self) -> bool {
        let _guard = self.io.lock();
        let was_active = self.read();
        if was_active {
            self.write(false);
        }
        was_active
    }

    fn is_active(&self) -> bool {
        let _guard = self.io.lock();
        self.read()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the flag stores.
    use super::*;

    #[test]
    fn memory_store_set_clear_roundtrip() {
        let store = MemoryFlagStore::new();
        assert!(!store.is_active());

        store.set();
        assert!(store.is_active());

        assert!(store.clear());
        assert!(!store.is_active());
        // Second clear reports no transition.
        assert!(!store.clear());
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session-flag.json");

        let store = FileFlagStore::new(&path);
        assert!(!store.is_active());
        store.set();
        assert!(store.is_active());

        // A fresh store over the same file sees the persisted value.
        let reopened = FileFlagStore::new(&path);
        assert!(reopened.is_active());
        assert!(reopened.clear());
        assert!(!reopened.is_active());
    }

    #[test]
    fn file_store_treats_missing_file_as_inactive() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileFlagStore::new(dir.path().join("never-written.json"));
        assert!(!store.is_active());
        assert!(!store.clear());
    }

    #[test]
    fn file_store_treats_corrupt_entry_as_inactive() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session-flag.json");
        std::fs::write(&path, "not json").expect("write");

        let store = FileFlagStore::new(&path);
        assert!(!store.is_active());
    }
}
