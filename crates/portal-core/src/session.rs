//! The persisted login session.
//!
//! A typed wrapper over one key of a persistent string store. The store
//! is the only writer of the session record; guards and views read it
//! through [`SessionStore::get`] and never mutate it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use portal_types::Session;

/// Storage key holding the serialized session record.
const SESSION_KEY: &str = "session";

/// Durable string storage, keyed like browser local storage.
///
/// Implementations must be infallible from the caller's point of view:
/// a backend that cannot read or write simply behaves as empty.
pub trait SessionStorage {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage (tests, demos).
#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// File-backed storage: one file per key in a directory.
///
/// I/O failures are logged and swallowed; a broken disk reads as an
/// empty store, matching the session's "absence is fine" contract.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionStorage for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            log::warn!("storage dir create failed: {e}");
            return;
        }
        if let Err(e) = fs::write(self.key_path(key), value) {
            log::warn!("storage write failed for {key}: {e}");
        }
    }

    fn remove(&self, key: &str) {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => {},
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {},
            Err(e) => log::warn!("storage remove failed for {key}: {e}"),
        }
    }
}

/// Typed access to the optional `{role, user}` session record.
pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
}

impl SessionStore {
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// The current session, or `None`.
    ///
    /// A missing key, unparseable JSON, or an unknown role all read as
    /// "no session" -- never an error.
    pub fn get(&self) -> Option<Session> {
        let raw = self.storage.read(SESSION_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                log::warn!("discarding unparseable session record: {e}");
                None
            },
        }
    }

    /// Persist a session. Written only by the login flow.
    pub fn set(&self, session: &Session) {
        match serde_json::to_string(session) {
            Ok(raw) => self.storage.write(SESSION_KEY, &raw),
            Err(e) => log::warn!("session serialize failed: {e}"),
        }
    }

    /// Clear the session. Called only by the logout flow.
    pub fn clear(&self) {
        self.storage.remove(SESSION_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_types::{Role, UserProfile};

    fn sample_session() -> Session {
        Session {
            role: Role::Admin,
            user: UserProfile {
                full_name: "Ali Rezaei".into(),
                national_id: "1111111111".into(),
                class_name: None,
                grade_level: None,
                profile_image: None,
            },
        }
    }

    #[test]
    fn absent_session_reads_none() {
        let store = SessionStore::new(Box::new(MemoryStorage::new()));
        assert!(store.get().is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let store = SessionStore::new(Box::new(MemoryStorage::new()));
        let session = sample_session();
        store.set(&session);
        assert_eq!(store.get(), Some(session));
    }

    #[test]
    fn clear_removes_session() {
        let store = SessionStore::new(Box::new(MemoryStorage::new()));
        store.set(&sample_session());
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn garbage_record_reads_none() {
        let storage = MemoryStorage::new();
        storage.write(SESSION_KEY, "{not json");
        let store = SessionStore::new(Box::new(storage));
        assert!(store.get().is_none());
    }

    #[test]
    fn unknown_role_reads_none() {
        let storage = MemoryStorage::new();
        storage.write(
            SESSION_KEY,
            r#"{"role":"teacher","user":{"full_name":"X","national_id":"1"}}"#,
        );
        let store = SessionStore::new(Box::new(storage));
        assert!(store.get().is_none());
    }

    #[test]
    fn file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(Box::new(FileStorage::new(dir.path())));
        let session = sample_session();
        store.set(&session);
        assert_eq!(store.get(), Some(session));
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = SessionStore::new(Box::new(FileStorage::new(dir.path())));
            store.set(&sample_session());
        }
        let reopened = SessionStore::new(Box::new(FileStorage::new(dir.path())));
        assert_eq!(reopened.get(), Some(sample_session()));
    }

    #[test]
    fn file_storage_remove_of_missing_key_is_quiet() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.remove("session");
    }
}
