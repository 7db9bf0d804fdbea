//! CSV file user store.
//!
//! Layout: `username,email,password_hash,created_at,last_login` with RFC 3339
//! timestamps and an empty `last_login` for users who never logged in.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::domain::foundation::Timestamp;
use crate::domain::user::UserRecord;
use crate::ports::{InsertOutcome, StoreError, UserRepository};

#[derive(Debug, Serialize, Deserialize)]
struct UserRow {
    username: String,
    email: String,
    password_hash: String,
    created_at: String,
    last_login: Option<String>,
}

impl UserRow {
    fn from_record(record: &UserRecord) -> Self {
        Self {
            username: record.username.clone(),
            email: record.email.clone(),
            password_hash: record.password_hash.clone(),
            created_at: record.created_at.to_rfc3339(),
            last_login: record.last_login.map(|t| t.to_rfc3339()),
        }
    }

    fn into_record(self) -> Result<UserRecord, StoreError> {
        let parse = |value: &str| {
            Timestamp::parse_rfc3339(value)
                .map_err(|e| StoreError::Corrupt(format!("user '{}': {}", self.username, e)))
        };
        let created_at = parse(&self.created_at)?;
        let last_login = match self.last_login.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(parse(value)?),
        };
        Ok(UserRecord {
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            created_at,
            last_login,
        })
    }
}

/// User store backed by one CSV file.
///
/// Every read-modify-write runs under an in-process mutex and rewrites go
/// through a temporary file renamed into place. Other processes writing the
/// same file are not coordinated with.
pub struct CsvUserStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvUserStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.lock
            .lock()
            .map_err(|_| StoreError::Io("user store lock poisoned".to_string()))
    }

    fn load(&self) -> Result<Vec<UserRecord>, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::Missing(self.path.display().to_string()));
        }
        let mut reader = csv::Reader::from_path(&self.path)
            .map_err(|e| StoreError::Io(format!("Failed to open user file: {}", e)))?;
        reader
            .deserialize::<UserRow>()
            .map(|row| {
                row.map_err(|e| StoreError::Corrupt(e.to_string()))
                    .and_then(UserRow::into_record)
            })
            .collect()
    }

    fn load_or_empty(&self) -> Result<Vec<UserRecord>, StoreError> {
        match self.load() {
            Err(StoreError::Missing(_)) => Ok(Vec::new()),
            other => other,
        }
    }

    fn save(&self, records: &[UserRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Io(format!("Failed to create directory: {}", e))
                })?;
            }
        }

        let mut writer = csv::Writer::from_writer(Vec::new());
        if records.is_empty() {
            writer
                .write_record(["username", "email", "password_hash", "created_at", "last_login"])
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }
        for record in records {
            writer
                .serialize(UserRow::from_record(record))
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| StoreError::Io(e.to_string()))?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, bytes)
            .map_err(|e| StoreError::Io(format!("Failed to write temporary file: {}", e)))?;
        fs::rename(&temp_path, &self.path)
            .map_err(|e| StoreError::Io(format!("Failed to rename file: {}", e)))?;
        Ok(())
    }
}

impl UserRepository for CsvUserStore {
    fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let _guard = self.guard()?;
        Ok(self
            .load()?
            .into_iter()
            .find(|record| record.username == username))
    }

    fn insert_unique(&self, record: UserRecord) -> Result<InsertOutcome, StoreError> {
        let _guard = self.guard()?;
        let mut records = self.load_or_empty()?;
        if records.iter().any(|r| r.username == record.username) {
            return Ok(InsertOutcome::UsernameTaken);
        }
        if records.iter().any(|r| r.has_email(&record.email)) {
            return Ok(InsertOutcome::EmailTaken);
        }
        records.push(record);
        self.save(&records)?;
        Ok(InsertOutcome::Inserted)
    }

    fn record_login(&self, username: &str, at: Timestamp) -> Result<(), StoreError> {
        let _guard = self.guard()?;
        let mut records = self.load()?;
        let record = records
            .iter_mut()
            .find(|r| r.username == username)
            .ok_or_else(|| StoreError::Corrupt(format!("user '{}' vanished", username)))?;
        record.record_login(at);
        self.save(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> CsvUserStore {
        CsvUserStore::new(dir.path().join("data").join("users.csv"))
    }

    #[test]
    fn missing_file_is_reported_on_lookup() {
        let dir = TempDir::new().unwrap();
        let result = store(&dir).find_by_username("ana01");
        assert!(matches!(result, Err(StoreError::Missing(_))));
    }

    #[test]
    fn insert_creates_file_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let outcome = store
            .insert_unique(UserRecord::new("ana01", "ana@example.com", "$2b$hash"))
            .unwrap();
        assert_eq!(outcome, InsertOutcome::Inserted);
        assert!(store.path().exists());

        let found = store.find_by_username("ana01").unwrap().unwrap();
        assert_eq!(found.email, "ana@example.com");
        assert!(found.last_login.is_none());
    }

    #[test]
    fn duplicate_username_and_email_are_refused() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store
            .insert_unique(UserRecord::new("ana01", "ana@example.com", "h"))
            .unwrap();

        assert_eq!(
            store
                .insert_unique(UserRecord::new("ana01", "other@example.com", "h"))
                .unwrap(),
            InsertOutcome::UsernameTaken
        );
        assert_eq!(
            store
                .insert_unique(UserRecord::new("bob01", "ANA@example.com", "h"))
                .unwrap(),
            InsertOutcome::EmailTaken
        );
    }

    #[test]
    fn record_login_persists_timestamp() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store
            .insert_unique(UserRecord::new("ana01", "ana@example.com", "h"))
            .unwrap();

        let at = Timestamp::parse_rfc3339("2024-03-01T08:30:00Z").unwrap();
        store.record_login("ana01", at).unwrap();

        let found = store.find_by_username("ana01").unwrap().unwrap();
        assert_eq!(found.last_login, Some(at));
    }

    #[test]
    fn corrupt_timestamp_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            "username,email,password_hash,created_at,last_login\nana01,a@b.io,h,yesterday,\n",
        )
        .unwrap();

        assert!(matches!(
            store.find_by_username("ana01"),
            Err(StoreError::Corrupt(_))
        ));
    }
}
