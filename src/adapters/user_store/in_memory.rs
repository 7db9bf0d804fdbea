//! In-memory user store for tests and throwaway deployments.

use std::sync::Mutex;

use crate::domain::foundation::Timestamp;
use crate::domain::user::UserRecord;
use crate::ports::{InsertOutcome, StoreError, UserRepository};

#[derive(Default)]
pub struct InMemoryUserStore {
    records: Mutex<Vec<UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> Result<std::sync::MutexGuard<'_, Vec<UserRecord>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Io("user store lock poisoned".to_string()))
    }
}

impl UserRepository for InMemoryUserStore {
    fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .records()?
            .iter()
            .find(|r| r.username == username)
            .cloned())
    }

    fn insert_unique(&self, record: UserRecord) -> Result<InsertOutcome, StoreError> {
        let mut records = self.records()?;
        if records.iter().any(|r| r.username == record.username) {
            return Ok(InsertOutcome::UsernameTaken);
        }
        if records.iter().any(|r| r.has_email(&record.email)) {
            return Ok(InsertOutcome::EmailTaken);
        }
        records.push(record);
        Ok(InsertOutcome::Inserted)
    }

    fn record_login(&self, username: &str, at: Timestamp) -> Result<(), StoreError> {
        let mut records = self.records()?;
        match records.iter_mut().find(|r| r.username == username) {
            Some(record) => {
                record.record_login(at);
                Ok(())
            }
            None => Err(StoreError::Corrupt(format!("user '{}' vanished", username))),
        }
    }
}
