//! In-memory doubles for the store and cache ports, with call counters and
//! failure switches.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::cache::CacheBackend;
use crate::error::{CacheError, StorageError};
use crate::models::Record;
use crate::store::RecordStore;

#[derive(Default)]
pub struct FakeStore {
    records: Mutex<HashMap<String, Record>>,
    next_id: AtomicI64,
    find_calls: AtomicUsize,
    failing: AtomicBool,
    delay: Option<Duration>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Inserts directly, bypassing the service and the counters.
    pub fn seed(&self, name: &str) -> Record {
        let record = Record::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1, name);
        self.records
            .lock()
            .unwrap()
            .insert(name.to_string(), record.clone());
        record
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    async fn enter(&self) -> Result<(), StorageError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("store is down".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn insert(&self, name: &str) -> Result<Record, StorageError> {
        self.enter().await?;

        let mut records = self.records.lock().unwrap();
        if records.contains_key(name) {
            return Err(StorageError::Duplicate(name.to_string()));
        }
        let record = Record::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1, name);
        records.insert(name.to_string(), record.clone());
        Ok(record)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Record>, StorageError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;

        Ok(self.records.lock().unwrap().get(name).cloned())
    }
}

#[derive(Default)]
pub struct FakeCache {
    entries: Mutex<HashMap<String, String>>,
    get_calls: AtomicUsize,
    set_calls: AtomicUsize,
    failing: AtomicBool,
    delay: Option<Duration>,
}

impl FakeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn put_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> Result<(), CacheError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("cache is down".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheBackend for FakeCache {
    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;
        self.put_raw(key, value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;
        Ok(self.peek(key))
    }
}
