use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{de::DeserializeOwned, Serialize};

use crate::config::{blog_key, user_key, BLOGS_LIST_KEY, USERS_LIST_KEY};

/// Raw key/value backend holding JSON documents.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> anyhow::Result<()>;
    fn delete(&self, key: &str) -> anyhow::Result<()>;
}

/// In-process store used by the native server and the tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> anyhow::Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> anyhow::Result<()> {
        self.entries()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
impl KvStore for spin_sdk::key_value::Store {
    fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        spin_sdk::key_value::Store::get(self, key)
            .map_err(|e| anyhow::anyhow!("kv get {}: {:?}", key, e))
    }

    fn set(&self, key: &str, value: &[u8]) -> anyhow::Result<()> {
        spin_sdk::key_value::Store::set(self, key, value)
            .map_err(|e| anyhow::anyhow!("kv set {}: {:?}", key, e))
    }

    fn delete(&self, key: &str) -> anyhow::Result<()> {
        spin_sdk::key_value::Store::delete(self, key)
            .map_err(|e| anyhow::anyhow!("kv delete {}: {:?}", key, e))
    }
}

/// JSON document access on top of a [`KvStore`].
#[derive(Clone)]
pub struct Db {
    store: Arc<dyn KvStore>,
}

impl Db {
    pub fn new(store: impl KvStore + 'static) -> Self {
        Self { store: Arc::new(store) }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        match self.store.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        self.store.set(key, &serde_json::to_vec(value)?)
    }

    pub fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.store.delete(key)
    }

    /// Ordered id list stored under `key`; missing lists read as empty.
    pub fn get_list(&self, key: &str) -> anyhow::Result<Vec<String>> {
        Ok(self.get_json(key)?.unwrap_or_default())
    }
}

pub fn reset_db_data(db: &Db) -> anyhow::Result<()> {
    let users = db.get_list(USERS_LIST_KEY)?;
    for id in &users {
        db.delete(&user_key(id))?;
    }

    let blogs = db.get_list(BLOGS_LIST_KEY)?;
    for id in &blogs {
        db.delete(&blog_key(id))?;
    }

    db.delete(USERS_LIST_KEY)?;
    db.delete(BLOGS_LIST_KEY)?;

    log::info!("reset store: removed {} users and {} blogs", users.len(), blogs.len());
    Ok(())
}
