use std::fs;
use std::path::Path;
use std::sync::RwLock;
use crate::api::models::{ Entity, StoreData };
use crate::api::StoreError;

/// Fetch-all / fetch-by-id over committed data.
pub trait Repository {
    fn find_all<E: Entity>(&self) -> Result<Vec<E>, StoreError>;
    fn find_by_id<E: Entity>(&self, id: u64) -> Result<Option<E>, StoreError>;
}

/// Staged writes. Nothing is visible to readers until the surrounding transaction commits.
pub trait PersistenceSession {
    fn find<E: Entity>(&self, id: u64) -> Option<&E>;
    fn insert<E: Entity>(&mut self, fields: E::Fields) -> E;
    fn update<E: Entity>(&mut self, entity: E) -> Result<E, StoreError>;
    fn remove<E: Entity>(&mut self, id: u64) -> Result<E, StoreError>;
}

pub struct Transaction {
    working: StoreData,
}

impl PersistenceSession for Transaction {
    fn find<E: Entity>(&self, id: u64) -> Option<&E> {
        E::table(&self.working).find(id)
    }

    fn insert<E: Entity>(&mut self, fields: E::Fields) -> E {
        E::table_mut(&mut self.working).insert(fields)
    }

    fn update<E: Entity>(&mut self, entity: E) -> Result<E, StoreError> {
        let id = entity.id();
        E::table_mut(&mut self.working)
            .replace(entity.clone())
            .map(|_| entity)
            .ok_or(StoreError::NotFound { entity: E::NAME, id })
    }

    fn remove<E: Entity>(&mut self, id: u64) -> Result<E, StoreError> {
        E::table_mut(&mut self.working)
            .remove(id)
            .ok_or(StoreError::NotFound { entity: E::NAME, id })
    }
}

pub struct StoreService {
    data: RwLock<StoreData>,
    store_file_path: Option<Box<Path>>,
}

impl StoreService {
    pub fn new(data: StoreData, store_file_path: Option<Box<Path>>) -> StoreService {
        StoreService { data: RwLock::new(data), store_file_path }
    }

    /// A store that never touches the disk.
    pub fn in_memory() -> StoreService {
        StoreService::new(StoreData::default(), None)
    }

    /// Runs `work` against a copy of the data and commits the copy only if `work` and the
    /// file write both succeed. Writers hold the lock throughout, so the last commit wins.
    pub fn with_transaction<T, F>(&self, work: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Transaction) -> Result<T, StoreError>,
    {
        let mut committed = self.data.write().map_err(|_| StoreError::Poisoned)?;
        let mut transaction = Transaction { working: committed.clone() };
        let result = match work(&mut transaction) {
            Ok(result) => result,
            Err(error) => {
                log::debug!("Rolling back transaction: {}", error);
                return Err(error);
            }
        };
        if let Some(store_file_path) = &self.store_file_path {
            if let Err(error) = Self::save(store_file_path, &transaction.working) {
                log::error!("Couldn't write store file {}: {}", store_file_path.display(), error);
                return Err(error);
            }
        }
        *committed = transaction.working;
        log::debug!("Committed transaction");
        Ok(result)
    }

    /// Writes next to the target and renames over it so a failed write leaves the old file intact.
    fn save(store_file_path: &Path, data: &StoreData) -> Result<(), StoreError> {
        let store_json = serde_json::to_string_pretty(data)?;
        if let Some(parent) = store_file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let staging_path = store_file_path.with_extension("json.tmp");
        fs::write(&staging_path, store_json.as_bytes())?;
        fs::rename(&staging_path, store_file_path)?;
        Ok(())
    }
}

impl Repository for StoreService {
    fn find_all<E: Entity>(&self) -> Result<Vec<E>, StoreError> {
        let data = self.data.read().map_err(|_| StoreError::Poisoned)?;
        Ok(E::table(&data).rows.clone())
    }

    fn find_by_id<E: Entity>(&self, id: u64) -> Result<Option<E>, StoreError> {
        let data = self.data.read().map_err(|_| StoreError::Poisoned)?;
        Ok(E::table(&data).find(id).cloned())
    }
}
