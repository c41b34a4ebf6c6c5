use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use crate::api::models::StoreData;
use crate::api::{ StoreError, StoreService };

pub struct StoreServiceFactory {}

impl StoreServiceFactory {
    /// Loads the store document at `store_file_path`; a missing file is an empty store.
    pub fn create(store_file_path: &Path) -> Result<StoreService, StoreError> {
        let data = match fs::read_to_string(store_file_path) {
            Ok(existing_store_json) => serde_json::from_str(&existing_store_json)?,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                log::info!("No store file at {}; starting empty", store_file_path.display());
                StoreData::default()
            }
            Err(error) => return Err(error.into()),
        };
        log::info!("Using store file {}", store_file_path.display());
        Ok(StoreService::new(data, Some(store_file_path.to_path_buf().into_boxed_path())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Repository;
    use crate::api::models::Ingredient;

    #[test]
    fn reads_an_existing_document() {
        let directory = tempfile::tempdir().unwrap();
        let store_file_path = directory.path().join("store.json");
        fs::write(&store_file_path, r#"{"ingredients":{"next_id":3,"rows":[{"id":2,"name":"Sugar","unit":"g"}]}}"#).unwrap();
        let store = StoreServiceFactory::create(&store_file_path).unwrap();
        let ingredients = store.find_all::<Ingredient>().unwrap();
        assert_eq!(ingredients, vec![Ingredient { id: 2, name: "Sugar".to_string(), unit: "g".to_string() }]);
    }

    #[test]
    fn rejects_a_malformed_document() {
        let directory = tempfile::tempdir().unwrap();
        let store_file_path = directory.path().join("store.json");
        fs::write(&store_file_path, "not json").unwrap();
        assert!(matches!(StoreServiceFactory::create(&store_file_path), Err(StoreError::Malformed(_))));
    }
}
