use serde::de::DeserializeOwned;
use serde::{ Deserialize, Serialize };
use crate::api::models::{ Ingredient, Recipe };

const FIRST_ID: u64 = 1;

/// A record kept in one of the store's tables.
pub trait Entity: Clone + Serialize + DeserializeOwned {
    const NAME: &'static str;

    /// The mutable part of the entity, as produced by form validation.
    type Fields;

    fn id(&self) -> u64;
    fn from_fields(id: u64, fields: Self::Fields) -> Self;
    fn table(data: &StoreData) -> &Table<Self>;
    fn table_mut(data: &mut StoreData) -> &mut Table<Self>;
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Table<E> {
    pub next_id: u64,
    pub rows: Vec<E>,
}

impl<E> Default for Table<E> {
    fn default() -> Self {
        Table { next_id: FIRST_ID, rows: vec![] }
    }
}

impl<E: Entity> Table<E> {
    pub fn find(&self, id: u64) -> Option<&E> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Ids come from a counter that only grows, so a deleted id is never handed out again.
    pub fn insert(&mut self, fields: E::Fields) -> E {
        let id = self.next_id.max(self.max_id() + 1);
        self.next_id = id + 1;
        let entity = E::from_fields(id, fields);
        self.rows.push(entity.clone());
        entity
    }

    pub fn replace(&mut self, entity: E) -> Option<E> {
        let row = self.rows.iter_mut().find(|row| row.id() == entity.id())?;
        Some(std::mem::replace(row, entity))
    }

    pub fn remove(&mut self, id: u64) -> Option<E> {
        let index = self.rows.iter().position(|row| row.id() == id)?;
        Some(self.rows.remove(index))
    }

    fn max_id(&self) -> u64 {
        self.rows.iter().map(E::id).max().unwrap_or(0)
    }
}

/// The whole persisted document.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct StoreData {
    #[serde(default)]
    pub ingredients: Table<Ingredient>,
    #[serde(default)]
    pub recipes: Table<Recipe>,
}
