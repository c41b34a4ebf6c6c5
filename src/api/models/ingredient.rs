use rocket::serde::{ Deserialize, Serialize };
use crate::api::models::{ Entity, FieldError, StoreData, Table };
use crate::api::models::field_error::require_length;

const NAME_MIN_LENGTH: usize = 2;
const NAME_MAX_LENGTH: usize = 50;
const UNIT_MIN_LENGTH: usize = 1;
const UNIT_MAX_LENGTH: usize = 20;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct Ingredient {
    pub id: u64,
    pub name: String,
    pub unit: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IngredientFields {
    pub name: String,
    pub unit: String,
}

impl Entity for Ingredient {
    const NAME: &'static str = "ingredient";
    type Fields = IngredientFields;

    fn id(&self) -> u64 {
        self.id
    }

    fn from_fields(id: u64, fields: IngredientFields) -> Self {
        Ingredient { id, name: fields.name, unit: fields.unit }
    }

    fn table(data: &StoreData) -> &Table<Self> {
        &data.ingredients
    }

    fn table_mut(data: &mut StoreData) -> &mut Table<Self> {
        &mut data.ingredients
    }
}

/// Raw submitted values. Every field is kept as text so a bad value can be echoed back.
#[derive(FromForm, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct IngredientForm {
    #[field(default = String::new())]
    pub name: String,
    #[field(default = String::new())]
    pub unit: String,
}

impl IngredientForm {
    pub fn validate(&self) -> Result<IngredientFields, Vec<FieldError>> {
        let mut errors = vec![];
        let name = require_length("name", &self.name, NAME_MIN_LENGTH, NAME_MAX_LENGTH, &mut errors);
        let unit = require_length("unit", &self.unit, UNIT_MIN_LENGTH, UNIT_MAX_LENGTH, &mut errors);
        if errors.is_empty() {
            Ok(IngredientFields { name, unit })
        } else {
            Err(errors)
        }
    }
}
