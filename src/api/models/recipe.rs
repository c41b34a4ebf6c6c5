use rocket::serde::{ Deserialize, Serialize };
use crate::api::models::{ Entity, FieldError, FieldErrorKind, Ingredient, StoreData, Table };
use crate::api::models::field_error::{ is_checked, optional_decimal, optional_integer, require_length, require_present };

const NAME_MIN_LENGTH: usize = 2;
const NAME_MAX_LENGTH: usize = 50;
const PREPARATION_TIME_MIN: i64 = 1;
const PREPARATION_TIME_MAX: i64 = 1440;
const SERVINGS_MIN: i64 = 1;
const SERVINGS_MAX: i64 = 50;
const DIFFICULTY_MIN: i64 = 1;
const DIFFICULTY_MAX: i64 = 5;
const PRICE_MIN: u32 = 0;
const PRICE_MAX: u32 = 1000;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct Recipe {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub preparation_time: Option<u32>,
    pub servings: Option<u32>,
    pub difficulty: Option<u32>,
    pub price: Option<f64>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub ingredients: Vec<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecipeFields {
    pub name: String,
    pub description: String,
    pub preparation_time: Option<u32>,
    pub servings: Option<u32>,
    pub difficulty: Option<u32>,
    pub price: Option<f64>,
    pub is_favorite: bool,
    pub ingredients: Vec<u64>,
}

impl Recipe {
    /// Overwrites every mutable field. The id is left alone.
    pub fn apply(&mut self, fields: RecipeFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.preparation_time = fields.preparation_time;
        self.servings = fields.servings;
        self.difficulty = fields.difficulty;
        self.price = fields.price;
        self.is_favorite = fields.is_favorite;
        self.ingredients = fields.ingredients;
    }
}

impl Entity for Recipe {
    const NAME: &'static str = "recipe";
    type Fields = RecipeFields;

    fn id(&self) -> u64 {
        self.id
    }

    fn from_fields(id: u64, fields: RecipeFields) -> Self {
        let mut recipe = Recipe {
            id,
            name: String::new(),
            description: String::new(),
            preparation_time: None,
            servings: None,
            difficulty: None,
            price: None,
            is_favorite: false,
            ingredients: vec![],
        };
        recipe.apply(fields);
        recipe
    }

    fn table(data: &StoreData) -> &Table<Self> {
        &data.recipes
    }

    fn table_mut(data: &mut StoreData) -> &mut Table<Self> {
        &mut data.recipes
    }
}

#[derive(FromForm, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct RecipeForm {
    #[field(default = String::new())]
    pub name: String,
    #[field(default = String::new())]
    pub description: String,
    #[field(default = String::new())]
    pub preparation_time: String,
    #[field(default = String::new())]
    pub servings: String,
    #[field(default = String::new())]
    pub difficulty: String,
    #[field(default = String::new())]
    pub price: String,
    #[field(default = String::new())]
    pub is_favorite: String,
    #[field(default = Vec::new())]
    pub ingredients: Vec<String>,
}

impl RecipeForm {
    /// Referenced ingredients must be among `known_ingredients`.
    pub fn validate(&self, known_ingredients: &[Ingredient]) -> Result<RecipeFields, Vec<FieldError>> {
        let mut errors = vec![];
        let name = require_length("name", &self.name, NAME_MIN_LENGTH, NAME_MAX_LENGTH, &mut errors);
        let description = require_present("description", &self.description, &mut errors);
        let preparation_time = optional_integer("preparation_time", &self.preparation_time, PREPARATION_TIME_MIN, PREPARATION_TIME_MAX, &mut errors);
        let servings = optional_integer("servings", &self.servings, SERVINGS_MIN, SERVINGS_MAX, &mut errors);
        let difficulty = optional_integer("difficulty", &self.difficulty, DIFFICULTY_MIN, DIFFICULTY_MAX, &mut errors);
        let price = optional_decimal("price", &self.price, PRICE_MIN, PRICE_MAX, &mut errors);
        let ingredients = self.ingredient_ids(known_ingredients, &mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(RecipeFields {
            name,
            description,
            preparation_time,
            servings,
            difficulty,
            price,
            is_favorite: self.is_favorite_checked(),
            ingredients,
        })
    }

    pub fn is_favorite_checked(&self) -> bool {
        is_checked(&self.is_favorite)
    }

    pub fn selects_ingredient(&self, id: u64) -> bool {
        self.ingredients.iter().any(|raw| raw.trim().parse::<u64>().ok() == Some(id))
    }

    fn ingredient_ids(&self, known_ingredients: &[Ingredient], errors: &mut Vec<FieldError>) -> Vec<u64> {
        let mut ids = vec![];
        for raw in self.ingredients.iter().map(|raw| raw.trim()).filter(|raw| !raw.is_empty()) {
            let known = raw.parse::<u64>().ok().filter(|id| known_ingredients.iter().any(|ingredient| ingredient.id == *id));
            match known {
                Some(id) if ids.contains(&id) => {}
                Some(id) => ids.push(id),
                None => errors.push(FieldError::new("ingredients", FieldErrorKind::UnknownIngredient { id: raw.to_string() })),
            }
        }
        ids
    }
}

impl From<&Recipe> for RecipeForm {
    fn from(recipe: &Recipe) -> Self {
        let number = |value: Option<u32>| value.map(|value| value.to_string()).unwrap_or_default();
        RecipeForm {
            name: recipe.name.clone(),
            description: recipe.description.clone(),
            preparation_time: number(recipe.preparation_time),
            servings: number(recipe.servings),
            difficulty: number(recipe.difficulty),
            price: recipe.price.map(|price| price.to_string()).unwrap_or_default(),
            is_favorite: if recipe.is_favorite { "on".to_string() } else { String::new() },
            ingredients: recipe.ingredients.iter().map(u64::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pantry() -> Vec<Ingredient> {
        vec![
            Ingredient { id: 1, name: "Flour".to_string(), unit: "g".to_string() },
            Ingredient { id: 2, name: "Milk".to_string(), unit: "ml".to_string() },
        ]
    }

    fn pancakes() -> RecipeForm {
        RecipeForm {
            name: "Pancakes".to_string(),
            description: "Whisk and fry.".to_string(),
            preparation_time: "20".to_string(),
            servings: "4".to_string(),
            difficulty: "".to_string(),
            price: "3.5".to_string(),
            is_favorite: "on".to_string(),
            ingredients: vec!["1".to_string(), "2".to_string(), "1".to_string()],
        }
    }

    #[test]
    fn valid_form_produces_fields() {
        let fields = pancakes().validate(&pantry()).unwrap();
        assert_eq!(fields.name, "Pancakes");
        assert_eq!(fields.preparation_time, Some(20));
        assert_eq!(fields.servings, Some(4));
        assert_eq!(fields.difficulty, None);
        assert_eq!(fields.price, Some(3.5));
        assert!(fields.is_favorite);
        assert_eq!(fields.ingredients, vec![1, 2]);
    }

    #[test]
    fn unknown_and_malformed_ingredients_are_rejected() {
        let form = RecipeForm { ingredients: vec!["9".to_string(), "x".to_string()], ..pancakes() };
        let errors = form.validate(&pantry()).unwrap_err();
        assert_eq!(errors, vec![
            FieldError::new("ingredients", FieldErrorKind::UnknownIngredient { id: "9".to_string() }),
            FieldError::new("ingredients", FieldErrorKind::UnknownIngredient { id: "x".to_string() }),
        ]);
    }

    #[test]
    fn errors_across_fields_are_collected() {
        let form = RecipeForm { name: "".to_string(), description: " ".to_string(), difficulty: "9".to_string(), ..pancakes() };
        let fields: Vec<&str> = form.validate(&pantry()).unwrap_err().iter().map(|error| error.field).collect();
        assert_eq!(fields, vec!["name", "description", "difficulty"]);
    }

    #[test]
    fn apply_keeps_the_id() {
        let mut recipe = Recipe::from_fields(5, pancakes().validate(&pantry()).unwrap());
        let edited = RecipeForm { name: "Crepes".to_string(), ingredients: vec![], ..pancakes() };
        recipe.apply(edited.validate(&pantry()).unwrap());
        assert_eq!(recipe.id, 5);
        assert_eq!(recipe.name, "Crepes");
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn form_round_trips_through_a_recipe() {
        let recipe = Recipe::from_fields(3, pancakes().validate(&pantry()).unwrap());
        let form = RecipeForm::from(&recipe);
        assert_eq!(form.validate(&pantry()).unwrap(), pancakes().validate(&pantry()).unwrap());
        assert!(form.selects_ingredient(2));
        assert!(!form.selects_ingredient(3));
    }

    #[test]
    fn stored_recipe_keys_match_field_names() {
        let recipe = Recipe::from_fields(3, pancakes().validate(&pantry()).unwrap());
        let stored = serde_json::to_value(&recipe).unwrap();
        assert_eq!(stored["preparation_time"], 20);
        assert_eq!(stored["is_favorite"], true);
        assert!(stored.get("preparationTime").is_none());
        assert_eq!(serde_json::from_value::<Recipe>(stored).unwrap(), recipe);
    }
}
