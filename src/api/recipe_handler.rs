use serde::Serialize;
use serde_json::json;
use crate::api::models::{
    messages_by_field, paginate, requested_page, Entity, FieldError, HandlerOutcome, Ingredient, Notification,
    Recipe, RecipeForm, Redirection, View, PAGE_SIZE
};
use crate::api::{ HandlerError, PersistenceSession, Repository, ResourceService, StoreService };

pub const RECIPE_INDEX_PATH: &str = "/recipe";

const NEW_TEMPLATE: &str = "recipe/new";
const EDIT_TEMPLATE: &str = "recipe/edit";

#[derive(Serialize)]
struct RecipeRow {
    #[serde(flatten)]
    recipe: Recipe,
    ingredient_names: String,
}

#[derive(Serialize)]
struct IngredientChoice<'a> {
    id: u64,
    name: &'a str,
    unit: &'a str,
    checked: bool,
}

pub struct RecipeHandler<'a> {
    store: &'a StoreService,
    resource_service: &'a ResourceService,
}

impl<'a> RecipeHandler<'a> {
    pub fn new(store: &'a StoreService, resource_service: &'a ResourceService) -> RecipeHandler<'a> {
        RecipeHandler { store, resource_service }
    }

    pub fn list(&self, page: Option<i64>) -> Result<HandlerOutcome, HandlerError> {
        let recipes = self.store.find_all::<Recipe>()?;
        let ingredients = self.store.find_all::<Ingredient>()?;
        let page = paginate(recipes, requested_page(page), PAGE_SIZE).map(|recipe| {
            let ingredient_names = recipe.ingredients.iter()
                .filter_map(|id| ingredients.iter().find(|ingredient| ingredient.id == *id))
                .map(|ingredient| ingredient.name.as_str())
                .collect::<Vec<&str>>()
                .join(", ");
            RecipeRow { recipe, ingredient_names }
        });
        Ok(HandlerOutcome::Render(View::new("recipe/index", json!({
            "title": self.resource_service.get_resource_string_or_name("recipe_index_title"),
            "base_path": RECIPE_INDEX_PATH,
            "page": page,
        }))))
    }

    pub fn create_recipe(&self, submission: Option<&RecipeForm>) -> Result<HandlerOutcome, HandlerError> {
        let ingredients = self.store.find_all::<Ingredient>()?;
        let form = match submission {
            Some(form) => form,
            None => return Ok(self.form_view(NEW_TEMPLATE, None, &RecipeForm::default(), &[], &ingredients)),
        };
        let fields = match form.validate(&ingredients) {
            Ok(fields) => fields,
            Err(errors) => {
                log::debug!("Rejected recipe submission with {} error(s)", errors.len());
                return Ok(self.form_view(NEW_TEMPLATE, None, form, &errors, &ingredients));
            }
        };
        let recipe = self.store.with_transaction(|session| Ok(session.insert::<Recipe>(fields)))?;
        log::info!("Created recipe {} \"{}\"", recipe.id, recipe.name);
        Ok(self.redirect_to_index("recipe_created_message"))
    }

    /// The submission is applied onto the stored recipe; its id never changes.
    pub fn edit_recipe(&self, id: u64, submission: Option<&RecipeForm>) -> Result<HandlerOutcome, HandlerError> {
        let mut recipe = self.store
            .find_by_id::<Recipe>(id)?
            .ok_or(HandlerError::NotFound { entity: Recipe::NAME, id })?;
        let ingredients = self.store.find_all::<Ingredient>()?;
        let form = match submission {
            Some(form) => form,
            None => return Ok(self.form_view(EDIT_TEMPLATE, Some(id), &RecipeForm::from(&recipe), &[], &ingredients)),
        };
        let fields = match form.validate(&ingredients) {
            Ok(fields) => fields,
            Err(errors) => {
                log::debug!("Rejected edit of recipe {} with {} error(s)", id, errors.len());
                return Ok(self.form_view(EDIT_TEMPLATE, Some(id), form, &errors, &ingredients));
            }
        };
        recipe.apply(fields);
        let recipe = self.store.with_transaction(|session| session.update(recipe))?;
        log::info!("Updated recipe {} \"{}\"", recipe.id, recipe.name);
        Ok(self.redirect_to_index("recipe_updated_message"))
    }

    // Reached through a plain GET link, so anything that follows links (prefetchers, crawlers) deletes.
    pub fn delete_recipe(&self, id: u64) -> Result<HandlerOutcome, HandlerError> {
        let recipe = self.store.with_transaction(|session| session.remove::<Recipe>(id))?;
        log::info!("Deleted recipe {} \"{}\"", recipe.id, recipe.name);
        Ok(self.redirect_to_index("recipe_deleted_message"))
    }

    fn redirect_to_index(&self, message_name: &str) -> HandlerOutcome {
        let message = self.resource_service.get_resource_string_or_name(message_name);
        HandlerOutcome::Redirect(Redirection::to(RECIPE_INDEX_PATH).with_notification(Notification::success(message)))
    }

    fn form_view(
        &self,
        template: &'static str,
        recipe_id: Option<u64>,
        form: &RecipeForm,
        errors: &[FieldError],
        ingredients: &[Ingredient]
    ) -> HandlerOutcome {
        let (title_name, action, submit_label) = match recipe_id {
            Some(id) => ("recipe_edit_title", format!("{}/edit/{}", RECIPE_INDEX_PATH, id), "recipe_save_button_label"),
            None => ("recipe_new_title", format!("{}/new", RECIPE_INDEX_PATH), "recipe_create_button_label"),
        };
        let ingredient_choices: Vec<IngredientChoice> = ingredients.iter()
            .map(|ingredient| IngredientChoice {
                id: ingredient.id,
                name: &ingredient.name,
                unit: &ingredient.unit,
                checked: form.selects_ingredient(ingredient.id),
            })
            .collect();
        HandlerOutcome::Render(View::new(template, json!({
            "title": self.resource_service.get_resource_string_or_name(title_name),
            "action": action,
            "submit_label": self.resource_service.get_resource_string_or_name(submit_label),
            "recipe_id": recipe_id,
            "form": form,
            "favorite_checked": form.is_favorite_checked(),
            "ingredient_choices": ingredient_choices,
            "errors": messages_by_field(errors, self.resource_service),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hard_xml::XmlRead;
    use crate::api::models::{ IngredientFields, RecipeFields };
    use crate::api::models::resources_xml::ResourcesElement;
    use crate::api::ResourceServiceFactory;

    fn recipe_fields(name: &str) -> RecipeFields {
        RecipeFields {
            name: name.to_string(),
            description: "Mix everything.".to_string(),
            preparation_time: Some(15),
            servings: Some(2),
            difficulty: Some(1),
            price: None,
            is_favorite: false,
            ingredients: vec![],
        }
    }

    /// Seeds `count` recipes (ids 1..=count) and two ingredients.
    fn seeded_store(count: usize) -> StoreService {
        let store = StoreService::in_memory();
        store.with_transaction(|session| {
            session.insert::<Ingredient>(IngredientFields { name: "Eggs".to_string(), unit: "pcs".to_string() });
            session.insert::<Ingredient>(IngredientFields { name: "Sugar".to_string(), unit: "g".to_string() });
            for number in 1..=count {
                session.insert::<Recipe>(recipe_fields(&format!("Recipe {}", number)));
            }
            Ok(())
        }).unwrap();
        store
    }

    fn form(name: &str) -> RecipeForm {
        RecipeForm {
            name: name.to_string(),
            description: "Stir gently.".to_string(),
            preparation_time: "45".to_string(),
            ingredients: vec!["1".to_string(), "2".to_string()],
            ..RecipeForm::default()
        }
    }

    fn rendered(outcome: HandlerOutcome) -> View {
        match outcome {
            HandlerOutcome::Render(view) => view,
            HandlerOutcome::Redirect(redirection) => panic!("expected a view, got a redirect to {}", redirection.location),
        }
    }

    fn redirected(outcome: HandlerOutcome) -> Redirection {
        match outcome {
            HandlerOutcome::Redirect(redirection) => redirection,
            HandlerOutcome::Render(view) => panic!("expected a redirect, got {}", view.template),
        }
    }

    #[test]
    fn list_resolves_ingredient_names() {
        let store = seeded_store(12);
        let resource_service = ResourceServiceFactory::create_default().unwrap();
        store.with_transaction(|session| {
            let mut first = session.find::<Recipe>(1).unwrap().clone();
            first.ingredients = vec![2, 1];
            session.update(first)
        }).unwrap();

        let view = rendered(RecipeHandler::new(&store, &resource_service).list(Some(1)).unwrap());

        assert_eq!(view.context["page"]["items"].as_array().unwrap().len(), 10);
        assert_eq!(view.context["page"]["items"][0]["ingredient_names"], "Sugar, Eggs");
        assert_eq!(view.context["page"]["items"][0]["preparation_time"], 15);
        assert_eq!(view.context["page"]["has_next"], true);
    }

    #[test]
    fn create_persists_and_redirects_with_notification() {
        let store = seeded_store(0);
        let resource_service = ResourceServiceFactory::create_default().unwrap();

        let redirection = redirected(RecipeHandler::new(&store, &resource_service).create_recipe(Some(&form("Flan"))).unwrap());

        assert_eq!(redirection.location, RECIPE_INDEX_PATH);
        assert_eq!(redirection.notification.unwrap().message, "Your recipe was created successfully!");
        let recipes = store.find_all::<Recipe>().unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].ingredients, vec![1, 2]);
    }

    #[test]
    fn invalid_create_keeps_values_and_selected_ingredients() {
        let store = seeded_store(0);
        let resource_service = ResourceServiceFactory::create_default().unwrap();
        let submission = RecipeForm { preparation_time: "forever".to_string(), ..form("Flan") };

        let view = rendered(RecipeHandler::new(&store, &resource_service).create_recipe(Some(&submission)).unwrap());

        assert_eq!(view.template, NEW_TEMPLATE);
        assert_eq!(view.context["form"]["name"], "Flan");
        assert_eq!(view.context["ingredient_choices"][1]["checked"], true);
        assert_eq!(view.context["errors"]["preparation_time"][0], "This value should be a whole number.");
        assert!(store.find_all::<Recipe>().unwrap().is_empty());
    }

    #[test]
    fn edit_form_is_prefilled_from_the_stored_recipe() {
        let store = seeded_store(5);
        let resource_service = ResourceServiceFactory::create_default().unwrap();

        let view = rendered(RecipeHandler::new(&store, &resource_service).edit_recipe(5, None).unwrap());

        assert_eq!(view.template, EDIT_TEMPLATE);
        assert_eq!(view.context["form"]["name"], "Recipe 5");
        assert_eq!(view.context["action"], "/recipe/edit/5");
        assert_eq!(view.context["recipe_id"], 5);
        assert_eq!(view.context["submit_label"], "Save");
    }

    #[test]
    fn new_form_labels_come_from_resources() {
        let store = seeded_store(0);
        let resources = ResourcesElement::from_str(
            r#"<resources><string name="recipe_create_button_label">Add recipe</string></resources>"#,
        ).unwrap();
        let resource_service = ResourceService::new(resources);

        let view = rendered(RecipeHandler::new(&store, &resource_service).create_recipe(None).unwrap());

        assert_eq!(view.template, NEW_TEMPLATE);
        assert_eq!(view.context["action"], "/recipe/new");
        assert_eq!(view.context["submit_label"], "Add recipe");
    }

    #[test]
    fn edit_updates_in_place() {
        let store = seeded_store(6);
        let resource_service = ResourceServiceFactory::create_default().unwrap();

        let redirection = redirected(RecipeHandler::new(&store, &resource_service).edit_recipe(5, Some(&form("Clafoutis"))).unwrap());

        assert_eq!(redirection.location, RECIPE_INDEX_PATH);
        assert_eq!(redirection.notification.unwrap().message, "Your recipe was updated successfully!");
        let recipe = store.find_by_id::<Recipe>(5).unwrap().unwrap();
        assert_eq!(recipe.id, 5);
        assert_eq!(recipe.name, "Clafoutis");
        assert_eq!(recipe.preparation_time, Some(45));
        assert_eq!(store.find_all::<Recipe>().unwrap().len(), 6);
    }

    #[test]
    fn invalid_edit_leaves_the_recipe_untouched() {
        let store = seeded_store(5);
        let resource_service = ResourceServiceFactory::create_default().unwrap();
        let submission = RecipeForm { name: "".to_string(), ..form("ignored") };

        let view = rendered(RecipeHandler::new(&store, &resource_service).edit_recipe(5, Some(&submission)).unwrap());

        assert_eq!(view.context["form"]["name"], "");
        assert_eq!(view.context["errors"]["name"][0], "This value should not be blank.");
        assert_eq!(store.find_by_id::<Recipe>(5).unwrap().unwrap().name, "Recipe 5");
    }

    #[test]
    fn edit_of_missing_recipe_is_not_found() {
        let store = seeded_store(1);
        let resource_service = ResourceServiceFactory::create_default().unwrap();
        let handler = RecipeHandler::new(&store, &resource_service);
        assert!(matches!(handler.edit_recipe(42, None), Err(HandlerError::NotFound { entity: "recipe", id: 42 })));
        assert!(matches!(handler.edit_recipe(42, Some(&form("x y"))), Err(HandlerError::NotFound { .. })));
    }

    #[test]
    fn delete_removes_exactly_one_and_second_delete_is_not_found() {
        let store = seeded_store(6);
        let resource_service = ResourceServiceFactory::create_default().unwrap();
        let handler = RecipeHandler::new(&store, &resource_service);

        let redirection = redirected(handler.delete_recipe(5).unwrap());

        assert_eq!(redirection.notification.unwrap().message, "Your recipe was deleted successfully!");
        assert!(store.find_by_id::<Recipe>(5).unwrap().is_none());
        assert_eq!(store.find_all::<Recipe>().unwrap().len(), 5);
        assert!(matches!(handler.delete_recipe(5), Err(HandlerError::NotFound { entity: "recipe", id: 5 })));
        assert_eq!(store.find_all::<Recipe>().unwrap().len(), 5);
    }
}
