use serde_json::json;
use crate::api::models::{
    messages_by_field, paginate, requested_page, FieldError, HandlerOutcome, Ingredient, IngredientForm,
    Notification, Redirection, View, PAGE_SIZE
};
use crate::api::{ HandlerError, PersistenceSession, Repository, ResourceService, StoreService };

pub const INGREDIENT_INDEX_PATH: &str = "/ingredient";

pub struct IngredientHandler<'a> {
    store: &'a StoreService,
    resource_service: &'a ResourceService,
}

impl<'a> IngredientHandler<'a> {
    pub fn new(store: &'a StoreService, resource_service: &'a ResourceService) -> IngredientHandler<'a> {
        IngredientHandler { store, resource_service }
    }

    pub fn list(&self, page: Option<i64>) -> Result<HandlerOutcome, HandlerError> {
        let ingredients = self.store.find_all::<Ingredient>()?;
        let page = paginate(ingredients, requested_page(page), PAGE_SIZE);
        Ok(HandlerOutcome::Render(View::new("ingredient/index", json!({
            "title": self.resource_service.get_resource_string_or_name("ingredient_index_title"),
            "base_path": INGREDIENT_INDEX_PATH,
            "page": page,
        }))))
    }

    /// `None` is the initial GET; a submission is validated and, when valid, saved.
    pub fn create_ingredient(&self, submission: Option<&IngredientForm>) -> Result<HandlerOutcome, HandlerError> {
        let form = match submission {
            Some(form) => form,
            None => return Ok(self.form_view(&IngredientForm::default(), &[])),
        };
        let fields = match form.validate() {
            Ok(fields) => fields,
            Err(errors) => {
                log::debug!("Rejected ingredient submission with {} error(s)", errors.len());
                return Ok(self.form_view(form, &errors));
            }
        };
        let ingredient = self.store.with_transaction(|session| Ok(session.insert::<Ingredient>(fields)))?;
        log::info!("Created ingredient {} \"{}\"", ingredient.id, ingredient.name);
        let message = self.resource_service.get_resource_string_or_name("ingredient_created_message");
        Ok(HandlerOutcome::Redirect(
            Redirection::to(INGREDIENT_INDEX_PATH).with_notification(Notification::success(message))
        ))
    }

    fn form_view(&self, form: &IngredientForm, errors: &[FieldError]) -> HandlerOutcome {
        HandlerOutcome::Render(View::new("ingredient/new", json!({
            "title": self.resource_service.get_resource_string_or_name("ingredient_new_title"),
            "form": form,
            "errors": messages_by_field(errors, self.resource_service),
        })))
    }
}
