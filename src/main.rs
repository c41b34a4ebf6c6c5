mod api;

#[macro_use] extern crate rocket;
extern crate env_logger;
use rocket::form::Form;
use rocket::http::Status;
use rocket::request::FlashMessage;
use rocket::response::{ Flash, Redirect };
use rocket::response::content::RawHtml;
use rocket::{ Build, Request, Rocket, State };
use serde_json::json;
use crate::api::models::{ HandlerOutcome, IngredientForm, Notification, NotificationLevel, RecipeForm, View };
use crate::api::{
    AppConfig, HandlerError, IngredientHandler, RecipeHandler, ResourceService, ResourceServiceFactory, StoreService,
    StoreServiceFactory, ViewService, RECIPE_INDEX_PATH
};

#[derive(Responder)]
enum PageResponse {
    Html(RawHtml<String>),
    Notified(Flash<Redirect>),
    Redirect(Redirect),
}

fn respond(view_service: &ViewService, outcome: Result<HandlerOutcome, HandlerError>, flash: Option<FlashMessage<'_>>) -> Result<PageResponse, Status> {
    match outcome {
        Ok(HandlerOutcome::Render(view)) => {
            let template = view.template;
            let notification = flash.map(|flash| Notification::new(NotificationLevel::from_kind(flash.kind()), flash.message().to_string()));
            match view_service.render(&view.with_notification(notification)) {
                Ok(html) => Ok(PageResponse::Html(RawHtml(html))),
                Err(error) => {
                    log::error!("Couldn't render {}: {}", template, error);
                    Err(Status::InternalServerError)
                }
            }
        }
        Ok(HandlerOutcome::Redirect(redirection)) => Ok(match redirection.notification {
            Some(notification) => PageResponse::Notified(
                Flash::new(Redirect::to(redirection.location), notification.level.as_str(), notification.message)
            ),
            None => PageResponse::Redirect(Redirect::to(redirection.location)),
        }),
        Err(HandlerError::NotFound { entity, id }) => {
            log::warn!("No {} with id {}", entity, id);
            Err(Status::NotFound)
        }
        Err(error) => {
            log::error!("Request failed: {}", error);
            Err(Status::InternalServerError)
        }
    }
}

#[get("/")]
fn index() -> Redirect {
    Redirect::to(RECIPE_INDEX_PATH)
}

#[get("/ingredient?<page>")]
fn ingredient_index(
    page: Option<i64>,
    flash: Option<FlashMessage<'_>>,
    store: &State<StoreService>,
    resource_service: &State<ResourceService>,
    view_service: &State<ViewService>
) -> Result<PageResponse, Status> {
    let handler = IngredientHandler::new(store, resource_service);
    respond(view_service, handler.list(page), flash)
}

#[get("/ingredient/new")]
fn ingredient_new(store: &State<StoreService>, resource_service: &State<ResourceService>, view_service: &State<ViewService>) -> Result<PageResponse, Status> {
    let handler = IngredientHandler::new(store, resource_service);
    respond(view_service, handler.create_ingredient(None), None)
}

#[post("/ingredient/new", data = "<ingredient_form>")]
fn ingredient_create(
    ingredient_form: Form<IngredientForm>,
    store: &State<StoreService>,
    resource_service: &State<ResourceService>,
    view_service: &State<ViewService>
) -> Result<PageResponse, Status> {
    let handler = IngredientHandler::new(store, resource_service);
    let ingredient_form = ingredient_form.into_inner();
    respond(view_service, handler.create_ingredient(Some(&ingredient_form)), None)
}

#[get("/recipe?<page>")]
fn recipe_index(
    page: Option<i64>,
    flash: Option<FlashMessage<'_>>,
    store: &State<StoreService>,
    resource_service: &State<ResourceService>,
    view_service: &State<ViewService>
) -> Result<PageResponse, Status> {
    let handler = RecipeHandler::new(store, resource_service);
    respond(view_service, handler.list(page), flash)
}

#[get("/recipe/new")]
fn recipe_new(store: &State<StoreService>, resource_service: &State<ResourceService>, view_service: &State<ViewService>) -> Result<PageResponse, Status> {
    let handler = RecipeHandler::new(store, resource_service);
    respond(view_service, handler.create_recipe(None), None)
}

#[post("/recipe/new", data = "<recipe_form>")]
fn recipe_create(
    recipe_form: Form<RecipeForm>,
    store: &State<StoreService>,
    resource_service: &State<ResourceService>,
    view_service: &State<ViewService>
) -> Result<PageResponse, Status> {
    let handler = RecipeHandler::new(store, resource_service);
    let recipe_form = recipe_form.into_inner();
    respond(view_service, handler.create_recipe(Some(&recipe_form)), None)
}

/// Recipe ids are unsigned integers, so any other path segment names nothing.
fn recipe_id(raw_id: &str) -> Result<u64, Status> {
    raw_id.parse().map_err(|_| {
        log::warn!("No recipe with id {:?}", raw_id);
        Status::NotFound
    })
}

#[get("/recipe/edit/<id>")]
fn recipe_edit(id: &str, store: &State<StoreService>, resource_service: &State<ResourceService>, view_service: &State<ViewService>) -> Result<PageResponse, Status> {
    let id = recipe_id(id)?;
    let handler = RecipeHandler::new(store, resource_service);
    respond(view_service, handler.edit_recipe(id, None), None)
}

#[post("/recipe/edit/<id>", data = "<recipe_form>")]
fn recipe_update(
    id: &str,
    recipe_form: Form<RecipeForm>,
    store: &State<StoreService>,
    resource_service: &State<ResourceService>,
    view_service: &State<ViewService>
) -> Result<PageResponse, Status> {
    let id = recipe_id(id)?;
    let handler = RecipeHandler::new(store, resource_service);
    let recipe_form = recipe_form.into_inner();
    respond(view_service, handler.edit_recipe(id, Some(&recipe_form)), None)
}

// Destructive GET, kept so existing "Delete" links keep working.
#[get("/recipe/delete/<id>")]
fn recipe_delete(id: &str, store: &State<StoreService>, resource_service: &State<ResourceService>, view_service: &State<ViewService>) -> Result<PageResponse, Status> {
    let id = recipe_id(id)?;
    let handler = RecipeHandler::new(store, resource_service);
    respond(view_service, handler.delete_recipe(id), None)
}

fn error_page(request: &Request<'_>, message_name: &str) -> RawHtml<String> {
    let running = request.rocket();
    let message = match running.state::<ResourceService>() {
        Some(resource_service) => resource_service.get_resource_string_or_name(message_name),
        None => message_name.to_string(),
    };
    let view = View::new("error", json!({ "title": message, "message": message }));
    match running.state::<ViewService>().map(|view_service| view_service.render(&view)) {
        Some(Ok(html)) => RawHtml(html),
        _ => RawHtml(message),
    }
}

#[catch(404)]
fn not_found(request: &Request<'_>) -> RawHtml<String> {
    error_page(request, "not_found_error_message")
}

#[catch(500)]
fn internal_error(request: &Request<'_>) -> RawHtml<String> {
    error_page(request, "internal_error_message")
}

fn build_rocket(store: StoreService, resource_service: ResourceService, view_service: ViewService) -> Rocket<Build> {
    rocket::build()
        .mount("/", routes![
            index,
            ingredient_index, ingredient_new, ingredient_create,
            recipe_index, recipe_new, recipe_create, recipe_edit, recipe_update, recipe_delete
        ])
        .register("/", catchers![not_found, internal_error])
        .manage(store)
        .manage(resource_service)
        .manage(view_service)
}

#[launch]
fn rocket() -> _ {
    env_logger::init();
    let config = AppConfig::from_env();
    let store = match StoreServiceFactory::create(&config.store_file_path) {
        Ok(store) => store,
        Err(error) => panic!("Couldn't create store service: {}", error),
    };
    let resource_service = match ResourceServiceFactory::create(&config) {
        Ok(resource_service) => resource_service,
        Err(error) => panic!("Couldn't create resource service: {}", error),
    };
    let view_service = match ViewService::new() {
        Ok(view_service) => view_service,
        Err(error) => panic!("Couldn't create view service: {}", error),
    };
    build_rocket(store, resource_service, view_service)
}
