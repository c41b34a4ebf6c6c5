mod config;
mod error;
mod ingredient_handler;
mod recipe_handler;
mod resource_service;
mod resource_service_factory;
mod store_service;
mod store_service_factory;
mod view_service;
pub mod models;

pub use config::*;
pub use error::*;
pub use ingredient_handler::*;
pub use recipe_handler::*;
pub use resource_service::*;
pub use resource_service_factory::*;
pub use store_service::*;
pub use store_service_factory::*;
pub use view_service::*;
