mod field_error;
mod handler_outcome;
mod ingredient;
mod notification;
mod page;
mod recipe;
mod store_data;
pub mod resources_xml;

pub use field_error::{ messages_by_field, FieldError, FieldErrorKind };
pub use handler_outcome::*;
pub use ingredient::*;
pub use notification::*;
pub use page::*;
pub use recipe::*;
pub use store_data::*;
