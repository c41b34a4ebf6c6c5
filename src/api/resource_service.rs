use handlebars::Handlebars;
use serde::Serialize;
use crate::api::models::resources_xml::ResourcesElement;

#[derive(Clone)]
pub struct ResourceService {
    resource_element: ResourcesElement
}

impl ResourceService {
    pub fn new(resource_element: ResourcesElement) -> ResourceService {
        ResourceService {
            resource_element
        }
    }

    pub fn get_resource_string_by_name(&self, name: &str) -> Option<String> {
        self.resource_element.find(name).map(|string_element| string_element.content.clone())
    }

    /// Falls back to the name itself so a missing entry shows up on the page instead of failing the request.
    pub fn get_resource_string_or_name(&self, name: &str) -> String {
        self.get_resource_string_by_name(name).unwrap_or_else(|| {
            log::warn!("Missing resource string \"{}\"", name);
            name.to_string()
        })
    }

    pub fn render_resource_template_string_by_name<T: Serialize>(&self, name: &str, data: &T) -> Option<String> {
        // Rendered strings end up inside page templates, which do the escaping.
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        let template_string = self.get_resource_string_by_name(name)?;
        match handlebars.render_template(template_string.as_str(), data) {
            Ok(rendered) => Some(rendered),
            Err(error) => {
                log::warn!("Couldn't render resource template \"{}\": {}", name, error);
                None
            }
        }
    }
}
