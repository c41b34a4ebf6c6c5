use hard_xml::{ XmlRead, XmlWrite };
use crate::api::models::resources_xml::StringElement;

#[derive(XmlWrite, XmlRead, PartialEq, Debug, Clone)]
#[xml(tag = "resources")]
pub struct ResourcesElement {
    #[xml(child = "string")]
    pub strings: Vec<StringElement>,
}

impl ResourcesElement {
    /// Later entries win, so an override file can be appended to the defaults.
    pub fn find(&self, name: &str) -> Option<&StringElement> {
        self.strings.iter().rev().find(|string_element| string_element.name == name)
    }

    pub fn merge(mut self, overrides: ResourcesElement) -> ResourcesElement {
        self.strings.extend(overrides.strings);
        self
    }
}
