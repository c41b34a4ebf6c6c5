use std::fs;
use hard_xml::XmlRead;
use crate::api::models::resources_xml::ResourcesElement;
use crate::api::{ AppConfig, ResourceError, ResourceService };

const DEFAULT_STRINGS_XML: &str = include_str!("../../resources/strings.xml");

pub struct ResourceServiceFactory {}

impl ResourceServiceFactory {
    /// Built-in strings, overlaid with the configured strings file when there is one.
    pub fn create(config: &AppConfig) -> Result<ResourceService, ResourceError> {
        let defaults = Self::parse(DEFAULT_STRINGS_XML)?;
        let resource_element = match &config.strings_xml_file_path {
            Some(file_path) => {
                log::info!("Loading resource strings from {}", file_path.display());
                let resource_xml_content = fs::read_to_string(file_path)?;
                defaults.merge(Self::parse(&resource_xml_content)?)
            }
            None => defaults,
        };
        Ok(ResourceService::new(resource_element))
    }

    pub fn create_default() -> Result<ResourceService, ResourceError> {
        Ok(ResourceService::new(Self::parse(DEFAULT_STRINGS_XML)?))
    }

    fn parse(resource_xml_content: &str) -> Result<ResourcesElement, ResourceError> {
        ResourcesElement::from_str(resource_xml_content).map_err(ResourceError::Malformed)
    }
}
