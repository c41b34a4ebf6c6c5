use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },
    #[error("could not access store file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not read store document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("store lock was poisoned by a panicking writer")]
    Poisoned,
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for HandlerError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { entity, id } => HandlerError::NotFound { entity, id },
            other => HandlerError::Store(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("could not read resources file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed resources file: {0:?}")]
    Malformed(hard_xml::XmlError),
}

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("invalid template: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("could not render view: {0}")]
    Render(#[from] handlebars::RenderError),
}
