use handlebars::Handlebars;
use crate::api::models::View;
use crate::api::ViewError;

const PARTIALS: [(&str, &str); 4] = [
    ("header", include_str!("../../templates/header.hbs")),
    ("footer", include_str!("../../templates/footer.hbs")),
    ("pagination", include_str!("../../templates/pagination.hbs")),
    ("recipe_form", include_str!("../../templates/recipe_form.hbs")),
];

const TEMPLATES: [(&str, &str); 6] = [
    ("ingredient/index", include_str!("../../templates/ingredient/index.hbs")),
    ("ingredient/new", include_str!("../../templates/ingredient/new.hbs")),
    ("recipe/index", include_str!("../../templates/recipe/index.hbs")),
    ("recipe/new", include_str!("../../templates/recipe/new.hbs")),
    ("recipe/edit", include_str!("../../templates/recipe/edit.hbs")),
    ("error", include_str!("../../templates/error.hbs")),
];

/// Page templates, compiled into the binary.
pub struct ViewService {
    handlebars: Handlebars<'static>,
}

impl ViewService {
    pub fn new() -> Result<ViewService, ViewError> {
        let mut handlebars = Handlebars::new();
        for (name, source) in PARTIALS {
            handlebars.register_partial(name, source)?;
        }
        for (name, source) in TEMPLATES {
            handlebars.register_template_string(name, source)?;
        }
        Ok(ViewService { handlebars })
    }

    pub fn render(&self, view: &View) -> Result<String, ViewError> {
        Ok(self.handlebars.render(view.template, &view.context)?)
    }
}
