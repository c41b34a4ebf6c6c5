use hard_xml::{ XmlRead, XmlWrite };

/// `<string name="...">content</string>`; the content may be a handlebars template.
#[derive(XmlWrite, XmlRead, PartialEq, Debug, Clone)]
#[xml(tag = "string")]
pub struct StringElement {
    #[xml(attr = "name")]
    pub name: String,
    #[xml(text)]
    pub content: String,
}
