//! DOM element handle

use tyforms_host::AttributeReader;
use web_sys::Element;

/// A located element in the page's document
#[derive(Clone, Debug)]
pub struct DomElement(Element);

impl DomElement {
    pub fn new(element: Element) -> Self {
        Self(element)
    }

    pub fn element(&self) -> &Element {
        &self.0
    }
}

impl AttributeReader for DomElement {
    fn data_attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }
}
