use std::rc::Rc;

use kuchiki::parse_html;
use kuchiki::traits::*;
use kuchiki::NodeRef;
use serde_json::Value as JsonValue;

use super::element::Element;
use super::window::Window;

/// An element tree built from HTML markup, for test fixtures.
#[derive(Debug)]
pub struct Document {
    window: Rc<Window>,
    root: Element,
}

impl Document {
    pub fn parse(window: &Rc<Window>, html: &str) -> Self {
        let parsed = parse_html().one(html);
        let root = parsed
            .children()
            .find_map(|node| build_element(window, &node))
            .unwrap_or_else(|| window.create_element("html"));

        Self {
            window: Rc::clone(window),
            root,
        }
    }

    pub fn window(&self) -> Rc<Window> {
        Rc::clone(&self.window)
    }

    /// The `<html>` element.
    pub fn document_element(&self) -> &Element {
        &self.root
    }

    pub fn body(&self) -> Option<Element> {
        self.root
            .children()
            .into_iter()
            .find(|child| child.local_name() == "body")
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        let mut pending = vec![self.root.clone()];
        while let Some(element) = pending.pop() {
            if element.id().as_deref() == Some(id) {
                return Some(element);
            }
            pending.extend(element.children().into_iter().rev());
        }
        None
    }

    /// Elements with `local_name`, in document order.
    pub fn elements_by_tag_name(&self, local_name: &str) -> Vec<Element> {
        let wanted = local_name.to_ascii_lowercase();
        let mut found = Vec::new();
        let mut pending = vec![self.root.clone()];
        while let Some(element) = pending.pop() {
            if element.local_name() == wanted {
                found.push(element.clone());
            }
            pending.extend(element.children().into_iter().rev());
        }
        found
    }
}

fn build_element(window: &Rc<Window>, node: &NodeRef) -> Option<Element> {
    let data = node.as_element()?;
    let element = window.create_element(&data.name.local);

    for (name, attribute) in data.attributes.borrow().map.iter() {
        element.set_attribute(&name.local, attribute.value.clone());
    }

    let text = node.text_contents();
    initialize_form_state(&element, &text);
    element.set_slot("textContent", JsonValue::String(text));

    for child in node.children() {
        if let Some(child_element) = build_element(window, &child) {
            element.append_child(&child_element);
        }
    }

    Some(element)
}

/// Default value/checkedness taken from markup, as the parser's form-control reset does.
fn initialize_form_state(element: &Element, text: &str) {
    match element.local_name() {
        "input" => {
            if let Some(value) = element.get_attribute("value") {
                element.set_slot("value", JsonValue::String(value));
            }
            if element.get_attribute("checked").is_some() {
                element.set_slot("checked", JsonValue::Bool(true));
            }
        }
        "textarea" => element.set_slot("value", JsonValue::String(text.to_string())),
        _ => {}
    }
}
