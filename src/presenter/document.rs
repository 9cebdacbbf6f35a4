use std::collections::BTreeSet;

use url::Url;

use super::{
    dom::{DomSurface, ElementHandle, Injection, Slot, TextElement},
    markup::escape_html,
};
use crate::domain::WebContent;

const NOMINAL_WIDTH: u32 = 720;
const LINE_HEIGHT: u32 = 24;
const CHARS_PER_LINE: usize = 90;

#[derive(Debug, Clone)]
struct PageElement {
    tag: &'static str,
    text: String,
    classes: BTreeSet<String>,
    width: u32,
    height: u32,
}

/// In-memory page model built from extracted article text.
///
/// Each paragraph of the readable text becomes one content element. Nodes
/// injected by the presenter are tracked separately from page content, so
/// an SPA route change can swap the content while overlays stay put until
/// they are torn down.
#[derive(Debug, Clone, Default)]
pub struct PageDocument {
    url: String,
    title: String,
    elements: Vec<PageElement>,
    injected: Vec<Injection>,
}

impl PageDocument {
    pub fn new(url: &str, title: &str) -> Self {
        Self {
            url: url.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn from_content(url: &str, content: &WebContent) -> Self {
        let mut document = Self::new(url, "");
        document.load_content(url, content);
        document
    }

    /// Replaces page content in place, keeping injected nodes.
    pub fn replace_content(&mut self, url: &str, content: &WebContent) {
        self.elements.clear();
        self.load_content(url, content);
    }

    fn load_content(&mut self, url: &str, content: &WebContent) {
        self.url = url.to_string();
        self.title = content.title.clone().unwrap_or_default();
        if let Some(text) = &content.content {
            for paragraph in text.lines().map(str::trim).filter(|p| !p.is_empty()) {
                self.push_paragraph(paragraph);
            }
        }
    }

    pub fn push_paragraph(&mut self, text: &str) -> ElementHandle {
        let lines = text.chars().count().div_ceil(CHARS_PER_LINE).max(1) as u32;
        self.push_element("p", text, NOMINAL_WIDTH, lines * LINE_HEIGHT)
    }

    pub fn push_element(
        &mut self,
        tag: &'static str,
        text: &str,
        width: u32,
        height: u32,
    ) -> ElementHandle {
        self.elements.push(PageElement {
            tag,
            text: text.to_string(),
            classes: BTreeSet::new(),
            width,
            height,
        });
        ElementHandle(self.elements.len() - 1)
    }

    pub fn host(&self) -> String {
        Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub fn count_id(&self, id: &str) -> usize {
        self.injected.iter().filter(|node| node.id == id).count()
    }

    #[cfg(test)]
    pub fn has_class(&self, element: ElementHandle, class: &str) -> bool {
        self.elements
            .get(element.0)
            .is_some_and(|el| el.classes.contains(class))
    }

    #[cfg(test)]
    pub fn elements_with_class(&self, class: &str) -> Vec<ElementHandle> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.classes.contains(class))
            .map(|(idx, _)| ElementHandle(idx))
            .collect()
    }

    /// Serialises the page, including injected nodes, back to HTML.
    pub fn to_html(&self) -> String {
        let head: String = self
            .injected
            .iter()
            .filter(|node| node.slot == Slot::Head)
            .map(|node| node.markup.as_str())
            .collect();
        let mut body = String::new();
        for el in &self.elements {
            if el.classes.is_empty() {
                body.push_str(&format!("<{0}>{1}</{0}>", el.tag, escape_html(&el.text)));
            } else {
                let classes: Vec<&str> = el.classes.iter().map(String::as_str).collect();
                body.push_str(&format!(
                    "<{0} class=\"{1}\">{2}</{0}>",
                    el.tag,
                    classes.join(" "),
                    escape_html(&el.text)
                ));
            }
        }
        for node in self.injected.iter().filter(|node| node.slot == Slot::Body) {
            body.push_str(&node.markup);
        }
        format!(
            "<!DOCTYPE html><html><head><title>{}</title>{head}</head><body>{body}</body></html>",
            escape_html(&self.title)
        )
    }
}

impl DomSurface for PageDocument {
    fn location(&self) -> &str {
        &self.url
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn body_text(&self) -> String {
        self.elements
            .iter()
            .map(|el| el.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn text_elements(&self) -> Vec<TextElement> {
        self.elements
            .iter()
            .enumerate()
            .map(|(idx, el)| TextElement {
                handle: ElementHandle(idx),
                text: el.text.clone(),
                rendered: el.width > 0 && el.height > 0,
            })
            .collect()
    }

    fn contains_id(&self, id: &str) -> bool {
        self.injected.iter().any(|node| node.id == id)
    }

    fn inject(&mut self, injection: Injection) {
        self.injected.push(injection);
    }

    fn remove_id(&mut self, id: &str) -> bool {
        let before = self.injected.len();
        self.injected.retain(|node| node.id != id);
        self.injected.len() != before
    }

    fn add_class(&mut self, element: ElementHandle, class: &str) {
        if let Some(el) = self.elements.get_mut(element.0) {
            el.classes.insert(class.to_string());
        }
    }

    fn remove_class_everywhere(&mut self, class: &str) -> usize {
        self.elements
            .iter_mut()
            .map(|el| el.classes.remove(class))
            .filter(|removed| *removed)
            .count()
    }
}
