/// Opaque reference to a content element on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle(pub usize);

#[derive(Debug, Clone)]
pub struct TextElement {
    pub handle: ElementHandle,
    pub text: String,
    /// False when the element has a zero-sized box.
    pub rendered: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Head,
    Body,
}

/// A node the presenter adds to the page, keyed by a fixed id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    pub id: &'static str,
    pub slot: Slot,
    pub markup: String,
}

/// The page surface the presenter reads from and mutates.
pub trait DomSurface {
    fn location(&self) -> &str;
    fn title(&self) -> &str;
    fn body_text(&self) -> String;
    fn text_elements(&self) -> Vec<TextElement>;

    fn contains_id(&self, id: &str) -> bool;
    fn inject(&mut self, injection: Injection);
    /// Returns false when nothing with that id was present.
    fn remove_id(&mut self, id: &str) -> bool;

    fn add_class(&mut self, element: ElementHandle, class: &str);
    /// Strips `class` from every element, returning how many carried it.
    fn remove_class_everywhere(&mut self, class: &str) -> usize;

    /// Injects only when no node with the same id exists yet.
    fn inject_once(&mut self, injection: Injection) -> bool {
        if self.contains_id(injection.id) {
            return false;
        }
        self.inject(injection);
        true
    }
}
