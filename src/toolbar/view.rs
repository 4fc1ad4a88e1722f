// Element tree backing the toolbar: lookup by id, attribute mutation records
// for watched elements, and the owner document that holds commands and the
// shared selection flags.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use thiserror::Error;

use super::model::Command;
use super::ui_state::UiState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolbarError {
    #[error("required toolbar element '#{0}' not found")]
    MissingElement(String),
    #[error("required command '#{0}' not registered in the document")]
    MissingCommand(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    IconButton,
    ComboButton,
    Label,
    Spacer,
}

impl ElementKind {
    pub fn is_button(self) -> bool {
        matches!(self, ElementKind::IconButton | ElementKind::ComboButton)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: String,
    pub kind: ElementKind,
    pub text: String,
    pub hidden: bool,
    pub focused: bool,
    pub width_px: Option<f32>,
}

impl Element {
    pub fn new(id: &str, kind: ElementKind, text: &str) -> Self {
        Element {
            id: id.to_string(),
            kind,
            text: text.to_string(),
            hidden: false,
            focused: false,
            width_px: None,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Hidden,
    Width,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationRecord {
    pub target: ElementId,
    pub attribute: Attribute,
}

/// Window-level container: named commands plus the shared selection flags.
pub struct Document {
    ui_state: Rc<UiState>,
    commands: RefCell<HashMap<String, Rc<dyn Command>>>,
}

impl Document {
    pub fn new(ui_state: Rc<UiState>) -> Self {
        Document {
            ui_state,
            commands: RefCell::new(HashMap::new()),
        }
    }

    pub fn ui_state(&self) -> &Rc<UiState> {
        &self.ui_state
    }

    pub fn register_command(&self, id: &str, command: Rc<dyn Command>) {
        self.commands.borrow_mut().insert(id.to_string(), command);
    }

    pub fn query_command(&self, id: &str) -> Result<Rc<dyn Command>, ToolbarError> {
        self.commands
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| ToolbarError::MissingCommand(id.to_string()))
    }
}

pub struct Toolbar {
    document: Rc<Document>,
    elements: RefCell<Vec<Element>>,
    // The watched set is fixed when observation starts; later elements are never added.
    watched: RefCell<HashSet<ElementId>>,
    pending: RefCell<Vec<MutationRecord>>,
}

impl Toolbar {
    pub fn new(document: Rc<Document>) -> Self {
        Toolbar {
            document,
            elements: RefCell::new(Vec::new()),
            watched: RefCell::new(HashSet::new()),
            pending: RefCell::new(Vec::new()),
        }
    }

    pub fn owner_document(&self) -> &Rc<Document> {
        &self.document
    }

    pub fn append(&self, element: Element) -> ElementId {
        let mut elements = self.elements.borrow_mut();
        elements.push(element);
        ElementId(elements.len() - 1)
    }

    pub fn query_required(&self, id: &str) -> Result<ElementId, ToolbarError> {
        self.elements
            .borrow()
            .iter()
            .position(|e| e.id == id)
            .map(ElementId)
            .ok_or_else(|| ToolbarError::MissingElement(id.to_string()))
    }

    pub fn query_buttons(&self) -> Vec<ElementId> {
        self.elements
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, e)| e.kind.is_button())
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    pub fn observe_attributes(&self, targets: &[ElementId]) {
        self.watched.borrow_mut().extend(targets.iter().copied());
    }

    pub fn is_observed(&self, id: ElementId) -> bool {
        self.watched.borrow().contains(&id)
    }

    pub fn take_mutations(&self) -> Vec<MutationRecord> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }

    pub fn element(&self, id: ElementId) -> Element {
        self.elements.borrow()[id.0].clone()
    }

    pub fn elements(&self) -> Vec<Element> {
        self.elements.borrow().clone()
    }

    #[cfg(test)]
    pub fn text(&self, id: ElementId) -> String {
        self.elements.borrow()[id.0].text.clone()
    }

    pub fn set_text(&self, id: ElementId, text: &str) {
        self.elements.borrow_mut()[id.0].text = text.to_string();
    }

    pub fn is_hidden(&self, id: ElementId) -> bool {
        self.elements.borrow()[id.0].hidden
    }

    /// Setting `hidden` always writes the attribute, so it is recorded even
    /// when the element was already hidden. Clearing it on a visible element
    /// removes nothing and records nothing.
    pub fn set_hidden(&self, id: ElementId, hidden: bool) {
        let was_hidden = {
            let mut elements = self.elements.borrow_mut();
            let element = &mut elements[id.0];
            std::mem::replace(&mut element.hidden, hidden)
        };
        if hidden || was_hidden {
            self.record(id, Attribute::Hidden);
        }
    }

    #[cfg(test)]
    pub fn width_px(&self, id: ElementId) -> Option<f32> {
        self.elements.borrow()[id.0].width_px
    }

    /// Every write is recorded, including one that repeats the current width.
    pub fn set_width_px(&self, id: ElementId, width: f32) {
        self.elements.borrow_mut()[id.0].width_px = Some(width);
        self.record(id, Attribute::Width);
    }

    pub fn focus(&self, id: ElementId) {
        let mut elements = self.elements.borrow_mut();
        for element in elements.iter_mut() {
            element.focused = false;
        }
        elements[id.0].focused = true;
    }

    pub fn blur(&self, id: ElementId) {
        self.elements.borrow_mut()[id.0].focused = false;
    }

    #[cfg(test)]
    pub fn is_focused(&self, id: ElementId) -> bool {
        self.elements.borrow()[id.0].focused
    }

    fn record(&self, target: ElementId, attribute: Attribute) {
        if self.is_observed(target) {
            self.pending
                .borrow_mut()
                .push(MutationRecord { target, attribute });
        }
    }
}
