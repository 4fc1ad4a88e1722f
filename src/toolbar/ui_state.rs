// Window-wide selection flags shared between the toolbar and the views that
// change their look with them (file list checkboxes, highlight colours).

use std::cell::Cell;

#[derive(Debug, Default)]
pub struct UiState {
    selecting: Cell<bool>,
    check_select: Cell<bool>,
    style_generation: Cell<u64>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selecting(&self) -> bool {
        self.selecting.get()
    }

    pub fn set_selecting(&self, selecting: bool) {
        self.selecting.set(selecting);
    }

    pub fn is_check_select(&self) -> bool {
        self.check_select.get()
    }

    pub fn set_check_select(&self, check_select: bool) {
        self.check_select.set(check_select);
    }

    /// Asks every style consumer to re-evaluate styles derived from these
    /// flags. Consumers compare the generation with the one they last saw.
    pub fn update_styles(&self) {
        self.style_generation.set(self.style_generation.get() + 1);
    }

    pub fn style_generation(&self) -> u64 {
        self.style_generation.get()
    }
}
