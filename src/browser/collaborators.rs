use super::app_state::BrowserModel;
use crate::toolbar::{
    CANCEL_SELECTION_BUTTON_ID, Command, ElementKind, FeatureFlags, ListContext, LocationLine, NavigationList,
    SelectionSource, Toolbar, delete_button_hidden,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, info};

/// Pixels per terminal column, used when toolbar widths are expressed in px.
pub const CELL_WIDTH_PX: f32 = 8.0;
const NAVIGATION_EXPANDED_COLUMNS: u16 = 22;
const NAVIGATION_COLLAPSED_COLUMNS: u16 = 4;

pub fn px_to_columns(px: f32) -> u16 {
    (px / CELL_WIDTH_PX).round().max(0.0) as u16
}

pub struct VolumeFlags {
    pub my_files_volume: bool,
}

impl FeatureFlags for VolumeFlags {
    fn is_my_files_volume_enabled(&self) -> bool {
        self.my_files_volume
    }
}

/// Removes the selected entries from the in-memory listing. Never touches the
/// disk.
pub struct DeleteEntriesCommand {
    model: Rc<BrowserModel>,
    flags: Rc<dyn FeatureFlags>,
    enabled: Cell<bool>,
}

impl DeleteEntriesCommand {
    pub fn new(model: Rc<BrowserModel>, flags: Rc<dyn FeatureFlags>) -> Self {
        DeleteEntriesCommand {
            model,
            flags,
            enabled: Cell::new(false),
        }
    }

    #[cfg(test)]
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }
}

impl Command for DeleteEntriesCommand {
    fn can_execute_change(&self, _context: &ListContext) {
        let selection = self.model.selection();
        let enabled = !delete_button_hidden(&selection, self.model.as_ref(), self.flags.as_ref());
        self.enabled.set(enabled);
    }

    fn execute(&self, context: &ListContext) {
        if !self.enabled.get() {
            debug!(directory = %context.directory, "delete is disabled");
            return;
        }
        let paths: Vec<String> = self
            .model
            .selection()
            .entries
            .into_iter()
            .map(|e| e.full_path)
            .collect();
        let removed = self.model.remove_entries(&paths);
        info!(
            directory = %context.directory,
            selected = paths.len(),
            removed,
            "deleted entries from listing"
        );
    }
}

pub struct NavigationPane {
    expanded: Cell<bool>,
}

impl NavigationPane {
    pub fn new() -> Self {
        NavigationPane {
            expanded: Cell::new(true),
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded.get()
    }

    pub fn toggle(&self) {
        self.expanded.set(!self.expanded.get());
    }

    pub fn columns(&self) -> u16 {
        if self.expanded.get() {
            NAVIGATION_EXPANDED_COLUMNS
        } else {
            NAVIGATION_COLLAPSED_COLUMNS
        }
    }
}

impl NavigationList for NavigationPane {
    fn computed_width(&self) -> f32 {
        f32::from(self.columns()) * CELL_WIDTH_PX
    }
}

/// Fits `components` (root first) into `available` columns by dropping
/// leading components behind an ellipsis, then cutting the last one.
pub fn elide_path(components: &[String], available: usize) -> String {
    let full = components.join(" › ");
    if full.chars().count() <= available {
        return full;
    }
    for start in 1..components.len() {
        let candidate = format!("… › {}", components[start..].join(" › "));
        if candidate.chars().count() <= available {
            return candidate;
        }
    }
    let last = components.last().map(String::as_str).unwrap_or("");
    if available == 0 {
        return String::new();
    }
    let kept: String = last.chars().take(available.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Location line: the current directory as breadcrumbs, truncated to the room
/// the toolbar buttons leave.
pub struct Breadcrumb {
    toolbar: Rc<Toolbar>,
    model: Rc<BrowserModel>,
    volume_label: String,
    total_columns: Cell<u16>,
    displayed: RefCell<String>,
}

impl Breadcrumb {
    pub fn new(toolbar: Rc<Toolbar>, model: Rc<BrowserModel>, volume_label: &str) -> Self {
        Breadcrumb {
            toolbar,
            model,
            volume_label: volume_label.to_string(),
            total_columns: Cell::new(80),
            displayed: RefCell::new(String::new()),
        }
    }

    pub fn set_total_columns(&self, columns: u16) {
        self.total_columns.set(columns);
    }

    pub fn displayed(&self) -> String {
        self.displayed.borrow().clone()
    }

    fn available_columns(&self) -> usize {
        let mut used = 0usize;
        for element in self.toolbar.elements() {
            if element.hidden {
                continue;
            }
            match element.kind {
                ElementKind::Spacer => {
                    used += element.width_px.map(px_to_columns).unwrap_or(0) as usize
                }
                // The cancel button sits inside the spacer.
                ElementKind::IconButton | ElementKind::ComboButton
                    if element.id != CANCEL_SELECTION_BUTTON_ID =>
                {
                    used += button_columns(&element.text) as usize
                }
                _ => {}
            }
        }
        // Borders on both sides.
        (self.total_columns.get() as usize).saturating_sub(used + 2)
    }
}

pub fn button_columns(text: &str) -> u16 {
    text.chars().count() as u16 + 3
}

impl LocationLine for Breadcrumb {
    fn truncate(&self) {
        let mut components = vec![self.volume_label.clone()];
        components.extend(
            self.model
                .current_dir()
                .split('/')
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        );
        let text = elide_path(&components, self.available_columns());
        *self.displayed.borrow_mut() = text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn short_paths_are_untouched() {
        let path = parts(&["My files", "Downloads"]);
        assert_eq!(elide_path(&path, 40), "My files › Downloads");
    }

    #[test]
    fn leading_components_are_elided_first() {
        let path = parts(&["My files", "Downloads", "photos", "2024"]);
        assert_eq!(elide_path(&path, 17), "… › photos › 2024");
        assert_eq!(elide_path(&path, 16), "… › 2024");
    }

    #[test]
    fn last_component_is_cut_when_nothing_else_fits() {
        let path = parts(&["My files", "a-very-long-folder-name"]);
        assert_eq!(elide_path(&path, 6), "a-ver…");
        assert_eq!(elide_path(&path, 0), "");
    }

    #[test]
    fn navigation_width_tracks_expansion() {
        let pane = NavigationPane::new();
        assert_eq!(pane.computed_width(), 22.0 * CELL_WIDTH_PX);
        pane.toggle();
        assert_eq!(pane.computed_width(), 4.0 * CELL_WIDTH_PX);
        assert_eq!(px_to_columns(pane.computed_width()), 4);
    }
}
