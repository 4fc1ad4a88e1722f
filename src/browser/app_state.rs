use super::event_handler::EventQueue;
use crate::toolbar::{
    DirectoryModel, Entry, ListContainer, ListContext, RootType, Selection, SelectionMode,
    SelectionSource, ToolbarEvent,
};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserConfig {
    pub read_only: bool,
    pub root_type: RootType,
    pub multiple: bool,
    pub check_select: bool,
    pub my_files_volume: bool,
}

struct Listing {
    volume: Vec<Entry>,
    current_dir: String,
    cursor: usize,
    selected: BTreeSet<String>,
    check_select: bool,
}

/// In-memory view over the scanned volume: one directory listed at a time,
/// a cursor, and the set of selected entries.
pub struct BrowserModel {
    listing: RefCell<Listing>,
    read_only: bool,
    root_type: RootType,
    multiple: bool,
    events: Rc<EventQueue>,
}

pub fn parent_of(full_path: &str) -> &str {
    match full_path.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &full_path[..idx],
    }
}

fn is_within(path: &str, dir: &str) -> bool {
    path == dir || path.starts_with(&format!("{}/", dir.trim_end_matches('/')))
}

impl BrowserModel {
    pub fn new(volume: Vec<Entry>, config: &BrowserConfig, events: Rc<EventQueue>) -> Self {
        BrowserModel {
            listing: RefCell::new(Listing {
                volume,
                current_dir: "/".to_string(),
                cursor: 0,
                selected: BTreeSet::new(),
                check_select: config.check_select,
            }),
            read_only: config.read_only,
            root_type: config.root_type,
            multiple: config.multiple,
            events,
        }
    }

    pub fn current_dir(&self) -> String {
        self.listing.borrow().current_dir.clone()
    }

    pub fn cursor(&self) -> usize {
        self.listing.borrow().cursor
    }

    /// Children of the current directory, directories first.
    pub fn visible_entries(&self) -> Vec<Entry> {
        let listing = self.listing.borrow();
        let mut children: Vec<Entry> = listing
            .volume
            .iter()
            .filter(|e| parent_of(&e.full_path) == listing.current_dir)
            .cloned()
            .collect();
        children.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then(a.full_path.cmp(&b.full_path)));
        children
    }

    pub fn is_selected(&self, full_path: &str) -> bool {
        self.listing.borrow().selected.contains(full_path)
    }

    pub fn move_cursor(&self, delta: i32) {
        let len = self.visible_entries().len();
        if len == 0 {
            return;
        }
        let mut listing = self.listing.borrow_mut();
        listing.cursor = (listing.cursor as i32 + delta).rem_euclid(len as i32) as usize;
    }

    pub fn toggle_cursor_selection(&self) {
        let Some(entry) = self.visible_entries().get(self.cursor()).cloned() else {
            return;
        };
        {
            let mut listing = self.listing.borrow_mut();
            if listing.selected.contains(&entry.full_path) {
                listing.selected.remove(&entry.full_path);
            } else {
                if !self.multiple {
                    listing.selected.clear();
                }
                listing.selected.insert(entry.full_path);
            }
        }
        self.selection_changed();
    }

    pub fn toggle_check_select(&self) {
        {
            let mut listing = self.listing.borrow_mut();
            listing.check_select = !listing.check_select;
        }
        self.selection_changed();
    }

    pub fn open_cursor_directory(&self) {
        let Some(entry) = self.visible_entries().get(self.cursor()).cloned() else {
            return;
        };
        if entry.is_dir {
            self.change_directory(entry.full_path);
        }
    }

    pub fn go_up(&self) {
        let current = self.current_dir();
        if current != "/" {
            self.change_directory(parent_of(&current).to_string());
        }
    }

    fn change_directory(&self, dir: String) {
        {
            let mut listing = self.listing.borrow_mut();
            listing.current_dir = dir;
            listing.cursor = 0;
            listing.selected.clear();
        }
        self.selection_changed();
    }

    /// Drops `paths` and everything below them from the in-memory volume.
    pub fn remove_entries(&self, paths: &[String]) -> usize {
        let removed = {
            let mut listing = self.listing.borrow_mut();
            let before = listing.volume.len();
            listing
                .volume
                .retain(|e| !paths.iter().any(|p| is_within(&e.full_path, p)));
            listing.selected.retain(|s| !paths.contains(s));
            before - listing.volume.len()
        };
        let len = self.visible_entries().len();
        {
            let mut listing = self.listing.borrow_mut();
            listing.cursor = listing.cursor.min(len.saturating_sub(1));
        }
        self.selection_changed();
        removed
    }

    fn selection_changed(&self) {
        {
            let mut listing = self.listing.borrow_mut();
            // Check-select mode ends with the last selected entry.
            if listing.selected.is_empty() {
                listing.check_select = false;
            }
        }
        self.events.push(ToolbarEvent::SelectionChanged);
    }
}

impl SelectionSource for BrowserModel {
    fn selection(&self) -> Selection {
        let listing = self.listing.borrow();
        Selection::new(
            listing
                .volume
                .iter()
                .filter(|e| listing.selected.contains(&e.full_path))
                .cloned()
                .collect(),
        )
    }
}

impl DirectoryModel for BrowserModel {
    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn current_root_type(&self) -> RootType {
        self.root_type
    }

    fn selection_mode(&self) -> SelectionMode {
        SelectionMode {
            multiple: self.multiple,
            check_select_mode: self.listing.borrow().check_select,
        }
    }

    fn select_entries(&self, entries: &[Entry]) {
        let listed: Vec<String> = self
            .visible_entries()
            .into_iter()
            .map(|e| e.full_path)
            .collect();
        {
            let mut listing = self.listing.borrow_mut();
            listing.selected = entries
                .iter()
                .filter(|e| listed.contains(&e.full_path))
                .map(|e| e.full_path.clone())
                .collect();
        }
        self.selection_changed();
    }
}

impl ListContainer for BrowserModel {
    fn current_list(&self) -> ListContext {
        ListContext {
            directory: self.current_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(config: BrowserConfig) -> (BrowserModel, Rc<EventQueue>) {
        let events = Rc::new(EventQueue::new());
        let volume = vec![
            Entry::directory("/Downloads"),
            Entry::file("/Downloads/a.txt"),
            Entry::file("/Downloads/b.txt"),
            Entry::file("/notes.md"),
        ];
        (BrowserModel::new(volume, &config, events.clone()), events)
    }

    fn config() -> BrowserConfig {
        BrowserConfig {
            read_only: false,
            root_type: RootType::Downloads,
            multiple: true,
            check_select: false,
            my_files_volume: true,
        }
    }

    #[test]
    fn parent_of_handles_root_children() {
        assert_eq!(parent_of("/Downloads"), "/");
        assert_eq!(parent_of("/Downloads/a.txt"), "/Downloads");
    }

    #[test]
    fn lists_directories_first() {
        let (model, _) = model(config());
        let names: Vec<String> = model
            .visible_entries()
            .into_iter()
            .map(|e| e.full_path)
            .collect();
        assert_eq!(names, vec!["/Downloads", "/notes.md"]);
    }

    #[test]
    fn toggling_selection_emits_change() {
        let (model, events) = model(config());
        model.toggle_cursor_selection();
        assert_eq!(events.pop(), Some(ToolbarEvent::SelectionChanged));
        assert_eq!(model.selection().total_count(), 1);
        assert_eq!(model.selection().directory_count(), 1);
    }

    #[test]
    fn single_select_replaces_previous_entry() {
        let (model, _) = model(BrowserConfig {
            multiple: false,
            ..config()
        });
        model.toggle_cursor_selection();
        model.move_cursor(1);
        model.toggle_cursor_selection();
        let selection = model.selection();
        assert_eq!(selection.total_count(), 1);
        assert_eq!(selection.entries[0].full_path, "/notes.md");
    }

    #[test]
    fn select_entries_with_empty_list_clears_selection() {
        let (model, events) = model(config());
        model.toggle_cursor_selection();
        model.select_entries(&[]);
        assert_eq!(model.selection().total_count(), 0);
        assert_eq!(events.pop(), Some(ToolbarEvent::SelectionChanged));
        assert_eq!(events.pop(), Some(ToolbarEvent::SelectionChanged));
        assert_eq!(events.pop(), None);
    }

    #[test]
    fn check_select_mode_ends_when_selection_empties() {
        let (model, _) = model(config());
        model.toggle_cursor_selection();
        model.toggle_check_select();
        assert!(model.selection_mode().check_select_mode);
        model.select_entries(&[]);
        assert!(!model.selection_mode().check_select_mode);
    }

    #[test]
    fn removing_a_directory_removes_its_contents() {
        let (model, _) = model(config());
        let removed = model.remove_entries(&["/Downloads".to_string()]);
        assert_eq!(removed, 3);
        model.open_cursor_directory();
        assert_eq!(model.current_dir(), "/");
    }

    #[test]
    fn changing_directory_clears_selection() {
        let (model, _) = model(config());
        model.toggle_cursor_selection();
        model.open_cursor_directory();
        assert_eq!(model.current_dir(), "/Downloads");
        assert_eq!(model.selection().total_count(), 0);
        assert_eq!(model.current_list().directory, "/Downloads");
        model.go_up();
        assert_eq!(model.current_dir(), "/");
    }
}
