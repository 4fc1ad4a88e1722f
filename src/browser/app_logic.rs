use super::app_state::{BrowserConfig, BrowserModel};
use super::collaborators::{Breadcrumb, DeleteEntriesCommand, NavigationPane, VolumeFlags};
use super::event_handler::EventQueue;
use crate::toolbar::{
    CANCEL_SELECTION_BUTTON_ID, CANCEL_SELECTION_BUTTON_WRAPPER_ID, Collaborators,
    DELETE_BUTTON_ID, DELETE_COMMAND_ID, DirectoryModel, Document, Element, ElementKind,
    EnglishStrings, Entry, FILES_SELECTED_LABEL_ID, FeatureFlags, LocationLine, SelectionSource,
    Toolbar, ToolbarController, ToolbarError, ToolbarEvent, UiState,
};
use crossterm::event::{KeyCode, KeyEvent};
use std::rc::Rc;
use tracing::debug;

/// Styles of the file list derived from the shared selection flags; rebuilt
/// whenever the flags ask for a style update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ListStyle {
    pub(super) show_checkboxes: bool,
}

impl ListStyle {
    fn from_ui_state(ui_state: &UiState) -> Self {
        ListStyle {
            show_checkboxes: ui_state.is_check_select(),
        }
    }
}

/// What the toolbar shows right now, for headless output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarSummary {
    pub label: String,
    pub delete_visible: bool,
    pub selecting: bool,
    pub check_select: bool,
}

fn build_toolbar(document: Rc<Document>) -> Toolbar {
    let toolbar = Toolbar::new(document);
    toolbar.append(Element::new(
        CANCEL_SELECTION_BUTTON_WRAPPER_ID,
        ElementKind::Spacer,
        "",
    ));
    toolbar.append(Element::new(
        CANCEL_SELECTION_BUTTON_ID,
        ElementKind::IconButton,
        "✕",
    ));
    toolbar.append(Element::new(FILES_SELECTED_LABEL_ID, ElementKind::Label, ""));
    toolbar.append(Element::new(DELETE_BUTTON_ID, ElementKind::IconButton, "Delete").hidden());
    toolbar.append(Element::new("view-button", ElementKind::IconButton, "View"));
    toolbar.append(Element::new("sort-button", ElementKind::ComboButton, "Sort ▾"));
    toolbar
}

pub struct BrowserApp {
    pub(super) model: Rc<BrowserModel>,
    pub(super) navigation: Rc<NavigationPane>,
    pub(super) breadcrumb: Rc<Breadcrumb>,
    pub(super) ui_state: Rc<UiState>,
    pub(super) controller: ToolbarController,
    pub(super) list_style: ListStyle,
    pub(super) scroll_offset: usize,
    pub(super) list_viewport_height: usize,
    pub(super) quit: bool,
    events: Rc<EventQueue>,
    delete_command: Rc<DeleteEntriesCommand>,
    seen_style_generation: u64,
}

impl BrowserApp {
    pub fn new(volume: Vec<Entry>, config: &BrowserConfig) -> Result<Self, ToolbarError> {
        let events = Rc::new(EventQueue::new());
        let ui_state = Rc::new(UiState::new());
        let document = Rc::new(Document::new(ui_state.clone()));
        let model = Rc::new(BrowserModel::new(volume, config, events.clone()));
        let flags: Rc<dyn FeatureFlags> = Rc::new(VolumeFlags {
            my_files_volume: config.my_files_volume,
        });

        let delete_command = Rc::new(DeleteEntriesCommand::new(model.clone(), flags.clone()));
        document.register_command(DELETE_COMMAND_ID, delete_command.clone());

        let toolbar = Rc::new(build_toolbar(document));
        let navigation = Rc::new(NavigationPane::new());
        let volume_label = if config.my_files_volume {
            "My files"
        } else {
            "Volume"
        };
        let breadcrumb = Rc::new(Breadcrumb::new(toolbar.clone(), model.clone(), volume_label));

        let controller = ToolbarController::new(
            toolbar,
            Collaborators {
                navigation_list: navigation.clone(),
                list_container: model.clone(),
                location_line: breadcrumb.clone(),
                selection_source: model.clone(),
                directory_model: model.clone(),
                feature_flags: flags,
                strings: Rc::new(EnglishStrings),
            },
        )?;

        let list_style = ListStyle::from_ui_state(&ui_state);
        let seen_style_generation = ui_state.style_generation();
        let mut app = BrowserApp {
            model,
            navigation,
            breadcrumb,
            ui_state,
            controller,
            list_style,
            scroll_offset: 0,
            list_viewport_height: 0,
            quit: false,
            events,
            delete_command,
            seen_style_generation,
        };
        // Bring the toolbar in line with the initial state.
        app.events.push(ToolbarEvent::NavigationListRelayout);
        app.events.push(ToolbarEvent::SelectionChanged);
        app.pump_events();
        app.breadcrumb_changed();
        Ok(app)
    }

    /// Delivers every queued toolbar notification, including those raised
    /// while handling earlier ones.
    pub fn pump_events(&mut self) {
        while let Some(event) = self.events.pop() {
            self.controller.handle(event);
        }
        let generation = self.ui_state.style_generation();
        if generation != self.seen_style_generation {
            self.seen_style_generation = generation;
            self.list_style = ListStyle::from_ui_state(&self.ui_state);
            debug!(
                show_checkboxes = self.list_style.show_checkboxes,
                "list style updated"
            );
        }
    }

    pub fn resize(&mut self, columns: u16) {
        self.breadcrumb.set_total_columns(columns);
        self.breadcrumb_changed();
    }

    fn breadcrumb_changed(&self) {
        self.breadcrumb.truncate();
    }

    fn click(&mut self, element_id: &str) {
        let toolbar = self.controller.toolbar().clone();
        match toolbar.query_required(element_id) {
            Ok(target) if !toolbar.is_hidden(target) => {
                toolbar.focus(target);
                self.controller.click(target);
            }
            Ok(_) => debug!(element_id, "click on hidden toolbar element ignored"),
            Err(e) => debug!("{}", e),
        }
    }

    /// Replaces the selection with the listed entries whose path (without the
    /// leading `/`) matches any of `patterns`.
    pub fn select_matching(&mut self, patterns: &[glob::Pattern]) {
        let matching: Vec<Entry> = self
            .model
            .visible_entries()
            .into_iter()
            .filter(|e| {
                let relative = e.full_path.trim_start_matches('/');
                patterns.iter().any(|p| p.matches(relative))
            })
            .collect();
        self.model.select_entries(&matching);
        self.pump_events();
    }

    pub fn open_directory(&mut self, dir: &str) {
        for component in dir.split('/').filter(|c| !c.is_empty()) {
            let position = self
                .model
                .visible_entries()
                .iter()
                .position(|e| e.is_dir && e.full_path.rsplit('/').next() == Some(component));
            let Some(position) = position else {
                break;
            };
            let cursor = self.model.cursor() as i32;
            self.model.move_cursor(position as i32 - cursor);
            self.model.open_cursor_directory();
        }
        self.breadcrumb_changed();
        self.pump_events();
    }

    pub fn summary(&self) -> ToolbarSummary {
        let toolbar = self.controller.toolbar();
        let element_of = |id: &str| {
            toolbar
                .query_required(id)
                .map(|e| toolbar.element(e))
                .ok()
        };
        ToolbarSummary {
            label: element_of(FILES_SELECTED_LABEL_ID)
                .map(|e| e.text)
                .unwrap_or_default(),
            delete_visible: element_of(DELETE_BUTTON_ID)
                .map(|e| !e.hidden)
                .unwrap_or(false),
            selecting: self.ui_state.is_selecting(),
            check_select: self.ui_state.is_check_select(),
        }
    }

    pub(super) fn selected_count(&self) -> usize {
        self.model.selection().total_count()
    }

    pub(super) fn handle_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.model.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.model.move_cursor(-1),
            KeyCode::Char(' ') => self.model.toggle_cursor_selection(),
            KeyCode::Enter => {
                self.model.open_cursor_directory();
                self.breadcrumb_changed();
            }
            KeyCode::Backspace => {
                self.model.go_up();
                self.breadcrumb_changed();
            }
            KeyCode::Char('v') => self.model.toggle_check_select(),
            KeyCode::Char('x') | KeyCode::Esc => self.click(CANCEL_SELECTION_BUTTON_ID),
            KeyCode::Char('D') | KeyCode::Delete => self.click(DELETE_BUTTON_ID),
            KeyCode::Char('n') => {
                self.navigation.toggle();
                self.events.push(ToolbarEvent::NavigationListRelayout);
            }
            _ => {}
        }
    }

    pub(super) fn ensure_cursor_visible(&mut self) {
        if self.list_viewport_height == 0 {
            return;
        }
        let cursor = self.model.cursor();
        if cursor < self.scroll_offset {
            self.scroll_offset = cursor;
        } else if cursor >= self.scroll_offset + self.list_viewport_height {
            self.scroll_offset = cursor + 1 - self.list_viewport_height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolbar::RootType;
    use crossterm::event::KeyModifiers;

    fn volume() -> Vec<Entry> {
        vec![
            Entry::directory("/Downloads"),
            Entry::file("/Downloads/a.txt"),
            Entry::file("/Downloads/b.txt"),
            Entry::directory("/Downloads/photos"),
            Entry::file("/notes.md"),
            Entry::file("/readme.md").read_only(),
        ]
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

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn patterns(globs: &[&str]) -> Vec<glob::Pattern> {
        globs.iter().map(|g| glob::Pattern::new(g).unwrap()).collect()
    }

    #[test]
    fn starts_with_empty_toolbar() {
        let app = BrowserApp::new(volume(), &config()).unwrap();
        let summary = app.summary();
        assert_eq!(summary.label, "");
        assert!(!summary.delete_visible);
        assert!(!summary.selecting);
    }

    #[test]
    fn headless_selection_updates_toolbar() {
        let mut app = BrowserApp::new(volume(), &config()).unwrap();
        app.open_directory("Downloads");
        app.select_matching(&patterns(&["**/*.txt"]));
        let summary = app.summary();
        assert_eq!(summary.label, "2 files selected");
        assert!(summary.delete_visible);
        assert!(summary.selecting);

        app.select_matching(&patterns(&["Downloads/*"]));
        assert_eq!(app.summary().label, "3 items selected");
    }

    #[test]
    fn downloads_folder_cannot_be_deleted_from_my_files() {
        let mut app = BrowserApp::new(volume(), &config()).unwrap();
        app.select_matching(&patterns(&["Downloads"]));
        let summary = app.summary();
        assert_eq!(summary.label, "1 folder selected");
        assert!(!summary.delete_visible);
    }

    #[test]
    fn delete_key_removes_selection_from_listing() {
        let mut app = BrowserApp::new(volume(), &config()).unwrap();
        app.select_matching(&patterns(&["notes.md"]));
        assert!(app.summary().delete_visible);

        app.handle_key(key(KeyCode::Char('D')));
        app.pump_events();

        assert!(app.delete_command.is_enabled());
        assert!(
            app.model
                .visible_entries()
                .iter()
                .all(|e| e.full_path != "/notes.md")
        );
        assert_eq!(app.summary().label, "");
    }

    #[test]
    fn hidden_delete_button_ignores_key() {
        let mut app = BrowserApp::new(volume(), &config()).unwrap();
        app.select_matching(&patterns(&["readme.md"]));
        assert!(!app.summary().delete_visible);
        app.handle_key(key(KeyCode::Delete));
        app.pump_events();
        assert_eq!(app.model.visible_entries().len(), 3);
    }

    #[test]
    fn escape_cancels_selection() {
        let mut app = BrowserApp::new(volume(), &config()).unwrap();
        app.select_matching(&patterns(&["*.md"]));
        assert_eq!(app.summary().label, "2 files selected");
        app.handle_key(key(KeyCode::Esc));
        app.pump_events();
        assert_eq!(app.selected_count(), 0);
        assert!(!app.summary().selecting);
    }

    #[test]
    fn check_select_toggle_rebuilds_list_style() {
        let mut app = BrowserApp::new(volume(), &config()).unwrap();
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Char('v')));
        app.pump_events();
        assert!(app.summary().check_select);
        assert!(app.list_style.show_checkboxes);
    }

    #[test]
    fn collapsing_navigation_resizes_spacer() {
        let mut app = BrowserApp::new(volume(), &config()).unwrap();
        let toolbar = app.controller.toolbar().clone();
        let wrapper = toolbar
            .query_required(CANCEL_SELECTION_BUTTON_WRAPPER_ID)
            .unwrap();
        let expanded = toolbar.width_px(wrapper).unwrap();
        app.handle_key(key(KeyCode::Char('n')));
        app.pump_events();
        assert!(toolbar.width_px(wrapper).unwrap() < expanded);
    }

    #[test]
    fn breadcrumb_elides_leading_folders_in_narrow_toolbar() {
        let mut app = BrowserApp::new(volume(), &config()).unwrap();
        app.resize(60);
        app.open_directory("Downloads/photos");
        assert_eq!(app.model.current_dir(), "/Downloads/photos");
        assert_eq!(app.breadcrumb.displayed(), "… › photos");
    }

    #[test]
    fn delete_button_appearing_retruncates_breadcrumb() {
        let mut app = BrowserApp::new(volume(), &config()).unwrap();
        app.resize(52);
        assert_eq!(app.breadcrumb.displayed(), "My files");

        app.select_matching(&patterns(&["notes.md"]));
        assert!(app.summary().delete_visible);
        assert_eq!(app.breadcrumb.displayed(), "My…");
    }
}
