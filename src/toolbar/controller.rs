use std::rc::Rc;

use tracing::{debug, trace};

use super::model::{
    Command, DirectoryModel, FeatureFlags, ListContainer, LocationLine, Localizer, NavigationList,
    RootType, Selection, SelectionSource,
};
use super::strings::MessageKey;
use super::view::{ElementId, Toolbar, ToolbarError};

pub const CANCEL_SELECTION_BUTTON_ID: &str = "cancel-selection-button";
pub const CANCEL_SELECTION_BUTTON_WRAPPER_ID: &str = "cancel-selection-button-wrapper";
pub const FILES_SELECTED_LABEL_ID: &str = "files-selected-label";
pub const DELETE_BUTTON_ID: &str = "delete-button";
pub const DELETE_COMMAND_ID: &str = "delete";

/// Path of the Downloads folder inside the unified "My files" volume.
const DOWNLOADS_FOLDER_PATH: &str = "/Downloads";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarEvent {
    SelectionChanged,
    CancelSelectionClicked,
    DeleteClicked,
    NavigationListRelayout,
}

/// Result of the label rules. `Unchanged` leaves whatever text the label had.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelText {
    Set(String),
    Unchanged,
}

pub fn selection_label(selection: &Selection, strings: &dyn Localizer) -> LabelText {
    label_for_counts(
        selection.total_count(),
        selection.file_count(),
        selection.directory_count(),
        strings,
    )
}

/// `selection_label` on raw counts. The single-entry case with both a file
/// and a directory counted leaves the label as it was; a [`Selection`]
/// derives its counts from its entries, so it never produces that case and
/// the branch is only reachable through this function.
pub(super) fn label_for_counts(
    total: usize,
    files: usize,
    directories: usize,
    strings: &dyn Localizer,
) -> LabelText {
    if total == 0 {
        LabelText::Set(String::new())
    } else if total == 1 {
        if directories == 0 {
            LabelText::Set(strings.message(MessageKey::OneFileSelected))
        } else if files == 0 {
            LabelText::Set(strings.message(MessageKey::OneDirectorySelected))
        } else {
            LabelText::Unchanged
        }
    } else if directories == 0 {
        LabelText::Set(strings.message_with_count(MessageKey::ManyFilesSelected, files))
    } else if files == 0 {
        LabelText::Set(strings.message_with_count(MessageKey::ManyDirectoriesSelected, directories))
    } else {
        LabelText::Set(strings.message_with_count(MessageKey::ManyEntriesSelected, total))
    }
}

pub fn delete_button_hidden(
    selection: &Selection,
    directory_model: &dyn DirectoryModel,
    flags: &dyn FeatureFlags,
) -> bool {
    selection.total_count() == 0
        || directory_model.is_read_only()
        || selection.has_read_only_entry()
        || (flags.is_my_files_volume_enabled()
            && directory_model.current_root_type() == RootType::Downloads
            && selection
                .entries
                .iter()
                .any(|entry| entry.full_path == DOWNLOADS_FOLDER_PATH))
}

/// Everything the controller talks to besides its own toolbar.
pub struct Collaborators {
    pub navigation_list: Rc<dyn NavigationList>,
    pub list_container: Rc<dyn ListContainer>,
    pub location_line: Rc<dyn LocationLine>,
    pub selection_source: Rc<dyn SelectionSource>,
    pub directory_model: Rc<dyn DirectoryModel>,
    pub feature_flags: Rc<dyn FeatureFlags>,
    pub strings: Rc<dyn Localizer>,
}

/// Keeps the toolbar (label, delete button, cancel spacer) and the shared
/// selection flags in line with the current selection.
///
/// Holds no state of its own between events: every handler reads the
/// collaborators afresh.
pub struct ToolbarController {
    toolbar: Rc<Toolbar>,
    cancel_selection_button: ElementId,
    cancel_selection_button_wrapper: ElementId,
    files_selected_label: ElementId,
    delete_button: ElementId,
    delete_command: Rc<dyn Command>,
    deps: Collaborators,
}

impl ToolbarController {
    pub fn new(toolbar: Rc<Toolbar>, deps: Collaborators) -> Result<Self, ToolbarError> {
        let cancel_selection_button = toolbar.query_required(CANCEL_SELECTION_BUTTON_ID)?;
        let cancel_selection_button_wrapper =
            toolbar.query_required(CANCEL_SELECTION_BUTTON_WRAPPER_ID)?;
        let files_selected_label = toolbar.query_required(FILES_SELECTED_LABEL_ID)?;
        let delete_button = toolbar.query_required(DELETE_BUTTON_ID)?;
        let delete_command = toolbar.owner_document().query_command(DELETE_COMMAND_ID)?;

        // Button visibility changes the width left for the location line.
        let buttons = toolbar.query_buttons();
        debug!(count = buttons.len(), "watching toolbar buttons");
        toolbar.observe_attributes(&buttons);

        Ok(ToolbarController {
            toolbar,
            cancel_selection_button,
            cancel_selection_button_wrapper,
            files_selected_label,
            delete_button,
            delete_command,
            deps,
        })
    }

    pub fn toolbar(&self) -> &Rc<Toolbar> {
        &self.toolbar
    }

    /// Runs the handler for `event`, then delivers attribute mutations the
    /// handler (or anything before it) caused on watched buttons.
    pub fn handle(&self, event: ToolbarEvent) {
        trace!(?event, "toolbar event");
        match event {
            ToolbarEvent::SelectionChanged => self.on_selection_changed(),
            ToolbarEvent::CancelSelectionClicked => self.on_cancel_selection_clicked(),
            ToolbarEvent::DeleteClicked => self.on_delete_clicked(),
            ToolbarEvent::NavigationListRelayout => self.on_navigation_list_relayout(),
        }
        self.flush_mutations();
    }

    /// Routes a click on a toolbar element to its handler. Returns false when
    /// the element has no click handler.
    pub fn click(&self, target: ElementId) -> bool {
        let event = if target == self.cancel_selection_button {
            ToolbarEvent::CancelSelectionClicked
        } else if target == self.delete_button {
            ToolbarEvent::DeleteClicked
        } else {
            return false;
        };
        self.handle(event);
        true
    }

    pub fn flush_mutations(&self) {
        for record in self.toolbar.take_mutations() {
            trace!(
                element = ?record.target,
                attribute = ?record.attribute,
                "toolbar button mutated"
            );
            self.on_toolbar_buttons_mutated();
        }
    }

    fn on_selection_changed(&self) {
        let selection = self.deps.selection_source.selection();
        let directory_model = self.deps.directory_model.as_ref();

        if let LabelText::Set(text) = selection_label(&selection, self.deps.strings.as_ref()) {
            self.toolbar.set_text(self.files_selected_label, &text);
        }

        let hidden =
            delete_button_hidden(&selection, directory_model, self.deps.feature_flags.as_ref());
        self.toolbar.set_hidden(self.delete_button, hidden);

        let mode = directory_model.selection_mode();
        if mode.multiple {
            let ui_state = self.toolbar.owner_document().ui_state();
            ui_state.set_selecting(selection.total_count() > 0);
            if ui_state.is_check_select() != mode.check_select_mode {
                ui_state.set_check_select(mode.check_select_mode);
                ui_state.update_styles();
            }
        }

        debug!(
            total = selection.total_count(),
            delete_hidden = hidden,
            "selection changed"
        );
    }

    fn on_cancel_selection_clicked(&self) {
        self.deps.directory_model.select_entries(&[]);
    }

    fn on_delete_clicked(&self) {
        self.toolbar.blur(self.delete_button);
        let list = self.deps.list_container.current_list();
        self.delete_command.can_execute_change(&list);
        self.delete_command.execute(&list);
    }

    fn on_navigation_list_relayout(&self) {
        let width = self.deps.navigation_list.computed_width();
        self.toolbar
            .set_width_px(self.cancel_selection_button_wrapper, width);
    }

    fn on_toolbar_buttons_mutated(&self) {
        self.deps.location_line.truncate();
    }
}
