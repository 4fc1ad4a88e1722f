// Toolbar state reconciliation: label text, delete button visibility, shared
// selection flags and layout hooks driven by selection and layout events.
mod controller;
mod model;
mod strings;
mod ui_state;
mod view;


pub use controller::{
    CANCEL_SELECTION_BUTTON_ID, CANCEL_SELECTION_BUTTON_WRAPPER_ID, Collaborators,
    DELETE_BUTTON_ID, DELETE_COMMAND_ID, FILES_SELECTED_LABEL_ID, ToolbarController,
    ToolbarEvent, delete_button_hidden,
};
pub use model::{
    Command, DirectoryModel, Entry, FeatureFlags, ListContainer, ListContext, LocationLine,
    NavigationList, RootType, Selection, SelectionMode, SelectionSource,
};
pub use strings::EnglishStrings;
pub use ui_state::UiState;
pub use view::{Document, Element, ElementKind, Toolbar, ToolbarError};
