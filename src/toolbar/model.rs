use super::strings::MessageKey;

/// A file or directory as seen by the toolbar. `full_path` is relative to the
/// volume root and always starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub full_path: String,
    pub is_dir: bool,
    pub read_only: bool,
}

#[cfg(test)]
impl Entry {
    pub fn file(full_path: impl Into<String>) -> Self {
        Entry {
            full_path: full_path.into(),
            is_dir: false,
            read_only: false,
        }
    }

    pub fn directory(full_path: impl Into<String>) -> Self {
        Entry {
            full_path: full_path.into(),
            is_dir: true,
            read_only: false,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

/// Snapshot of the selected entries. Counts are derived from `entries`, so
/// `total_count() == file_count() + directory_count()` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub entries: Vec<Entry>,
}

impl Selection {
    pub fn new(entries: Vec<Entry>) -> Self {
        Selection { entries }
    }

    pub fn total_count(&self) -> usize {
        self.entries.len()
    }

    pub fn file_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_dir).count()
    }

    pub fn directory_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_dir).count()
    }

    pub fn has_read_only_entry(&self) -> bool {
        self.entries.iter().any(|e| e.read_only)
    }
}

/// Classification of the volume the current directory belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootType {
    Downloads,
    Drive,
    Removable,
    Archive,
    Recent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionMode {
    pub multiple: bool,
    pub check_select_mode: bool,
}

/// Opaque handle to the list view a command operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListContext {
    pub directory: String,
}

pub trait SelectionSource {
    fn selection(&self) -> Selection;
}

pub trait DirectoryModel {
    fn is_read_only(&self) -> bool;
    fn current_root_type(&self) -> RootType;
    fn selection_mode(&self) -> SelectionMode;
    fn select_entries(&self, entries: &[Entry]);
}

pub trait ListContainer {
    fn current_list(&self) -> ListContext;
}

/// A command that decides for itself whether it may run. `execute` is
/// expected to do nothing while the command is disabled.
pub trait Command {
    fn can_execute_change(&self, context: &ListContext);
    fn execute(&self, context: &ListContext);
}

pub trait NavigationList {
    /// Rendered width in pixels, as currently laid out.
    fn computed_width(&self) -> f32;
}

pub trait LocationLine {
    fn truncate(&self);
}

pub trait FeatureFlags {
    fn is_my_files_volume_enabled(&self) -> bool;
}

pub trait Localizer {
    fn message(&self, key: MessageKey) -> String;
    fn message_with_count(&self, key: MessageKey, count: usize) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_split_files_and_directories() {
        let selection = Selection::new(vec![
            Entry::file("/a.txt"),
            Entry::directory("/docs"),
            Entry::file("/b.txt"),
        ]);
        assert_eq!(selection.total_count(), 3);
        assert_eq!(selection.file_count(), 2);
        assert_eq!(selection.directory_count(), 1);
        assert!(!selection.has_read_only_entry());
    }

    #[test]
    fn read_only_entry_is_detected() {
        let selection = Selection::new(vec![Entry::file("/a"), Entry::file("/b").read_only()]);
        assert!(selection.has_read_only_entry());
    }
}
