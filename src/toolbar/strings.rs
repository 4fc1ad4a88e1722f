use super::model::Localizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    OneFileSelected,
    OneDirectorySelected,
    ManyFilesSelected,
    ManyDirectoriesSelected,
    ManyEntriesSelected,
}

/// Built-in English message table. Templates use `$1` for the count.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishStrings;

impl EnglishStrings {
    fn template(key: MessageKey) -> &'static str {
        match key {
            MessageKey::OneFileSelected => "1 file selected",
            MessageKey::OneDirectorySelected => "1 folder selected",
            MessageKey::ManyFilesSelected => "$1 files selected",
            MessageKey::ManyDirectoriesSelected => "$1 folders selected",
            MessageKey::ManyEntriesSelected => "$1 items selected",
        }
    }
}

impl Localizer for EnglishStrings {
    fn message(&self, key: MessageKey) -> String {
        Self::template(key).to_string()
    }

    fn message_with_count(&self, key: MessageKey, count: usize) -> String {
        Self::template(key).replace("$1", &count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_is_substituted() {
        let strings = EnglishStrings;
        assert_eq!(
            strings.message_with_count(MessageKey::ManyFilesSelected, 3),
            "3 files selected"
        );
        assert_eq!(
            strings.message_with_count(MessageKey::ManyEntriesSelected, 12),
            "12 items selected"
        );
    }

    #[test]
    fn singular_messages_have_no_placeholder() {
        let strings = EnglishStrings;
        assert_eq!(strings.message(MessageKey::OneFileSelected), "1 file selected");
        assert_eq!(
            strings.message(MessageKey::OneDirectorySelected),
            "1 folder selected"
        );
    }
}
