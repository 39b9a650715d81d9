use crate::store::WidgetStore;

pub const SCRATCHPAD_KEY: &str = "scratchpadText";

/// Free-form notes, stored raw under `scratchpadText`
pub struct ScratchpadState {
    text: String,
    store: WidgetStore,
}

impl ScratchpadState {
    pub fn load(store: WidgetStore) -> Self {
        let text = store.load_raw(SCRATCHPAD_KEY).unwrap_or_default();
        Self { text, store }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text, saving only when it actually changed
    pub fn set_text(&mut self, text: String) -> bool {
        if text == self.text {
            return false;
        }
        self.text = text;
        self.store.save_raw(SCRATCHPAD_KEY, &self.text);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        assert_eq!(ScratchpadState::load(WidgetStore::ephemeral()).text(), "");
    }

    #[test]
    fn test_text_round_trips_raw() {
        let store = WidgetStore::ephemeral();
        let mut pad = ScratchpadState::load(store.clone());
        assert!(pad.set_text("notes\n{\"not\": json}".to_string()));

        assert_eq!(
            store.load_raw(SCRATCHPAD_KEY).as_deref(),
            Some("notes\n{\"not\": json}")
        );
        assert_eq!(ScratchpadState::load(store).text(), "notes\n{\"not\": json}");
    }

    #[test]
    fn test_unchanged_text_is_not_saved() {
        let mut pad = ScratchpadState::load(WidgetStore::ephemeral());
        assert!(!pad.set_text(String::new()));
        assert!(pad.set_text("a".to_string()));
        assert!(!pad.set_text("a".to_string()));
    }
}
