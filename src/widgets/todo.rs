use crate::store::WidgetStore;
use serde::{Deserialize, Serialize};

pub const TODOS_KEY: &str = "todos";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub text: String,
    pub completed: bool,
}

/// Todo list state, saved under `todos` after every mutation
pub struct TodoListState {
    items: Vec<TodoItem>,
    selected: Option<usize>,
    store: WidgetStore,
}

impl TodoListState {
    pub fn load(store: WidgetStore) -> Self {
        let items: Vec<TodoItem> = store.load_json(TODOS_KEY).unwrap_or_default();
        tracing::debug!("Loaded {} todos", items.len());
        let selected = if items.is_empty() { None } else { Some(0) };
        Self {
            items,
            selected,
            store,
        }
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Append an item. Blank input is ignored; otherwise the text is kept as typed.
    pub fn add(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.items.push(TodoItem {
            text: text.to_string(),
            completed: false,
        });
        self.selected = Some(self.items.len() - 1);
        self.persist();
        true
    }

    pub fn toggle(&mut self, index: usize) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.completed = !item.completed;
                self.persist();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.items.remove(index);
        self.selected = match self.items.len() {
            0 => None,
            len => Some(index.min(len - 1)),
        };
        self.persist();
        true
    }

    pub fn toggle_selected(&mut self) -> bool {
        self.selected.is_some_and(|i| self.toggle(i))
    }

    pub fn remove_selected(&mut self) -> bool {
        self.selected.is_some_and(|i| self.remove(i))
    }

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = Some(self.selected.map_or(0, |i| (i + 1).min(self.items.len() - 1)));
        }
    }

    pub fn select_previous(&mut self) {
        if !self.items.is_empty() {
            self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
        }
    }

    fn persist(&self) {
        self.store.save_json(TODOS_KEY, &self.items);
    }
}
