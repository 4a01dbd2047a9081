use crate::core::{
    Category,
    Flag,
};

// Views push actions; the app applies them after drawing so views only need shared borrows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    // Review flow
    EnterCategory(Category),
    Reveal,
    Classify { flag: Flag, value: bool },
    Next,
    ExitCategory,

    // Store
    Reload,
    OpenSettings,
}

pub struct ActionQueue {
    actions: Vec<UiAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    pub fn push(&mut self, action: UiAction) {
        self.actions.push(action);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, UiAction> {
        self.actions.drain(..)
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}
