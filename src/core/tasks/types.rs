use crate::{
    core::DeckError,
    deck::PendingUpdate,
    store::RawRow,
};

#[derive(Debug)]
pub enum TaskResult {
    /// `generation` identifies the load request; only the latest one is delivered.
    VocabularyLoaded { generation: u64, result: Result<Vec<RawRow>, DeckError> },
    FlagUpdated { pending: PendingUpdate, result: Result<(), DeckError> },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::VocabularyLoaded { .. } => "vocabulary_loaded",
            TaskResult::FlagUpdated { .. } => "flag_updated",
        }
    }
}
