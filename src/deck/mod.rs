pub mod flow;
pub mod queue;
pub mod reconciler;
pub mod repository;

pub use flow::{
    FlowState,
    ReviewFlow,
    Session,
};
pub use queue::{
    select_queue,
    select_queue_ids,
};
pub use reconciler::{
    ClassifyOutcome,
    PendingUpdate,
    UpdateReconciler,
    WriteMode,
};
pub use repository::VocabRepository;
