pub mod errors;
pub mod http;
pub mod models;
pub mod settings;
pub mod tasks;

pub use errors::{
    ClassifyError,
    DeckError,
};
pub use models::{
    Category,
    CategoryCounts,
    Flag,
    ToneMarker,
    VocabItem,
};
pub use settings::DeckSettings;
pub use tasks::{
    TaskManager,
    TaskResult,
};
