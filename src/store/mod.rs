use std::future::Future;

pub mod api;
pub mod sheet;

#[cfg(test)]
pub mod fake;

pub use api::{
    RawCell,
    RawRow,
    UpdateRequest,
    UpdateResponse,
};
pub use sheet::SheetStore;

use crate::core::DeckError;

/// The spreadsheet behind the deck: a read-only table plus a single-cell update endpoint.
pub trait RemoteStore {
    fn fetch_rows(&self) -> impl Future<Output = Result<Vec<RawRow>, DeckError>>;

    /// Resolves to `Ok` only when the store confirmed the write.
    fn update_flag(
        &self,
        request: &UpdateRequest,
    ) -> impl Future<Output = Result<UpdateResponse, DeckError>>;

    /// False when no usable update endpoint is configured.
    fn can_write(&self) -> bool;
}

/// Runs an update and folds a semantic refusal into the error path.
pub async fn confirm_update<S: RemoteStore>(
    store: &S,
    request: &UpdateRequest,
) -> Result<(), DeckError> {
    store.update_flag(request).await?.into_result()
}
