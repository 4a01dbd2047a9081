use std::{
    collections::VecDeque,
    sync::{
        atomic::{
            AtomicU64,
            Ordering,
        },
        Mutex,
    },
};

use serde_json::json;

use super::{
    RawRow,
    RemoteStore,
    UpdateRequest,
    UpdateResponse,
};
use crate::core::DeckError;

/// In-memory store with scripted update replies. Unscripted updates succeed.
pub struct FakeStore {
    pub rows: Vec<RawRow>,
    pub writable: bool,
    pub replies: Mutex<VecDeque<Result<UpdateResponse, DeckError>>>,
    pub requests: Mutex<Vec<UpdateRequest>>,
    pub update_calls: AtomicU64,
}

impl Default for FakeStore {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            writable: true,
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            update_calls: AtomicU64::new(0),
        }
    }
}

impl FakeStore {
    pub fn with_rows(rows: Vec<RawRow>) -> Self {
        Self { rows, ..Self::default() }
    }

    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    pub fn push_reply(&self, reply: Result<UpdateResponse, DeckError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> u64 {
        self.update_calls.load(Ordering::Relaxed)
    }

    pub fn last_request(&self) -> Option<UpdateRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl RemoteStore for FakeStore {
    async fn fetch_rows(&self) -> Result<Vec<RawRow>, DeckError> {
        Ok(self.rows.clone())
    }

    async fn update_flag(&self, request: &UpdateRequest) -> Result<UpdateResponse, DeckError> {
        if !self.writable {
            return Err(DeckError::NotConfigured);
        }
        self.update_calls.fetch_add(1, Ordering::Relaxed);
        self.requests.lock().unwrap().push(request.clone());
        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| Ok(UpdateResponse::success()))
    }

    fn can_write(&self) -> bool {
        self.writable
    }
}

/// `(term, hint, translation, tone, too_easy, to_learn)` rows in sheet order.
pub fn sheet_rows(rows: &[(&str, &str, &str, &str, u8, u8)]) -> Vec<RawRow> {
    rows.iter()
        .map(|(term, hint, translation, tone, too_easy, to_learn)| {
            RawRow::from_values(vec![
                json!(term),
                json!(hint),
                json!(translation),
                json!(tone),
                json!(*too_easy as f64),
                json!(*to_learn as f64),
            ])
        })
        .collect()
}

/// The three-word deck used across the scenario tests.
pub fn sample_rows() -> Vec<RawRow> {
    sheet_rows(&[
        ("爱", "ài", "love", "↘", 0, 0),
        ("好", "hǎo", "good", "↗", 1, 0),
        ("学", "xué", "study", "↘", 0, 1),
    ])
}
