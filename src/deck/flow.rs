use rand::{
    seq::IndexedRandom,
    Rng,
};
use tracing::debug;

use super::{
    queue::select_queue_ids,
    VocabRepository,
};
use crate::core::{
    Category,
    VocabItem,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// No session; the category menu is showing.
    Menu,
    /// The active category has nothing left to draw.
    Empty,
    /// Term and tone glyph shown, answer hidden.
    Front,
    /// Term, phonetic hint and translation shown.
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub category: Category,
    pub queue: Vec<usize>, // ids matching the category at the last draw
    pub current: Option<usize>,
    pub revealed: bool,
}

impl Session {
    fn new(category: Category) -> Self {
        Self { category, queue: Vec::new(), current: None, revealed: false }
    }
}

/// Front/back card lifecycle for one category at a time.
#[derive(Debug, Clone)]
pub struct ReviewFlow {
    state: FlowState,
    session: Option<Session>,
}

impl Default for ReviewFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewFlow {
    pub fn new() -> Self {
        Self { state: FlowState::Menu, session: None }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn category(&self) -> Option<Category> {
        self.session.as_ref().map(|s| s.category)
    }

    pub fn current_id(&self) -> Option<usize> {
        self.session.as_ref().and_then(|s| s.current)
    }

    pub fn current_item<'a>(&self, repo: &'a VocabRepository) -> Option<&'a VocabItem> {
        self.current_id().and_then(|id| repo.find_by_id(id))
    }

    pub fn enter_category<R: Rng + ?Sized>(
        &mut self,
        repo: &VocabRepository,
        category: Category,
        rng: &mut R,
    ) -> FlowState {
        self.session = Some(Session::new(category));
        self.draw(repo, rng)
    }

    /// Shows the answer side. Only valid on the front of a card.
    pub fn reveal(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if self.state != FlowState::Front || session.current.is_none() {
            return false;
        }
        session.revealed = true;
        self.state = FlowState::Back;
        true
    }

    /// Re-filters the queue for the same category and draws again.
    pub fn next<R: Rng + ?Sized>(&mut self, repo: &VocabRepository, rng: &mut R) -> FlowState {
        if self.session.is_none() {
            return self.state;
        }
        self.draw(repo, rng)
    }

    pub fn exit_category(&mut self) {
        self.session = None;
        self.state = FlowState::Menu;
    }

    fn draw<R: Rng + ?Sized>(&mut self, repo: &VocabRepository, rng: &mut R) -> FlowState {
        let Some(session) = self.session.as_mut() else {
            return self.state;
        };

        session.queue = select_queue_ids(repo.items(), session.category);
        session.current = session.queue.choose(rng).copied();
        session.revealed = false;

        self.state = match session.current {
            Some(id) => {
                debug!(id, category = ?session.category, queue = session.queue.len(), "drew card");
                FlowState::Front
            }
            None => FlowState::Empty,
        };
        self.state
    }
}
