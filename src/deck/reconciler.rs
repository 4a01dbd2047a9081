use rand::Rng;
use tracing::{
    error,
    info,
    warn,
};

use super::{
    FlowState,
    ReviewFlow,
    VocabRepository,
};
use crate::{
    core::{
        ClassifyError,
        DeckError,
        Flag,
    },
    store::{
        confirm_update,
        RemoteStore,
        UpdateRequest,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Remote,
    /// No update endpoint: change the local copy only.
    LocalOnly,
}

/// A classification that has been accepted and is waiting for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpdate {
    pub item_id: usize,
    pub request: UpdateRequest,
    pub mode: WriteMode,
}

impl PendingUpdate {
    pub fn flag(&self) -> Flag {
        self.request.column
    }

    pub fn value(&self) -> bool {
        self.request.value == 1
    }
}

#[derive(Debug)]
pub enum ClassifyOutcome {
    Applied,
    AppliedLocally { first_warning: bool },
    /// Nothing was changed locally and the card was not advanced.
    Failed(DeckError),
}

/// Coordinates a flag write with the repository and the review flow.
#[derive(Debug, Default)]
pub struct UpdateReconciler {
    in_flight: bool,
    warned_local_only: bool,
}

impl UpdateReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn begin(
        &mut self,
        repo: &VocabRepository,
        flow: &ReviewFlow,
        flag: Flag,
        value: bool,
        can_write: bool,
    ) -> Result<PendingUpdate, ClassifyError> {
        if self.in_flight {
            return Err(ClassifyError::Busy);
        }
        let item = flow.current_item(repo).ok_or(ClassifyError::NoCurrentItem)?;
        if flow.state() != FlowState::Back {
            return Err(ClassifyError::NotRevealed);
        }

        self.in_flight = true;
        Ok(PendingUpdate {
            item_id: item.id,
            request: UpdateRequest::new(item.term.clone(), flag, value),
            mode: if can_write { WriteMode::Remote } else { WriteMode::LocalOnly },
        })
    }

    /// Settles a pending update. `result` is ignored for local-only updates.
    pub fn complete<R: Rng + ?Sized>(
        &mut self,
        pending: PendingUpdate,
        result: Result<(), DeckError>,
        repo: &mut VocabRepository,
        flow: &mut ReviewFlow,
        rng: &mut R,
    ) -> ClassifyOutcome {
        self.in_flight = false;

        let outcome = match (pending.mode, result) {
            (WriteMode::LocalOnly, _) => {
                let first_warning = !self.warned_local_only;
                self.warned_local_only = true;
                warn!(
                    term = %pending.request.term,
                    column = pending.flag().column(),
                    "update endpoint not configured; change kept locally only"
                );
                ClassifyOutcome::AppliedLocally { first_warning }
            }
            (WriteMode::Remote, Ok(())) => {
                info!(
                    term = %pending.request.term,
                    column = pending.flag().column(),
                    value = pending.request.value,
                    "flag saved"
                );
                ClassifyOutcome::Applied
            }
            (WriteMode::Remote, Err(e)) => {
                error!(term = %pending.request.term, error = %e, "flag update failed");
                return ClassifyOutcome::Failed(e);
            }
        };

        // A reload while the request was out can put another word at this id.
        let same_word = match repo.find_by_id(pending.item_id) {
            Some(item) if item.term == pending.request.term => true,
            Some(item) => {
                warn!(
                    id = pending.item_id,
                    expected = %pending.request.term,
                    found = %item.term,
                    "vocabulary changed under a pending update; local copy left as loaded"
                );
                false
            }
            None => {
                warn!(
                    id = pending.item_id,
                    term = %pending.request.term,
                    "pending update for a word no longer in the deck"
                );
                false
            }
        };
        if !same_word {
            return outcome;
        }

        repo.apply_flag(pending.item_id, pending.flag(), pending.value());

        // The user may have left the card while the request was out.
        if flow.state() == FlowState::Back && flow.current_id() == Some(pending.item_id) {
            flow.next(repo, rng);
        }
        outcome
    }

    /// begin, write, complete in one call.
    pub async fn classify<S: RemoteStore, R: Rng + ?Sized>(
        &mut self,
        store: &S,
        repo: &mut VocabRepository,
        flow: &mut ReviewFlow,
        flag: Flag,
        value: bool,
        rng: &mut R,
    ) -> Result<ClassifyOutcome, ClassifyError> {
        let pending = self.begin(repo, flow, flag, value, store.can_write())?;
        let result = match pending.mode {
            WriteMode::Remote => confirm_update(store, &pending.request).await,
            WriteMode::LocalOnly => Ok(()),
        };
        Ok(self.complete(pending, result, repo, flow, rng))
    }
}

#[cfg(test)]
mod tests {
    use rand::{
        rngs::StdRng,
        SeedableRng,
    };

    use super::*;
    use crate::{
        core::Category,
        deck::select_queue_ids,
        store::{
            fake::{
                sample_rows,
                FakeStore,
            },
            UpdateResponse,
        },
    };

    struct Fixture {
        store: FakeStore,
        repo: VocabRepository,
        flow: ReviewFlow,
        reconciler: UpdateReconciler,
        rng: StdRng,
    }

    impl Fixture {
        fn new(store: FakeStore) -> Self {
            let repo = VocabRepository::load(store.rows.clone());
            Self {
                store,
                repo,
                flow: ReviewFlow::new(),
                reconciler: UpdateReconciler::new(),
                rng: StdRng::seed_from_u64(11),
            }
        }

        /// Enters `category` and reveals its (single) card.
        fn reveal(&mut self, category: Category) {
            self.flow.enter_category(&self.repo, category, &mut self.rng);
            assert!(self.flow.reveal());
        }

        async fn classify(&mut self, flag: Flag, value: bool) -> Result<ClassifyOutcome, ClassifyError> {
            self.reconciler
                .classify(&self.store, &mut self.repo, &mut self.flow, flag, value, &mut self.rng)
                .await
        }
    }

    #[tokio::test]
    async fn confirmed_too_easy_moves_item_out_of_daily() {
        let mut fx = Fixture::new(FakeStore::with_rows(sample_rows()));
        fx.reveal(Category::Daily);
        assert_eq!(fx.flow.current_id(), Some(0));

        let outcome = fx.classify(Flag::TooEasy, true).await.unwrap();
        assert!(matches!(outcome, ClassifyOutcome::Applied));
        assert!(fx.repo.find_by_id(0).unwrap().too_easy);
        assert_eq!(fx.store.last_request(), Some(UpdateRequest::new("爱", Flag::TooEasy, true)));

        assert_eq!(fx.flow.state(), FlowState::Empty);
        assert!(select_queue_ids(fx.repo.items(), Category::TooEasy).contains(&0));
        assert!(!fx.reconciler.is_in_flight());
    }

    #[tokio::test]
    async fn to_learn_on_a_mastered_item_keeps_both_shelves() {
        let mut fx = Fixture::new(FakeStore::with_rows(sample_rows()));
        fx.reveal(Category::TooEasy);
        assert_eq!(fx.flow.current_item(&fx.repo).unwrap().term, "好");

        fx.classify(Flag::ToLearn, true).await.unwrap();
        assert!(fx.repo.find_by_id(1).unwrap().to_learn);
        assert!(!select_queue_ids(fx.repo.items(), Category::Daily).contains(&1));
        assert!(select_queue_ids(fx.repo.items(), Category::ToLearn).contains(&1));
        assert_eq!(fx.flow.state(), FlowState::Front);
    }

    #[tokio::test]
    async fn transport_failure_changes_nothing() {
        let store = FakeStore::with_rows(sample_rows());
        store.push_reply(Err(DeckError::Timeout));
        let mut fx = Fixture::new(store);
        fx.reveal(Category::Daily);
        let before = fx.repo.items().to_vec();

        let outcome = fx.classify(Flag::TooEasy, true).await.unwrap();
        assert!(matches!(outcome, ClassifyOutcome::Failed(DeckError::Timeout)));
        assert_eq!(fx.repo.items(), before.as_slice());
        assert_eq!(fx.flow.state(), FlowState::Back);
        assert_eq!(fx.flow.current_id(), Some(0));
        assert!(!fx.reconciler.is_in_flight());
    }

    #[tokio::test]
    async fn refused_write_is_handled_like_a_transport_failure() {
        let store = FakeStore::with_rows(sample_rows());
        store.push_reply(Ok(UpdateResponse::error("Character not found: 爱")));
        let mut fx = Fixture::new(store);
        fx.reveal(Category::Daily);

        let outcome = fx.classify(Flag::ToLearn, true).await.unwrap();
        assert!(matches!(outcome, ClassifyOutcome::Failed(DeckError::Rejected(_))));
        assert!(!fx.repo.find_by_id(0).unwrap().to_learn);
        assert_eq!(fx.flow.state(), FlowState::Back);

        // Retrying the same action is allowed and now succeeds.
        let outcome = fx.classify(Flag::ToLearn, true).await.unwrap();
        assert!(matches!(outcome, ClassifyOutcome::Applied));
        assert_eq!(fx.store.calls(), 2);
    }

    #[tokio::test]
    async fn setting_and_clearing_restores_daily_membership() {
        let mut fx = Fixture::new(FakeStore::with_rows(sample_rows()));
        fx.reveal(Category::Daily);
        fx.classify(Flag::TooEasy, true).await.unwrap();
        assert!(select_queue_ids(fx.repo.items(), Category::Daily).is_empty());

        fx.flow.exit_category();
        fx.flow.enter_category(&fx.repo, Category::TooEasy, &mut fx.rng);
        while fx.flow.current_id() != Some(0) {
            fx.flow.next(&fx.repo, &mut fx.rng);
        }
        assert!(fx.flow.reveal());
        fx.classify(Flag::TooEasy, false).await.unwrap();

        assert_eq!(select_queue_ids(fx.repo.items(), Category::Daily), [0]);
    }

    #[tokio::test]
    async fn classify_requires_the_answer_side() {
        let mut fx = Fixture::new(FakeStore::with_rows(sample_rows()));
        assert!(matches!(fx.classify(Flag::TooEasy, true).await, Err(ClassifyError::NoCurrentItem)));

        fx.flow.enter_category(&fx.repo, Category::Daily, &mut fx.rng);
        assert!(matches!(fx.classify(Flag::TooEasy, true).await, Err(ClassifyError::NotRevealed)));
        assert_eq!(fx.store.calls(), 0);
        assert!(!fx.reconciler.is_in_flight());
    }

    #[test]
    fn second_begin_while_in_flight_is_dropped() {
        let mut fx = Fixture::new(FakeStore::with_rows(sample_rows()));
        fx.reveal(Category::Daily);

        let pending = fx.reconciler.begin(&fx.repo, &fx.flow, Flag::TooEasy, true, true).unwrap();
        assert_eq!(pending.mode, WriteMode::Remote);
        assert_eq!(
            fx.reconciler.begin(&fx.repo, &fx.flow, Flag::ToLearn, true, true),
            Err(ClassifyError::Busy)
        );

        fx.reconciler.complete(pending, Ok(()), &mut fx.repo, &mut fx.flow, &mut fx.rng);
        assert!(!fx.reconciler.is_in_flight());
    }

    #[tokio::test]
    async fn unconfigured_endpoint_applies_locally_and_warns_once() {
        let rows = crate::store::fake::sheet_rows(&[
            ("一", "yī", "one", "→", 0, 0),
            ("二", "èr", "two", "↘", 0, 0),
        ]);
        let mut fx = Fixture::new(FakeStore::with_rows(rows).read_only());

        fx.reveal(Category::Daily);
        let first = fx.flow.current_id().unwrap();
        let outcome = fx.classify(Flag::ToLearn, true).await.unwrap();
        assert!(matches!(outcome, ClassifyOutcome::AppliedLocally { first_warning: true }));
        assert!(fx.repo.find_by_id(first).unwrap().to_learn);
        assert_eq!(fx.flow.state(), FlowState::Front);

        assert!(fx.flow.reveal());
        let outcome = fx.classify(Flag::ToLearn, true).await.unwrap();
        assert!(matches!(outcome, ClassifyOutcome::AppliedLocally { first_warning: false }));
        assert_eq!(fx.flow.state(), FlowState::Empty);
        assert_eq!(fx.store.calls(), 0);
    }

    #[test]
    fn result_arriving_after_leaving_the_card_still_applies() {
        let mut fx = Fixture::new(FakeStore::with_rows(sample_rows()));
        fx.reveal(Category::ToLearn);
        let pending = fx.reconciler.begin(&fx.repo, &fx.flow, Flag::ToLearn, false, true).unwrap();

        fx.flow.exit_category();
        let outcome =
            fx.reconciler.complete(pending, Ok(()), &mut fx.repo, &mut fx.flow, &mut fx.rng);

        assert!(matches!(outcome, ClassifyOutcome::Applied));
        assert!(!fx.repo.find_by_id(2).unwrap().to_learn);
        assert_eq!(fx.flow.state(), FlowState::Menu);
    }

    #[test]
    fn result_for_an_item_gone_after_reload_is_ignored() {
        let mut fx = Fixture::new(FakeStore::with_rows(sample_rows()));
        fx.reveal(Category::Daily);
        let pending = fx.reconciler.begin(&fx.repo, &fx.flow, Flag::TooEasy, true, true).unwrap();

        fx.repo = VocabRepository::empty();
        fx.flow.exit_category();
        let outcome =
            fx.reconciler.complete(pending, Ok(()), &mut fx.repo, &mut fx.flow, &mut fx.rng);

        assert!(matches!(outcome, ClassifyOutcome::Applied));
        assert!(fx.repo.is_empty());
        assert_eq!(fx.flow.state(), FlowState::Menu);
        assert!(!fx.reconciler.is_in_flight());
    }

    #[test]
    fn result_is_not_applied_to_a_different_word_after_reload() {
        let mut fx = Fixture::new(FakeStore::with_rows(sample_rows()));
        fx.reveal(Category::Daily);
        assert_eq!(fx.flow.current_item(&fx.repo).unwrap().term, "爱");
        let pending = fx.reconciler.begin(&fx.repo, &fx.flow, Flag::TooEasy, true, true).unwrap();

        // Rows reordered in the sheet: 爱 is no longer row 0.
        fx.repo = VocabRepository::load(crate::store::fake::sheet_rows(&[
            ("好", "hǎo", "good", "↗", 0, 0),
            ("爱", "ài", "love", "↘", 0, 0),
        ]));
        fx.flow.exit_category();
        let outcome =
            fx.reconciler.complete(pending, Ok(()), &mut fx.repo, &mut fx.flow, &mut fx.rng);

        assert!(matches!(outcome, ClassifyOutcome::Applied));
        assert_eq!(fx.repo.find_by_id(0).unwrap().term, "好");
        assert!(!fx.repo.find_by_id(0).unwrap().too_easy);
        assert!(!fx.repo.find_by_id(1).unwrap().too_easy);
        assert!(!fx.reconciler.is_in_flight());
    }
}
