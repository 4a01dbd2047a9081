use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use tokio::runtime::Runtime;
use tracing::debug;

use super::TaskResult;
use crate::{
    core::DeckError,
    deck::PendingUpdate,
    store::{
        confirm_update,
        RemoteStore,
    },
};

/// Runs store calls off the UI thread and hands results back through a channel.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    load_generation: u64,
}

impl TaskManager {
    pub fn new() -> Result<Self, DeckError> {
        let runtime = Arc::new(Runtime::new()?);

        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, receiver, sender, load_generation: 0 })
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            debug!(task = result.task_type(), "task finished");
            if let TaskResult::VocabularyLoaded { generation, .. } = &result {
                if *generation != self.load_generation {
                    debug!(generation, current = self.load_generation, "dropping superseded load");
                    continue;
                }
            }
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    /// Starts a load. Results of loads started earlier are discarded when they arrive.
    pub fn load_vocabulary<S>(&mut self, store: Arc<S>)
    where
        S: RemoteStore + Send + Sync + 'static,
    {
        self.load_generation += 1;
        let generation = self.load_generation;
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(store.fetch_rows());
            let _ = sender.send(TaskResult::VocabularyLoaded { generation, result });
        });
    }

    pub fn submit_update<S>(&self, store: Arc<S>, pending: PendingUpdate)
    where
        S: RemoteStore + Send + Sync + 'static,
    {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(confirm_update(store.as_ref(), &pending.request));
            let _ = sender.send(TaskResult::FlagUpdated { pending, result });
        });
    }
}
