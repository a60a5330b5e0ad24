//! Authoritative board state with persistence and change notification.
//!
//! [`BoardStore`] owns the in-memory [`Board`], writes the whole board to its
//! [`Storage`] after every successful mutation and tells subscribers about
//! each change. The in-memory board stays authoritative for the session even
//! when a write fails.

use crate::{
    config::StoreConfig,
    domain::{Board, Column, TaskDraft, TaskFields, TaskId},
    error::Result,
    storage::Storage,
};
use std::fmt;
use uuid::Uuid;

/// Change applied to the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    Loaded,
    TaskAdded { id: TaskId, column: Column },
    TaskUpdated { id: TaskId },
    TaskDeleted { id: TaskId, column: Column },
    TaskMoved { id: TaskId, from: Column, to: Column },
}

/// Result of reading the persisted board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored under the key
    Empty,
    /// Board replaced with the stored one
    Restored { tasks: usize },
    /// Stored value could not be parsed; in-memory board left as it was
    Corrupt,
}

/// Handle returned by [`BoardStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type Observer = Box<dyn Fn(&BoardEvent, &Board) + Send + Sync>;

/// Serializes a board into the persisted layout
pub fn serialize_board(board: &Board, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(board)?
    } else {
        serde_json::to_string(board)?
    };
    Ok(json)
}

/// Parses a board from the persisted layout
pub fn deserialize_board(raw: &str) -> Result<Board> {
    Ok(serde_json::from_str(raw)?)
}

/// Owns the board, persists it after every change and notifies observers
pub struct BoardStore {
    board: Board,
    storage: Box<dyn Storage>,
    config: StoreConfig,
    observers: Vec<(SubscriptionId, Observer)>,
}

impl BoardStore {
    /// Creates a store with an empty board and default settings
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self::with_config(storage, StoreConfig::default())
    }

    pub fn with_config(storage: impl Storage + 'static, config: StoreConfig) -> Self {
        Self {
            board: Board::default(),
            storage: Box::new(storage),
            config,
            observers: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Initializes the storage backend and reads the board stored under the
    /// configured key.
    ///
    /// A missing or unparseable value leaves the in-memory board untouched and
    /// the stored value is not rewritten until the next successful mutation.
    pub async fn load(&mut self) -> Result<LoadOutcome> {
        let key = self.config.storage_key.as_str();
        self.storage.initialize().await?;

        let Some(raw) = self.storage.get(key).await? else {
            tracing::debug!(key, "no saved board");
            return Ok(LoadOutcome::Empty);
        };

        let board = match deserialize_board(&raw) {
            Ok(board) => board,
            Err(err) => {
                tracing::error!(key, error = %err, "failed to parse saved board");
                return Ok(LoadOutcome::Corrupt);
            }
        };

        let duplicates = board.duplicate_ids();
        if !duplicates.is_empty() {
            tracing::warn!(key, ?duplicates, "saved board contains duplicate task ids");
        }

        let tasks = board.len();
        self.board = board;
        tracing::debug!(key, tasks, "board restored");
        self.notify(&BoardEvent::Loaded);
        Ok(LoadOutcome::Restored { tasks })
    }

    /// Writes the full board under the configured key
    pub async fn save(&self) -> Result<()> {
        let json = serialize_board(&self.board, self.config.pretty)?;
        self.storage.set(&self.config.storage_key, &json).await
    }

    /// Creates a task at the end of `column`
    pub async fn add_task(&mut self, column: Column, fields: TaskFields) -> Result<TaskId> {
        let id = self.board.add_task(column, fields)?;
        tracing::debug!(task_id = %id, column = column.key(), "task added");
        self.commit(&[BoardEvent::TaskAdded { id, column }]).await?;
        Ok(id)
    }

    /// Replaces the fields of a task; its column is kept
    pub async fn update_task(&mut self, id: TaskId, fields: TaskFields) -> Result<()> {
        self.board.update_task(id, fields)?;
        tracing::debug!(task_id = %id, "task updated");
        self.commit(&[BoardEvent::TaskUpdated { id }]).await
    }

    /// Removes a task, returning the column that held it
    pub async fn delete_task(&mut self, id: TaskId) -> Result<Column> {
        let (column, _) = self.board.delete_task(id)?;
        tracing::debug!(task_id = %id, column = column.key(), "task deleted");
        self.commit(&[BoardEvent::TaskDeleted { id, column }]).await?;
        Ok(column)
    }

    /// Moves a task between columns; `Ok(false)` when `from == to`
    pub async fn move_task(&mut self, id: TaskId, from: Column, to: Column) -> Result<bool> {
        if !self.board.move_task(id, from, to)? {
            return Ok(false);
        }
        tracing::debug!(task_id = %id, from = from.key(), to = to.key(), "task moved");
        self.commit(&[BoardEvent::TaskMoved { id, from, to }]).await?;
        Ok(true)
    }

    /// Applies an edit-form submission: fields are replaced and, when the
    /// draft names another column, the task is moved there.
    pub async fn apply_edit(&mut self, id: TaskId, draft: &TaskDraft) -> Result<()> {
        let from = self.board.update_task(id, draft.fields())?;
        let mut events = vec![BoardEvent::TaskUpdated { id }];

        if self.board.move_task(id, from, draft.column)? {
            events.push(BoardEvent::TaskMoved {
                id,
                from,
                to: draft.column,
            });
        }

        tracing::debug!(task_id = %id, column = draft.column.key(), "task edited");
        self.commit(&events).await
    }

    /// Registers an observer called after every change
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: Fn(&BoardEvent, &Board) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    async fn commit(&self, events: &[BoardEvent]) -> Result<()> {
        let saved = self.save().await;
        if let Err(err) = &saved {
            tracing::warn!(
                key = self.config.storage_key.as_str(),
                error = %err,
                "failed to persist board; keeping in-memory state"
            );
        }

        for event in events {
            self.notify(event);
        }
        saved
    }

    fn notify(&self, event: &BoardEvent) {
        for (_, observer) in &self.observers {
            observer(event, &self.board);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::Priority,
        error::BoardError,
        storage::MemoryStorage,
    };
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    const KEY: &str = StoreConfig::DEFAULT_STORAGE_KEY;

    /// Storage whose writes always fail, reads nothing
    struct RejectingStorage;

    #[async_trait]
    impl Storage for RejectingStorage {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(BoardError::StorageError("quota exceeded".to_string()))
        }

        async fn remove(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    /// Shares a MemoryStorage so tests can inspect what was written
    struct SharedStorage(Arc<MemoryStorage>);

    #[async_trait]
    impl Storage for SharedStorage {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<()> {
            self.0.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<()> {
            self.0.remove(key).await
        }
    }

    fn fields(title: &str, priority: Priority) -> TaskFields {
        TaskFields::new(title, "", priority)
    }

    fn shared_store() -> (BoardStore, Arc<MemoryStorage>) {
        let memory = Arc::new(MemoryStorage::new());
        (BoardStore::new(SharedStorage(memory.clone())), memory)
    }

    #[tokio::test]
    async fn test_write_spec_scenario() {
        let (mut store, memory) = shared_store();

        let id = store
            .add_task(Column::Todo, fields("Write spec", Priority::Medium))
            .await
            .unwrap();
        assert_eq!(store.board().tasks(Column::Todo).len(), 1);

        assert!(store.move_task(id, Column::Todo, Column::Done).await.unwrap());
        assert!(store.board().tasks(Column::Todo).is_empty());
        assert_eq!(store.board().tasks(Column::Done)[0].id, id);

        store.delete_task(id).await.unwrap();
        assert!(store.board().is_empty());

        let saved = memory.get(KEY).await.unwrap().unwrap();
        assert_eq!(deserialize_board(&saved).unwrap(), Board::default());
    }

    #[tokio::test]
    async fn test_every_change_is_persisted() {
        let (mut store, memory) = shared_store();

        let id = store
            .add_task(Column::InProgress, fields("Persist me", Priority::High))
            .await
            .unwrap();
        let saved = deserialize_board(&memory.get(KEY).await.unwrap().unwrap()).unwrap();
        assert_eq!(&saved, store.board());

        store
            .update_task(id, fields("Renamed", Priority::Low))
            .await
            .unwrap();
        let saved = deserialize_board(&memory.get(KEY).await.unwrap().unwrap()).unwrap();
        assert_eq!(saved.find(id).unwrap().1.title, "Renamed");
    }

    #[tokio::test]
    async fn test_blank_title_is_rejected_without_write() {
        let (mut store, memory) = shared_store();

        let result = store.add_task(Column::Todo, fields("   ", Priority::Low)).await;

        assert!(matches!(result, Err(BoardError::EmptyTitle)));
        assert!(store.board().is_empty());
        assert_eq!(memory.get(KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_same_column_move_does_not_persist() {
        let (mut store, memory) = shared_store();
        let id = store
            .add_task(Column::Todo, fields("Stay", Priority::Low))
            .await
            .unwrap();
        memory.remove(KEY).await.unwrap();

        assert!(!store.move_task(id, Column::Todo, Column::Todo).await.unwrap());
        assert_eq!(memory.get(KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_load_restores_saved_board() {
        let mut first = BoardStore::new(MemoryStorage::new());
        first
            .add_task(Column::Done, fields("Shipped", Priority::High))
            .await
            .unwrap();
        let raw = serialize_board(first.board(), false).unwrap();

        let mut second = BoardStore::new(MemoryStorage::with_entry(KEY, raw));
        let outcome = second.load().await.unwrap();

        assert_eq!(outcome, LoadOutcome::Restored { tasks: 1 });
        assert_eq!(second.board(), first.board());
    }

    #[tokio::test]
    async fn test_load_missing_key() {
        let mut store = BoardStore::new(MemoryStorage::new());
        assert_eq!(store.load().await.unwrap(), LoadOutcome::Empty);
        assert!(store.board().is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_value_keeps_default_and_storage() {
        let memory = Arc::new(MemoryStorage::with_entry(KEY, "{not json"));
        let mut store = BoardStore::new(SharedStorage(memory.clone()));

        assert_eq!(store.load().await.unwrap(), LoadOutcome::Corrupt);
        assert!(store.board().is_empty());
        assert_eq!(memory.get(KEY).await.unwrap().as_deref(), Some("{not json"));
    }

    #[tokio::test]
    async fn test_load_accepts_reference_layout() {
        let raw = r#"{
            "todo": [{"id": 1718000000000, "title": "Plan", "description": "", "priority": "low"}],
            "inProgress": [],
            "done": [{"id": 1718000000001, "title": "Ship", "description": "v1", "priority": "high"}]
        }"#;
        let mut store = BoardStore::new(MemoryStorage::with_entry(KEY, raw));

        assert_eq!(
            store.load().await.unwrap(),
            LoadOutcome::Restored { tasks: 2 }
        );
        let (column, task) = store.board().find(TaskId::new(1718000000001)).unwrap();
        assert_eq!(column, Column::Done);
        assert_eq!(task.description, "v1");
    }

    #[tokio::test]
    async fn test_add_after_restoring_largest_id_fails_cleanly() {
        let raw = r#"{
            "todo": [{"id": 18446744073709551615, "title": "Last", "description": "", "priority": "low"}],
            "inProgress": [],
            "done": []
        }"#;
        let memory = Arc::new(MemoryStorage::with_entry(KEY, raw));
        let mut store = BoardStore::new(SharedStorage(memory.clone()));

        assert_eq!(
            store.load().await.unwrap(),
            LoadOutcome::Restored { tasks: 1 }
        );
        assert!(matches!(
            store.add_task(Column::Todo, fields("One more", Priority::High)).await,
            Err(BoardError::TaskIdsExhausted(_))
        ));
        assert_eq!(store.board().len(), 1);
        assert_eq!(memory.get(KEY).await.unwrap().as_deref(), Some(raw));
    }

    #[tokio::test]
    async fn test_configured_storage_key() {
        let memory = Arc::new(MemoryStorage::new());
        let config = StoreConfig::default().with_storage_key("team-board");
        let mut store = BoardStore::with_config(SharedStorage(memory.clone()), config);

        store
            .add_task(Column::Todo, fields("Keyed", Priority::Medium))
            .await
            .unwrap();

        assert!(memory.get("team-board").await.unwrap().is_some());
        assert_eq!(memory.get(KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_failure_keeps_in_memory_change() {
        let mut store = BoardStore::new(RejectingStorage);

        let result = store
            .add_task(Column::Todo, fields("Unsaved", Priority::Medium))
            .await;

        assert!(matches!(result, Err(BoardError::StorageError(_))));
        assert_eq!(store.board().len(), 1);
    }

    #[tokio::test]
    async fn test_observers_receive_events() {
        let (mut store, _) = shared_store();
        let seen: Arc<Mutex<Vec<(BoardEvent, usize)>>> = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        let subscription = store.subscribe(move |event, board| {
            sink.lock().unwrap().push((event.clone(), board.len()));
        });

        let id = store
            .add_task(Column::Todo, fields("Observed", Priority::Low))
            .await
            .unwrap();
        store.move_task(id, Column::Todo, Column::Done).await.unwrap();

        assert!(store.unsubscribe(subscription));
        assert!(!store.unsubscribe(subscription));
        store.delete_task(id).await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                (
                    BoardEvent::TaskAdded {
                        id,
                        column: Column::Todo
                    },
                    1
                ),
                (
                    BoardEvent::TaskMoved {
                        id,
                        from: Column::Todo,
                        to: Column::Done
                    },
                    1
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_apply_edit_relocates_task() {
        let (mut store, _) = shared_store();
        let id = store
            .add_task(Column::Todo, fields("Draft", Priority::Low))
            .await
            .unwrap();

        let draft = TaskDraft::new("Final", Column::InProgress).with_priority(Priority::High);
        store.apply_edit(id, &draft).await.unwrap();

        let (column, task) = store.board().find(id).unwrap();
        assert_eq!(column, Column::InProgress);
        assert_eq!(task.title, "Final");
        assert_eq!(task.priority, Priority::High);
        assert!(store.board().tasks(Column::Todo).is_empty());
    }

    #[tokio::test]
    async fn test_update_task_never_moves() {
        let (mut store, _) = shared_store();
        let id = store
            .add_task(Column::Done, fields("Done thing", Priority::Low))
            .await
            .unwrap();

        store
            .update_task(id, fields("Still done", Priority::Medium))
            .await
            .unwrap();

        assert_eq!(store.board().column_of(id), Some(Column::Done));
    }

    #[tokio::test]
    async fn test_missing_ids_report_not_found() {
        let (mut store, memory) = shared_store();
        let ghost = TaskId::new(42);

        assert!(matches!(
            store.update_task(ghost, fields("x", Priority::Low)).await,
            Err(BoardError::TaskNotFound(_))
        ));
        assert!(matches!(
            store.delete_task(ghost).await,
            Err(BoardError::TaskNotFound(_))
        ));
        assert!(matches!(
            store.move_task(ghost, Column::Todo, Column::Done).await,
            Err(BoardError::TaskNotInColumn { .. })
        ));
        assert_eq!(memory.get(KEY).await.unwrap(), None);
    }
}
