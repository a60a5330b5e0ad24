//! UI-facing interaction state around a [`BoardStore`].
//!
//! Holds the transient selections a board screen needs (priority filter,
//! task being dragged, task awaiting delete confirmation, task being edited)
//! and turns UI events into store operations.

use crate::{
    domain::{board_view, Board, Column, PriorityFilter, TaskDraft, TaskId},
    error::{BoardError, Result},
    store::BoardStore,
};

/// A task picked up by a drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraggedTask {
    pub id: TaskId,
    pub from: Column,
}

/// Interaction state of a board screen, driving a [`BoardStore`]
pub struct BoardController {
    store: BoardStore,
    filter: PriorityFilter,
    dragged: Option<DraggedTask>,
    pending_delete: Option<TaskId>,
    editing: Option<TaskId>,
}

impl BoardController {
    pub fn new(store: BoardStore) -> Self {
        Self {
            store,
            filter: PriorityFilter::All,
            dragged: None,
            pending_delete: None,
            editing: None,
        }
    }

    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut BoardStore {
        &mut self.store
    }

    pub fn filter(&self) -> PriorityFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: PriorityFilter) {
        self.filter = filter;
    }

    /// Filtered, priority-sorted snapshot for display
    pub fn view(&self) -> Board {
        board_view(self.store.board(), self.filter)
    }

    /// Number of displayed tasks per column, in board order
    pub fn column_counts(&self) -> [(Column, usize); 3] {
        let view = self.view();
        Column::ALL.map(|column| (column, view.tasks(column).len()))
    }

    /// Adds a task from a new-task form submission
    pub async fn submit_new(&mut self, draft: &TaskDraft) -> Result<TaskId> {
        self.store.add_task(draft.column, draft.fields()).await
    }

    // Drag and drop

    pub fn start_drag(&mut self, id: TaskId, from: Column) {
        self.dragged = Some(DraggedTask { id, from });
    }

    pub fn dragged(&self) -> Option<DraggedTask> {
        self.dragged
    }

    pub fn cancel_drag(&mut self) {
        self.dragged = None;
    }

    /// Drops the dragged task on `to`. The drag is cleared whatever happens;
    /// `Ok(false)` when nothing was being dragged or the column is unchanged.
    pub async fn drop_on(&mut self, to: Column) -> Result<bool> {
        let Some(DraggedTask { id, from }) = self.dragged.take() else {
            return Ok(false);
        };
        self.store.move_task(id, from, to).await
    }

    // Delete confirmation

    pub fn request_delete(&mut self, id: TaskId) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<TaskId> {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the task awaiting confirmation; `Ok(None)` if none was pending
    pub async fn confirm_delete(&mut self) -> Result<Option<Column>> {
        let Some(id) = self.pending_delete.take() else {
            return Ok(None);
        };
        if self.editing == Some(id) {
            self.editing = None;
        }
        self.store.delete_task(id).await.map(Some)
    }

    // Editing

    /// Starts editing a task, returning the prefilled form data
    pub fn begin_edit(&mut self, id: TaskId) -> Result<TaskDraft> {
        let (column, task) = self
            .store
            .board()
            .find(id)
            .ok_or(BoardError::TaskNotFound(id))?;
        let draft = TaskDraft::from_task(task, column);
        self.editing = Some(id);
        Ok(draft)
    }

    pub fn editing(&self) -> Option<TaskId> {
        self.editing
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Applies the edit form. A blank title keeps the edit open.
    pub async fn submit_edit(&mut self, draft: &TaskDraft) -> Result<()> {
        let id = self.editing.ok_or(BoardError::NoActiveEdit)?;
        if !draft.is_valid() {
            return Err(BoardError::EmptyTitle);
        }
        self.editing = None;
        self.store.apply_edit(id, draft).await
    }
}
