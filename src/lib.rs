//! # Kanban Board
//!
//! State machine, views and persistence for a three-column kanban board
//! (To Do, In Progress, Done).
//!
//! This crate provides the task collection and its operations (add, update,
//! delete, move), a priority filter/sort view, and a persistence adapter over
//! any string key-value [`Storage`], without any dependency on a specific UI.

pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use config::StoreConfig;
pub use controller::{BoardController, DraggedTask};
pub use domain::{
    board::{Board, Column},
    filter::{board_view, PriorityFilter},
    task::{Priority, Task, TaskDraft, TaskFields, TaskId},
};
pub use error::{BoardError, Result};
pub use storage::{MemoryStorage, Storage};
pub use store::{BoardEvent, BoardStore, LoadOutcome, SubscriptionId};
