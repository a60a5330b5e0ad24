use crate::domain::{Column, TaskId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Task title must not be empty")]
    EmptyTitle,

    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("Task {id} is not in column {column}")]
    TaskNotInColumn { id: TaskId, column: Column },

    #[error("No task id left above {0}")]
    TaskIdsExhausted(TaskId),

    #[error("No task is being edited")]
    NoActiveEdit,

    #[error("Invalid task ID: {0}")]
    InvalidTaskId(String),

    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    #[error("Invalid priority filter: {0}")]
    InvalidPriorityFilter(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
