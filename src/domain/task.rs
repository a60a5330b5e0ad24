use crate::domain::board::Column;
use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Unique identifier for a task, derived from its creation time in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl FromStr for TaskId {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| BoardError::InvalidTaskId(s.to_string()))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Urgency tag of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(BoardError::InvalidPriority(s.to_string())),
        }
    }
}

/// A card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl Task {
    /// Creates a task from draft fields, validating the title
    pub fn new(
        id: TaskId,
        title: String,
        description: String,
        priority: Priority,
    ) -> Result<Self, BoardError> {
        ensure_title(&title)?;
        Ok(Self {
            id,
            title,
            description,
            priority,
        })
    }

    /// Replaces every editable field, keeping the id
    pub fn apply(&mut self, fields: TaskFields) -> Result<(), BoardError> {
        ensure_title(&fields.title)?;
        self.title = fields.title;
        self.description = fields.description;
        self.priority = fields.priority;
        Ok(())
    }

    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
        }
    }
}

/// The editable part of a task
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl TaskFields {
    pub fn new(title: impl Into<String>, description: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority,
        }
    }
}

/// Data submitted by the add/edit form: task fields plus the target column
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub column: Column,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, column: Column) -> Self {
        Self {
            title: title.into(),
            column,
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Prefills a draft from an existing task and the column holding it
    pub fn from_task(task: &Task, column: Column) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            column,
        }
    }

    pub fn is_valid(&self) -> bool {
        is_valid_title(&self.title)
    }

    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
        }
    }
}

pub fn is_valid_title(title: &str) -> bool {
    !title.trim().is_empty()
}

fn ensure_title(title: &str) -> Result<(), BoardError> {
    if is_valid_title(title) {
        Ok(())
    } else {
        Err(BoardError::EmptyTitle)
    }
}
