use crate::domain::task::{Task, TaskFields, TaskId};
use crate::error::{BoardError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, str::FromStr};

/// One of the three fixed workflow stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Column {
    /// Columns in board order, which is also the lookup order for updates
    pub const ALL: [Column; 3] = [Column::Todo, Column::InProgress, Column::Done];

    /// Identifier used in the persisted layout
    pub fn key(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inProgress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Todo => write!(f, "To Do"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Done => write!(f, "Done"),
        }
    }
}

impl FromStr for Column {
    type Err = BoardError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" | "to do" | "to-do" => Ok(Self::Todo),
            "inprogress" | "in progress" | "in-progress" | "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(BoardError::InvalidColumn(s.to_string())),
        }
    }
}

/// Kanban board state: every task lives in exactly one column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    todo: Vec<Task>,
    in_progress: Vec<Task>,
    done: Vec<Task>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks of a column in stored order
    pub fn tasks(&self, column: Column) -> &[Task] {
        match column {
            Column::Todo => &self.todo,
            Column::InProgress => &self.in_progress,
            Column::Done => &self.done,
        }
    }

    fn tasks_mut(&mut self, column: Column) -> &mut Vec<Task> {
        match column {
            Column::Todo => &mut self.todo,
            Column::InProgress => &mut self.in_progress,
            Column::Done => &mut self.done,
        }
    }

    /// Iterates over all tasks with the column holding them
    pub fn iter(&self) -> impl Iterator<Item = (Column, &Task)> {
        Column::ALL
            .into_iter()
            .flat_map(move |column| self.tasks(column).iter().map(move |task| (column, task)))
    }

    /// Total number of tasks across all columns
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds a task and the column holding it
    pub fn find(&self, id: TaskId) -> Option<(Column, &Task)> {
        self.iter().find(|(_, task)| task.id == id)
    }

    pub fn column_of(&self, id: TaskId) -> Option<Column> {
        self.find(id).map(|(column, _)| column)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.find(id).is_some()
    }

    /// Generates an id from the current time, kept above every id on the board
    pub fn next_task_id(&self) -> Result<TaskId> {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.next_task_id_at(now)
    }

    fn next_task_id_at(&self, now_millis: u64) -> Result<TaskId> {
        let floor = match self.iter().map(|(_, task)| task.id).max() {
            Some(highest) => highest
                .value()
                .checked_add(1)
                .ok_or(BoardError::TaskIdsExhausted(highest))?,
            None => 0,
        };
        Ok(TaskId::new(now_millis.max(floor)))
    }

    /// Appends a new task to a column
    pub fn add_task(&mut self, column: Column, fields: TaskFields) -> Result<TaskId> {
        let id = self.next_task_id()?;
        let task = Task::new(id, fields.title, fields.description, fields.priority)?;
        self.tasks_mut(column).push(task);
        Ok(id)
    }

    /// Replaces the fields of a task in place; the task never changes column
    pub fn update_task(&mut self, id: TaskId, fields: TaskFields) -> Result<Column> {
        for column in Column::ALL {
            if let Some(task) = self.tasks_mut(column).iter_mut().find(|t| t.id == id) {
                task.apply(fields)?;
                return Ok(column);
            }
        }
        Err(BoardError::TaskNotFound(id))
    }

    /// Removes a task from whichever column holds it
    pub fn delete_task(&mut self, id: TaskId) -> Result<(Column, Task)> {
        for column in Column::ALL {
            let tasks = self.tasks_mut(column);
            if let Some(index) = tasks.iter().position(|t| t.id == id) {
                return Ok((column, tasks.remove(index)));
            }
        }
        Err(BoardError::TaskNotFound(id))
    }

    /// Moves a task to the end of another column.
    ///
    /// Returns `Ok(false)` without touching the board when both columns are
    /// the same.
    pub fn move_task(&mut self, id: TaskId, from: Column, to: Column) -> Result<bool> {
        if from == to {
            return Ok(false);
        }

        let source = self.tasks_mut(from);
        let index = source
            .iter()
            .position(|t| t.id == id)
            .ok_or(BoardError::TaskNotInColumn { id, column: from })?;
        let task = source.remove(index);
        self.tasks_mut(to).push(task);
        Ok(true)
    }

    /// Ids that appear more than once, which only a hand-edited or stale
    /// persisted board can produce
    pub fn duplicate_ids(&self) -> Vec<TaskId> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for (_, task) in self.iter() {
            if !seen.insert(task.id) && !duplicates.contains(&task.id) {
                duplicates.push(task.id);
            }
        }
        duplicates
    }

    /// Builds a board from per-column task lists, used by derived views
    pub(crate) fn from_columns(todo: Vec<Task>, in_progress: Vec<Task>, done: Vec<Task>) -> Self {
        Self {
            todo,
            in_progress,
            done,
        }
    }
}
