use crate::domain::board::{Board, Column};
use crate::domain::sorting::sort_by_priority;
use crate::domain::task::{Priority, Task};
use crate::error::BoardError;
use std::{fmt, str::FromStr};

/// Display-only narrowing of the board to one priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    /// Filter choices in the order they are offered
    pub const ALL: [PriorityFilter; 4] = [
        PriorityFilter::All,
        PriorityFilter::Only(Priority::Low),
        PriorityFilter::Only(Priority::Medium),
        PriorityFilter::Only(Priority::High),
    ];

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(priority) => task.priority == *priority,
        }
    }
}

impl From<Priority> for PriorityFilter {
    fn from(priority: Priority) -> Self {
        Self::Only(priority)
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(priority) => write!(f, "{priority}"),
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        Priority::from_str(s)
            .map(Self::Only)
            .map_err(|_| BoardError::InvalidPriorityFilter(s.to_string()))
    }
}

/// Derives the display board: tasks matching the filter, sorted by priority
/// within each column. The input board is never modified.
pub fn board_view(board: &Board, filter: PriorityFilter) -> Board {
    let column_view = |column: Column| {
        let mut tasks: Vec<Task> = board
            .tasks(column)
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        sort_by_priority(&mut tasks);
        tasks
    };

    Board::from_columns(
        column_view(Column::Todo),
        column_view(Column::InProgress),
        column_view(Column::Done),
    )
}
