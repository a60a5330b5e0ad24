pub mod board;
pub mod filter;
pub mod sorting;
pub mod task;

pub use board::{Board, Column};
pub use filter::{board_view, PriorityFilter};
pub use sorting::{priority_rank, sort_by_priority};
pub use task::{Priority, Task, TaskDraft, TaskFields, TaskId};
