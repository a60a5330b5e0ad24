use crate::domain::task::{Priority, Task};
use std::cmp::Ordering;

/// Display rank of a priority: high first, low last
pub fn priority_rank(priority: Priority) -> u8 {
    match priority {
        Priority::High => 1,
        Priority::Medium => 2,
        Priority::Low => 3,
    }
}

/// Sorts tasks by priority rank, most urgent first.
///
/// The sort is stable, so tasks of equal priority keep their stored order.
///
/// # Examples
/// ```
/// use kanban_board::domain::sorting::sort_by_priority;
/// use kanban_board::domain::task::{Priority, Task, TaskId};
///
/// let mut tasks = vec![
///     Task::new(TaskId::new(1), "A".into(), String::new(), Priority::Low).unwrap(),
///     Task::new(TaskId::new(2), "B".into(), String::new(), Priority::High).unwrap(),
/// ];
///
/// sort_by_priority(&mut tasks);
/// assert_eq!(tasks[0].id, TaskId::new(2));
/// ```
pub fn sort_by_priority(tasks: &mut [Task]) {
    tasks.sort_by(compare_priority);
}

fn compare_priority(a: &Task, b: &Task) -> Ordering {
    priority_rank(a.priority).cmp(&priority_rank(b.priority))
}
