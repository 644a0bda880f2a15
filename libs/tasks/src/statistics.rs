//! Dashboard statistics

use std::sync::Arc;

use tracing::debug;

use crate::elapsed;
use crate::error::DomainResult;
use crate::models::{PriorityBreakdown, TaskStatistics, UserId};
use crate::repositories::TaskRepository;

/// Number of tasks listed as recent activity
pub const RECENT_TASKS: usize = 5;

/// Computes [`TaskStatistics`] from a user's tasks
#[derive(Clone)]
pub struct StatisticsAggregator {
    tasks: Arc<dyn TaskRepository>,
}

impl StatisticsAggregator {
    pub fn new(tasks: Arc<dyn TaskRepository>) -> Self {
        Self { tasks }
    }

    /// Statistics over everything `owner` currently has
    pub fn compute(&self, owner: UserId) -> DomainResult<TaskStatistics> {
        let mut tasks = self.tasks.list_owned(owner)?;

        let total = tasks.len();
        let completed_count = tasks.iter().filter(|task| task.is_completed()).count();
        let pending_count = total - completed_count;

        let mut by_priority = PriorityBreakdown::default();
        for task in &tasks {
            by_priority.record(task.priority());
        }

        let durations: Vec<i64> = tasks.iter().filter_map(|task| task.elapsed_minutes()).collect();
        let average_completion_label = if durations.is_empty() {
            None
        } else {
            let mean = durations.iter().sum::<i64>() / durations.len() as i64;
            Some(elapsed::average_label(mean))
        };

        tasks.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        tasks.truncate(RECENT_TASKS);

        debug!(
            "Computed statistics for user {}: {} tasks, {} completed",
            owner, total, completed_count
        );

        Ok(TaskStatistics {
            total,
            completed_count,
            pending_count,
            completion_percentage: completion_percentage(completed_count, total),
            average_completion_label,
            by_priority,
            recent_tasks: tasks,
        })
    }
}

/// `completed / total` as a whole percentage, rounding halves up
fn completion_percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }

    ((completed * 200 + total) / (total * 2)) as u32
}
