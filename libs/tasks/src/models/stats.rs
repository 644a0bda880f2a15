//! Derived statistics over a user's tasks

use serde::Serialize;

use crate::models::{Priority, Task};

/// Task counts per priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityBreakdown {
    pub low: usize,
    pub medium: usize,
    pub urgent: usize,
}

impl PriorityBreakdown {
    pub fn record(&mut self, priority: Priority) {
        match priority {
            Priority::Low => self.low += 1,
            Priority::Medium => self.medium += 1,
            Priority::Urgent => self.urgent += 1,
        }
    }

    pub fn count(&self, priority: Priority) -> usize {
        match priority {
            Priority::Low => self.low,
            Priority::Medium => self.medium,
            Priority::Urgent => self.urgent,
        }
    }
}

/// Figures shown on the home and dashboard pages and by the statistics
/// endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatistics {
    pub total: usize,
    pub completed_count: usize,
    pub pending_count: usize,
    /// Rounded percentage of completed tasks, 0 when there are none
    pub completion_percentage: u32,
    /// Mean time to completion, absent until a task is completed
    pub average_completion_label: Option<String>,
    pub by_priority: PriorityBreakdown,
    /// Up to five most recently created tasks
    pub recent_tasks: Vec<Task>,
}
