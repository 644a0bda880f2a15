//! Domain models

pub mod stats;
pub mod task;
pub mod user;

// Re-export for convenience
pub use stats::{PriorityBreakdown, TaskStatistics};
pub use task::{Priority, Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
pub use user::{PublicUser, User, UserId};
