//! Task lifecycle: creation, edits, status transitions and deletion
//!
//! Every operation is scoped to the owner supplied by the caller's
//! authenticated session. A task owned by someone else is reported exactly
//! like a missing one.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::info;

use crate::SharedClock;
use crate::error::{DomainError, DomainResult};
use crate::models::{Task, TaskId, TaskPatch, TaskStatus, UserId};
use crate::repositories::TaskRepository;
use crate::validation;

/// Order used by task listings
///
/// Pending before completed, then higher priority first, then newest first.
pub fn list_order(a: &Task, b: &Task) -> Ordering {
    a.is_completed()
        .cmp(&b.is_completed())
        .then_with(|| b.priority().rank().cmp(&a.priority().rank()))
        .then_with(|| b.created_at().cmp(&a.created_at()))
}

/// Task lifecycle service over the task store
#[derive(Clone)]
pub struct TaskLifecycle {
    tasks: Arc<dyn TaskRepository>,
    clock: SharedClock,
}

impl TaskLifecycle {
    /// Create a new task lifecycle service
    pub fn new(tasks: Arc<dyn TaskRepository>, clock: SharedClock) -> Self {
        Self { tasks, clock }
    }

    /// The owner's tasks in listing order
    pub fn list(&self, owner: UserId) -> DomainResult<Vec<Task>> {
        let mut tasks = self.tasks.list_owned(owner)?;
        tasks.sort_by(list_order);
        Ok(tasks)
    }

    /// A single owned task
    pub fn get(&self, owner: UserId, id: TaskId) -> DomainResult<Task> {
        self.tasks
            .find_owned(owner, id)?
            .ok_or_else(DomainError::task_not_found)
    }

    /// Create a pending task
    pub fn create(
        &self,
        owner: UserId,
        title: Option<&str>,
        detail: Option<&str>,
        priority: Option<&str>,
    ) -> DomainResult<Task> {
        let draft = validation::task_draft(title, detail, priority)?;
        let task = self.tasks.insert(Task::new(owner, draft, self.clock.utc()))?;

        info!("Created task {} for user {}", task.id(), owner);
        Ok(task)
    }

    /// Mark an owned task completed
    pub fn complete(&self, owner: UserId, id: TaskId) -> DomainResult<Task> {
        let now = self.clock.utc();
        let task = self.modify(owner, id, &mut |task| task.complete(now))?;

        info!("Completed task {} after {:?}", task.id(), task.elapsed());
        Ok(task)
    }

    /// Move an owned completed task back to pending
    pub fn reopen(&self, owner: UserId, id: TaskId) -> DomainResult<Task> {
        let task = self.modify(owner, id, &mut |task| task.reopen())?;

        info!("Reopened task {}", task.id());
        Ok(task)
    }

    /// Replace title, detail and priority of an owned task
    pub fn update(
        &self,
        owner: UserId,
        id: TaskId,
        title: Option<&str>,
        detail: Option<&str>,
        priority: Option<&str>,
    ) -> DomainResult<Task> {
        let draft = validation::task_draft(title, detail, priority)?;
        let task = self.modify(owner, id, &mut |task| {
            task.revise(draft.clone());
            Ok(())
        })?;

        info!("Updated task {}", task.id());
        Ok(task)
    }

    /// Apply a partial update, including an optional status change
    ///
    /// Provided fields follow the creation rules. Changing the status runs
    /// the same transition as [`TaskLifecycle::complete`] or
    /// [`TaskLifecycle::reopen`]; asking for the current status changes
    /// nothing.
    pub fn patch(&self, owner: UserId, id: TaskId, patch: &TaskPatch) -> DomainResult<Task> {
        let title = patch
            .title
            .as_deref()
            .map(|title| validation::validate_title(Some(title)))
            .transpose()?;
        let priority = patch
            .priority
            .as_deref()
            .map(|priority| validation::parse_priority(Some(priority)))
            .transpose()?;
        let status = patch
            .status
            .as_deref()
            .map(str::parse::<TaskStatus>)
            .transpose()?;
        let now = self.clock.utc();

        let task = self.modify(owner, id, &mut |task| {
            let mut draft = task.draft();
            if let Some(title) = &title {
                draft.title.clone_from(title);
            }
            if let Some(detail) = patch.detail.as_deref() {
                draft.detail = validation::normalize_detail(Some(detail));
            }
            if let Some(priority) = priority {
                draft.priority = priority;
            }
            task.revise(draft);

            match status {
                Some(status) if status == task.status() => Ok(()),
                Some(TaskStatus::Completed) => task.complete(now),
                Some(TaskStatus::Pending) => task.reopen(),
                None => Ok(()),
            }
        })?;

        info!("Patched task {}", task.id());
        Ok(task)
    }

    /// Remove an owned task, returning it
    pub fn delete(&self, owner: UserId, id: TaskId) -> DomainResult<Task> {
        let task = self
            .tasks
            .remove_owned(owner, id)?
            .ok_or_else(DomainError::task_not_found)?;

        info!("Deleted task {}", task.id());
        Ok(task)
    }

    fn modify(
        &self,
        owner: UserId,
        id: TaskId,
        change: &mut dyn FnMut(&mut Task) -> DomainResult<()>,
    ) -> DomainResult<Task> {
        self.tasks
            .modify_owned(owner, id, change)?
            .ok_or_else(DomainError::task_not_found)
    }
}
