//! Task repository: the task store
//!
//! Every read and write is scoped to an owner. A task that belongs to another
//! user is indistinguishable from a missing one.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use common::error::StoreError;

use crate::error::DomainResult;
use crate::models::{Task, TaskId, UserId};

/// Task store contract
pub trait TaskRepository: Send + Sync {
    /// Store a new task
    fn insert(&self, task: Task) -> DomainResult<Task>;

    /// Find a task by ID, if `owner` owns it
    fn find_owned(&self, owner: UserId, id: TaskId) -> DomainResult<Option<Task>>;

    /// All tasks owned by `owner`, in no particular order
    fn list_owned(&self, owner: UserId) -> DomainResult<Vec<Task>>;

    /// Apply `change` to an owned task and persist the result
    ///
    /// The change runs against a copy while the store is locked; it is only
    /// written back when `change` succeeds. Returns `None` when `owner` has
    /// no task with that ID.
    fn modify_owned(
        &self,
        owner: UserId,
        id: TaskId,
        change: &mut dyn FnMut(&mut Task) -> DomainResult<()>,
    ) -> DomainResult<Option<Task>>;

    /// Remove an owned task, returning it
    fn remove_owned(&self, owner: UserId, id: TaskId) -> DomainResult<Option<Task>>;
}

/// Task store held in process memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Create an empty task repository
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn insert(&self, task: Task) -> DomainResult<Task> {
        let mut tasks = self.tasks.write().map_err(StoreError::poisoned)?;
        tasks.insert(task.id(), task.clone());
        Ok(task)
    }

    fn find_owned(&self, owner: UserId, id: TaskId) -> DomainResult<Option<Task>> {
        let tasks = self.tasks.read().map_err(StoreError::poisoned)?;
        Ok(tasks
            .get(&id)
            .filter(|task| task.owner_id() == owner)
            .cloned())
    }

    fn list_owned(&self, owner: UserId) -> DomainResult<Vec<Task>> {
        let tasks = self.tasks.read().map_err(StoreError::poisoned)?;
        Ok(tasks
            .values()
            .filter(|task| task.owner_id() == owner)
            .cloned()
            .collect())
    }

    fn modify_owned(
        &self,
        owner: UserId,
        id: TaskId,
        change: &mut dyn FnMut(&mut Task) -> DomainResult<()>,
    ) -> DomainResult<Option<Task>> {
        let mut tasks = self.tasks.write().map_err(StoreError::poisoned)?;
        let Some(stored) = tasks.get_mut(&id).filter(|task| task.owner_id() == owner) else {
            return Ok(None);
        };

        let mut working = stored.clone();
        change(&mut working)?;
        *stored = working.clone();
        Ok(Some(working))
    }

    fn remove_owned(&self, owner: UserId, id: TaskId) -> DomainResult<Option<Task>> {
        let mut tasks = self.tasks.write().map_err(StoreError::poisoned)?;
        if !tasks.get(&id).is_some_and(|task| task.owner_id() == owner) {
            return Ok(None);
        }

        Ok(tasks.remove(&id))
    }
}
