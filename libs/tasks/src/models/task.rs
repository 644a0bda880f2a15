//! Task model and its state transitions

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::elapsed;
use crate::error::{DomainError, DomainResult};
use crate::models::UserId;

/// Identity of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Generate a fresh identity
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::Urgent];

    /// Sort rank, higher is more important
    pub const fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::Urgent => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::Urgent => "urgent",
        }
    }

    /// Display label for pages
    pub const fn label(self) -> &'static str {
        match self {
            Priority::Low => "Baixa",
            Priority::Medium => "Média",
            Priority::Urgent => "Urgente",
        }
    }
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "baixa" => Ok(Priority::Low),
            "medium" | "media" | "média" => Ok(Priority::Medium),
            "urgent" | "urgente" => Ok(Priority::Urgent),
            _ => Err(DomainError::validation("Prioridade inválida!")),
        }
    }
}

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pendente",
            TaskStatus::Completed => "Concluída",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "pendente" => Ok(TaskStatus::Pending),
            "completed" | "concluida" | "concluída" => Ok(TaskStatus::Completed),
            _ => Err(DomainError::validation(
                "Status deve ser \"pending\" ou \"completed\"",
            )),
        }
    }
}

/// Validated editable fields of a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub detail: Option<String>,
    pub priority: Priority,
}

/// Raw partial update, as received from the JSON surface
///
/// `None` leaves the field untouched. An empty `detail` clears it. The title
/// is also accepted as `descricao` and the priority as `prioridade`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(alias = "descricao")]
    pub title: Option<String>,
    pub detail: Option<String>,
    #[serde(alias = "prioridade")]
    pub priority: Option<String>,
    pub status: Option<String>,
}

/// Task entity
///
/// `completed_at` and `elapsed` are set exactly while the task is completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    owner_id: UserId,
    title: String,
    detail: Option<String>,
    priority: Priority,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    elapsed: Option<String>,
}

impl Task {
    /// Create a pending task owned by `owner_id`
    pub fn new(owner_id: UserId, draft: TaskDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: TaskId::new(),
            owner_id,
            title: draft.title,
            detail: draft.detail,
            priority: draft.priority,
            status: TaskStatus::Pending,
            created_at,
            completed_at: None,
            elapsed: None,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Human-readable time from creation to completion
    pub fn elapsed(&self) -> Option<&str> {
        self.elapsed.as_deref()
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Whole minutes from creation to completion, while completed
    pub fn elapsed_minutes(&self) -> Option<i64> {
        self.completed_at
            .map(|completed_at| elapsed::whole_minutes(self.created_at, completed_at))
    }

    /// Mark the task completed at `at`
    pub fn complete(&mut self, at: DateTime<Utc>) -> DomainResult<()> {
        if self.is_completed() {
            return Err(DomainError::conflict("Tarefa já está concluída"));
        }

        self.status = TaskStatus::Completed;
        self.completed_at = Some(at);
        self.elapsed = Some(elapsed::elapsed_label(self.created_at, at));
        Ok(())
    }

    /// Move a completed task back to pending
    pub fn reopen(&mut self) -> DomainResult<()> {
        if !self.is_completed() {
            return Err(DomainError::conflict("Tarefa já está pendente"));
        }

        self.status = TaskStatus::Pending;
        self.completed_at = None;
        self.elapsed = None;
        Ok(())
    }

    /// Replace the editable fields
    pub fn revise(&mut self, draft: TaskDraft) {
        self.title = draft.title;
        self.detail = draft.detail;
        self.priority = draft.priority;
    }

    /// Current editable fields
    pub fn draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            detail: self.detail.clone(),
            priority: self.priority,
        }
    }
}
