//! HTML rendering for the page surface

use std::sync::Arc;

use axum::response::Html;
use chrono::{DateTime, Utc};
use minijinja::{Environment, Value};
use serde::Serialize;
use tasks::models::{Priority, PriorityBreakdown, Task};

use crate::error::PageError;

/// Served when a page handler fails unexpectedly
pub const ERROR_PAGE: &str = include_str!("templates/error.html");

const TEMPLATES: [(&str, &str); 8] = [
    ("base.html", include_str!("templates/base.html")),
    ("login.html", include_str!("templates/login.html")),
    ("registro.html", include_str!("templates/registro.html")),
    ("home.html", include_str!("templates/home.html")),
    ("dashboard.html", include_str!("templates/dashboard.html")),
    ("tarefas.html", include_str!("templates/tarefas.html")),
    ("sobre.html", include_str!("templates/sobre.html")),
    ("contato.html", include_str!("templates/contato.html")),
];

/// Compiled page templates
#[derive(Clone)]
pub struct Views {
    env: Arc<Environment<'static>>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }

        Ok(Self { env: Arc::new(env) })
    }

    /// Render a named template with the given context
    pub fn render(&self, name: &str, context: Value) -> Result<Html<String>, PageError> {
        let template = self.env.get_template(name)?;
        Ok(Html(template.render(context)?))
    }
}

/// Task as shown on pages, with labels and formatted dates
#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    pub id: String,
    pub title: String,
    pub detail: Option<String>,
    pub priority: &'static str,
    pub priority_label: &'static str,
    pub status: &'static str,
    pub status_label: &'static str,
    pub completed: bool,
    pub created_at: String,
    pub completed_at: Option<String>,
    pub elapsed: Option<String>,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            title: task.title().to_string(),
            detail: task.detail().map(str::to_string),
            priority: task.priority().as_str(),
            priority_label: task.priority().label(),
            status: task.status().as_str(),
            status_label: task.status().label(),
            completed: task.is_completed(),
            created_at: format_timestamp(task.created_at()),
            completed_at: task.completed_at().map(format_timestamp),
            elapsed: task.elapsed().map(str::to_string),
        }
    }
}

pub fn task_views(tasks: &[Task]) -> Vec<TaskView> {
    tasks.iter().map(TaskView::from).collect()
}

/// Choice in the priority `<select>`
#[derive(Debug, Clone, Serialize)]
pub struct PriorityOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub fn priority_options() -> Vec<PriorityOption> {
    Priority::ALL
        .iter()
        .map(|priority| PriorityOption {
            value: priority.as_str(),
            label: priority.label(),
        })
        .collect()
}

/// Row of the dashboard priority table
#[derive(Debug, Clone, Serialize)]
pub struct PriorityRow {
    pub label: &'static str,
    pub count: usize,
}

pub fn priority_rows(breakdown: &PriorityBreakdown) -> Vec<PriorityRow> {
    Priority::ALL
        .iter()
        .rev()
        .map(|priority| PriorityRow {
            label: priority.label(),
            count: breakdown.count(*priority),
        })
        .collect()
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%Y %H:%M").to_string()
}
