//! Task list page and its form actions
//!
//! Every action answers with a redirect back to `/tarefas` carrying the
//! outcome in the `success` or `error` query parameter.

use axum::{
    Extension, Form, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use minijinja::context;
use serde::Deserialize;
use tasks::{
    DomainError, DomainResult,
    models::{PublicUser, User},
};

use crate::{
    error::PageResult,
    middleware::CurrentUser,
    routes::{FlashQuery, parse_task_id, redirect_with},
    state::AppState,
    views::{TaskView, priority_options, task_views},
};

const TASKS_PATH: &str = "/tarefas";

/// Editable task fields posted by the task page forms
#[derive(Debug, Default, Deserialize)]
pub struct TaskForm {
    #[serde(alias = "titulo")]
    pub title: Option<String>,
    #[serde(alias = "descricao")]
    pub detail: Option<String>,
    #[serde(alias = "prioridade")]
    pub priority: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(TASKS_PATH, get(list_tasks).post(create_task))
        .route("/tarefas/:id/editar", get(edit_task))
        .route("/tarefas/:id/atualizar", post(update_task))
        .route("/tarefas/:id/concluir", post(complete_task))
        .route("/tarefas/:id/reabrir", post(reopen_task))
        .route("/tarefas/:id/excluir", post(delete_task))
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(flash): Query<FlashQuery>,
) -> PageResult<Html<String>> {
    render_tasks(&state, &user, flash, None)
}

/// Task list with the edit form filled in for one task
pub async fn edit_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Query(flash): Query<FlashQuery>,
) -> PageResult<Response> {
    let task = match parse_task_id(&id).and_then(|id| state.tasks.get(user.id, id)) {
        Ok(task) => task,
        Err(DomainError::NotFound(message)) => {
            return Ok(redirect_with(TASKS_PATH, "error", &message).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    Ok(render_tasks(&state, &user, flash, Some(TaskView::from(&task)))?.into_response())
}

pub async fn create_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(form): Form<TaskForm>,
) -> PageResult<Redirect> {
    let created = state.tasks.create(
        user.id,
        form.title.as_deref(),
        form.detail.as_deref(),
        form.priority.as_deref(),
    );

    outcome(created, "Tarefa criada com sucesso!")
}

pub async fn update_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Form(form): Form<TaskForm>,
) -> PageResult<Redirect> {
    let updated = parse_task_id(&id).and_then(|id| {
        state.tasks.update(
            user.id,
            id,
            form.title.as_deref(),
            form.detail.as_deref(),
            form.priority.as_deref(),
        )
    });

    outcome(updated, "Tarefa atualizada com sucesso!")
}

pub async fn complete_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> PageResult<Redirect> {
    let completed = parse_task_id(&id).and_then(|id| state.tasks.complete(user.id, id));
    outcome(completed, "Tarefa concluída com sucesso!")
}

pub async fn reopen_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> PageResult<Redirect> {
    let reopened = parse_task_id(&id).and_then(|id| state.tasks.reopen(user.id, id));
    outcome(reopened, "Tarefa reaberta com sucesso!")
}

pub async fn delete_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> PageResult<Redirect> {
    let deleted = parse_task_id(&id).and_then(|id| state.tasks.delete(user.id, id));
    outcome(deleted, "Tarefa excluída com sucesso!")
}

fn render_tasks(
    state: &AppState,
    user: &User,
    flash: FlashQuery,
    editing: Option<TaskView>,
) -> PageResult<Html<String>> {
    let tasks = state.tasks.list(user.id)?;

    state.views.render(
        "tarefas.html",
        context! {
            user => PublicUser::from(user),
            tasks => task_views(&tasks),
            editing => editing,
            priorities => priority_options(),
            success => flash.success,
            error => flash.error,
        },
    )
}

/// Redirect back to the list with the outcome of an action
fn outcome<T>(result: DomainResult<T>, success: &str) -> PageResult<Redirect> {
    match result {
        Ok(_) => Ok(redirect_with(TASKS_PATH, "success", success)),
        Err(
            DomainError::Validation(message)
            | DomainError::Conflict(message)
            | DomainError::NotFound(message),
        ) => Ok(redirect_with(TASKS_PATH, "error", &message)),
        Err(e) => Err(e.into()),
    }
}
