//! JSON API under `/api`

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::{WithRejection, cookie::CookieJar};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tasks::models::{PublicUser, Task, TaskPatch, TaskStatistics};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    middleware::CurrentUser,
    response::Envelope,
    routes::{
        auth::{INVALID_CREDENTIALS, LOGGED_OUT, LoginForm, RegistrationForm},
        parse_task_id,
    },
    session::SessionManager,
    state::AppState,
};

const ENDPOINTS: [&str; 19] = [
    "GET /home",
    "GET /dashboard",
    "GET /tarefas",
    "GET /sobre",
    "GET /contato",
    "GET /api/status",
    "POST /api/login",
    "POST /api/registro",
    "POST /api/logout",
    "GET /api/tarefas",
    "POST /api/tarefas",
    "GET /api/tarefas/:id",
    "PUT /api/tarefas/:id",
    "DELETE /api/tarefas/:id",
    "POST /api/tarefas/:id/concluir",
    "POST /api/tarefas/:id/reabrir",
    "GET /api/usuario",
    "GET /api/estatisticas",
    "GET /health",
];

/// Body of `POST /api/tarefas`
///
/// API clients name the title `descricao`, unlike the page form where
/// `descricao` is the free-text detail.
#[derive(Debug, Default, Deserialize)]
pub struct NewTask {
    #[serde(alias = "descricao")]
    pub title: Option<String>,
    pub detail: Option<String>,
    #[serde(alias = "prioridade")]
    pub priority: Option<String>,
}

/// Endpoints reachable without a session
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/status", get(status))
        .route("/login", post(login))
        .route("/registro", post(register))
        .route("/logout", post(logout))
}

/// Endpoints that need a session
pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/tarefas", get(list_tasks).post(create_task))
        .route(
            "/tarefas/:id",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/tarefas/:id/concluir", post(complete_task))
        .route("/tarefas/:id/reabrir", post(reopen_task))
        .route("/usuario", get(current_user))
        .route("/estatisticas", get(statistics))
}

/// Service status
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "online",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "uptime": state.started_at.elapsed().as_secs(),
        "endpoints": ENDPOINTS,
    }))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<LoginForm>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .identity
        .authenticate(&payload.email, &payload.password)?
        .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    if let Some(previous) = SessionManager::token(&jar) {
        state.sessions.delete_session(&previous).await;
    }
    let token = state.sessions.create_session(user.id).await;
    info!("User logged in through the API: {}", user.id);

    Ok((
        jar.add(SessionManager::cookie(token)),
        Envelope::data(PublicUser::from(&user)).with_message("Login realizado com sucesso!"),
    ))
}

pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<RegistrationForm>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let user = state.identity.register(&payload.into())?;

    Ok((
        StatusCode::CREATED,
        Envelope::data(PublicUser::from(&user)).with_message("Usuário registrado com sucesso!"),
    ))
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(token) = SessionManager::token(&jar) {
        state.sessions.delete_session(&token).await;
    }

    (
        jar.remove(SessionManager::removal_cookie()),
        Envelope::message(LOGGED_OUT),
    )
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Envelope<Vec<Task>>> {
    let tasks = state.tasks.list(user.id)?;
    let total = tasks.len();

    Ok(Envelope::data(tasks).with_total(total))
}

pub async fn get_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<Task>> {
    let task = state.tasks.get(user.id, parse_task_id(&id)?)?;
    Ok(Envelope::data(task))
}

pub async fn create_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    WithRejection(Json(payload), _): WithRejection<Json<NewTask>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let task = state.tasks.create(
        user.id,
        payload.title.as_deref(),
        payload.detail.as_deref(),
        payload.priority.as_deref(),
    )?;

    Ok((
        StatusCode::CREATED,
        Envelope::data(task).with_message("Tarefa criada com sucesso"),
    ))
}

/// Partial update; `status` moves the task between pending and completed
pub async fn update_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    WithRejection(Json(patch), _): WithRejection<Json<TaskPatch>, ApiError>,
) -> ApiResult<Envelope<Task>> {
    let task = state.tasks.patch(user.id, parse_task_id(&id)?, &patch)?;
    Ok(Envelope::data(task).with_message("Tarefa atualizada com sucesso"))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<Task>> {
    let task = state.tasks.delete(user.id, parse_task_id(&id)?)?;
    Ok(Envelope::data(task).with_message("Tarefa excluída com sucesso"))
}

pub async fn complete_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<Task>> {
    let task = state.tasks.complete(user.id, parse_task_id(&id)?)?;
    Ok(Envelope::data(task).with_message("Tarefa concluída com sucesso"))
}

pub async fn reopen_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<Task>> {
    let task = state.tasks.reopen(user.id, parse_task_id(&id)?)?;
    Ok(Envelope::data(task).with_message("Tarefa reaberta com sucesso"))
}

pub async fn current_user(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Envelope<PublicUser> {
    Envelope::data(PublicUser::from(&user))
}

pub async fn statistics(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Envelope<TaskStatistics>> {
    Ok(Envelope::data(state.statistics.compute(user.id)?))
}
