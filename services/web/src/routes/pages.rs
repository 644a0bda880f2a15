//! Signed-in informational pages

use axum::{
    Extension, Router,
    extract::State,
    response::Html,
    routing::get,
};
use minijinja::context;
use tasks::models::PublicUser;

use crate::{
    error::PageResult,
    middleware::CurrentUser,
    state::AppState,
    views::{priority_rows, task_views},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/home", get(home))
        .route("/dashboard", get(dashboard))
        .route("/sobre", get(about))
        .route("/contato", get(contact))
}

/// Landing page with a summary of the user's progress
pub async fn home(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> PageResult<Html<String>> {
    let stats = state.statistics.compute(user.id)?;

    state.views.render(
        "home.html",
        context! {
            user => PublicUser::from(&user),
            stats => stats,
        },
    )
}

/// Full statistics, recent activity and the priority breakdown
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> PageResult<Html<String>> {
    let stats = state.statistics.compute(user.id)?;

    state.views.render(
        "dashboard.html",
        context! {
            user => PublicUser::from(&user),
            recent_tasks => task_views(&stats.recent_tasks),
            priorities => priority_rows(&stats.by_priority),
            stats => stats,
        },
    )
}

pub async fn about(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> PageResult<Html<String>> {
    state
        .views
        .render("sobre.html", context! { user => PublicUser::from(&user) })
}

pub async fn contact(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> PageResult<Html<String>> {
    state
        .views
        .render("contato.html", context! { user => PublicUser::from(&user) })
}
