//! Login, registration and logout pages

use axum::{
    Form, Router,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use minijinja::context;
use serde::Deserialize;
use tasks::{DomainError, Registration};
use tracing::info;

use crate::{
    error::PageResult,
    middleware::session_user,
    routes::{FlashQuery, redirect_with},
    session::SessionManager,
    state::AppState,
};

pub const INVALID_CREDENTIALS: &str = "Email ou senha incorretos!";
pub const REGISTERED: &str = "Usuário registrado com sucesso! Faça login para continuar.";
pub const LOGGED_OUT: &str = "Logout realizado com sucesso!";

/// Login fields, from a form or a JSON body
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "senha")]
    pub password: String,
}

/// Registration fields, from a form or a JSON body
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    #[serde(default, alias = "nomeCompleto")]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "dataNascimento")]
    pub birth_date: String,
    #[serde(default, alias = "senha")]
    pub password: String,
}

impl From<RegistrationForm> for Registration {
    fn from(form: RegistrationForm) -> Self {
        Registration {
            full_name: form.full_name,
            email: form.email,
            birth_date: form.birth_date,
            password: form.password,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/login", get(show_login).post(login))
        .route("/registro", get(show_registration).post(register))
        .route("/logout", post(logout))
}

/// Send visitors to their home page or to the login form
pub async fn root(State(state): State<AppState>, jar: CookieJar) -> PageResult<Redirect> {
    Ok(match session_user(&state, &jar).await? {
        Some(_) => Redirect::to("/home"),
        None => Redirect::to("/login"),
    })
}

pub async fn show_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(flash): Query<FlashQuery>,
) -> PageResult<Response> {
    if session_user(&state, &jar).await?.is_some() {
        return Ok(Redirect::to("/home").into_response());
    }

    render_login(&state, flash.error.as_deref(), flash.success.as_deref(), "")
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> PageResult<Response> {
    let user = match state.identity.authenticate(&form.email, &form.password) {
        Ok(Some(user)) => user,
        Ok(None) => return render_login(&state, Some(INVALID_CREDENTIALS), None, &form.email),
        Err(DomainError::Validation(message)) => {
            return render_login(&state, Some(message.as_str()), None, &form.email);
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(previous) = SessionManager::token(&jar) {
        state.sessions.delete_session(&previous).await;
    }
    let token = state.sessions.create_session(user.id).await;
    info!("User logged in: {}", user.id);

    Ok((jar.add(SessionManager::cookie(token)), Redirect::to("/home")).into_response())
}

pub async fn show_registration(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(flash): Query<FlashQuery>,
) -> PageResult<Response> {
    if session_user(&state, &jar).await?.is_some() {
        return Ok(Redirect::to("/tarefas").into_response());
    }

    let page = state
        .views
        .render("registro.html", context! { error => flash.error })?;
    Ok(page.into_response())
}

pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegistrationForm>,
) -> PageResult<Response> {
    let full_name = form.full_name.clone();
    let birth_date = form.birth_date.clone();
    let email = form.email.clone();

    match state.identity.register(&form.into()) {
        Ok(user) => render_login(&state, None, Some(REGISTERED), &user.email),
        Err(DomainError::Validation(message) | DomainError::Conflict(message)) => {
            let page = state.views.render(
                "registro.html",
                context! {
                    error => message,
                    full_name => full_name,
                    email => email,
                    birth_date => birth_date,
                },
            )?;
            Ok(page.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(token) = SessionManager::token(&jar) {
        state.sessions.delete_session(&token).await;
    }

    (
        jar.remove(SessionManager::removal_cookie()),
        redirect_with("/login", "success", LOGGED_OUT),
    )
}

fn render_login(
    state: &AppState,
    error: Option<&str>,
    success: Option<&str>,
    email: &str,
) -> PageResult<Response> {
    let page = state.views.render(
        "login.html",
        context! {
            error => error,
            success => success,
            email => email,
        },
    )?;
    Ok(page.into_response())
}
