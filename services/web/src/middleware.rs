//! Session middleware resolving the logged-in user

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tasks::{DomainResult, models::User};

use crate::{
    error::{ApiError, PageError},
    session::SessionManager,
    state::AppState,
};

/// Logged-in user, inserted into request extensions by the middleware
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Resolve the user behind the session cookie, if any
pub async fn session_user(state: &AppState, jar: &CookieJar) -> DomainResult<Option<User>> {
    let Some(token) = SessionManager::token(jar) else {
        return Ok(None);
    };
    let Some(user_id) = state.sessions.get_session(&token).await else {
        return Ok(None);
    };

    state.identity.current_user(user_id)
}

/// Reject `/api` requests without a session with a 401 envelope
pub async fn require_api_user(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let jar = CookieJar::from_headers(req.headers());
    let user = session_user(&state, &jar)
        .await?
        .ok_or_else(ApiError::unauthenticated)?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// Send page requests without a session to the login form
pub async fn require_page_user(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, PageError> {
    let jar = CookieJar::from_headers(req.headers());
    let Some(user) = session_user(&state, &jar).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}
