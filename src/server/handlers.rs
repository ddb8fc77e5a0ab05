//! Request handlers
//!
//! Each handler composes session identity, the injected [`TodoStore`], and
//! the renderer. No state is kept between requests apart from the cookie the
//! client echoes back.
//!
//! [`TodoStore`]: crate::storage::TodoStore

use super::error::ApiError;
use super::AppState;
use crate::render::{render_item, render_list, render_page};
use crate::session::{ensure_session, session_cookie, session_from_headers};
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;

/// Form body accepted by add and edit
#[derive(Debug, Deserialize)]
pub struct ContentForm {
    /// New to-do text
    pub content: String,
}

/// `GET /`: list the caller's to-dos, issuing a session cookie if needed
pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, ApiError> {
    let session = ensure_session(&headers, &state.session.cookie_name);
    let todos = state.store.list(&session.key).await?;
    let mut response = Html(render_page(&todos)?).into_response();

    if session.is_new {
        let cookie = session_cookie(&session.key, &state.session)?;
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }

    Ok(response)
}

/// `POST /add`: create a to-do under the caller's session
///
/// Requests without a session cookie store the row under the empty key.
pub async fn add(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<ContentForm>, FormRejection>,
) -> Result<Html<String>, ApiError> {
    let Form(form) = form?;
    let session_key =
        session_from_headers(&headers, &state.session.cookie_name).unwrap_or_default();

    let todo = state.store.create(&form.content, &session_key).await?;
    tracing::info!(id = todo.id, session_key = %session_key, "Added todo");

    let todos = state.store.list(&session_key).await?;
    Ok(Html(render_list(&todos)?))
}

/// `PUT /edit/{id}`: replace a to-do's content
///
/// Responds with the edited row alone, or 404 when no row has that id. Other
/// rows of the owning session are never included.
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    form: Result<Form<ContentForm>, FormRejection>,
) -> Result<Html<String>, ApiError> {
    let Form(form) = form?;

    let todo = state.store.update(id, &form.content).await?;
    tracing::info!(id, "Edited todo");

    Ok(Html(render_item(&todo)?))
}

/// `DELETE /delete/{id}`: remove a to-do; absent ids still succeed
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(id).await?;
    tracing::info!(id, "Deleted todo");
    Ok(StatusCode::OK)
}
