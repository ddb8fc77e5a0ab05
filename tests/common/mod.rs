use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use session_todo::config::SessionConfig;
use session_todo::server::{router, AppState};
use session_todo::storage::{MemoryStorage, SqliteStorage, TodoStore};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Router plus a handle on the store it was built with
pub struct TestApp {
    pub app: Router,
    pub store: Arc<dyn TodoStore>,
    _dir: Option<TempDir>,
}

#[allow(dead_code)]
pub fn memory_app() -> TestApp {
    let store: Arc<dyn TodoStore> = Arc::new(MemoryStorage::new());
    TestApp {
        app: router(AppState::new(store.clone(), SessionConfig::default())),
        store,
        _dir: None,
    }
}

#[allow(dead_code)]
pub fn sqlite_app() -> TestApp {
    let dir = TempDir::new().expect("failed to create tempdir");
    let storage =
        SqliteStorage::new_with_path(dir.path().join("test.db")).expect("failed to create storage");
    let store: Arc<dyn TodoStore> = Arc::new(storage);
    TestApp {
        app: router(AppState::new(store.clone(), SessionConfig::default())),
        store,
        _dir: Some(dir),
    }
}

/// Status, headers, and body text of a completed request
pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub content_type: Option<String>,
    pub text: String,
}

impl TestResponse {
    /// Value of the `session_key` cookie set by the server, if any
    #[allow(dead_code)]
    pub fn session_key(&self) -> Option<String> {
        let cookie = self.set_cookie.as_deref()?;
        let (pair, _) = cookie.split_once(';').unwrap_or((cookie, ""));
        let (name, value) = pair.split_once('=')?;
        (name == "session_key").then(|| value.to_string())
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response: Response<Body> = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let header_str = |name| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let set_cookie = header_str(header::SET_COOKIE);
        let content_type = header_str(header::CONTENT_TYPE);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");

        TestResponse {
            status,
            set_cookie,
            content_type,
            text: String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
        }
    }

    #[allow(dead_code)]
    pub async fn get_home(&self, session: Option<&str>) -> TestResponse {
        self.send(build("GET", "/".to_string(), session, None)).await
    }

    #[allow(dead_code)]
    pub async fn add(&self, content: &str, session: Option<&str>) -> TestResponse {
        self.send(build(
            "POST",
            "/add".to_string(),
            session,
            Some(form_body(content)),
        ))
        .await
    }

    #[allow(dead_code)]
    pub async fn edit(&self, id: i64, content: &str, session: Option<&str>) -> TestResponse {
        self.send(build(
            "PUT",
            format!("/edit/{}", id),
            session,
            Some(form_body(content)),
        ))
        .await
    }

    #[allow(dead_code)]
    pub async fn delete(&self, id: i64) -> TestResponse {
        self.send(build("DELETE", format!("/delete/{}", id), None, None))
            .await
    }

    /// Start a session the way a browser would: visit the home page
    #[allow(dead_code)]
    pub async fn new_session(&self) -> String {
        self.get_home(None)
            .await
            .session_key()
            .expect("home page sets a session cookie")
    }
}

/// URL-encode a single `content` form field
pub fn form_body(content: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("content", content)
        .finish()
}

pub fn build(
    method: &str,
    uri: String,
    session: Option<&str>,
    form: Option<String>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = session {
        builder = builder.header(header::COOKIE, format!("session_key={}", key));
    }
    match form {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("valid request"),
        None => builder.body(Body::empty()).expect("valid request"),
    }
}
