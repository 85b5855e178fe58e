#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::Request;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use tempfile::TempDir;
use tinywiki::handlers::handle_request;
use tinywiki::{AppState, PageStore, Renderer, TemplateComponent};

pub const FORM: &str = "application/x-www-form-urlencoded";

/// Templates small enough to assert on whole responses
pub fn plain_templates() -> TemplateComponent {
    TemplateComponent::from_sources("view:{{TITLE}}:{{BODY}}", "edit:{{TITLE}}:{{BODY}}")
}

pub struct TestWiki {
    pub dir: TempDir,
    pub state: AppState,
}

impl TestWiki {
    pub fn new() -> Self {
        Self::with_renderer(plain_templates())
    }

    pub fn with_renderer(renderer: impl Renderer + 'static) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = PageStore::open(dir.path().join("data")).unwrap();
        let static_dir = dir.path().join("static");
        fs::create_dir_all(&static_dir).unwrap();
        let state = AppState::new(store, renderer, static_dir);
        Self { dir, state }
    }

    pub fn data_file(&self, title: &str) -> PathBuf {
        self.dir.path().join("data").join(format!("{}.txt", title))
    }

    pub fn static_dir(&self) -> PathBuf {
        self.dir.path().join("static")
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, FORM)
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = handle_request(State(self.state.clone()), request).await.into_response();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
        TestResponse { status, headers, body }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
