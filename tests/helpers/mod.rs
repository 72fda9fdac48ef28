//! Shared setup for HTTP-level tests: a migrated SQLite file in a temp dir, the
//! real router, and a stub form generator.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use axum_extra::extract::cookie::Cookie;
use formforge::{
    AppState,
    auth::AUTH_COOKIE_NAME,
    config::{Config, Environment, JwtConfig},
    generator::FormGenerator,
};
use formforge_form::{FieldType, FormField, FormSchema};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use temp_dir::TempDir;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test_secret_key_minimum_32_characters_long";

/// Fails for the prompt "fail", otherwise answers with a small contact form.
pub struct StubGenerator;

#[async_trait]
impl FormGenerator for StubGenerator {
    async fn generate(&self, prompt: &str, title: Option<&str>) -> anyhow::Result<FormSchema> {
        if prompt == "fail" {
            anyhow::bail!("upstream unavailable");
        }

        Ok(FormSchema {
            title: title.unwrap_or("Contact Us").to_owned(),
            description: Some(prompt.to_owned()),
            fields: vec![FormField {
                name: "email".to_owned(),
                label: "Email".to_owned(),
                field_type: FieldType::Email,
                required: true,
                options: None,
                placeholder: None,
                accept: None,
                multiple: None,
            }],
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _dir: TempDir,
}

pub async fn setup_app(environment: Environment) -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let pool = formforge::db::create_pool(&format!("sqlite:{}", path.display()), 4).await?;
    formforge::db::migrate(&pool).await?;

    let config = Config {
        environment,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_owned(),
        },
        ..Config::default()
    };

    let state = AppState::new(
        config,
        formforge_shared::State::single(pool),
        Arc::new(StubGenerator),
    );

    Ok(TestApp {
        router: formforge::router(state.clone()),
        state,
        _dir: dir,
    })
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The session cookie set by this response, if any.
    pub fn session_cookie(&self) -> Option<Cookie<'static>> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| Cookie::parse(value.to_owned()).ok())
            .find(|cookie| cookie.name() == AUTH_COOKIE_NAME)
    }

    /// `Cookie` request header a browser would send back.
    pub fn cookie_header(&self) -> String {
        let cookie = self.session_cookie().unwrap();
        format!("{}={}", cookie.name(), cookie.value())
    }
}

pub fn request(method: Method, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &TestApp, request: Request<Body>) -> TestResponse {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        body,
    }
}

/// Registers a user and returns the cookie header for its session.
pub async fn register(app: &TestApp, email: &str, password: &str) -> String {
    let res = send(
        app,
        request(
            Method::POST,
            "/api/auth/register",
            Some(json!({ "email": email, "password": password })),
            None,
        ),
    )
    .await;

    assert_eq!(res.status, StatusCode::OK, "{}", res.body);

    res.cookie_header()
}

/// Creates a form through the generate endpoint and returns its id.
pub async fn create_form(app: &TestApp, cookie: &str, title: &str) -> String {
    let res = send(
        app,
        request(
            Method::POST,
            "/api/forms/generate",
            Some(json!({ "prompt": "a contact form", "title": title })),
            Some(cookie),
        ),
    )
    .await;

    assert_eq!(res.status, StatusCode::OK, "{}", res.body);

    res.body["id"].as_str().unwrap().to_owned()
}
