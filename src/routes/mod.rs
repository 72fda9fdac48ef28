use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use sqlx::SqlitePool;

use crate::{
    auth::{SessionCookie, TokenCodec, require_auth},
    config::Config,
    generator::FormGenerator,
};

pub mod auth;
pub mod forms;
pub mod health;
pub mod submissions;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub tokens: TokenCodec,
    pub cookie: SessionCookie,
    pub user_command: formforge_user::Command,
    pub form_command: formforge_form::Command,
    pub generator: Arc<dyn FormGenerator>,
    pub pool: SqlitePool,
}

impl AppState {
    /// The signing secret and cookie attributes are fixed here, once.
    pub fn new(
        config: Config,
        state: formforge_shared::State,
        generator: Arc<dyn FormGenerator>,
    ) -> Self {
        Self {
            tokens: TokenCodec::new(&config.jwt.secret),
            cookie: SessionCookie::new(config.environment.is_production()),
            user_command: formforge_user::Command::new(state.clone()),
            form_command: formforge_form::Command::new(state.clone()),
            pool: state.read_db,
            generator,
            config,
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    // every route in this group needs a session, ownership is checked per handler
    let protected = Router::new()
        .route("/api/auth/status", get(auth::status))
        .route("/api/forms", get(forms::list))
        .route("/api/forms/generate", post(forms::generate))
        .route("/api/forms/{id}/submissions", get(forms::submissions))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/", get(health::banner))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route(
            "/api/forms/{id}",
            get(forms::show).put(forms::update).delete(forms::delete),
        )
        .route("/api/forms/{id}/submit", post(forms::submit))
        .route("/api/submissions", post(submissions::create))
        .merge(protected)
        .with_state(app_state)
}
