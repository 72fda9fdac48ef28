use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::{WithRejection, cookie::CookieJar};
use formforge_user::{LoginInput, RegisterInput};
use serde::Deserialize;
use serde_json::json;

use crate::{auth::AuthUser, error::AppError, routes::AppState};

#[derive(Deserialize)]
pub struct RegisterBody {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

pub async fn register(
    State(app): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(body), _): WithRejection<Json<RegisterBody>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let id = app
        .user_command
        .register(RegisterInput {
            email: body.email.to_owned(),
            password: body.password,
            name: body.name.to_owned(),
        })
        .await?;

    let token = app.tokens.issue(id.to_owned())?;

    Ok((
        app.cookie.attach(jar, token),
        Json(json!({
            "user": { "id": id, "email": body.email, "name": body.name }
        })),
    ))
}

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(app): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(body), _): WithRejection<Json<LoginBody>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let id = app
        .user_command
        .login(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    let token = app.tokens.issue(id.to_owned())?;

    tracing::info!(user_id = %id, "user logged in");

    Ok((
        app.cookie.attach(jar, token),
        Json(json!({ "message": "Login successful", "userId": id })),
    ))
}

/// Only the client's cookie is cleared, an already issued token stays valid
/// until it expires.
pub async fn logout(State(app): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    (
        app.cookie.clear(jar),
        Json(json!({ "message": "Logout successful" })),
    )
}

pub async fn status(
    State(app): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let username = app
        .user_command
        .find_by_id(&user.id)
        .await?
        .and_then(|row| row.name);

    Ok(Json(json!({
        "message": "Authenticated",
        "userId": user.id,
        "username": username,
    })))
}
