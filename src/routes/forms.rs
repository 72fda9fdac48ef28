use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use formforge_form::{CreateInput, FormSchema, SubmitInput, UpdateInput};
use serde::Deserialize;
use serde_json::json;

use crate::{
    auth::{AuthUser, OwnedForm},
    error::AppError,
    routes::AppState,
};

const GENERATOR_UNAVAILABLE: &str = "AI service unavailable. Please try again later.";

#[derive(Deserialize)]
pub struct GenerateBody {
    pub prompt: Option<String>,
    pub title: Option<String>,
}

pub async fn generate(
    State(app): State<AppState>,
    user: AuthUser,
    WithRejection(Json(body), _): WithRejection<Json<GenerateBody>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let Some(prompt) = body.prompt.filter(|p| !p.trim().is_empty()) else {
        return Err(AppError::BadRequest("Prompt is required".to_owned()));
    };

    let schema = app
        .generator
        .generate(&prompt, body.title.as_deref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %user.id, "form generation failed");
            AppError::Upstream(GENERATOR_UNAVAILABLE.to_owned())
        })?;

    let form = app
        .form_command
        .create(CreateInput {
            owner_id: user.id,
            schema,
        })
        .await?;

    Ok(Json(form))
}

pub async fn list(
    State(app): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let forms = app.form_command.list_by_owner(user.id).await?;

    Ok(Json(json!({ "forms": forms })))
}

/// Public: anyone holding the link can load a form to fill it in.
pub async fn show(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let form = app
        .form_command
        .find(id)
        .await?
        .ok_or(AppError::NotFound("Form"))?;

    Ok(Json(form))
}

pub async fn submit(
    State(app): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(data), _): WithRejection<Json<serde_json::Value>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    app.form_command
        .submit(SubmitInput {
            form_id: id,
            data,
            files: vec![],
        })
        .await?;

    Ok(Json(json!({ "message": "Submission saved successfully" })))
}

#[derive(Deserialize)]
pub struct UpdateBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub schema: Option<FormSchema>,
}

pub async fn update(
    OwnedForm(form): OwnedForm,
    State(app): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateBody>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let form = app
        .form_command
        .update(
            form,
            UpdateInput {
                title: body.title,
                description: body.description,
                schema: body.schema,
            },
        )
        .await?;

    Ok(Json(form))
}

pub async fn delete(
    OwnedForm(form): OwnedForm,
    State(app): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    app.form_command.delete(form).await?;

    Ok(Json(json!({ "message": "Form deleted successfully" })))
}

pub async fn submissions(
    OwnedForm(form): OwnedForm,
    State(app): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let submissions = app.form_command.submissions(&form).await?;

    Ok(Json(json!({ "submissions": submissions })))
}
