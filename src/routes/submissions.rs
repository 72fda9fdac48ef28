use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;
use formforge_form::{SubmitInput, UploadedFile};
use serde::Deserialize;
use serde_json::json;

use crate::{error::AppError, routes::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
    pub form_id: Option<String>,
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub uploaded_files: Vec<UploadedFile>,
}

/// Public submission endpoint used by forms with file fields. Files are
/// uploaded to the media host by the client, only their metadata lands here.
pub async fn create(
    State(app): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<CreateBody>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(form_id), Some(data)) = (body.form_id, body.data) else {
        return Err(AppError::BadRequest(
            "Form ID and data are required".to_owned(),
        ));
    };

    let submission = app
        .form_command
        .submit(SubmitInput {
            form_id,
            data,
            files: body.uploaded_files,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Submission created successfully",
            "submission": submission,
        })),
    ))
}
