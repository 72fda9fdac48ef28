use std::ops::Deref;

use sqlx::types::Json;
use time::OffsetDateTime;
use ulid::Ulid;

use crate::{
    repository::{self, FormRow, FormSummary, SubmissionRow},
    schema::{FormSchema, UploadedFile},
};

/// Form and submission commands.
///
/// Ownership is not re-checked here: owner-only operations receive a
/// [`FormRow`] the caller has already authorized.
#[derive(Clone)]
pub struct Command(pub formforge_shared::State);

impl Deref for Command {
    type Target = formforge_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub struct CreateInput {
    pub owner_id: String,
    pub schema: FormSchema,
}

#[derive(Default)]
pub struct UpdateInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub schema: Option<FormSchema>,
}

pub struct SubmitInput {
    pub form_id: String,
    pub data: serde_json::Value,
    pub files: Vec<UploadedFile>,
}

impl Command {
    pub fn new(state: formforge_shared::State) -> Self {
        Self(state)
    }

    pub async fn create(&self, input: CreateInput) -> formforge_shared::Result<FormRow> {
        input.schema.check()?;

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let form = FormRow {
            id: Ulid::new().to_string(),
            owner_id: input.owner_id,
            title: input.schema.title.to_owned(),
            description: input.schema.description.to_owned(),
            schema: Json(input.schema),
            created_at: now,
            updated_at: now,
        };

        repository::insert_form(&self.write_db, &form).await?;

        tracing::info!(form_id = %form.id, owner_id = %form.owner_id, "form created");

        Ok(form)
    }

    pub async fn find(&self, id: impl Into<String>) -> formforge_shared::Result<Option<FormRow>> {
        repository::find_form(&self.read_db, id.into()).await
    }

    /// Forms owned by `owner_id`, newest first.
    pub async fn list_by_owner(
        &self,
        owner_id: impl Into<String>,
    ) -> formforge_shared::Result<Vec<FormSummary>> {
        let forms = repository::list_forms(&self.read_db, owner_id.into()).await?;
        let counts = repository::count_submissions(
            &self.read_db,
            forms.iter().map(|f| f.id.to_owned()).collect(),
        )
        .await?;

        Ok(forms
            .into_iter()
            .map(|form| FormSummary {
                submission_count: counts.get(&form.id).copied().unwrap_or_default(),
                form,
            })
            .collect())
    }

    /// Title and description are kept in sync with the schema they describe.
    pub async fn update(
        &self,
        form: FormRow,
        input: UpdateInput,
    ) -> formforge_shared::Result<FormRow> {
        let mut schema = input.schema.unwrap_or(form.schema.0);

        if let Some(title) = input.title {
            schema.title = title;
        }

        if let Some(description) = input.description {
            schema.description = Some(description);
        }

        schema.check()?;

        let form = FormRow {
            title: schema.title.to_owned(),
            description: schema.description.to_owned(),
            schema: Json(schema),
            updated_at: OffsetDateTime::now_utc().unix_timestamp(),
            ..form
        };

        repository::update_form(&self.write_db, &form).await?;

        tracing::info!(form_id = %form.id, "form updated");

        Ok(form)
    }

    pub async fn delete(&self, form: FormRow) -> formforge_shared::Result<()> {
        repository::delete_form(&self.write_db, form.id.to_owned()).await?;

        tracing::info!(form_id = %form.id, "form deleted");

        Ok(())
    }

    pub async fn submit(&self, input: SubmitInput) -> formforge_shared::Result<SubmissionRow> {
        if !input.data.is_object() {
            formforge_shared::user!("Submission data must be a JSON object");
        }

        if self.find(&input.form_id).await?.is_none() {
            formforge_shared::not_found!("Form");
        }

        let submission = SubmissionRow {
            id: Ulid::new().to_string(),
            form_id: input.form_id,
            data: Json(input.data),
            files: Json(input.files),
            created_at: OffsetDateTime::now_utc().unix_timestamp(),
        };

        repository::insert_submission(&self.write_db, &submission).await?;

        tracing::info!(
            form_id = %submission.form_id,
            submission_id = %submission.id,
            "submission saved"
        );

        Ok(submission)
    }

    /// Submissions received by `form`, newest first.
    pub async fn submissions(&self, form: &FormRow) -> formforge_shared::Result<Vec<SubmissionRow>> {
        repository::list_submissions(&self.read_db, form.id.to_owned()).await
    }
}
