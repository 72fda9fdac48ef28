//! Restricts mutation of a resource to the user who created it.

use async_trait::async_trait;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use formforge_form::FormRow;

use crate::{error::AppError, routes::AppState};

use super::gate::AuthUser;

pub trait Owned {
    fn owner_id(&self) -> &str;
}

impl Owned for FormRow {
    fn owner_id(&self) -> &str {
        &self.owner_id
    }
}

/// Lookup used by [`authorize`], one implementation per resource kind.
#[async_trait]
pub trait ResourceStore<R>: Send + Sync {
    /// Name used in the not found message, e.g. "Form".
    const KIND: &'static str;

    async fn find_by_id(&self, id: &str) -> formforge_shared::Result<Option<R>>;
}

#[async_trait]
impl ResourceStore<FormRow> for formforge_form::Command {
    const KIND: &'static str = "Form";

    async fn find_by_id(&self, id: &str) -> formforge_shared::Result<Option<FormRow>> {
        self.find(id).await
    }
}

/// Loads the resource once and hands it back only to its owner.
///
/// A missing resource is `NotFound` and never reaches the owner comparison.
pub async fn authorize<R, S>(store: &S, id: &str, user: &AuthUser) -> Result<R, AppError>
where
    R: Owned + Send,
    S: ResourceStore<R>,
{
    let Some(resource) = store.find_by_id(id).await? else {
        return Err(AppError::NotFound(S::KIND));
    };

    if resource.owner_id() != user.id {
        tracing::warn!(
            resource = S::KIND,
            resource_id = id,
            user_id = %user.id,
            "ownership check failed"
        );
        return Err(AppError::Forbidden);
    }

    Ok(resource)
}

/// A form loaded from the `{id}` path segment and owned by the caller.
pub struct OwnedForm(pub FormRow);

impl FromRequestParts<AppState> for OwnedForm {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, app: &AppState) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, app).await?;
        let Path(id) = Path::<String>::from_request_parts(parts, app)
            .await
            .map_err(|_| AppError::NotFound("Form"))?;

        let form = authorize(&app.form_command, &id, &user).await?;

        Ok(OwnedForm(form))
    }
}
