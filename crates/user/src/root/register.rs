use ulid::Ulid;
use validator::Validate;

use crate::{password, repository};

#[derive(Validate)]
pub struct RegisterInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(length(max = 100))]
    pub name: Option<String>,
}

impl super::Command {
    pub async fn register(&self, input: RegisterInput) -> formforge_shared::Result<String> {
        input.validate()?;

        if self.find_by_email(&input.email).await?.is_some() {
            formforge_shared::user!("Email already exists");
        }

        let password_hash = password::hash(input.password).await?;
        let id = Ulid::new().to_string();

        repository::create(
            &self.write_db,
            id.to_owned(),
            input.email,
            password_hash,
            input.name,
        )
        .await?;

        tracing::info!(user_id = %id, "user registered");

        Ok(id)
    }
}
