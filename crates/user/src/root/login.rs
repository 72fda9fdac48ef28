use validator::Validate;

use crate::password;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Validate)]
pub struct LoginInput {
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl super::Command {
    /// Returns the user id. Unknown emails and wrong passwords fail with the
    /// same message so callers cannot probe which accounts exist.
    pub async fn login(&self, input: LoginInput) -> formforge_shared::Result<String> {
        if input.validate().is_err() {
            formforge_shared::user!("{INVALID_CREDENTIALS}");
        }

        let Some(user) = self.find_by_email(&input.email).await? else {
            tracing::debug!("login attempt for unknown email");
            password::verify(input.password, password::DUMMY_HASH).await?;
            formforge_shared::user!("{INVALID_CREDENTIALS}");
        };

        if !password::verify(input.password, user.password).await? {
            tracing::debug!(user_id = %user.id, "login attempt with wrong password");
            formforge_shared::user!("{INVALID_CREDENTIALS}");
        }

        Ok(user.id)
    }
}
