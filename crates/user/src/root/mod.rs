use std::ops::Deref;

use crate::repository::{self, FindType, UserRow};

mod login;
mod register;

pub use login::LoginInput;
pub use register::RegisterInput;

/// Credential store commands.
#[derive(Clone)]
pub struct Command(pub formforge_shared::State);

impl Deref for Command {
    type Target = formforge_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Command {
    pub fn new(state: formforge_shared::State) -> Self {
        Self(state)
    }

    pub async fn find_by_id(
        &self,
        id: impl Into<String>,
    ) -> formforge_shared::Result<Option<UserRow>> {
        repository::find(&self.read_db, FindType::Id(id.into())).await
    }

    pub async fn find_by_email(
        &self,
        email: impl Into<String>,
    ) -> formforge_shared::Result<Option<UserRow>> {
        repository::find(&self.read_db, FindType::Email(email.into())).await
    }
}
