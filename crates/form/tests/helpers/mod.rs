use std::{path::PathBuf, str::FromStr};

use formforge_form::{FieldType, FormField, FormSchema};
use formforge_shared::State;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    formforge_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(State::single(pool))
}

#[allow(dead_code)]
pub fn contact_schema(title: &str) -> FormSchema {
    FormSchema {
        title: title.to_owned(),
        description: Some("Reach out".to_owned()),
        fields: vec![
            FormField {
                name: "email".to_owned(),
                label: "Email".to_owned(),
                field_type: FieldType::Email,
                required: true,
                options: None,
                placeholder: None,
                accept: None,
                multiple: None,
            },
            FormField {
                name: "attachment".to_owned(),
                label: "Attachment".to_owned(),
                field_type: FieldType::File,
                required: false,
                options: None,
                placeholder: None,
                accept: Some("image/*".to_owned()),
                multiple: Some(true),
            },
        ],
    }
}
