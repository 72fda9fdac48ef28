use formforge_form::{CreateInput, FileUrl, SubmitInput, UploadedFile};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn submit_to_existing_form() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = formforge_form::Command::new(state);

    let form = cmd
        .create(CreateInput {
            owner_id: "alice".to_owned(),
            schema: helpers::contact_schema("Contact"),
        })
        .await?;

    let files = vec![UploadedFile {
        field_name: "attachment".to_owned(),
        urls: vec![FileUrl {
            url: "https://media.example/abc.png".to_owned(),
            public_id: Some("abc".to_owned()),
            file_name: Some("abc.png".to_owned()),
            file_size: Some(1024),
            mime_type: Some("image/png".to_owned()),
        }],
    }];

    let submission = cmd
        .submit(SubmitInput {
            form_id: form.id.to_owned(),
            data: serde_json::json!({"email": "x@y.z"}),
            files: files.clone(),
        })
        .await?;

    let stored = cmd.submissions(&form).await?;

    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, submission.id);
    assert_eq!(stored[0].data.0["email"], "x@y.z");
    assert_eq!(stored[0].files.0, files);

    Ok(())
}

#[tokio::test]
async fn submit_to_missing_form() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = formforge_form::Command::new(state);

    let resp = cmd
        .submit(SubmitInput {
            form_id: "missing".to_owned(),
            data: serde_json::json!({"email": "x@y.z"}),
            files: vec![],
        })
        .await;

    assert!(matches!(resp, Err(formforge_shared::Error::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn submissions_follow_their_form() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = formforge_form::Command::new(state.clone());

    let form = cmd
        .create(CreateInput {
            owner_id: "alice".to_owned(),
            schema: helpers::contact_schema("Contact"),
        })
        .await?;
    cmd.submit(SubmitInput {
        form_id: form.id.to_owned(),
        data: serde_json::json!({"email": "x@y.z"}),
        files: vec![],
    })
    .await?;

    let orphan = sqlx::query(
        "INSERT INTO submission (id, form_id, data, files, created_at) VALUES ('s1', 'missing', '{}', '[]', 0)",
    )
    .execute(&state.write_db)
    .await;
    assert!(orphan.is_err());

    sqlx::query("DELETE FROM form WHERE id = ?")
        .bind(&form.id)
        .execute(&state.write_db)
        .await?;

    let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM submission")
        .fetch_one(&state.write_db)
        .await?;
    assert_eq!(remaining, 0);

    Ok(())
}

#[tokio::test]
async fn submission_data_must_be_an_object() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = formforge_form::Command::new(state);

    let form = cmd
        .create(CreateInput {
            owner_id: "alice".to_owned(),
            schema: helpers::contact_schema("Contact"),
        })
        .await?;

    let resp = cmd
        .submit(SubmitInput {
            form_id: form.id,
            data: serde_json::json!(["not", "an", "object"]),
            files: vec![],
        })
        .await;

    assert_eq!(
        resp.unwrap_err().to_string(),
        "Submission data must be a JSON object"
    );

    Ok(())
}
