use formforge_user::{LoginInput, RegisterInput};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_login_failure() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = formforge_user::Command::new(state);
    let resp = cmd
        .login(LoginInput {
            email: "john.doe@formforge.localhost".to_owned(),
            password: "my_password".to_owned(),
        })
        .await;

    assert_eq!(resp.unwrap_err().to_string(), "Invalid credentials");

    let user = cmd
        .register(RegisterInput {
            email: "john.doe@formforge.localhost".to_owned(),
            password: "my_password".to_owned(),
            name: None,
        })
        .await?;

    let resp = cmd
        .login(LoginInput {
            email: "john.doe@formforge.localhost".to_owned(),
            password: "my_password3".to_owned(),
        })
        .await;

    assert_eq!(resp.unwrap_err().to_string(), "Invalid credentials");

    let resp = cmd
        .login(LoginInput {
            email: "john.doe@formforge.localhos".to_owned(),
            password: "my_password".to_owned(),
        })
        .await;

    assert_eq!(resp.unwrap_err().to_string(), "Invalid credentials");

    let resp = cmd
        .login(LoginInput {
            email: "john.doe@formforge.localhost".to_owned(),
            password: "my_password".to_owned(),
        })
        .await;

    assert_eq!(resp.unwrap(), user);

    Ok(())
}
