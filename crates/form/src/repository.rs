use std::collections::HashMap;

use formforge_db::table::{Form, Submission};
use sea_query::{Expr, ExprTrait, Func, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow, types::Json};

use crate::schema::{FormSchema, UploadedFile};

#[derive(Clone, Debug, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRow {
    pub id: String,
    #[serde(rename = "owner")]
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub schema: Json<FormSchema>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSummary {
    #[serde(flatten)]
    pub form: FormRow,
    pub submission_count: i64,
}

#[derive(Clone, Debug, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRow {
    pub id: String,
    pub form_id: String,
    pub data: Json<serde_json::Value>,
    pub files: Json<Vec<UploadedFile>>,
    pub created_at: i64,
}

const FORM_COLUMNS: [Form; 7] = [
    Form::Id,
    Form::OwnerId,
    Form::Title,
    Form::Description,
    Form::Schema,
    Form::CreatedAt,
    Form::UpdatedAt,
];

pub(crate) async fn insert_form(pool: &SqlitePool, form: &FormRow) -> formforge_shared::Result<()> {
    let statement = Query::insert()
        .into_table(Form::Table)
        .columns(FORM_COLUMNS)
        .values_panic([
            form.id.to_owned().into(),
            form.owner_id.to_owned().into(),
            form.title.to_owned().into(),
            form.description.to_owned().into(),
            serde_json::to_string(&form.schema.0)?.into(),
            form.created_at.into(),
            form.updated_at.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub(crate) async fn find_form(
    pool: &SqlitePool,
    id: String,
) -> formforge_shared::Result<Option<FormRow>> {
    let statement = Query::select()
        .columns(FORM_COLUMNS)
        .from(Form::Table)
        .and_where(Expr::col(Form::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, FormRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) async fn list_forms(
    pool: &SqlitePool,
    owner_id: String,
) -> formforge_shared::Result<Vec<FormRow>> {
    let statement = Query::select()
        .columns(FORM_COLUMNS)
        .from(Form::Table)
        .and_where(Expr::col(Form::OwnerId).eq(owner_id))
        .order_by(Form::CreatedAt, Order::Desc)
        .order_by(Form::Id, Order::Desc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, FormRow, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}

pub(crate) async fn count_submissions(
    pool: &SqlitePool,
    form_ids: Vec<String>,
) -> formforge_shared::Result<HashMap<String, i64>> {
    if form_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let statement = Query::select()
        .column(Submission::FormId)
        .expr(Func::count(Expr::col(Submission::Id)))
        .from(Submission::Table)
        .and_where(Expr::col(Submission::FormId).is_in(form_ids))
        .group_by_col(Submission::FormId)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let rows = sqlx::query_as_with::<_, (String, i64), _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().collect())
}

pub(crate) async fn update_form(pool: &SqlitePool, form: &FormRow) -> formforge_shared::Result<()> {
    let statement = Query::update()
        .table(Form::Table)
        .value(Form::Title, form.title.to_owned())
        .value(Form::Description, form.description.to_owned())
        .value(Form::Schema, serde_json::to_string(&form.schema.0)?)
        .value(Form::UpdatedAt, form.updated_at)
        .and_where(Expr::col(Form::Id).eq(form.id.to_owned()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

/// Removes the form together with every submission it received.
pub(crate) async fn delete_form(pool: &SqlitePool, id: String) -> formforge_shared::Result<()> {
    let mut tx = pool.begin().await?;

    let (sql, values) = Query::delete()
        .from_table(Submission::Table)
        .and_where(Expr::col(Submission::FormId).eq(id.to_owned()))
        .to_owned()
        .build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *tx).await?;

    let (sql, values) = Query::delete()
        .from_table(Form::Table)
        .and_where(Expr::col(Form::Id).eq(id))
        .to_owned()
        .build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *tx).await?;

    tx.commit().await?;

    Ok(())
}

const SUBMISSION_COLUMNS: [Submission; 5] = [
    Submission::Id,
    Submission::FormId,
    Submission::Data,
    Submission::Files,
    Submission::CreatedAt,
];

pub(crate) async fn insert_submission(
    pool: &SqlitePool,
    submission: &SubmissionRow,
) -> formforge_shared::Result<()> {
    let statement = Query::insert()
        .into_table(Submission::Table)
        .columns(SUBMISSION_COLUMNS)
        .values_panic([
            submission.id.to_owned().into(),
            submission.form_id.to_owned().into(),
            serde_json::to_string(&submission.data.0)?.into(),
            serde_json::to_string(&submission.files.0)?.into(),
            submission.created_at.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await;

    // The form was deleted between the lookup and the insert.
    if let Err(e) = &result {
        if e
            .as_database_error()
            .is_some_and(|e| e.is_foreign_key_violation())
        {
            formforge_shared::not_found!("Form");
        }
    }

    result?;

    Ok(())
}

pub(crate) async fn list_submissions(
    pool: &SqlitePool,
    form_id: String,
) -> formforge_shared::Result<Vec<SubmissionRow>> {
    let statement = Query::select()
        .columns(SUBMISSION_COLUMNS)
        .from(Submission::Table)
        .and_where(Expr::col(Submission::FormId).eq(form_id))
        .order_by(Submission::CreatedAt, Order::Desc)
        .order_by(Submission::Id, Order::Desc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, SubmissionRow, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}
