use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Form;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(Form::Table)
        .col(
            ColumnDef::new(Form::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Form::OwnerId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(Form::Title)
                .string()
                .not_null()
                .string_len(200),
        )
        .col(ColumnDef::new(Form::Description).text().null())
        .col(ColumnDef::new(Form::Schema).text().not_null())
        .col(ColumnDef::new(Form::CreatedAt).big_integer().not_null())
        .col(ColumnDef::new(Form::UpdatedAt).big_integer().not_null())
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(Form::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = up_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = down_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
