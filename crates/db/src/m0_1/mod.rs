mod form_create_owner_idx;
mod form_create_table;
mod submission_create_form_idx;
mod submission_create_table;
mod user_create_email_idx;
mod user_create_table;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "main",
    "m0_1",
    vec_box![],
    vec_box![
        user_create_table::Operation,
        user_create_email_idx::Operation,
        form_create_table::Operation,
        form_create_owner_idx::Operation,
        submission_create_table::Operation,
        submission_create_form_idx::Operation
    ]
);
