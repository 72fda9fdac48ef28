mod repository;
mod root;
pub mod schema;

pub use repository::{FormRow, FormSummary, SubmissionRow};
pub use root::*;
pub use schema::{FieldType, FileUrl, FormField, FormSchema, UploadedFile};
