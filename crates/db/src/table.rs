use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum User {
    Table,
    Id,
    Email,
    Password,
    Name,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Form {
    Table,
    Id,
    OwnerId,
    Title,
    Description,
    Schema,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum Submission {
    Table,
    Id,
    FormId,
    Data,
    Files,
    CreatedAt,
}
