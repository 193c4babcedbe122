use chrono::NaiveDate;
use sqlx::FromRow;

/// DB entity describing a user. The `users` table is part of the schema, but no route reads or
/// writes it yet.
#[derive(Debug, FromRow, PartialEq, Eq)]
#[allow(dead_code)]
pub struct UserRow {
    pub id: i32,
    pub username: String,
    pub hashed_password: String,
}

/// DB entity describing a todo item
#[derive(Debug, FromRow, PartialEq, Eq)]
pub struct TodoRow {
    pub id: i32,
    pub user_id: Option<i32>,
    pub title: String,
    pub completed: bool,
    pub priority: String,
    pub due_date: Option<NaiveDate>,
}
