use crate::domain;
use crate::domain::todo::{NewTodo, TodoItem};
use crate::entity::TodoRow;
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use sqlx::{query, query_as};

impl From<TodoRow> for domain::todo::TodoItem {
    fn from(value: TodoRow) -> Self {
        TodoItem {
            id: value.id,
            user_id: value.user_id,
            title: value.title,
            completed: value.completed,
            priority: value.priority,
            due_date: value.due_date,
        }
    }
}

pub struct DbTodoReader;

impl domain::todo::driven_ports::TodoReader for DbTodoReader {
    async fn all_todos(
        &self,
        skip: i64,
        limit: i64,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<TodoItem>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let todos: Vec<TodoItem> = query_as::<_, TodoRow>(
            "SELECT t.* FROM todos t ORDER BY t.id OFFSET $1 LIMIT $2",
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(cxn.borrow_connection())
        .await
        .context("trying to fetch a page of todos")?
        .into_iter()
        .map(TodoItem::from)
        .collect();

        Ok(todos)
    }

    async fn todo_by_id(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<TodoItem>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let todo = query_as::<_, TodoRow>("SELECT t.* FROM todos t WHERE t.id = $1")
            .bind(todo_id)
            .fetch_optional(cxn.borrow_connection())
            .await
            .context("trying to fetch a todo by ID")?
            .map(TodoItem::from);

        Ok(todo)
    }
}

pub struct DbTodoWriter;

impl domain::todo::driven_ports::TodoWriter for DbTodoWriter {
    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<TodoItem, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let created = query_as::<_, TodoRow>(
            "INSERT INTO todos(title, completed, priority, due_date) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&new_todo.title)
        .bind(new_todo.completed)
        .bind(&new_todo.priority)
        .bind(new_todo.due_date)
        .fetch_one(cxn.borrow_connection())
        .await
        .context("trying to insert a new todo into the database")?;

        Ok(created.into())
    }

    async fn update_todo(
        &self,
        todo: &TodoItem,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<TodoItem>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let updated = query_as::<_, TodoRow>(
            "UPDATE todos SET title = $1, completed = $2, priority = $3, due_date = $4 WHERE id = $5 RETURNING *",
        )
        .bind(&todo.title)
        .bind(todo.completed)
        .bind(&todo.priority)
        .bind(todo.due_date)
        .bind(todo.id)
        .fetch_optional(cxn.borrow_connection())
        .await
        .context("trying to update a todo in the database")?
        .map(TodoItem::from);

        Ok(updated)
    }

    async fn delete_todo(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<bool, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let delete_result = query("DELETE FROM todos WHERE id = $1")
            .bind(todo_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to remove a todo from the database")?;

        Ok(delete_result.rows_affected() > 0)
    }
}
