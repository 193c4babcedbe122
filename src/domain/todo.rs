use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
use crate::domain::todo::driving_ports::TodoError;
use crate::external_connections::ExternalConnectivity;
use anyhow::Context;
use chrono::NaiveDate;
use derive_more::Display;

/// Priority given to todos which are created without one
pub const DEFAULT_PRIORITY: &str = "medium";

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct TodoItem {
    pub id: i32,
    pub user_id: Option<i32>,
    pub title: String,
    pub completed: bool,
    pub priority: String,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Display)]
#[display("{title}")]
#[cfg_attr(test, derive(Clone, PartialEq, Eq))]
pub struct NewTodo {
    pub title: String,
    pub completed: bool,
    pub priority: String,
    pub due_date: Option<NaiveDate>,
}

/// A set of changes to apply to an existing todo. A `None` field was not supplied and leaves
/// the stored value alone. `due_date` is nullable, so `Some(None)` clears it.
#[derive(Debug, Default)]
#[cfg_attr(test, derive(Clone, PartialEq, Eq))]
pub struct TodoPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<String>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl TodoPatch {
    /// Overwrites each supplied field on [todo]
    pub fn apply_to(&self, todo: &mut TodoItem) {
        if let Some(ref title) = self.title {
            todo.title = title.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        if let Some(ref priority) = self.priority {
            todo.priority = priority.clone();
        }
        if let Some(due_date) = self.due_date {
            todo.due_date = due_date;
        }
    }
}

pub mod driven_ports {
    use super::*;

    pub trait TodoReader: Sync {
        /// Fetches up to [limit] todos in id order after skipping the first [skip]
        async fn all_todos(
            &self,
            skip: i64,
            limit: i64,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<TodoItem>, anyhow::Error>;
        async fn todo_by_id(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<TodoItem>, anyhow::Error>;
    }

    pub trait TodoWriter: Sync {
        async fn create_todo(
            &self,
            new_todo: &NewTodo,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<TodoItem, anyhow::Error>;

        /// Persists every field of [todo] onto the row with the same id. Returns `None` if
        /// that row no longer exists.
        async fn update_todo(
            &self,
            todo: &TodoItem,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<TodoItem>, anyhow::Error>;

        /// Removes a todo, returning whether there was a row to remove
        async fn delete_todo(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<bool, anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum TodoError {
        #[error("todo {0} does not exist")]
        DoesNotExist(i32),
        #[error(transparent)]
        PortError(#[from] anyhow::Error),
    }


    pub trait TodoPort {
        async fn create_todo(
            &self,
            new_todo: &NewTodo,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<TodoItem, anyhow::Error>;
        async fn list_todos(
            &self,
            skip: i64,
            limit: i64,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl driven_ports::TodoReader,
        ) -> Result<Vec<TodoItem>, anyhow::Error>;
        async fn todo_by_id(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl driven_ports::TodoReader,
        ) -> Result<TodoItem, TodoError>;
        async fn update_todo(
            &self,
            todo_id: i32,
            patch: &TodoPatch,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl driven_ports::TodoReader,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<TodoItem, TodoError>;
        async fn delete_todo(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<(), TodoError>;
    }
}

pub struct TodoService {}

impl driving_ports::TodoPort for TodoService {
    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_write: &impl TodoWriter,
    ) -> Result<TodoItem, anyhow::Error> {
        let created = todo_write
            .create_todo(new_todo, &mut *ext_cxn)
            .await
            .context("creating a todo")?;

        Ok(created)
    }

    async fn list_todos(
        &self,
        skip: i64,
        limit: i64,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
    ) -> Result<Vec<TodoItem>, anyhow::Error> {
        let todos = todo_read
            .all_todos(skip, limit, &mut *ext_cxn)
            .await
            .context("listing todos")?;

        Ok(todos)
    }

    async fn todo_by_id(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
    ) -> Result<TodoItem, TodoError> {
        todo_read
            .todo_by_id(todo_id, &mut *ext_cxn)
            .await
            .context("fetching a todo by id")?
            .ok_or(TodoError::DoesNotExist(todo_id))
    }

    async fn update_todo(
        &self,
        todo_id: i32,
        patch: &TodoPatch,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
        todo_write: &impl TodoWriter,
    ) -> Result<TodoItem, TodoError> {
        let mut todo = todo_read
            .todo_by_id(todo_id, &mut *ext_cxn)
            .await
            .context("looking up a todo to update")?
            .ok_or(TodoError::DoesNotExist(todo_id))?;

        patch.apply_to(&mut todo);

        todo_write
            .update_todo(&todo, &mut *ext_cxn)
            .await
            .context("updating a todo")?
            .ok_or(TodoError::DoesNotExist(todo_id))
    }

    async fn delete_todo(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_write: &impl TodoWriter,
    ) -> Result<(), TodoError> {
        let removed = todo_write
            .delete_todo(todo_id, &mut *ext_cxn)
            .await
            .context("deleting a todo")?;

        if removed {
            Ok(())
        } else {
            Err(TodoError::DoesNotExist(todo_id))
        }
    }
}
