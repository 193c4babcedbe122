use crate::domain;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

const DEFAULT_LIST_LIMIT: i64 = 10;

fn default_priority() -> String {
    domain::todo::DEFAULT_PRIORITY.to_owned()
}

fn default_limit() -> i64 {
    DEFAULT_LIST_LIMIT
}

/// Deserializes a field that is present in the payload. Paired with `#[serde(default)]` so an
/// absent field becomes `None`, while an explicit `null` is handed to the inner type.
fn supplied<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Reads `completed`, treating an explicit `null` as `false`
fn completed_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Option::<bool>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Reads `priority`, treating an explicit `null` as [domain::todo::DEFAULT_PRIORITY]
fn priority_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer)
        .map(|priority| priority.unwrap_or_else(default_priority))
}

fn supplied_completed<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<bool>, D::Error> {
    completed_or_default(deserializer).map(Some)
}

fn supplied_priority<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    priority_or_default(deserializer).map(Some)
}

/// DTO for creating a new todo via the API
#[derive(Debug, Deserialize, ToSchema)]
pub struct TodoCreate {
    #[schema(example = "Buy milk")]
    pub title: String,
    #[serde(default, deserialize_with = "completed_or_default")]
    #[schema(value_type = Option<bool>, example = false)]
    pub completed: bool,
    #[serde(default = "default_priority", deserialize_with = "priority_or_default")]
    #[schema(value_type = Option<String>, example = "medium")]
    pub priority: String,
    #[serde(default)]
    #[schema(example = "2024-06-01")]
    pub due_date: Option<NaiveDate>,
}

impl From<TodoCreate> for domain::todo::NewTodo {
    fn from(value: TodoCreate) -> Self {
        domain::todo::NewTodo {
            title: value.title,
            completed: value.completed,
            priority: value.priority,
            due_date: value.due_date,
        }
    }
}

/// DTO for partially updating a todo via the API. Only fields present in the request body are
/// changed. A `null` `completed` or `priority` resets that field to its default and a `null`
/// `due_date` clears it. `title` can't be null.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TodoUpdate {
    #[serde(default, deserialize_with = "supplied")]
    #[schema(example = "Buy oat milk")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "supplied_completed")]
    #[schema(example = true)]
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "supplied_priority")]
    #[schema(example = "high")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "supplied")]
    #[schema(value_type = Option<String>, format = Date, example = "2024-06-01")]
    pub due_date: Option<Option<NaiveDate>>,
}

impl From<TodoUpdate> for domain::todo::TodoPatch {
    fn from(value: TodoUpdate) -> Self {
        domain::todo::TodoPatch {
            title: value.title,
            completed: value.completed,
            priority: value.priority,
            due_date: value.due_date,
        }
    }
}

/// DTO for a todo returned from the API
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, PartialEq, Eq, Debug))]
pub struct Todo {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Buy milk")]
    pub title: String,
    #[schema(example = false)]
    pub completed: bool,
    #[schema(example = "medium")]
    pub priority: String,
    #[schema(example = "2024-06-01")]
    pub due_date: Option<NaiveDate>,
}

impl From<domain::todo::TodoItem> for Todo {
    fn from(value: domain::todo::TodoItem) -> Self {
        Todo {
            id: value.id,
            title: value.title,
            completed: value.completed,
            priority: value.priority,
            due_date: value.due_date,
        }
    }
}

/// DTO grouping a sequence of todos
#[derive(Serialize, ToSchema)]
pub struct TodoList {
    pub todos: Vec<Todo>,
}

/// Query parameters for paging through todos. Negative values behave like zero.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTodosQuery {
    /// Number of todos to skip
    #[serde(default)]
    #[param(default = 0)]
    pub skip: i64,
    /// Maximum number of todos to return
    #[serde(default = "default_limit")]
    #[param(default = 10)]
    pub limit: i64,
}

impl ListTodosQuery {
    /// The `(skip, limit)` pair with negatives raised to zero
    pub fn clamped(&self) -> (i64, i64) {
        (self.skip.max(0), self.limit.max(0))
    }
}

/// DTO carrying a single human-readable status message
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, PartialEq, Eq, Debug))]
pub struct DetailMessage {
    #[schema(example = "Todo not found")]
    pub detail: String,
}

impl DetailMessage {
    pub fn new(detail: &str) -> Self {
        DetailMessage {
            detail: detail.to_owned(),
        }
    }
}

/// DTO returned from the root of the API
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, PartialEq, Eq, Debug))]
pub struct WelcomeMessage {
    #[schema(example = "Welcome to the Rust Todo API!")]
    pub message: String,
}
