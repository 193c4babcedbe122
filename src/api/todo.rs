use crate::domain::todo::driving_ports::{TodoError, TodoPort};
use crate::external_connections::ExternalConnectivity;
use crate::routing_utils::{
    BasicErrorResponse, GenericErrorResponse, Json, Path, Query, TodoNotFoundResponse,
};
use crate::{AppState, SharedData, domain, dto, persistence};
use axum::Router;
use axum::extract::State;
use axum::response::ErrorResponse;
use axum::routing::{get, post};
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(create_todo, list_todos, get_todo, update_todo, delete_todo),
    components(
        schemas(dto::TodoCreate, dto::TodoUpdate, dto::Todo, dto::DetailMessage),
        responses(BasicErrorResponse),
    ),
)]
/// Defines the OpenAPI documentation for the todo API
pub struct TodoApi;
/// Constant used to group todo endpoints in OpenAPI documentation
pub const TODO_API_GROUP: &str = "Todos";

pub const TODO_DELETED: &str = "Todo deleted successfully";

/// Adds routes under "/todos" to the application router. The collection answers both with and
/// without a trailing slash.
pub fn todo_routes() -> Router<Arc<SharedData>> {
    let collection_routes = post(
        |State(app_state): AppState, Json(new_todo): Json<dto::TodoCreate>| async move {
            let mut ext_cxn = app_state.ext_cxn.clone();
            let todo_service = domain::todo::TodoService {};

            create_todo(new_todo, &mut ext_cxn, &todo_service).await
        },
    )
    .get(
        |State(app_state): AppState, Query(page): Query<dto::ListTodosQuery>| async move {
            let mut ext_cxn = app_state.ext_cxn.clone();
            let todo_service = domain::todo::TodoService {};

            list_todos(page, &mut ext_cxn, &todo_service).await
        },
    );

    Router::new()
        .route("/todos/", collection_routes.clone())
        .route("/todos", collection_routes)
        .route(
            "/todos/:todo_id",
            get(
                |State(app_state): AppState, Path(todo_id): Path<i64>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    get_todo(todo_id, &mut ext_cxn, &todo_service).await
                },
            )
            .put(
                |State(app_state): AppState,
                 Path(todo_id): Path<i64>,
                 Json(update): Json<dto::TodoUpdate>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    update_todo(todo_id, update, &mut ext_cxn, &todo_service).await
                },
            )
            .delete(
                |State(app_state): AppState, Path(todo_id): Path<i64>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    delete_todo(todo_id, &mut ext_cxn, &todo_service).await
                },
            ),
        )
}

/// Narrows a path id to the range ids are stored in. Anything outside it can't name a todo.
fn stored_todo_id(todo_id: i64) -> Result<i32, ErrorResponse> {
    i32::try_from(todo_id).map_err(|_| {
        info!("Todo {todo_id} was requested but is outside the range of stored ids");
        TodoNotFoundResponse.into()
    })
}

/// Maps a domain failure onto the 404 or 500 response the client should see
fn todo_error_response(todo_err: TodoError) -> ErrorResponse {
    match todo_err {
        TodoError::DoesNotExist(todo_id) => {
            info!("Todo {todo_id} was requested but does not exist");
            TodoNotFoundResponse.into()
        }
        TodoError::PortError(port_err) => GenericErrorResponse(port_err).into(),
    }
}

#[utoipa::path(
    post,
    path = "/todos/",
    tag = TODO_API_GROUP,
    request_body = dto::TodoCreate,
    responses(
        (status = 200, description = "Todo was created", body = dto::Todo),
        (status = 422, response = BasicErrorResponse),
        (status = 500, response = BasicErrorResponse),
    ),
)]
/// Creates a todo
async fn create_todo(
    new_todo: dto::TodoCreate,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<dto::Todo>, ErrorResponse> {
    let domain_todo = domain::todo::NewTodo::from(new_todo);
    info!("Creating todo: {domain_todo}");
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter;

    let created = todo_service
        .create_todo(&domain_todo, &mut *ext_cxn, &todo_writer)
        .await
        .map_err(GenericErrorResponse)?;

    Ok(Json(dto::Todo::from(created)))
}

#[utoipa::path(
    get,
    path = "/todos/",
    tag = TODO_API_GROUP,
    params(dto::ListTodosQuery),
    responses(
        (status = 200, description = "A page of todos in id order", body = Vec<dto::Todo>),
        (status = 500, response = BasicErrorResponse),
    ),
)]
/// Lists todos, skipping the first `skip` and returning at most `limit`
async fn list_todos(
    page: dto::ListTodosQuery,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<Vec<dto::Todo>>, ErrorResponse> {
    let (skip, limit) = page.clamped();
    info!("Listing todos (skip {skip}, limit {limit})");
    if limit == 0 {
        return Ok(Json(Vec::new()));
    }

    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader;
    let todos = todo_service
        .list_todos(skip, limit, &mut *ext_cxn, &todo_reader)
        .await
        .map_err(GenericErrorResponse)?;

    Ok(Json(todos.into_iter().map(dto::Todo::from).collect()))
}

#[utoipa::path(
    get,
    path = "/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(("todo_id" = i64, Path, description = "ID of the todo")),
    responses(
        (status = 200, description = "The requested todo", body = dto::Todo),
        (status = 404, description = "Todo not found", body = dto::DetailMessage),
        (status = 500, response = BasicErrorResponse),
    ),
)]
/// Retrieves a single todo
async fn get_todo(
    todo_id: i64,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<dto::Todo>, ErrorResponse> {
    info!("Get todo {todo_id}");
    let todo_id = stored_todo_id(todo_id)?;
    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader;

    let todo = todo_service
        .todo_by_id(todo_id, &mut *ext_cxn, &todo_reader)
        .await
        .map_err(todo_error_response)?;

    Ok(Json(dto::Todo::from(todo)))
}

#[utoipa::path(
    put,
    path = "/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(("todo_id" = i64, Path, description = "ID of the todo")),
    request_body = dto::TodoUpdate,
    responses(
        (status = 200, description = "The todo after the update", body = dto::Todo),
        (status = 404, description = "Todo not found", body = dto::DetailMessage),
        (status = 422, response = BasicErrorResponse),
        (status = 500, response = BasicErrorResponse),
    ),
)]
/// Overwrites the fields present in the request body on an existing todo
async fn update_todo(
    todo_id: i64,
    update: dto::TodoUpdate,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<dto::Todo>, ErrorResponse> {
    info!("Updating todo {todo_id}");
    let todo_id = stored_todo_id(todo_id)?;
    let patch = domain::todo::TodoPatch::from(update);
    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader;
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter;

    let updated = todo_service
        .update_todo(todo_id, &patch, &mut *ext_cxn, &todo_reader, &todo_writer)
        .await
        .map_err(todo_error_response)?;

    Ok(Json(dto::Todo::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(("todo_id" = i64, Path, description = "ID of the todo")),
    responses(
        (status = 200, description = "Todo was removed", body = dto::DetailMessage),
        (status = 404, description = "Todo not found", body = dto::DetailMessage),
        (status = 500, response = BasicErrorResponse),
    ),
)]
/// Permanently removes a todo
async fn delete_todo(
    todo_id: i64,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<dto::DetailMessage>, ErrorResponse> {
    info!("Deleting todo {todo_id}");
    let todo_id = stored_todo_id(todo_id)?;
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter;

    todo_service
        .delete_todo(todo_id, &mut *ext_cxn, &todo_writer)
        .await
        .map_err(todo_error_response)?;

    Ok(Json(dto::DetailMessage::new(TODO_DELETED)))
}
