use utoipa::OpenApi;

mod todo;

pub use todo::*;

/// Schemas which aren't attached to any single route but should still show up in the
/// generated OpenAPI document
#[derive(OpenApi)]
#[openapi(components(schemas(Todo, TodoList, DetailMessage, WelcomeMessage)))]
pub struct OpenApiSchemas;
