use crate::dto;
use crate::routing_utils::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(welcome))]
/// Defines the OpenAPI documentation for the API root
pub struct RootApi;

pub const WELCOME_TEXT: &str = "Welcome to the Rust Todo API!";

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Static welcome message", body = dto::WelcomeMessage),
    ),
)]
/// Greets whoever hits the root of the API
pub async fn welcome() -> Json<dto::WelcomeMessage> {
    Json(dto::WelcomeMessage {
        message: WELCOME_TEXT.to_owned(),
    })
}
