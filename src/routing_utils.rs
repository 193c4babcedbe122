use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_macros::{FromRequest, FromRequestParts};
use serde::Serialize;
use tracing::error;
use utoipa::ToResponse;

use crate::dto;

/// Body of every not-found response from the todo routes
pub const TODO_NOT_FOUND: &str = "Todo not found";

/// Contains diagnostic information about an API failure
#[derive(Serialize, Debug, ToResponse)]
#[response(examples(
    ("Internal Failure" = (
        summary = "Something unexpected went wrong inside the server (500)",
        value = json!({
            "error_code": "internal_error",
            "error_description": "Could not access data to complete your request",
            "extra_info": null
        })
    )),

    ("Invalid Input" = (
        summary = "Request body was valid JSON but had the wrong shape (422)",
        value = json!({
            "error_code": "invalid_input",
            "error_description": "Submitted data was invalid.",
            "extra_info": "Failed to deserialize the JSON body into the target type: missing field `title` at line 1 column 19"
        })
    )),

    ("Malformed JSON" = (
        summary = "Invalid JSON passed to server (400)",
        value = json!({
            "error_code": "invalid_json",
            "error_description": "The passed request body contained malformed or unreadable JSON.",
            "extra_info": "Failed to parse the request body as JSON: EOF while parsing an object at line 4 column 0"
        })
    ))
))]
pub struct BasicErrorResponse {
    error_code: String,
    error_description: String,
    extra_info: Option<String>,
}

/// Response type for a todo that doesn't exist. Renders as `{"detail": "Todo not found"}`.
pub struct TodoNotFoundResponse;

impl IntoResponse for TodoNotFoundResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::NOT_FOUND,
            Json(dto::DetailMessage::new(TODO_NOT_FOUND)),
        )
            .into_response()
    }
}

/// Response type that wraps unexpected errors and turns them into a 500 [BasicErrorResponse]
pub struct GenericErrorResponse(pub anyhow::Error);

impl IntoResponse for GenericErrorResponse {
    fn into_response(self) -> Response {
        error!("Unexpected failure while handling request: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(BasicErrorResponse {
                error_code: "internal_error".into(),
                error_description: "Could not access data to complete your request".into(),
                extra_info: None,
            }),
        )
            .into_response()
    }
}

/// Wrapper for [axum::Json] which customizes the error response to use our
/// data structure for API errors
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(RejectionResponse))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Wrapper for [axum::extract::Query] which reports bad query strings as [BasicErrorResponse]s
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(RejectionResponse))]
pub struct Query<T>(pub T);

/// Wrapper for [axum::extract::Path] which reports bad path parameters as [BasicErrorResponse]s
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(RejectionResponse))]
pub struct Path<T>(pub T);

/// Response type representing a request axum could not extract data from. Keeps the status
/// code axum picked for the rejection.
pub struct RejectionResponse {
    status: StatusCode,
    error_code: &'static str,
    error_description: &'static str,
    problem: String,
}

impl From<JsonRejection> for RejectionResponse {
    fn from(value: JsonRejection) -> Self {
        let (error_code, error_description) = match &value {
            JsonRejection::JsonDataError(_) => ("invalid_input", "Submitted data was invalid."),
            _ => (
                "invalid_json",
                "The passed request body contained malformed or unreadable JSON.",
            ),
        };

        RejectionResponse {
            status: value.status(),
            error_code,
            error_description,
            problem: value.body_text(),
        }
    }
}

impl From<QueryRejection> for RejectionResponse {
    fn from(value: QueryRejection) -> Self {
        RejectionResponse {
            status: value.status(),
            error_code: "invalid_query",
            error_description: "The query string could not be parsed.",
            problem: value.body_text(),
        }
    }
}

impl From<PathRejection> for RejectionResponse {
    fn from(value: PathRejection) -> Self {
        RejectionResponse {
            status: value.status(),
            error_code: "invalid_path",
            error_description: "A path parameter could not be parsed.",
            problem: value.body_text(),
        }
    }
}

impl IntoResponse for RejectionResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            axum::Json(BasicErrorResponse {
                error_code: self.error_code.into(),
                error_description: self.error_description.into(),
                extra_info: Some(self.problem),
            }),
        )
            .into_response()
    }
}
