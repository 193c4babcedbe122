use super::test_util::{prepare_db_and_test, router_for};
use crate::api::test_util::deserialize_body;
use crate::dto;
use crate::entity::UserRow;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn call<T: DeserializeOwned>(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, T) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json_body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json_body.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("request should build");

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router should always produce a response");
    let status = response.status();

    (status, deserialize_body(response.into_body()).await)
}

fn not_found() -> dto::DetailMessage {
    dto::DetailMessage::new("Todo not found")
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn todo_lifecycle() {
    prepare_db_and_test(|db| async move {
        let router = router_for(db);

        let (status, created): (_, dto::Todo) =
            call(&router, "POST", "/todos/", Some(json!({"title": "Buy milk"}))).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(
            dto::Todo {
                id: 1,
                title: "Buy milk".to_owned(),
                completed: false,
                priority: "medium".to_owned(),
                due_date: None,
            },
            created
        );

        let (status, fetched): (_, dto::Todo) = call(&router, "GET", "/todos/1", None).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(created, fetched);

        let (status, updated): (_, dto::Todo) =
            call(&router, "PUT", "/todos/1", Some(json!({"completed": true}))).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(
            dto::Todo {
                completed: true,
                ..created
            },
            updated
        );

        let (status, deleted): (_, dto::DetailMessage) =
            call(&router, "DELETE", "/todos/1", None).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(dto::DetailMessage::new("Todo deleted successfully"), deleted);

        let (status, missing): (_, dto::DetailMessage) =
            call(&router, "GET", "/todos/1", None).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!(not_found(), missing);

        let (status, missing): (_, dto::DetailMessage) =
            call(&router, "DELETE", "/todos/1", None).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!(not_found(), missing);

        let (status, missing): (_, dto::DetailMessage) =
            call(&router, "PUT", "/todos/1", Some(json!({"title": "Too late"}))).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!(not_found(), missing);
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn list_pages_through_todos_in_id_order() {
    prepare_db_and_test(|db| async move {
        let router = router_for(db);
        for number in 1..=12 {
            let (status, _): (_, dto::Todo) = call(
                &router,
                "POST",
                "/todos/",
                Some(json!({"title": format!("Todo {number}")})),
            )
            .await;
            assert_eq!(StatusCode::OK, status);
        }

        let (status, first_page): (_, Vec<dto::Todo>) =
            call(&router, "GET", "/todos/", None).await;
        assert_eq!(StatusCode::OK, status);
        let first_ids: Vec<i32> = first_page.iter().map(|todo| todo.id).collect();
        assert_eq!((1..=10).collect::<Vec<i32>>(), first_ids);

        let (_, second_page): (_, Vec<dto::Todo>) =
            call(&router, "GET", "/todos/?skip=10", None).await;
        let second_titles: Vec<&str> = second_page.iter().map(|todo| todo.title.as_str()).collect();
        assert_eq!(vec!["Todo 11", "Todo 12"], second_titles);

        let (_, window): (_, Vec<dto::Todo>) =
            call(&router, "GET", "/todos/?skip=3&limit=2", None).await;
        let window_ids: Vec<i32> = window.iter().map(|todo| todo.id).collect();
        assert_eq!(vec![4, 5], window_ids);

        let (status, past_the_end): (_, Vec<dto::Todo>) =
            call(&router, "GET", "/todos/?skip=12", None).await;
        assert_eq!(StatusCode::OK, status);
        assert!(past_the_end.is_empty());

        let (status, nothing): (_, Vec<dto::Todo>) =
            call(&router, "GET", "/todos/?limit=0", None).await;
        assert_eq!(StatusCode::OK, status);
        assert!(nothing.is_empty());
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn update_only_touches_supplied_fields() {
    prepare_db_and_test(|db| async move {
        let router = router_for(db);
        let (_, created): (_, dto::Todo) = call(
            &router,
            "POST",
            "/todos/",
            Some(json!({
                "title": "File taxes",
                "priority": "high",
                "due_date": "2025-04-15",
            })),
        )
        .await;
        assert_eq!(NaiveDate::from_ymd_opt(2025, 4, 15), created.due_date);

        let (status, unchanged): (_, dto::Todo) = call(
            &router,
            "PUT",
            &format!("/todos/{}", created.id),
            Some(json!({})),
        )
        .await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(created, unchanged);

        let (_, retitled): (_, dto::Todo) = call(
            &router,
            "PUT",
            &format!("/todos/{}", created.id),
            Some(json!({"title": "File taxes (extension)"})),
        )
        .await;
        assert_eq!("File taxes (extension)", retitled.title);
        assert_eq!("high", retitled.priority);
        assert_eq!(created.due_date, retitled.due_date);

        let (_, cleared): (_, dto::Todo) = call(
            &router,
            "PUT",
            &format!("/todos/{}", created.id),
            Some(json!({"due_date": null})),
        )
        .await;
        assert_eq!(None, cleared.due_date);

        let (_, persisted): (_, dto::Todo) =
            call(&router, "GET", &format!("/todos/{}", created.id), None).await;
        assert_eq!(cleared, persisted);
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn todos_can_reference_users() {
    prepare_db_and_test(|db| async move {
        let user: UserRow = sqlx::query_as(
            "INSERT INTO users (username, hashed_password) VALUES ($1, $2) RETURNING *",
        )
        .bind("evan")
        .bind("not-a-real-hash")
        .fetch_one(&db)
        .await
        .expect("should be able to insert a user");
        assert_eq!("evan", user.username);

        let (todo_id,): (i32,) =
            sqlx::query_as("INSERT INTO todos (user_id, title) VALUES ($1, $2) RETURNING id")
                .bind(user.id)
                .bind("Water plants")
                .fetch_one(&db)
                .await
                .expect("should be able to insert a todo owned by a user");

        let router = router_for(db);
        let (status, fetched): (_, dto::Todo) =
            call(&router, "GET", &format!("/todos/{todo_id}"), None).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(
            dto::Todo {
                id: todo_id,
                title: "Water plants".to_owned(),
                completed: false,
                priority: "medium".to_owned(),
                due_date: None,
            },
            fetched
        );
    });
}
