//! Integration tests for the API client against a mock server.

use serde_json::json;
use taskdeck_core::api::types::{Credentials, RegisterDraft, TaskDraft, TaskPatch, TaskStatus};
use taskdeck_core::api::{ApiClient, ApiErrorKind};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json(id: &str, name: &str) -> serde_json::Value {
    json!({"_id": id, "name": name, "email": format!("{name}@example.com")})
}

fn task_json(id: &str, text: &str, status: &str) -> serde_json::Value {
    json!({"_id": id, "task": text, "description": "", "status": status})
}

async fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri()).unwrap()
}

#[tokio::test]
async fn login_returns_user_and_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "secret1"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"user": user_json("u1", "A"), "token": "tok1"})),
        )
        .mount(&server)
        .await;

    let response = client(&server)
        .await
        .login(&Credentials {
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.user.id, "u1");
    assert_eq!(response.token, "tok1");
}

#[tokio::test]
async fn login_failure_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"msg": "wrong password"})))
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .login(&Credentials {
            email: "a@b.com".to_string(),
            password: "nope".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Validation);
    assert_eq!(err.message, "wrong password");
}

#[tokio::test]
async fn register_falls_back_to_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/register"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .register(&RegisterDraft {
            username: "A".to_string(),
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Network);
    assert_eq!(err.message, "Registration failed");
}

#[tokio::test]
async fn list_tasks_attaches_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .and(header("authorization", "Bearer tok1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([task_json("t1", "buy milk", "pending")])),
        )
        .mount(&server)
        .await;

    let tasks = client(&server)
        .await
        .with_token(Some("tok1".to_string()))
        .list_tasks()
        .await
        .unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, "t1");
}

#[tokio::test]
async fn expired_token_maps_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"msg": "token expired"})))
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .with_token(Some("stale".to_string()))
        .list_tasks()
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Auth);
    assert_eq!(err.message, "token expired");
}

#[tokio::test]
async fn empty_task_text_sends_nothing() {
    let server = MockServer::start().await;

    let err = client(&server)
        .await
        .with_token(Some("tok1".to_string()))
        .create_task(&TaskDraft {
            text: String::new(),
            description: "x".to_string(),
            status: TaskStatus::Pending,
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Validation);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_task_posts_draft_and_parses_canonical_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/todos"))
        .and(body_json(
            json!({"task": "buy milk", "description": "2l", "status": "pending"}),
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(task_json("t9", "buy milk", "pending")))
        .mount(&server)
        .await;

    let created = client(&server)
        .await
        .with_token(Some("tok1".to_string()))
        .create_task(&TaskDraft {
            text: "buy milk".to_string(),
            description: "2l".to_string(),
            status: TaskStatus::Pending,
        })
        .await
        .unwrap();

    assert_eq!(created.id, "t9");
}

#[tokio::test]
async fn update_task_puts_partial_patch() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/todos/t1"))
        .and(body_json(json!({"status": "completed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_json("t1", "buy milk", "completed")))
        .mount(&server)
        .await;

    let updated = client(&server)
        .await
        .with_token(Some("tok1".to_string()))
        .update_task("t1", &TaskPatch::status(TaskStatus::Completed))
        .await
        .unwrap();

    assert_eq!(updated.status, TaskStatus::Completed);
}

#[tokio::test]
async fn delete_task_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/todos/t1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client(&server)
        .await
        .with_token(Some("tok1".to_string()))
        .delete_task("t1")
        .await
        .unwrap();
}

#[tokio::test]
async fn assign_task_patches_assignee() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/todos/t1/assign"))
        .and(body_json(json!({"assignedTo": "u2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "t1",
            "task": "buy milk",
            "status": "pending",
            "assignedTo": user_json("u2", "B"),
        })))
        .mount(&server)
        .await;

    let assigned = client(&server)
        .await
        .with_token(Some("tok1".to_string()))
        .assign_task("t1", "u2")
        .await
        .unwrap();

    assert_eq!(assigned.assigned_to.unwrap().id(), "u2");
}

#[tokio::test]
async fn dashboard_parses_both_sublists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos/dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "assignedByMe": [task_json("t1", "a", "pending")],
            "assignedToMe": [task_json("t2", "b", "completed")],
        })))
        .mount(&server)
        .await;

    let dashboard = client(&server)
        .await
        .with_token(Some("tok1".to_string()))
        .get_dashboard()
        .await
        .unwrap();

    assert_eq!(dashboard.assigned_by_me.len(), 1);
    assert_eq!(dashboard.assigned_to_me.len(), 1);
}

#[tokio::test]
async fn undecodable_success_body_is_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .with_token(Some("tok1".to_string()))
        .list_tasks()
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Network);
    assert_eq!(err.message, "Failed to fetch tasks");
}

#[tokio::test]
async fn list_users_needs_no_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([user_json("u1", "A"), user_json("u2", "B")])),
        )
        .mount(&server)
        .await;

    let users = client(&server).await.list_users().await.unwrap();
    assert_eq!(users.len(), 2);
}
