use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use notely_core::api::NotesBackend;
use notely_core::models::{CreateNoteRequest, NoteId, NoteQuery, SortOption, UpdateNoteRequest};
use notely_core::{ClientConfig, Error, NotesApiClient};
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct ServerState {
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
    removed: Arc<Mutex<Vec<String>>>,
}

fn note_json(id: i64, title: &str, archived: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": format!("{title} body"),
        "categories": ["Work"],
        "isArchived": archived,
        "createdAt": "2024-02-01T09:00:00",
        "updatedAt": "2024-02-01T09:30:00.5"
    })
}

async fn list_notes(
    State(state): State<ServerState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.queries.lock().unwrap().push(params);
    Json(json!({
        "content": [note_json(1, "First", false), note_json(2, "Second", false)],
        "pageable": {
            "pageNumber": 0,
            "pageSize": 12,
            "sort": {"sorted": true, "unsorted": false, "empty": false},
            "offset": 0,
            "paged": true,
            "unpaged": false
        },
        "totalElements": 14,
        "totalPages": 2,
        "last": false,
        "size": 12,
        "number": 0,
        "sort": {"sorted": true, "unsorted": false, "empty": false},
        "numberOfElements": 2,
        "first": true,
        "empty": false
    }))
}

async fn get_note(Path(id): Path<i64>) -> Response {
    if id == 404 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Note not found with id 404", "status": 404})),
        )
            .into_response();
    }
    Json(note_json(id, "Fetched", false)).into_response()
}

async fn create_note(State(state): State<ServerState>, Json(body): Json<Value>) -> Json<Value> {
    state.bodies.lock().unwrap().push(body.clone());
    Json(note_json(10, body["title"].as_str().unwrap_or_default(), false))
}

async fn update_note(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.bodies.lock().unwrap().push(body.clone());
    Json(note_json(id, body["title"].as_str().unwrap_or_default(), false))
}

async fn delete_note(Path(id): Path<i64>) -> Response {
    if id == 500 {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn toggle_archive(Path(id): Path<i64>) -> Json<Value> {
    Json(note_json(id, "Archived", true))
}

async fn add_categories(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.bodies.lock().unwrap().push(body);
    Json(note_json(id, "Tagged", false))
}

async fn remove_category(
    State(state): State<ServerState>,
    Path((id, category)): Path<(i64, String)>,
) -> Json<Value> {
    state.removed.lock().unwrap().push(category);
    Json(note_json(id, "Untagged", false))
}

async fn spawn_server() -> (NotesApiClient, ServerState) {
    let state = ServerState::default();
    let router = Router::new()
        .route("/api/notes", get(list_notes).post(create_note))
        .route(
            "/api/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route("/api/notes/{id}/archive", patch(toggle_archive))
        .route("/api/notes/{id}/categories", post(add_categories))
        .route("/api/notes/{id}/categories/{category}", delete(remove_category))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let config = ClientConfig::new(format!("http://{address}/api/")).unwrap();
    (NotesApiClient::new(&config).unwrap(), state)
}

#[tokio::test]
async fn list_notes_sends_only_set_parameters() {
    let (client, state) = spawn_server().await;

    let page = client
        .list_notes(&NoteQuery {
            page: Some(1),
            size: Some(12),
            sort_by: Some(SortOption::Updated),
            archived: Some(false),
            categories: vec!["Work".to_string(), "Side project".to_string()],
            search: None,
        })
        .await
        .unwrap();

    assert_eq!(page.total_elements, 14);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[0].id, NoteId::new(1));

    let queries = state.queries.lock().unwrap();
    let params = &queries[0];
    assert_eq!(params.get("page").map(String::as_str), Some("1"));
    assert_eq!(params.get("size").map(String::as_str), Some("12"));
    assert_eq!(params.get("sortBy").map(String::as_str), Some("updated"));
    assert_eq!(params.get("archived").map(String::as_str), Some("false"));
    assert_eq!(
        params.get("categories").map(String::as_str),
        Some("Work,Side project")
    );
    assert!(!params.contains_key("search"));
}

#[tokio::test]
async fn get_note_maps_error_body_message() {
    let (client, _) = spawn_server().await;

    let note = client.get_note(NoteId::new(3)).await.unwrap();
    assert_eq!(note.title, "Fetched");

    let error = client.get_note(NoteId::new(404)).await.unwrap_err();
    assert!(matches!(
        error,
        Error::Api { status: 404, ref message } if message == "Note not found with id 404"
    ));
}

#[tokio::test]
async fn create_and_update_send_json_bodies() {
    let (client, state) = spawn_server().await;

    let created = client
        .create_note(&CreateNoteRequest {
            title: "Hello".to_string(),
            content: "World".to_string(),
            categories: vec!["Ideas".to_string()],
        })
        .await
        .unwrap();
    assert_eq!(created.id, NoteId::new(10));

    let updated = client
        .update_note(
            NoteId::new(10),
            &UpdateNoteRequest {
                title: "Hello again".to_string(),
                content: "World".to_string(),
                categories: vec![],
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Hello again");

    let bodies = state.bodies.lock().unwrap();
    assert_eq!(
        bodies[0],
        json!({"title": "Hello", "content": "World", "categories": ["Ideas"]})
    );
    assert_eq!(
        bodies[1],
        json!({"title": "Hello again", "content": "World", "categories": []})
    );
}

#[tokio::test]
async fn delete_accepts_no_content_and_reports_failures() {
    let (client, _) = spawn_server().await;

    client.delete_note(NoteId::new(8)).await.unwrap();

    let error = client.delete_note(NoteId::new(500)).await.unwrap_err();
    assert_eq!(error.status(), Some(500));
    assert_eq!(error.to_string(), "An error occurred");
}

#[tokio::test]
async fn archive_and_category_endpoints_round_trip() {
    let (client, state) = spawn_server().await;

    let archived = client.toggle_archive(NoteId::new(4)).await.unwrap();
    assert!(archived.is_archived);

    client
        .add_categories(NoteId::new(4), &["Tasks".to_string()])
        .await
        .unwrap();
    client
        .remove_category(NoteId::new(4), "Side project/2024")
        .await
        .unwrap();

    assert_eq!(
        state.bodies.lock().unwrap()[0],
        json!({"categories": ["Tasks"]})
    );
    assert_eq!(
        state.removed.lock().unwrap().as_slice(),
        ["Side project/2024".to_string()]
    );
}

#[tokio::test]
async fn unreachable_service_is_an_http_error() {
    let config = ClientConfig::new("http://127.0.0.1:9/api").unwrap();
    let client = NotesApiClient::new(&config).unwrap();

    let error = client.list_notes(&NoteQuery::default()).await.unwrap_err();
    assert!(matches!(error, Error::Http(_)));
    assert_eq!(error.user_message("Failed to load notes"), "Failed to load notes");
}
