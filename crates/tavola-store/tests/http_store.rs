//! HttpStore tests against a throwaway in-process document service.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use tavola_store::{DocumentStore, Filter, HttpStore};

#[derive(Default)]
struct ServerState {
    collections: HashMap<String, BTreeMap<String, Map<String, Value>>>,
    next_id: u64,
}

type Shared = Arc<Mutex<ServerState>>;

async fn create_doc(
    State(state): State<Shared>,
    Path(collection): Path<String>,
    Json(fields): Json<Map<String, Value>>,
) -> Json<Value> {
    let mut state = state.lock().unwrap();
    state.next_id += 1;
    let id = format!("doc{:08}", state.next_id);
    state
        .collections
        .entry(collection)
        .or_default()
        .insert(id.clone(), fields);
    Json(json!({ "id": id }))
}

async fn put_doc(
    State(state): State<Shared>,
    Path((collection, key)): Path<(String, String)>,
    Json(fields): Json<Map<String, Value>>,
) -> Json<Value> {
    let mut state = state.lock().unwrap();
    state
        .collections
        .entry(collection)
        .or_default()
        .insert(key.clone(), fields);
    Json(json!({ "id": key }))
}

async fn get_doc(
    State(state): State<Shared>,
    Path((collection, key)): Path<(String, String)>,
) -> Result<Json<Value>, StatusCode> {
    let state = state.lock().unwrap();
    state
        .collections
        .get(&collection)
        .and_then(|docs| docs.get(&key))
        .map(|fields| Json(json!({ "id": key, "fields": fields })))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn query_docs(
    State(state): State<Shared>,
    Path(collection): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    let filter = match (params.get("field"), params.get("value")) {
        (Some(field), Some(value)) => {
            let value: Value = serde_json::from_str(value).map_err(|_| StatusCode::BAD_REQUEST)?;
            Some((field.clone(), value))
        }
        _ => None,
    };

    let state = state.lock().unwrap();
    let docs: Vec<Value> = state
        .collections
        .get(&collection)
        .map(|docs| {
            docs.iter()
                .filter(|(_, fields)| {
                    filter
                        .as_ref()
                        .map_or(true, |(f, v)| fields.get(f) == Some(v))
                })
                .map(|(id, fields)| json!({ "id": id, "fields": fields }))
                .collect()
        })
        .unwrap_or_default();
    Ok(Json(Value::Array(docs)))
}

async fn delete_doc(
    State(state): State<Shared>,
    Path((collection, key)): Path<(String, String)>,
) -> StatusCode {
    let mut state = state.lock().unwrap();
    match state
        .collections
        .get_mut(&collection)
        .and_then(|docs| docs.remove(&key))
    {
        Some(_) => StatusCode::OK,
        None => StatusCode::NOT_FOUND,
    }
}

/// Spawn the fixture service on an ephemeral port, return a client for it.
async fn spawn_store() -> HttpStore {
    let state: Shared = Arc::default();
    let app = Router::new()
        .route("/:collection", get(query_docs).post(create_doc))
        .route(
            "/:collection/:key",
            get(get_doc).put(put_doc).delete(delete_doc),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    HttpStore::new(format!("http://{}", addr))
}

fn fields(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn keyed_create_get_delete() {
    let store = spawn_store().await;

    let id = store
        .create("likes", Some("u1_5"), fields(json!({"item_id": 5})))
        .await
        .unwrap();
    assert_eq!(id, "u1_5");

    let doc = store.get("likes", "u1_5").await.unwrap().unwrap();
    assert_eq!(doc.id, "u1_5");
    assert_eq!(doc.u64_field("item_id"), Some(5));

    store.delete("likes", "u1_5").await.unwrap();
    assert!(store.get("likes", "u1_5").await.unwrap().is_none());

    // Deleting again maps the 404 to success.
    store.delete("likes", "u1_5").await.unwrap();
}

#[tokio::test]
async fn auto_id_create() {
    let store = spawn_store().await;

    let id = store
        .create("comments", None, fields(json!({"text": "lovely"})))
        .await
        .unwrap();
    assert!(id.starts_with("doc"));

    let doc = store.get("comments", &id).await.unwrap().unwrap();
    assert_eq!(doc.str_field("text"), Some("lovely"));
}

#[tokio::test]
async fn filtered_and_unfiltered_query() {
    let store = spawn_store().await;
    store
        .create("likes", Some("a_5"), fields(json!({"item_id": 5})))
        .await
        .unwrap();
    store
        .create("likes", Some("b_5"), fields(json!({"item_id": 5})))
        .await
        .unwrap();
    store
        .create("likes", Some("a_7"), fields(json!({"item_id": 7})))
        .await
        .unwrap();

    let all = store.query("likes", None).await.unwrap();
    assert_eq!(all.len(), 3);

    let filter = Filter::eq("item_id", 5);
    let fives = store.query("likes", Some(&filter)).await.unwrap();
    assert_eq!(fives.len(), 2);
    assert!(fives.iter().all(|d| d.u64_field("item_id") == Some(5)));
}

#[tokio::test]
async fn missing_document_is_none() {
    let store = spawn_store().await;
    assert!(store.get("likes", "nope").await.unwrap().is_none());
}

#[tokio::test]
async fn unreachable_store_is_transport_error() {
    // Nothing listens here.
    let store = HttpStore::new("http://127.0.0.1:1");
    let err = store.get("likes", "x").await.unwrap_err();
    assert!(matches!(err, tavola_store::Error::Transport(_)));
}
