//! In-process mock of the Helium REST surface.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::extract::{Multipart, Path, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

pub const TOKEN: &str = "s3cret";

#[derive(Default)]
pub struct MockState {
    pub cases: Vec<Value>,
    pub collectors: HashMap<String, Vec<Value>>,
    pub collections: HashMap<String, Vec<Value>>,
    pub analyses: HashMap<String, Vec<Value>>,
    /// (file name, bytes received) of every multipart upload.
    pub uploads: Vec<(String, usize)>,
    pub disk_usage_hits: usize,
    pub deleted: Vec<String>,
    pub failing_collections: Vec<String>,
}

pub type Shared = Arc<Mutex<MockState>>;

pub struct MockServer {
    pub base_url: String,
    pub state: Shared,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn envelope(data: Value) -> Json<Value> {
    let count = data.as_array().map(|a| a.len()).unwrap_or(1);
    Json(json!({ "data": data, "count": count }))
}

pub fn case(guid: &str, name: &str, created: &str) -> Value {
    json!({ "guid": guid, "name": name, "created": created, "acs": [], "managed": false })
}

pub fn collector(guid: &str, fingerprint: &str) -> Value {
    json!({
        "guid": guid,
        "created": "2024-01-02T00:00:00Z",
        "arch": "x64",
        "opsystem": "windows",
        "fingerprint": fingerprint,
    })
}

pub fn collection(guid: &str, fingerprint: &str, created: &str) -> Value {
    json!({
        "guid": guid,
        "created": created,
        "tags": [],
        "opsystem": "windows",
        "hostname": format!("host-{}", guid),
        "fingerprint": fingerprint,
        "description": "",
    })
}

/// Case `c1` with one collector (F1) and two collections, one of them orphaned.
pub fn seeded() -> MockState {
    let mut state = MockState::default();
    state.cases = vec![
        case("c1", "Alpha", "2024-01-01T00:00:00Z"),
        case("c2", "Beta", "2024-02-01T00:00:00Z"),
    ];
    state
        .collectors
        .insert("c1".to_string(), vec![collector("k1", "F1")]);
    state.collections.insert(
        "c1".to_string(),
        vec![
            collection("col1", "F1", "2024-01-03T00:00:00Z"),
            collection("col2", "F9", "2024-01-04T00:00:00Z"),
        ],
    );
    state
}

async fn require_token(req: Request, next: Next) -> Response {
    let expected = format!("Bearer {}", TOKEN);
    let ok = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !ok {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    next.run(req).await
}

async fn info() -> Json<Value> {
    envelope(json!({ "api": "helium", "version": "3.2.0" }))
}

async fn constant() -> Json<Value> {
    envelope(json!({
        "enums": { "opsystem": ["windows", "linux"] },
        "banner": "Scheduled maintenance",
        "quota": 1_000_000,
    }))
}

async fn disk_usage(State(state): State<Shared>) -> Json<Value> {
    let mut st = state.lock().unwrap();
    st.disk_usage_hits += 1;
    envelope(json!({
        "cases": [{ "guid": "c1", "collectors": 2, "collections": 3, "analyses": 5 }],
        "updated": "2024-03-01T00:00:00Z",
    }))
}

async fn analyzers() -> Json<Value> {
    envelope(json!([
        { "name": "hayabusa", "tags": ["windows"], "version": "2.1.0" },
        { "name": "strings", "tags": [], "version": "1.0.0" },
    ]))
}

async fn list_cases(State(state): State<Shared>) -> Json<Value> {
    envelope(Value::Array(state.lock().unwrap().cases.clone()))
}

async fn create_case(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let mut st = state.lock().unwrap();
    let guid = format!("c{}", st.cases.len() + 1);
    let name = body["name"].as_str().unwrap_or_default();
    let created = case(&guid, name, "2024-09-01T00:00:00Z");
    st.cases.push(created.clone());
    envelope(created)
}

async fn get_case(State(state): State<Shared>, Path(guid): Path<String>) -> Response {
    let st = state.lock().unwrap();
    match st.cases.iter().find(|c| c["guid"] == guid.as_str()) {
        Some(c) => envelope(c.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn update_case(
    State(state): State<Shared>,
    Path(guid): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut st = state.lock().unwrap();
    let Some(c) = st.cases.iter_mut().find(|c| c["guid"] == guid.as_str()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let (Some(target), Some(patch)) = (c.as_object_mut(), body.as_object()) {
        for (k, v) in patch {
            target.insert(k.clone(), v.clone());
        }
    }
    envelope(c.clone()).into_response()
}

async fn delete_case(State(state): State<Shared>, Path(guid): Path<String>) -> StatusCode {
    let mut st = state.lock().unwrap();
    st.cases.retain(|c| c["guid"] != guid.as_str());
    st.deleted.push(guid);
    StatusCode::OK
}

async fn list_collectors(State(state): State<Shared>, Path(guid): Path<String>) -> Json<Value> {
    let st = state.lock().unwrap();
    envelope(Value::Array(
        st.collectors.get(&guid).cloned().unwrap_or_default(),
    ))
}

async fn list_collections(State(state): State<Shared>, Path(guid): Path<String>) -> Response {
    let st = state.lock().unwrap();
    if st.failing_collections.contains(&guid) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    envelope(Value::Array(
        st.collections.get(&guid).cloned().unwrap_or_default(),
    ))
    .into_response()
}

async fn upload_collection(
    State(state): State<Shared>,
    Path(guid): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let mut received = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        match field.bytes().await {
            Ok(bytes) => received = Some((name, bytes.len())),
            Err(_) => return StatusCode::BAD_REQUEST.into_response(),
        }
    }
    let Some((name, size)) = received else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let mut st = state.lock().unwrap();
    st.uploads.push((name, size));
    let created = collection(
        &format!("col{}", st.uploads.len() + 10),
        "F1",
        "2024-09-01T00:00:00Z",
    );
    st.collections
        .entry(guid)
        .or_default()
        .push(created.clone());
    envelope(created).into_response()
}

async fn update_collection(
    Path((_case, _collection)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    envelope(body)
}

async fn delete_collection(
    State(state): State<Shared>,
    Path((_case, collection)): Path<(String, String)>,
) -> StatusCode {
    state.lock().unwrap().deleted.push(collection);
    StatusCode::OK
}

async fn collection_download(Path((_case, collection)): Path<(String, String)>) -> Json<Value> {
    envelope(json!({ "guid": collection, "token": "one-time" }))
}

async fn list_analyses(
    State(state): State<Shared>,
    Path((_case, collection)): Path<(String, String)>,
) -> Json<Value> {
    let st = state.lock().unwrap();
    envelope(Value::Array(
        st.analyses.get(&collection).cloned().unwrap_or_default(),
    ))
}

async fn analysis_log(Path((_case, _collection, analyzer)): Path<(String, String, String)>) -> String {
    format!("{}: done\n", analyzer)
}

pub async fn spawn_server(state: MockState) -> Result<MockServer> {
    let state: Shared = Arc::new(Mutex::new(state));

    let api = Router::new()
        .route("/info", get(info))
        .route("/constant", get(constant))
        .route("/disk_usage", get(disk_usage))
        .route("/config/analyzers", get(analyzers))
        .route("/cases", get(list_cases))
        .route("/case", post(create_case))
        .route("/case/:guid", get(get_case).put(update_case).delete(delete_case))
        .route("/case/:guid/collectors", get(list_collectors))
        .route("/case/:guid/collections", get(list_collections))
        .route("/case/:guid/collection", post(upload_collection))
        .route(
            "/case/:guid/collection/:collection",
            put(update_collection).delete(delete_collection),
        )
        .route(
            "/case/:guid/collection/:collection/download",
            get(collection_download),
        )
        .route(
            "/case/:guid/collection/:collection/analyses",
            get(list_analyses),
        )
        .route(
            "/case/:guid/collection/:collection/analysis/:analyzer/log",
            get(analysis_log),
        )
        .layer(middleware::from_fn(require_token))
        .with_state(Arc::clone(&state));
    let app = Router::new().nest("/api", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("bind mock server")?;
    let addr = listener.local_addr().context("mock server addr")?;
    let task = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(MockServer {
        base_url: format!("http://{}", addr),
        state,
        task,
    })
}

#[allow(dead_code)]
pub fn client_config(base_url: &str) -> helium::model::ClientConfig {
    let mut cfg = helium::model::ClientConfig::new(base_url);
    cfg.token = Some(TOKEN.to_string());
    cfg
}

/// Accepts every prompt: typed confirmations echo the token back and the
/// post-upload edit submits the prefilled draft.
#[allow(dead_code)]
pub struct AcceptAll;

impl helium::dialogs::Dialogs for AcceptAll {
    async fn confirm(&self, _prompt: &helium::dialogs::ConfirmPrompt) -> bool {
        true
    }

    async fn type_to_confirm(
        &self,
        _prompt: &helium::dialogs::ConfirmPrompt,
        token: &str,
    ) -> Option<String> {
        Some(token.to_string())
    }

    async fn edit_collection(
        &self,
        draft: &helium::upload::EditDraft,
    ) -> Option<helium::model::Collection> {
        Some(draft.collection.clone())
    }
}
