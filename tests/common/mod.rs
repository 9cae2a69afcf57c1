#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use sociopedika::{
    Config, Portal,
    navigation::{Signal, Signals},
};

pub const USER_TOKEN: &str = "user-token";
pub const SLOW_USER_TOKEN: &str = "slow-user-token";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const GUEST_TOKEN: &str = "guest-token";
pub const EXPIRED_TOKEN: &str = "expired-token";

/// How the mock wraps list responses.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ListShape {
    Page,
    Bare,
    Garbage,
}

pub struct Data {
    pub theories: BTreeMap<i64, Value>,
    pub users: BTreeMap<i64, Value>,
    pub favorites: BTreeSet<i64>,
    pub next_id: i64,
    pub theory_list_shape: ListShape,
    pub user_list_shape: ListShape,
    pub last_user_write: Option<Value>,
}

#[derive(Clone)]
pub struct MockBackend {
    pub data: Arc<Mutex<Data>>,
    hits: Arc<AtomicUsize>,
}

impl MockBackend {
    /// Requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub async fn favorites(&self) -> BTreeSet<i64> {
        self.data.lock().await.favorites.clone()
    }

    pub async fn set_theory_list_shape(&self, shape: ListShape) {
        self.data.lock().await.theory_list_shape = shape;
    }

    pub async fn set_user_list_shape(&self, shape: ListShape) {
        self.data.lock().await.user_list_shape = shape;
    }

    pub async fn last_user_write(&self) -> Option<Value> {
        self.data.lock().await.last_user_write.clone()
    }
}

fn theory(id: i64, title: &str, author: &str) -> Value {
    json!({
        "id": id,
        "nomeTeoria": title,
        "autore": author,
        "spiegazione": format!("{} explained", title),
        "esempioApplicazioneModerna": "Social media",
    })
}

fn seed() -> Data {
    let theories = [
        theory(1, "Conflict Theory", "Marx"),
        theory(2, "Anomie", "Durkheim"),
        theory(3, "Symbolic Interactionism", "Mead"),
        theory(7, "Social Action", "Weber"),
    ]
    .into_iter()
    .map(|t| (t["id"].as_i64().unwrap_or_default(), t))
    .collect();

    let users = [
        json!({"id": 1, "username": "alice", "email": "alice@example.com", "ruoli": ["ROLE_USER"]}),
        json!({"id": 2, "username": "admin", "email": "admin@example.com", "ruoli": ["ROLE_ADMIN"]}),
    ]
    .into_iter()
    .map(|u| (u["id"].as_i64().unwrap_or_default(), u))
    .collect();

    Data {
        theories,
        users,
        favorites: BTreeSet::from([2]),
        next_id: 100,
        theory_list_shape: ListShape::Page,
        user_list_shape: ListShape::Bare,
        last_user_write: None,
    }
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn authorize(headers: &HeaderMap, admin_only: bool) -> Result<(), Response> {
    match bearer(headers) {
        Some(ADMIN_TOKEN) => Ok(()),
        Some(USER_TOKEN) | Some(SLOW_USER_TOKEN) if !admin_only => Ok(()),
        Some(USER_TOKEN) | Some(SLOW_USER_TOKEN) => Err(message(StatusCode::FORBIDDEN, "Forbidden")),
        _ => Err(message(StatusCode::UNAUTHORIZED, "Full authentication is required")),
    }
}

fn wrap(items: Vec<Value>, shape: ListShape) -> Value {
    match shape {
        ListShape::Page => json!({ "content": items, "totalElements": items.len() }),
        ListShape::Bare => Value::Array(items),
        ListShape::Garbage => json!({ "items": items }),
    }
}

async fn count_requests(State(backend): State<MockBackend>, request: Request, next: Next) -> Response {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    next.run(request).await
}

async fn signin(Json(body): Json<Value>) -> Response {
    let identifier = body["usernameOrEmail"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    match (identifier, password) {
        ("alice", "correct-horse") => {
            Json(json!({ "accessToken": USER_TOKEN, "tokenType": "Bearer", "roles": ["ROLE_USER"] })).into_response()
        }
        ("admin", "admin-pass") => {
            Json(json!({ "accessToken": ADMIN_TOKEN, "roles": ["ROLE_ADMIN", "ROLE_USER"] })).into_response()
        }
        ("guest", "guest-pass") => Json(json!({ "accessToken": GUEST_TOKEN, "roles": [] })).into_response(),
        ("mute", _) => StatusCode::UNAUTHORIZED.into_response(),
        _ => message(StatusCode::UNAUTHORIZED, "Bad credentials"),
    }
}

async fn signup(Json(body): Json<Value>) -> Response {
    match body["username"].as_str().unwrap_or_default() {
        "taken_user" => message(StatusCode::BAD_REQUEST, "Username is already taken!"),
        "silent_fail" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "plain_text" => (StatusCode::OK, "Welcome aboard").into_response(),
        _ => message(StatusCode::OK, "User registered successfully!"),
    }
}

async fn list_theories(
    State(backend): State<MockBackend>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let keyword = params.get("keyword").cloned().unwrap_or_default().to_lowercase();

    let slow = keyword.starts_with("slow");
    if slow {
        tokio::time::sleep(Duration::from_millis(400)).await;
    }

    let data = backend.data.lock().await;
    let items: Vec<Value> = data
        .theories
        .values()
        .filter(|t| {
            slow || keyword.is_empty() || ["nomeTeoria", "autore"].iter().any(|field| {
                t[*field]
                    .as_str()
                    .is_some_and(|s| s.to_lowercase().contains(&keyword))
            })
        })
        .cloned()
        .collect();

    Json(wrap(items, data.theory_list_shape)).into_response()
}

async fn get_theory(State(backend): State<MockBackend>, Path(id): Path<i64>) -> Response {
    match backend.data.lock().await.theories.get(&id) {
        Some(t) => Json(t.clone()).into_response(),
        None => message(StatusCode::NOT_FOUND, &format!("Theory {} does not exist", id)),
    }
}

async fn create_theory(
    State(backend): State<MockBackend>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if let Err(denied) = authorize(&headers, true) {
        return denied;
    }
    let mut data = backend.data.lock().await;
    data.next_id += 1;
    let id = data.next_id;
    body["id"] = json!(id);
    data.theories.insert(id, body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update_theory(
    State(backend): State<MockBackend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(mut body): Json<Value>,
) -> Response {
    if let Err(denied) = authorize(&headers, true) {
        return denied;
    }
    let mut data = backend.data.lock().await;
    if !data.theories.contains_key(&id) {
        return message(StatusCode::NOT_FOUND, "Theory not found");
    }
    body["id"] = json!(id);
    data.theories.insert(id, body.clone());
    Json(body).into_response()
}

async fn delete_theory(
    State(backend): State<MockBackend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(denied) = authorize(&headers, true) {
        return denied;
    }
    let mut data = backend.data.lock().await;
    match data.theories.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => message(StatusCode::NOT_FOUND, "Theory not found"),
    }
}

async fn me(State(backend): State<MockBackend>, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&headers, false) {
        return denied;
    }
    if bearer(&headers) == Some(SLOW_USER_TOKEN) {
        tokio::time::sleep(Duration::from_millis(300)).await;
    }
    let data = backend.data.lock().await;
    let favorites: Vec<Value> = data
        .favorites
        .iter()
        .filter_map(|id| data.theories.get(id).cloned())
        .collect();

    Json(json!({
        "id": 1,
        "username": "alice",
        "email": "alice@example.com",
        "ruoli": ["ROLE_USER"],
        "teoriePreferite": favorites,
    }))
    .into_response()
}

async fn add_favorite(
    State(backend): State<MockBackend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(denied) = authorize(&headers, false) {
        return denied;
    }
    let mut data = backend.data.lock().await;
    if !data.theories.contains_key(&id) {
        return message(StatusCode::NOT_FOUND, "Theory not found");
    }
    data.favorites.insert(id);
    message(StatusCode::OK, "Theory added to favorites")
}

async fn remove_favorite(
    State(backend): State<MockBackend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(denied) = authorize(&headers, false) {
        return denied;
    }
    backend.data.lock().await.favorites.remove(&id);
    StatusCode::NO_CONTENT.into_response()
}

async fn list_users(State(backend): State<MockBackend>, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&headers, true) {
        return denied;
    }
    let data = backend.data.lock().await;
    let items: Vec<Value> = data.users.values().cloned().collect();
    Json(wrap(items, data.user_list_shape)).into_response()
}

fn stored_user(id: i64, body: &Value) -> Value {
    json!({
        "id": id,
        "username": body["username"],
        "email": body["email"],
        "ruoli": body["roles"],
    })
}

async fn create_user(
    State(backend): State<MockBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = authorize(&headers, true) {
        return denied;
    }
    let mut data = backend.data.lock().await;
    if data.users.values().any(|u| u["username"] == body["username"]) {
        return message(StatusCode::BAD_REQUEST, "Username is already taken!");
    }
    data.next_id += 1;
    let id = data.next_id;
    data.users.insert(id, stored_user(id, &body));
    data.last_user_write = Some(body);
    StatusCode::CREATED.into_response()
}

async fn update_user(
    State(backend): State<MockBackend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = authorize(&headers, true) {
        return denied;
    }
    let mut data = backend.data.lock().await;
    data.users.insert(id, stored_user(id, &body));
    data.last_user_write = Some(body);
    StatusCode::OK.into_response()
}

async fn delete_user(
    State(backend): State<MockBackend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(denied) = authorize(&headers, true) {
        return denied;
    }
    backend.data.lock().await.users.remove(&id);
    StatusCode::NO_CONTENT.into_response()
}

/// Starts the mock backend on a random local port.
///
/// Returns the backend handle and the API base URL.
pub async fn spawn_backend() -> (MockBackend, String) {
    let backend = MockBackend {
        data: Arc::new(Mutex::new(seed())),
        hits: Arc::new(AtomicUsize::new(0)),
    };

    let app = Router::new()
        .route("/api/auth/signin", post(signin))
        .route("/api/auth/signup", post(signup))
        .route("/api/theories", get(list_theories).post(create_theory))
        .route(
            "/api/theories/{id}",
            get(get_theory).put(update_theory).delete(delete_theory),
        )
        .route("/api/utenti/me", get(me))
        .route(
            "/api/utenti/me/teorie-preferite/{id}",
            post(add_favorite).delete(remove_favorite),
        )
        .route("/api/utenti", get(list_users).post(create_user))
        .route("/api/utenti/{id}", axum::routing::put(update_user).delete(delete_user))
        .layer(middleware::from_fn_with_state(backend.clone(), count_requests))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend crashed");
    });

    (backend, format!("http://{}/api", addr))
}

/// A portal wired to `base_url`, searching on every keystroke.
pub fn portal(base_url: &str) -> (Portal, Signals) {
    let config = Config::new(base_url)
        .with_immediate_search()
        .with_register_redirect_delay(Duration::from_millis(1500));
    Portal::new(&config).expect("portal")
}

/// Everything signalled so far.
pub fn drain(signals: &mut Signals) -> Vec<Signal> {
    let mut out = Vec::new();
    while let Ok(signal) = signals.try_recv() {
        out.push(signal);
    }
    out
}
