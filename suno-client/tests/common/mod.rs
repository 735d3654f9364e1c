//! In-process stand-in for the SunoAid backend and the geocoding service.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use suno_client::{ClientConfig, SunoClient};

pub const EMAIL: &str = "amina@example.com";
pub const PASSWORD: &str = "secret";
const SESSION_COOKIE: &str = "session=amina";

#[derive(Default)]
pub struct StubState {
    pub me_calls: AtomicUsize,
    pub list_queries: Mutex<Vec<HashMap<String, String>>>,
    pub uploads: AtomicUsize,
    pub created_issues: Mutex<Vec<Value>>,
    pub comment_posts: AtomicUsize,
    pub reverse_calls: AtomicUsize,
    pub admin_calls: AtomicUsize,
    pub logout_fails: AtomicBool,
    votes: Mutex<HashMap<i64, (i64, i64)>>,
}

impl StubState {
    pub fn list_calls(&self) -> usize {
        self.list_queries.lock().unwrap().len()
    }

    pub fn last_query(&self) -> HashMap<String, String> {
        self.list_queries.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

pub struct StubBackend {
    pub origin: String,
    pub state: Arc<StubState>,
}

impl StubBackend {
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = Router::new()
            .route("/api/auth/me", get(me))
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .route("/api/auth/logout", post(logout))
            .route("/api/auth/profile", put(update_profile))
            .route("/api/issues", get(list_issues).post(create_issue))
            .route("/api/issues/categories", get(categories))
            .route("/api/issues/{id}", get(issue))
            .route("/api/issues/{id}/vote", post(vote))
            .route("/api/issues/{id}/comments", get(comments).post(add_comment))
            .route("/api/locations", get(locations))
            .route("/api/upload", post(upload))
            .route("/api/admin/stats", get(admin_stats))
            .route("/reverse", get(reverse))
            .route("/search", get(search))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            origin: format!("http://{}", addr),
            state,
        }
    }

    pub fn api_url(&self) -> String {
        format!("{}/api", self.origin)
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url())
            .with_geocoder_url(self.origin.clone())
            .with_timeout(5)
    }

    pub fn client(&self) -> SunoClient {
        SunoClient::new(self.config()).unwrap()
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn user_json() -> Value {
    json!({
        "id": 1,
        "name": "Amina",
        "email": EMAIL,
        "phone": "555-0101",
        "role": "citizen",
        "is_verified": true,
        "created_at": "2024-05-01T09:00:00"
    })
}

pub fn issue_json(id: i64, title: &str, upvotes: i64, downvotes: i64) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{} description", title),
        "status": "open",
        "severity": "medium",
        "media_urls": ["/static/uploads/seed.jpg"],
        "upvotes": upvotes,
        "downvotes": downvotes,
        "views": 3,
        "comments_count": 1,
        "created_at": "2024-06-10T08:00:00",
        "user": {"id": 1, "name": "Amina"},
        "category": {"id": 2, "name": "Roads", "color_code": "#EF4444", "icon_name": "road"},
        "location": {"id": 1, "name": "Centretown", "city": "Ottawa", "province": "Ontario"}
    })
}

fn signed_in(headers: &HeaderMap) -> bool {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains(SESSION_COOKIE))
}

fn with_session(status: StatusCode, body: Value) -> Response {
    (
        status,
        [(header::SET_COOKIE, format!("{}; Path=/; HttpOnly", SESSION_COOKIE))],
        Json(body),
    )
        .into_response()
}

// ========== auth ==========

async fn me(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    state.me_calls.fetch_add(1, Ordering::SeqCst);
    if !signed_in(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    }
    Json(json!({ "user": user_json() })).into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == EMAIL && body["password"] == PASSWORD {
        with_session(
            StatusCode::OK,
            json!({ "message": "Login successful", "user": user_json() }),
        )
    } else {
        error(StatusCode::UNAUTHORIZED, "Invalid credentials")
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"] == "taken@example.com" {
        return error(StatusCode::CONFLICT, "Email already registered");
    }
    let mut user = user_json();
    user["id"] = json!(2);
    user["name"] = body["name"].clone();
    user["email"] = body["email"].clone();
    user["phone"] = body.get("phone").cloned().unwrap_or(Value::Null);
    with_session(
        StatusCode::CREATED,
        json!({ "message": "Registration successful", "user": user }),
    )
}

async fn logout(State(state): State<Arc<StubState>>) -> Response {
    if state.logout_fails.load(Ordering::SeqCst) {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable");
    }
    (
        StatusCode::OK,
        [(header::SET_COOKIE, "session=; Path=/; Max-Age=0".to_string())],
        Json(json!({ "message": "Logout successful" })),
    )
        .into_response()
}

/// Echoes the new name but leaves phone out of the response
async fn update_profile(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !signed_in(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    }
    let name = body
        .get("name")
        .cloned()
        .unwrap_or_else(|| json!("Amina"));
    Json(json!({
        "message": "Profile updated successfully",
        "user": { "id": 1, "name": name, "email": EMAIL }
    }))
    .into_response()
}

// ========== issues ==========

/// `search=slow` answers after 200ms; every list has one issue titled
/// after the search term.
async fn list_issues(
    State(state): State<Arc<StubState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.list_queries.lock().unwrap().push(params.clone());
    let search = params.get("search").cloned().unwrap_or_default();
    if search == "slow" {
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
    if search == "explode" {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "search index offline");
    }
    let (up, down) = state.votes.lock().unwrap().get(&1).copied().unwrap_or((5, 1));
    let title = if search.is_empty() { "all".to_string() } else { search };
    Json(json!({
        "issues": [issue_json(1, &title, up, down), issue_json(2, "Graffiti", 0, 0)],
        "pagination": {"page": 1, "per_page": 10, "total": 2, "pages": 1,
                       "has_next": false, "has_prev": false}
    }))
    .into_response()
}

async fn create_issue(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    state.created_issues.lock().unwrap().push(body.clone());
    let mut issue = issue_json(42, body["title"].as_str().unwrap_or_default(), 0, 0);
    issue["description"] = body["description"].clone();
    issue["severity"] = body["severity"].clone();
    issue["media_urls"] = body["media_urls"].clone();
    (
        StatusCode::CREATED,
        Json(json!({ "message": "Issue created successfully", "issue": issue })),
    )
        .into_response()
}

async fn categories() -> Json<Value> {
    Json(json!({
        "categories": [
            {"id": 2, "name": "Roads", "description": "Potholes and paving", "color_code": "#EF4444", "icon_name": "road"},
            {"id": 3, "name": "Lighting", "color_code": null, "icon_name": null}
        ]
    }))
}

async fn issue(Path(id): Path<i64>) -> Response {
    if id == 404 {
        return error(StatusCode::NOT_FOUND, "Issue not found");
    }
    Json(json!({ "issue": issue_json(id, "Pothole", 5, 1) })).into_response()
}

async fn vote(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut votes = state.votes.lock().unwrap();
    let entry = votes.entry(id).or_insert((5, 1));
    match body["vote_type"].as_str() {
        Some("up") => entry.0 += 1,
        Some("down") => entry.1 += 1,
        _ => return error(StatusCode::BAD_REQUEST, "Invalid vote type"),
    }
    Json(json!({
        "message": "Vote recorded successfully",
        "upvotes": entry.0,
        "downvotes": entry.1
    }))
    .into_response()
}

/// Issue 8's thread answers after 200ms
async fn comments(Path(id): Path<i64>) -> Json<Value> {
    if id == 8 {
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
    Json(json!({
        "comments": [
            {"id": 10, "content": format!("first on {}", id), "created_at": "2024-06-10T09:00:00",
             "user": {"id": 3, "name": "Jonas"}}
        ]
    }))
}

async fn add_comment(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> Response {
    state.comment_posts.fetch_add(1, Ordering::SeqCst);
    let content = body["content"].as_str().unwrap_or_default();
    if content.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Comment content is required");
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "message": "Comment added successfully",
            "comment": {"id": 99, "content": content, "created_at": "2024-06-10T10:00:00",
                        "user": {"id": 1, "name": "Amina"}}
        })),
    )
        .into_response()
}

async fn locations() -> Json<Value> {
    Json(json!({
        "locations": [{"id": 1, "name": "Centretown", "city": "Ottawa", "province": "Ontario"}]
    }))
}

/// Files whose name contains "fail" are rejected
async fn upload(State(state): State<Arc<StubState>>, mut multipart: Multipart) -> Response {
    state.uploads.fetch_add(1, Ordering::SeqCst);
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let _ = field.bytes().await;
        if name.contains("fail") {
            return error(StatusCode::INTERNAL_SERVER_ERROR, "disk full");
        }
        return Json(json!({
            "message": "File uploaded successfully",
            "url": format!("http://localhost:5000/static/uploads/{}", name),
            "filename": name
        }))
        .into_response();
    }
    error(StatusCode::BAD_REQUEST, "No file provided")
}

/// The first call answers after 200ms; each call reports one more issue
async fn admin_stats(State(state): State<Arc<StubState>>) -> Json<Value> {
    let n = state.admin_calls.fetch_add(1, Ordering::SeqCst);
    if n == 0 {
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
    Json(json!({
        "totalIssues": 40 + n,
        "totalUsers": 12,
        "openIssues": 20,
        "inProgressIssues": 10,
        "resolvedIssues": 10,
        "issuesLast7Days": 6,
        "topCategories": [{"name": "Roads", "count": 15}, {"name": "Lighting", "count": 9}]
    }))
}

// ========== geocoding ==========

/// Latitude 1 answers slowly; latitudes above 80 cannot be geocoded
async fn reverse(
    State(state): State<Arc<StubState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.reverse_calls.fetch_add(1, Ordering::SeqCst);
    let lat: f64 = params.get("lat").and_then(|v| v.parse().ok()).unwrap_or_default();
    let lon: f64 = params.get("lon").and_then(|v| v.parse().ok()).unwrap_or_default();
    if lat == 1.0 {
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
    if lat > 80.0 {
        return Json(json!({ "error": "Unable to geocode" })).into_response();
    }
    Json(json!({
        "display_name": format!("Street at {}, {}", lat, lon),
        "lat": lat.to_string(),
        "lon": lon.to_string(),
        "address": {"town": "Vanier", "state": "Ontario"}
    }))
    .into_response()
}

async fn search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let q = params.get("q").cloned().unwrap_or_default();
    Json(json!([
        {"display_name": format!("{}, Ottawa", q), "lat": "45.41", "lon": "-75.70",
         "address": {"city": "Ottawa", "state": "Ontario"}},
        {"display_name": "no coordinates"}
    ]))
}
