//! In-memory stand-in for the Megaphone API.
//!
//! Serves the podcast and episode routes under `/api` for one network and
//! one organization, checks the `Authorization: Token token=...` header, and
//! stores whatever JSON fields clients send. Only `title` is required on
//! create; the server assigns `id` (and `podcastId` for episodes).

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, warn};
use uuid::Uuid;

pub type Fields = Map<String, Value>;

/// Account the mock server accepts requests for.
#[derive(Clone, Debug)]
pub struct MockConfig {
    pub token: String,
    pub network_id: String,
    pub organization_id: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            token: "test-token".to_string(),
            network_id: "net1".to_string(),
            organization_id: "org1".to_string(),
        }
    }
}

/// Podcasts and episodes in creation order.
#[derive(Debug, Default)]
pub struct Store {
    podcasts: Vec<Fields>,
    episodes: Vec<Fields>,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
struct AppState {
    config: Arc<MockConfig>,
    db: Db,
}

pub fn app() -> Router {
    app_with(MockConfig::default())
}

pub fn app_with(config: MockConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
        db: Db::default(),
    };
    let api = Router::new()
        .route(
            "/networks/{network_id}/podcasts",
            get(list_podcasts).post(create_podcast),
        )
        .route(
            "/networks/{network_id}/podcasts/{podcast_id}",
            get(get_podcast).put(update_podcast).delete(delete_podcast),
        )
        .route(
            "/networks/{network_id}/podcasts/{podcast_id}/episodes",
            get(list_episodes).post(create_episode),
        )
        .route(
            "/networks/{network_id}/podcasts/{podcast_id}/episodes/{episode_id}",
            get(get_episode).put(update_episode).delete(delete_episode),
        )
        .route("/organizations/{organization_id}/episodes", get(search_episodes))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state);
    Router::new().nest("/api", api)
}

pub async fn run(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(config)).await
}

async fn require_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let expected = format!("Token token={}", state.config.token);
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if presented != Some(expected.as_str()) {
        warn!(uri = %request.uri(), "rejecting request with bad token");
        return Err(StatusCode::UNAUTHORIZED);
    }
    debug!(method = %request.method(), uri = %request.uri(), "accepted");
    Ok(next.run(request).await)
}

// --- podcasts ---

async fn list_podcasts(
    State(state): State<AppState>,
    Path(network_id): Path<String>,
) -> Result<Json<Vec<Fields>>, StatusCode> {
    state.check_network(&network_id)?;
    let store = state.db.read().await;
    Ok(Json(store.podcasts.clone()))
}

async fn create_podcast(
    State(state): State<AppState>,
    Path(network_id): Path<String>,
    Json(input): Json<Value>,
) -> Result<(StatusCode, Json<Fields>), StatusCode> {
    state.check_network(&network_id)?;
    let podcast = new_record(input)?;
    state.db.write().await.podcasts.push(podcast.clone());
    Ok((StatusCode::CREATED, Json(podcast)))
}

async fn get_podcast(
    State(state): State<AppState>,
    Path((network_id, podcast_id)): Path<(String, String)>,
) -> Result<Json<Fields>, StatusCode> {
    state.check_network(&network_id)?;
    let store = state.db.read().await;
    find(&store.podcasts, &podcast_id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_podcast(
    State(state): State<AppState>,
    Path((network_id, podcast_id)): Path<(String, String)>,
    Json(input): Json<Value>,
) -> Result<Json<Fields>, StatusCode> {
    state.check_network(&network_id)?;
    let mut store = state.db.write().await;
    let podcast = find_mut(&mut store.podcasts, &podcast_id).ok_or(StatusCode::NOT_FOUND)?;
    merge(podcast, input)?;
    Ok(Json(podcast.clone()))
}

async fn delete_podcast(
    State(state): State<AppState>,
    Path((network_id, podcast_id)): Path<(String, String)>,
) -> Result<StatusCode, StatusCode> {
    state.check_network(&network_id)?;
    let mut store = state.db.write().await;
    remove(&mut store.podcasts, &podcast_id).ok_or(StatusCode::NOT_FOUND)?;
    store
        .episodes
        .retain(|episode| !field_matches(episode, "podcastId", &podcast_id));
    Ok(StatusCode::NO_CONTENT)
}

// --- episodes ---

async fn list_episodes(
    State(state): State<AppState>,
    Path((network_id, podcast_id)): Path<(String, String)>,
) -> Result<Json<Vec<Fields>>, StatusCode> {
    state.check_network(&network_id)?;
    let store = state.db.read().await;
    find(&store.podcasts, &podcast_id).ok_or(StatusCode::NOT_FOUND)?;
    let episodes = store
        .episodes
        .iter()
        .filter(|episode| field_matches(episode, "podcastId", &podcast_id))
        .cloned()
        .collect();
    Ok(Json(episodes))
}

async fn create_episode(
    State(state): State<AppState>,
    Path((network_id, podcast_id)): Path<(String, String)>,
    Json(input): Json<Value>,
) -> Result<(StatusCode, Json<Fields>), StatusCode> {
    state.check_network(&network_id)?;
    let mut store = state.db.write().await;
    find(&store.podcasts, &podcast_id).ok_or(StatusCode::NOT_FOUND)?;
    let mut episode = new_record(input)?;
    episode.insert("podcastId".to_string(), Value::String(podcast_id));
    store.episodes.push(episode.clone());
    Ok((StatusCode::CREATED, Json(episode)))
}

async fn get_episode(
    State(state): State<AppState>,
    Path((network_id, podcast_id, episode_id)): Path<(String, String, String)>,
) -> Result<Json<Fields>, StatusCode> {
    state.check_network(&network_id)?;
    let store = state.db.read().await;
    find(&store.episodes, &episode_id)
        .filter(|episode| field_matches(episode, "podcastId", &podcast_id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_episode(
    State(state): State<AppState>,
    Path((network_id, podcast_id, episode_id)): Path<(String, String, String)>,
    Json(input): Json<Value>,
) -> Result<Json<Fields>, StatusCode> {
    state.check_network(&network_id)?;
    let mut store = state.db.write().await;
    let episode = find_mut(&mut store.episodes, &episode_id)
        .filter(|episode| field_matches(episode, "podcastId", &podcast_id))
        .ok_or(StatusCode::NOT_FOUND)?;
    merge(episode, input)?;
    Ok(Json(episode.clone()))
}

async fn delete_episode(
    State(state): State<AppState>,
    Path((network_id, podcast_id, episode_id)): Path<(String, String, String)>,
) -> Result<StatusCode, StatusCode> {
    state.check_network(&network_id)?;
    let mut store = state.db.write().await;
    let owned = find(&store.episodes, &episode_id)
        .is_some_and(|episode| field_matches(episode, "podcastId", &podcast_id));
    if !owned {
        return Err(StatusCode::NOT_FOUND);
    }
    remove(&mut store.episodes, &episode_id);
    Ok(StatusCode::NO_CONTENT)
}

/// Organization-wide episode listing; every query parameter must match the
/// episode field of the same name.
async fn search_episodes(
    State(state): State<AppState>,
    Path(organization_id): Path<String>,
    Query(filters): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Fields>>, StatusCode> {
    if organization_id != state.config.organization_id {
        return Err(StatusCode::NOT_FOUND);
    }
    let store = state.db.read().await;
    let episodes = store
        .episodes
        .iter()
        .filter(|episode| {
            filters
                .iter()
                .all(|(field, expected)| field_matches(episode, field, expected))
        })
        .cloned()
        .collect();
    Ok(Json(episodes))
}

impl AppState {
    fn check_network(&self, network_id: &str) -> Result<(), StatusCode> {
        if network_id == self.config.network_id {
            Ok(())
        } else {
            Err(StatusCode::NOT_FOUND)
        }
    }
}

/// Validates a create payload and assigns it an id.
pub fn new_record(input: Value) -> Result<Fields, StatusCode> {
    let Value::Object(mut fields) = input else {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    };
    if !fields.get("title").is_some_and(Value::is_string) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    fields.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
    Ok(fields)
}

/// Applies an update payload. Server-owned fields are left alone.
pub fn merge(record: &mut Fields, input: Value) -> Result<(), StatusCode> {
    let Value::Object(fields) = input else {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    };
    for (name, value) in fields {
        if name != "id" && name != "podcastId" {
            record.insert(name, value);
        }
    }
    Ok(())
}

/// Compares a field against a query-string value; non-string fields are
/// compared through their JSON rendering.
pub fn field_matches(record: &Fields, field: &str, expected: &str) -> bool {
    match record.get(field) {
        Some(Value::String(actual)) => actual == expected,
        Some(other) => other.to_string() == expected,
        None => false,
    }
}

fn find<'a>(records: &'a [Fields], id: &str) -> Option<&'a Fields> {
    records.iter().find(|record| field_matches(record, "id", id))
}

fn find_mut<'a>(records: &'a mut [Fields], id: &str) -> Option<&'a mut Fields> {
    records.iter_mut().find(|record| field_matches(record, "id", id))
}

fn remove(records: &mut Vec<Fields>, id: &str) -> Option<Fields> {
    let index = records
        .iter()
        .position(|record| field_matches(record, "id", id))?;
    Some(records.remove(index))
}
