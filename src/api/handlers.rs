//! API Handlers
//!
//! One handler per route. Each runs exactly one store command, logs the
//! outcome and renders JSON; failures are rendered by `ApiError`.

use axum::{extract::State, http::Uri, Json};
use tracing::{info, warn};

use super::extract::ApiPath;

use crate::config::Config;
use crate::error::{ApiError, KeyKind, Result, StoreResult};
use crate::models::{
    HashFieldPath, HashResponse, HealthResponse, IndexResponse, KeyPath, KeyValuePath,
    ListResponse, ScoredMemberPath, SetMembersResponse, SortedSetResponse, ValueResponse,
    VisitsResponse, WriteResponse,
};
use crate::store::{Store, VISIT_COUNTER_KEY};

/// Application state shared across all handlers.
///
/// The store handle is created once at startup and cloned into each
/// request; there is no other shared state.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

impl AppState {
    /// Creates a new AppState around the given store.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> StoreResult<Self> {
        Ok(Self::new(Store::from_config(config)?))
    }
}

/// Handler for GET /
pub async fn index_handler() -> Json<IndexResponse> {
    Json(IndexResponse::new())
}

/// Handler for GET /set/:key/:value
pub async fn set_value_handler(
    State(state): State<AppState>,
    ApiPath(KeyValuePath { key, value }): ApiPath<KeyValuePath>,
) -> Result<Json<WriteResponse>> {
    state
        .store
        .set(&key, &value)
        .await
        .map_err(|e| ApiError::from_store(e, &key, KeyKind::String))?;

    info!("Key set: {} -> {}", key, value);
    Ok(Json(WriteResponse::new(format!(
        "Stored {} = {} in Redis",
        key, value
    ))))
}

/// Handler for GET /get/:key
pub async fn get_value_handler(
    State(state): State<AppState>,
    ApiPath(KeyPath { key }): ApiPath<KeyPath>,
) -> Result<Json<ValueResponse>> {
    let value = state
        .store
        .get(&key)
        .await
        .map_err(|e| ApiError::from_store(e, &key, KeyKind::String))?
        .ok_or_else(|| ApiError::NotFound(key.clone()))?;

    info!("Key fetched: {} -> {}", key, value);
    Ok(Json(ValueResponse::new(key, value)))
}

/// Handler for GET /list/:key/push/:value
pub async fn push_list_handler(
    State(state): State<AppState>,
    ApiPath(KeyValuePath { key, value }): ApiPath<KeyValuePath>,
) -> Result<Json<WriteResponse>> {
    let len = state
        .store
        .lpush(&key, &value)
        .await
        .map_err(|e| ApiError::from_store(e, &key, KeyKind::List))?;

    info!("Pushed to list {}: {} (length {})", key, value, len);
    Ok(Json(WriteResponse::new(format!(
        "Pushed {} to list {}",
        value, key
    ))))
}

/// Handler for GET /list/:key
pub async fn view_list_handler(
    State(state): State<AppState>,
    ApiPath(KeyPath { key }): ApiPath<KeyPath>,
) -> Result<Json<ListResponse>> {
    let values = state
        .store
        .lrange(&key)
        .await
        .map_err(|e| ApiError::from_store(e, &key, KeyKind::List))?;

    if values.is_empty() {
        return Err(ApiError::Empty {
            kind: KeyKind::List,
            key,
        });
    }

    info!("List fetched: {} ({} values)", key, values.len());
    Ok(Json(ListResponse::new(key, values)))
}

/// Handler for GET /set/add/:key/:value
pub async fn add_set_member_handler(
    State(state): State<AppState>,
    ApiPath(KeyValuePath { key, value }): ApiPath<KeyValuePath>,
) -> Result<Json<WriteResponse>> {
    let added = state
        .store
        .sadd(&key, &value)
        .await
        .map_err(|e| ApiError::from_store(e, &key, KeyKind::Set))?;

    info!("Added to set {}: {} (new: {})", key, value, added > 0);
    Ok(Json(WriteResponse::new(format!(
        "Added {} to set {}",
        value, key
    ))))
}

/// Handler for GET /set/view/:key
pub async fn view_set_handler(
    State(state): State<AppState>,
    ApiPath(KeyPath { key }): ApiPath<KeyPath>,
) -> Result<Json<SetMembersResponse>> {
    let members = state
        .store
        .smembers(&key)
        .await
        .map_err(|e| ApiError::from_store(e, &key, KeyKind::Set))?;

    if members.is_empty() {
        return Err(ApiError::Empty {
            kind: KeyKind::Set,
            key,
        });
    }

    info!("Set fetched: {} ({} members)", key, members.len());
    Ok(Json(SetMembersResponse::new(key, members)))
}

/// Handler for GET /hash/:key/:field/:value
pub async fn set_hash_field_handler(
    State(state): State<AppState>,
    ApiPath(HashFieldPath { key, field, value }): ApiPath<HashFieldPath>,
) -> Result<Json<WriteResponse>> {
    state
        .store
        .hset(&key, &field, &value)
        .await
        .map_err(|e| ApiError::from_store(e, &key, KeyKind::Hash))?;

    info!("Hash set: {}[{}] = {}", key, field, value);
    Ok(Json(WriteResponse::new(format!(
        "Set {} = {} in hash {}",
        field, value, key
    ))))
}

/// Handler for GET /hash/view/:key
pub async fn view_hash_handler(
    State(state): State<AppState>,
    ApiPath(KeyPath { key }): ApiPath<KeyPath>,
) -> Result<Json<HashResponse>> {
    let fields = state
        .store
        .hgetall(&key)
        .await
        .map_err(|e| ApiError::from_store(e, &key, KeyKind::Hash))?;

    if fields.is_empty() {
        return Err(ApiError::Empty {
            kind: KeyKind::Hash,
            key,
        });
    }

    info!("Hash fetched: {} ({} fields)", key, fields.len());
    Ok(Json(HashResponse::new(key, fields)))
}

/// Handler for GET /zset/:key/:member/:score
pub async fn add_zset_member_handler(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<ScoredMemberPath>,
) -> Result<Json<WriteResponse>> {
    let score = path.parse_score()?;
    let ScoredMemberPath { key, member, .. } = path;

    state
        .store
        .zadd(&key, &member, score)
        .await
        .map_err(|e| ApiError::from_store(e, &key, KeyKind::SortedSet))?;

    info!("Added to sorted set {}: {} with score {}", key, member, score);
    Ok(Json(WriteResponse::new(format!(
        "Added {} with score {} to sorted set {}",
        member, score, key
    ))))
}

/// Handler for GET /zset/view/:key
pub async fn view_zset_handler(
    State(state): State<AppState>,
    ApiPath(KeyPath { key }): ApiPath<KeyPath>,
) -> Result<Json<SortedSetResponse>> {
    let members = state
        .store
        .zrange_withscores(&key)
        .await
        .map_err(|e| ApiError::from_store(e, &key, KeyKind::SortedSet))?;

    if members.is_empty() {
        return Err(ApiError::Empty {
            kind: KeyKind::SortedSet,
            key,
        });
    }

    info!("Sorted set fetched: {} ({} members)", key, members.len());
    Ok(Json(SortedSetResponse::new(key, members)))
}

/// Handler for GET /visits
pub async fn visits_handler(State(state): State<AppState>) -> Result<Json<VisitsResponse>> {
    let visits = state
        .store
        .incr(VISIT_COUNTER_KEY)
        .await
        .map_err(|e| ApiError::from_store(e, VISIT_COUNTER_KEY, KeyKind::String))?;

    info!("Visit count updated: {}", visits);
    Ok(Json(VisitsResponse::new(visits)))
}

/// Handler for GET /health
///
/// Always answers 200; the body says whether the store responded.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_up = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Health check: store ping failed: {}", e);
            false
        }
    };

    Json(HealthResponse::from_ping(store_up))
}

/// Fallback for paths no route matches.
pub async fn not_found_handler(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_state() -> AppState {
        AppState::new(Store::memory())
    }

    fn kv(key: &str, value: &str) -> ApiPath<KeyValuePath> {
        ApiPath(KeyValuePath {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    fn key(key: &str) -> ApiPath<KeyPath> {
        ApiPath(KeyPath {
            key: key.to_string(),
        })
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = memory_state();

        let result = set_value_handler(State(state.clone()), kv("a", "1")).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().message, "Stored a = 1 in Redis");

        let response = get_value_handler(State(state), key("a")).await.unwrap();
        assert_eq!(response.key, "a");
        assert_eq!(response.value, "1");
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = memory_state();

        let result = get_value_handler(State(state), key("nonexistent")).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_push_order() {
        let state = memory_state();

        push_list_handler(State(state.clone()), kv("L", "x")).await.unwrap();
        push_list_handler(State(state.clone()), kv("L", "y")).await.unwrap();

        let response = view_list_handler(State(state), key("L")).await.unwrap();
        assert_eq!(response.values, vec!["y".to_string(), "x".to_string()]);
    }

    #[tokio::test]
    async fn test_view_empty_list() {
        let state = memory_state();

        let result = view_list_handler(State(state), key("missing")).await;
        assert!(matches!(
            result,
            Err(ApiError::Empty {
                kind: KeyKind::List,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_set_add_on_string_key() {
        let state = memory_state();

        set_value_handler(State(state.clone()), kv("k", "v")).await.unwrap();
        let result = add_set_member_handler(State(state), kv("k", "m")).await;
        assert!(matches!(
            result,
            Err(ApiError::WrongType {
                kind: KeyKind::Set,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_zset_rejects_bad_score() {
        let state = memory_state();

        let path = ApiPath(ScoredMemberPath {
            key: "board".to_string(),
            member: "p".to_string(),
            score: "high".to_string(),
        });
        let result = add_zset_member_handler(State(state), path).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_visits_handler_counts() {
        let state = memory_state();

        let first = visits_handler(State(state.clone())).await.unwrap();
        let second = visits_handler(State(state)).await.unwrap();
        assert_eq!(first.total_visits, 1);
        assert_eq!(second.total_visits, 2);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler(State(memory_state())).await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.store, "up");
    }
}
