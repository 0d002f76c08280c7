//! # REST Handlers
//!
//! Request/response types and handler functions for the HTTP surface.
//!
//! List endpoints degrade rather than fail: a store problem yields an
//! HTTP 200 envelope with `success: false` and an empty collection, so a
//! rendering client always has something well-formed to show. Write
//! endpoints do the opposite and propagate errors as real HTTP statuses -
//! a dropped write must never look like a success.

use crate::domain::records::{Event, Market, NewEvent, NewMarket, NewPosition, Position};
use crate::domain::value_objects::{Side, Uint};
use crate::infrastructure::repositories::{
    EventFilter, EventRepository, MarketFilter, MarketRepository, PositionFilter,
    PositionRepository, QueryOutcome, RepositoryError,
};
use crate::infrastructure::store::entity::EntityKey;
use crate::infrastructure::store::error::{StoreError, StoreResult};
use crate::infrastructure::store::session::SharedStore;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared state for all REST handlers.
///
/// Holds the lazy store session; repositories are built per request so
/// the server can start (and serve health checks) before the store is
/// reachable or even configured.
#[derive(Debug, Clone)]
pub struct AppState {
    store: SharedStore,
    database_key: Option<String>,
}

impl AppState {
    /// Creates handler state over a store session handle.
    #[must_use]
    pub fn new(store: SharedStore, database_key: Option<String>) -> Self {
        Self {
            store,
            database_key,
        }
    }

    async fn markets(&self) -> StoreResult<MarketRepository> {
        let store = self.store.get().await?;
        let mut repo = MarketRepository::new(store);
        if let Some(key) = &self.database_key {
            repo = repo.with_database_key(key.clone());
        }
        Ok(repo)
    }

    async fn positions(&self) -> StoreResult<PositionRepository> {
        let store = self.store.get().await?;
        let mut repo = PositionRepository::new(store);
        if let Some(key) = &self.database_key {
            repo = repo.with_database_key(key.clone());
        }
        Ok(repo)
    }

    async fn events(&self) -> StoreResult<EventRepository> {
        let store = self.store.get().await?;
        let mut repo = EventRepository::new(store);
        if let Some(key) = &self.database_key {
            repo = repo.with_database_key(key.clone());
        }
        Ok(repo)
    }
}

/// Error envelope returned with a non-success HTTP status.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable failure description.
    pub error: String,
}

/// A handler failure carrying the HTTP status it maps to.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let status = match &err {
            RepositoryError::Validation(_) => StatusCode::BAD_REQUEST,
            RepositoryError::Codec(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RepositoryError::Store(store) => match store {
                StoreError::ConfigurationMissing(_) => StatusCode::INTERNAL_SERVER_ERROR,
                StoreError::Unavailable(_)
                | StoreError::WriteRejected(_)
                | StoreError::QueryRejected(_) => StatusCode::BAD_GATEWAY,
            },
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        RepositoryError::from(err).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

fn missing_fields(names: &[&str]) -> ApiError {
    ApiError::bad_request(format!("Missing required fields: {}", names.join(", ")))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process is serving.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// `GET /api/v1/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ---------------------------------------------------------------------------
// Markets
// ---------------------------------------------------------------------------

/// Body for `POST /api/v1/markets`.
///
/// Required fields are optional at the type level so their absence maps
/// to a uniform 400 rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMarketRequest {
    /// Market question text.
    pub question: Option<String>,
    /// Trading close, unix seconds.
    pub end_time: Option<i64>,
    /// Unscaled seed liquidity, as a decimal string or number.
    pub initial_liquidity: Option<Uint>,
    /// Whether joining requires identity verification.
    #[serde(default)]
    pub civic_gated: bool,
    /// Creator identity; defaults server-side when absent.
    pub creator: Option<String>,
}

impl CreateMarketRequest {
    fn into_new_market(self) -> Result<NewMarket, ApiError> {
        let mut missing = Vec::new();
        if self.question.is_none() {
            missing.push("question");
        }
        if self.end_time.is_none() {
            missing.push("endTime");
        }
        if self.initial_liquidity.is_none() {
            missing.push("initialLiquidity");
        }
        match (self.question, self.end_time, self.initial_liquidity) {
            (Some(question), Some(end_time), Some(initial_liquidity)) => Ok(NewMarket {
                question,
                end_time,
                initial_liquidity,
                civic_gated: self.civic_gated,
                creator: self.creator,
            }),
            _ => Err(missing_fields(&missing)),
        }
    }
}

/// Query parameters for `GET /api/v1/markets`.
#[derive(Debug, Default, Deserialize)]
pub struct MarketListParams {
    /// When true, only unresolved markets are returned.
    pub live: Option<bool>,
}

/// List envelope for markets.
#[derive(Debug, Serialize, Deserialize)]
pub struct MarketListResponse {
    /// False when the list had to degrade to empty.
    pub success: bool,
    /// Decoded market records.
    pub markets: Vec<Market>,
    /// Number of records returned.
    pub count: usize,
    /// Where the data came from.
    pub source: String,
    /// Failure description when degraded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MarketListResponse {
    fn ok(outcome: QueryOutcome<Market>) -> Self {
        Self {
            success: true,
            count: outcome.records.len(),
            markets: outcome.records,
            source: "store".to_string(),
            error: None,
        }
    }

    fn degraded(error: String) -> Self {
        Self {
            success: false,
            markets: Vec::new(),
            count: 0,
            source: "store".to_string(),
            error: Some(error),
        }
    }
}

/// Create envelope for one market.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMarketResponse {
    /// Always `true` on this path.
    pub success: bool,
    /// The record as persisted.
    pub market: Market,
    /// Store-assigned key, for correlation only.
    pub entity_key: EntityKey,
}

/// `GET /api/v1/markets`
pub async fn list_markets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MarketListParams>,
) -> Json<MarketListResponse> {
    let filter = MarketFilter {
        live: params.live.unwrap_or(false),
    };
    let result = match state.markets().await {
        Ok(repo) => repo.query(filter).await,
        Err(e) => Err(e.into()),
    };
    match result {
        Ok(outcome) => Json(MarketListResponse::ok(outcome)),
        Err(e) => {
            tracing::error!(error = %e, "market listing degraded");
            Json(MarketListResponse::degraded(e.to_string()))
        }
    }
}

/// `POST /api/v1/markets`
pub async fn create_market(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateMarketRequest>,
) -> Result<(StatusCode, Json<CreateMarketResponse>), ApiError> {
    let new = body.into_new_market()?;
    let repo = state.markets().await?;
    let (market, entity_key) = repo.create(new).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateMarketResponse {
            success: true,
            market,
            entity_key,
        }),
    ))
}

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// Body for `POST /api/v1/positions`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePositionRequest {
    /// Market the position belongs to.
    pub market_id: Option<String>,
    /// Holder identity.
    pub user: Option<String>,
    /// `"YES"` or `"NO"`, case-insensitive.
    pub side: Option<String>,
    /// Stake amount, as a decimal string or number.
    pub amount: Option<Uint>,
    /// Shares received; defaults to the amount.
    pub shares: Option<Uint>,
    /// Chain the trade settled on.
    pub chain: Option<String>,
    /// Settlement transaction hash.
    pub tx_hash: Option<String>,
}

impl CreatePositionRequest {
    fn into_new_position(self) -> Result<NewPosition, ApiError> {
        let mut missing = Vec::new();
        if self.market_id.is_none() {
            missing.push("marketId");
        }
        if self.user.is_none() {
            missing.push("user");
        }
        if self.side.is_none() {
            missing.push("side");
        }
        if self.amount.is_none() {
            missing.push("amount");
        }
        let (Some(market_id), Some(user), Some(side), Some(amount)) =
            (self.market_id, self.user, self.side, self.amount)
        else {
            return Err(missing_fields(&missing));
        };
        let side: Side = side.parse().map_err(ApiError::bad_request)?;
        Ok(NewPosition {
            market_id,
            user,
            side,
            amount,
            shares: self.shares,
            chain: self.chain,
            tx_hash: self.tx_hash,
        })
    }
}

/// Query parameters for `GET /api/v1/positions`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionListParams {
    /// Only positions in this market.
    pub market_id: Option<String>,
    /// Only positions held by this user.
    pub user: Option<String>,
}

/// List envelope for positions.
#[derive(Debug, Serialize, Deserialize)]
pub struct PositionListResponse {
    /// False when the list had to degrade to empty.
    pub success: bool,
    /// Decoded position records.
    pub positions: Vec<Position>,
    /// Number of records returned.
    pub count: usize,
    /// Where the data came from.
    pub source: String,
    /// Failure description when degraded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PositionListResponse {
    fn ok(outcome: QueryOutcome<Position>) -> Self {
        Self {
            success: true,
            count: outcome.records.len(),
            positions: outcome.records,
            source: "store".to_string(),
            error: None,
        }
    }

    fn degraded(error: String) -> Self {
        Self {
            success: false,
            positions: Vec::new(),
            count: 0,
            source: "store".to_string(),
            error: Some(error),
        }
    }
}

/// Create envelope for one position.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePositionResponse {
    /// Always `true` on this path.
    pub success: bool,
    /// The record as persisted.
    pub position: Position,
    /// Store-assigned key, for correlation only.
    pub entity_key: EntityKey,
}

/// `GET /api/v1/positions`
pub async fn list_positions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PositionListParams>,
) -> Json<PositionListResponse> {
    let filter = PositionFilter {
        market_id: params.market_id,
        user: params.user,
    };
    let result = match state.positions().await {
        Ok(repo) => repo.query(filter).await,
        Err(e) => Err(e.into()),
    };
    match result {
        Ok(outcome) => Json(PositionListResponse::ok(outcome)),
        Err(e) => {
            tracing::error!(error = %e, "position listing degraded");
            Json(PositionListResponse::degraded(e.to_string()))
        }
    }
}

/// `POST /api/v1/positions`
pub async fn create_position(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreatePositionRequest>,
) -> Result<(StatusCode, Json<CreatePositionResponse>), ApiError> {
    let new = body.into_new_position()?;
    let repo = state.positions().await?;
    let (position, entity_key) = repo.create(new).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatePositionResponse {
            success: true,
            position,
            entity_key,
        }),
    ))
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Body for `POST /api/v1/events`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    /// Event type, e.g. `"market_created"`.
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    /// Market the event refers to.
    pub market_id: Option<String>,
    /// User the event is attributed to.
    pub user: Option<String>,
    /// Free-form event detail.
    pub data: Option<serde_json::Value>,
    /// Client-supplied occurrence time, unix milliseconds.
    pub timestamp: Option<i64>,
}

impl CreateEventRequest {
    fn into_new_event(self) -> Result<NewEvent, ApiError> {
        let Some(event_type) = self.event_type else {
            return Err(missing_fields(&["type"]));
        };
        Ok(NewEvent {
            event_type,
            market_id: self.market_id,
            user: self.user,
            data: self.data,
            timestamp: self.timestamp,
        })
    }
}

/// Query parameters for `GET /api/v1/events`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListParams {
    /// Only events of this type.
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    /// Only events referencing this market.
    pub market_id: Option<String>,
    /// Only events attributed to this user.
    pub user: Option<String>,
}

/// List envelope for events.
#[derive(Debug, Serialize, Deserialize)]
pub struct EventListResponse {
    /// False when the list had to degrade to empty.
    pub success: bool,
    /// Decoded event records.
    pub events: Vec<Event>,
    /// Number of records returned.
    pub count: usize,
    /// Where the data came from.
    pub source: String,
    /// Failure description when degraded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EventListResponse {
    fn ok(outcome: QueryOutcome<Event>) -> Self {
        Self {
            success: true,
            count: outcome.records.len(),
            events: outcome.records,
            source: "store".to_string(),
            error: None,
        }
    }

    fn degraded(error: String) -> Self {
        Self {
            success: false,
            events: Vec::new(),
            count: 0,
            source: "store".to_string(),
            error: Some(error),
        }
    }
}

/// Create envelope for one event.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventResponse {
    /// Always `true` on this path.
    pub success: bool,
    /// The record as persisted.
    pub event: Event,
    /// Store-assigned key, for correlation only.
    pub entity_key: EntityKey,
}

/// `GET /api/v1/events`
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EventListParams>,
) -> Json<EventListResponse> {
    let filter = EventFilter {
        event_type: params.event_type,
        market_id: params.market_id,
        user: params.user,
    };
    let result = match state.events().await {
        Ok(repo) => repo.query(filter).await,
        Err(e) => Err(e.into()),
    };
    match result {
        Ok(outcome) => Json(EventListResponse::ok(outcome)),
        Err(e) => {
            tracing::error!(error = %e, "event listing degraded");
            Json(EventListResponse::degraded(e.to_string()))
        }
    }
}

/// `POST /api/v1/events`
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<CreateEventResponse>), ApiError> {
    let new = body.into_new_event()?;
    let repo = state.events().await?;
    let (event, entity_key) = repo.create(new).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateEventResponse {
            success: true,
            event,
            entity_key,
        }),
    ))
}
