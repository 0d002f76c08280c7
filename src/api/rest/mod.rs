//! # REST API
//!
//! REST endpoints using axum for the market data surface.
//!
//! # Endpoints
//!
//! ## Markets
//! - `GET /api/v1/markets` - List markets, optionally only live ones
//! - `POST /api/v1/markets` - Create a market
//!
//! ## Positions
//! - `GET /api/v1/positions` - List positions filtered by market and user
//! - `POST /api/v1/positions` - Record a position
//!
//! ## Events
//! - `GET /api/v1/events` - List events filtered by type, market, and user
//! - `POST /api/v1/events` - Append an event
//!
//! ## Health
//! - `GET /api/v1/health` - Health check endpoint
//!
//! # Usage
//!
//! ```ignore
//! use predmarket_store::api::rest::{AppState, create_router};
//! use predmarket_store::infrastructure::store::SharedStore;
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState::new(SharedStore::from_env(), None));
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    AppState, ApiError, CreateEventRequest, CreateEventResponse, CreateMarketRequest,
    CreateMarketResponse, CreatePositionRequest, CreatePositionResponse, ErrorResponse,
    EventListParams, EventListResponse, HealthResponse, MarketListParams, MarketListResponse,
    PositionListParams, PositionListResponse,
};
pub use routes::create_router;
