//! # JSON-RPC Entity Store
//!
//! [`EntityStore`] implementation talking JSON-RPC 2.0 to the hosted
//! annotated key-value store.
//!
//! The client is bound to one endpoint, one namespace (chain id), and one
//! signing identity derived from the configured private key. Construction
//! validates the key but performs no network call; the first operation
//! does.
//!
//! # Examples
//!
//! ```ignore
//! use predmarket_store::config::StoreConfig;
//! use predmarket_store::infrastructure::store::rpc::RpcEntityStore;
//!
//! let store = RpcEntityStore::connect(&StoreConfig::from_env()?)?;
//! let receipts = store.create_entities(entities).await?;
//! ```

use crate::config::StoreConfig;
use crate::infrastructure::store::client::EntityStore;
use crate::infrastructure::store::entity::{Entity, Receipt, StoredEntity};
use crate::infrastructure::store::error::{StoreError, StoreResult};
use crate::infrastructure::store::filter::Filter;
use async_trait::async_trait;
use ethers::signers::{LocalWallet, Signer};
use ethers::utils::hex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

const METHOD_CREATE: &str = "annostore_createEntities";
const METHOD_QUERY: &str = "annostore_queryEntities";

/// JSON-RPC client for the remote entity store.
pub struct RpcEntityStore {
    http: reqwest::Client,
    rpc_url: String,
    chain_id: u64,
    signer: String,
    next_id: AtomicU64,
}

impl fmt::Debug for RpcEntityStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcEntityStore")
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.chain_id)
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

impl RpcEntityStore {
    /// Builds a client from validated configuration.
    ///
    /// Derives the signing identity from the private key and configures
    /// the HTTP timeout. No network call is made here.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConfigurationMissing`] if the signing key is
    /// unusable and [`StoreError::Unavailable`] if the HTTP client cannot
    /// be built.
    pub fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let key_bytes = hex::decode(&config.private_key).map_err(|e| {
            StoreError::configuration_missing(format!("PREDMARKET_PRIVATE_KEY: {e}"))
        })?;
        let wallet = LocalWallet::from_bytes(&key_bytes).map_err(|e| {
            StoreError::configuration_missing(format!("PREDMARKET_PRIVATE_KEY: {e}"))
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| StoreError::unavailable(format!("http client: {e}")))?;

        Ok(Self {
            http,
            rpc_url: config.rpc_url.clone(),
            chain_id: config.chain_id,
            signer: format!("{:#x}", wallet.address()),
            next_id: AtomicU64::new(1),
        })
    }

    /// Returns the signing identity address this session writes as.
    #[must_use]
    pub fn signer(&self) -> &str {
        &self.signer
    }

    async fn call<P, R>(
        &self,
        method: &str,
        params: P,
        reject: fn(String) -> StoreError,
    ) -> StoreResult<Option<R>>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self
            .http
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| StoreError::unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(StoreError::unavailable(format!("http {status}")));
        }
        if !status.is_success() {
            return Err(reject(format!("http {status}")));
        }

        let body: RpcResponse<R> = response
            .json()
            .await
            .map_err(|e| reject(format!("invalid response: {e}")))?;

        if let Some(err) = body.error {
            return Err(reject(format!("rpc error {}: {}", err.code, err.message)));
        }
        Ok(body.result)
    }
}

#[async_trait]
impl EntityStore for RpcEntityStore {
    async fn create_entities(&self, entities: Vec<Entity>) -> StoreResult<Vec<Receipt>> {
        let params = CreateParams {
            chain_id: self.chain_id,
            signer: &self.signer,
            entities,
        };

        let receipts: Vec<Receipt> = self
            .call(METHOD_CREATE, params, StoreError::write_rejected)
            .await?
            .ok_or_else(|| StoreError::write_rejected("no receipts in response"))?;
        Ok(receipts)
    }

    async fn query_entities(&self, filter: &Filter) -> StoreResult<Vec<StoredEntity>> {
        let rendered = filter.render();
        tracing::debug!(filter = %rendered, "querying entity store");

        let params = QueryParams {
            chain_id: self.chain_id,
            filter: rendered,
        };

        // A null result means nothing matched, not an error.
        let entities = self
            .call(METHOD_QUERY, params, StoreError::query_rejected)
            .await?
            .unwrap_or_default();
        Ok(entities)
    }
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<R> {
    result: Option<R>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateParams<'a> {
    chain_id: u64,
    signer: &'a str,
    entities: Vec<Entity>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryParams {
    chain_id: u64,
    filter: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::RecordKind;
    use crate::infrastructure::store::entity::TagSet;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(url: &str) -> StoreConfig {
        StoreConfig {
            rpc_url: url.to_string(),
            chain_id: 60_138_453_033,
            private_key: "ab".repeat(32),
            database_key: None,
            request_timeout_ms: 2_000,
        }
    }

    fn sample_entity() -> Entity {
        let mut tags = TagSet::new();
        tags.push_str("type", "event");
        Entity::new(b"{}".to_vec(), 300, tags)
    }

    #[test]
    fn connect_derives_signer_address() {
        let store = RpcEntityStore::connect(&config("http://localhost:1")).unwrap();
        assert!(store.signer().starts_with("0x"));
        assert_eq!(store.signer().len(), 42);
    }

    #[test]
    fn connect_rejects_bad_key() {
        let mut cfg = config("http://localhost:1");
        cfg.private_key = "zz".repeat(32);
        let err = RpcEntityStore::connect(&cfg).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn debug_redacts_nothing_sensitive() {
        let store = RpcEntityStore::connect(&config("http://localhost:1")).unwrap();
        let debug = format!("{store:?}");
        assert!(!debug.contains("abab"));
    }

    #[tokio::test]
    async fn create_returns_receipts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(json!({"method": METHOD_CREATE})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": [{"entityKey": "0xdeadbeef"}]
            })))
            .mount(&server)
            .await;

        let store = RpcEntityStore::connect(&config(&server.uri())).unwrap();
        let receipts = store.create_entities(vec![sample_entity()]).await.unwrap();
        assert_eq!(receipts.len(), 1);
        assert_eq!(receipts.first().unwrap().entity_key.as_str(), "0xdeadbeef");
    }

    #[tokio::test]
    async fn rpc_error_maps_to_write_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": -32000, "message": "insufficient funds"}
            })))
            .mount(&server)
            .await;

        let store = RpcEntityStore::connect(&config(&server.uri())).unwrap();
        let err = store
            .create_entities(vec![sample_entity()])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::WriteRejected(_)));
        assert!(err.to_string().contains("insufficient funds"));
    }

    #[tokio::test]
    async fn server_error_maps_to_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let store = RpcEntityStore::connect(&config(&server.uri())).unwrap();
        let err = store
            .query_entities(&Filter::kind(RecordKind::Market))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn null_query_result_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"method": METHOD_QUERY})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": null
            })))
            .mount(&server)
            .await;

        let store = RpcEntityStore::connect(&config(&server.uri())).unwrap();
        let entities = store
            .query_entities(&Filter::kind(RecordKind::Market))
            .await
            .unwrap();
        assert!(entities.is_empty());
    }

    #[tokio::test]
    async fn bad_filter_maps_to_query_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let store = RpcEntityStore::connect(&config(&server.uri())).unwrap();
        let err = store
            .query_entities(&Filter::kind(RecordKind::Event))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::QueryRejected(_)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_unavailable() {
        // Nothing listens on this port.
        let store = RpcEntityStore::connect(&config("http://127.0.0.1:1")).unwrap();
        let err = store
            .query_entities(&Filter::kind(RecordKind::Market))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
