//! # Shared Store Session
//!
//! Once-initialized shared session for the remote entity store.
//!
//! [`SharedStore`] replaces a bare module-level singleton with an
//! explicitly passed handle guarded by a single-initialization primitive.
//! Concurrent first callers await the same initialization; the first one
//! wins and no duplicate session is ever created. Missing configuration
//! is surfaced to every caller until it is fixed, without poisoning the
//! cell - a later call after the environment is corrected will initialize
//! normally.

use crate::config::{ConfigError, StoreConfig};
use crate::infrastructure::store::client::EntityStore;
use crate::infrastructure::store::error::{StoreError, StoreResult};
use crate::infrastructure::store::rpc::RpcEntityStore;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Where the session comes from when the cell is still empty.
#[derive(Debug, Clone)]
enum SessionSource {
    /// Connect lazily from (possibly failed-to-load) configuration.
    Config(Result<StoreConfig, ConfigError>),
    /// The cell was populated at construction; nothing to initialize.
    Preconnected,
}

/// Handle to the lazily initialized store session.
///
/// Cheap to clone; all clones share the same underlying cell.
#[derive(Debug, Clone)]
pub struct SharedStore {
    cell: Arc<OnceCell<Arc<dyn EntityStore>>>,
    source: SessionSource,
}

impl SharedStore {
    /// Creates a handle from already-loaded configuration.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self {
            cell: Arc::new(OnceCell::new()),
            source: SessionSource::Config(Ok(config)),
        }
    }

    /// Creates a handle that loads configuration from the environment.
    ///
    /// Configuration errors are deferred to [`SharedStore::get`] so that
    /// every caller observes the same failure.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            cell: Arc::new(OnceCell::new()),
            source: SessionSource::Config(StoreConfig::from_env()),
        }
    }

    /// Returns the configured deployment scope, if any.
    ///
    /// Preconnected handles carry no configuration and report `None`.
    #[must_use]
    pub fn database_key(&self) -> Option<&str> {
        match &self.source {
            SessionSource::Config(Ok(config)) => config.database_key.as_deref(),
            _ => None,
        }
    }

    /// Wraps an already-connected store, bypassing lazy initialization.
    #[must_use]
    pub fn preconnected(store: Arc<dyn EntityStore>) -> Self {
        Self {
            cell: Arc::new(OnceCell::new_with(Some(store))),
            source: SessionSource::Preconnected,
        }
    }

    /// Returns the shared session, initializing it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConfigurationMissing`] when required
    /// configuration is absent and [`StoreError::Unavailable`] when the
    /// session cannot be established.
    pub async fn get(&self) -> StoreResult<Arc<dyn EntityStore>> {
        if let Some(store) = self.cell.get() {
            return Ok(Arc::clone(store));
        }

        let config = match &self.source {
            // Preconnected handles are born with a populated cell.
            SessionSource::Preconnected => {
                return Err(StoreError::unavailable("preconnected session lost"));
            }
            SessionSource::Config(result) => result
                .as_ref()
                .map_err(|e| StoreError::configuration_missing(e.to_string()))?,
        };

        let store = self
            .cell
            .get_or_try_init(|| async {
                let session = RpcEntityStore::connect(config)?;
                tracing::info!(
                    chain_id = config.chain_id,
                    signer = session.signer(),
                    "entity store session established"
                );
                Ok::<_, StoreError>(Arc::new(session) as Arc<dyn EntityStore>)
            })
            .await?;

        Ok(Arc::clone(store))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_config() -> StoreConfig {
        StoreConfig {
            rpc_url: "http://127.0.0.1:9".into(),
            chain_id: 1,
            private_key: "cd".repeat(32),
            database_key: None,
            request_timeout_ms: 500,
        }
    }

    #[tokio::test]
    async fn concurrent_first_callers_share_one_session() {
        let shared = SharedStore::new(valid_config());

        let (a, b) = tokio::join!(shared.get(), shared.get());
        let a = a.unwrap();
        let b = b.unwrap();

        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn clones_share_the_same_cell() {
        let shared = SharedStore::new(valid_config());
        let other = shared.clone();

        let a = shared.get().await.unwrap();
        let b = other.get().await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn missing_configuration_surfaces_to_every_caller() {
        let shared = SharedStore {
            cell: Arc::new(OnceCell::new()),
            source: SessionSource::Config(Err(ConfigError::Missing("PREDMARKET_RPC_URL"))),
        };

        let first = shared.get().await.unwrap_err();
        let second = shared.get().await.unwrap_err();
        assert!(first.is_configuration());
        assert!(second.is_configuration());
    }

    #[tokio::test]
    async fn preconnected_handle_skips_configuration() {
        let store: Arc<dyn EntityStore> =
            Arc::new(crate::infrastructure::store::in_memory::InMemoryEntityStore::new());
        let shared = SharedStore::preconnected(Arc::clone(&store));

        let got = shared.get().await.unwrap();
        assert!(Arc::ptr_eq(&got, &store));
        // No configuration behind this handle, so no deployment scope.
        assert!(shared.database_key().is_none());
    }

    #[test]
    fn configured_database_key_is_exposed() {
        let mut config = valid_config();
        config.database_key = Some("0xdb".into());
        let shared = SharedStore::new(config);
        assert_eq!(shared.database_key(), Some("0xdb"));

        let unscoped = SharedStore::new(valid_config());
        assert!(unscoped.database_key().is_none());
    }

    #[tokio::test]
    async fn bad_key_fails_without_poisoning() {
        let mut config = valid_config();
        config.private_key = "00".repeat(32); // zero scalar is not a valid key
        let shared = SharedStore::new(config);

        assert!(shared.get().await.is_err());
        // The cell stays empty; a corrected handle initializes normally.
        let healthy = SharedStore::new(valid_config());
        assert!(healthy.get().await.is_ok());
    }
}
