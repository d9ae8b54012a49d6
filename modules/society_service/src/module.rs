//! Module declaration and lifecycle
//!
//! The hosting binary drives the lifecycle: `migrate`, then `init`, then
//! `register_rest`. Tests call `init_with_repositories` with in-memory stores.

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::SocietyApi;
use crate::domain::{BlobStore, EventPublisher, Repositories, Service, TokenIssuer};
use crate::infra::storage::{migrations::Migrator, sea_orm_repositories};
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Society service module
pub struct SocietyServiceModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for SocietyServiceModule {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl SocietyServiceModule {
    pub fn new(config: Config) -> Self {
        Self {
            config: RwLock::new(config),
            service: RwLock::new(None),
        }
    }

    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    /// Run database migrations
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None).await?;
        tracing::info!("Society service migrations completed");
        Ok(())
    }

    /// Build the domain service over a database connection and a blob store
    pub fn init(
        &self,
        db: Arc<DatabaseConnection>,
        blobs: Arc<dyn BlobStore>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Result<Arc<Service>> {
        self.init_with_repositories(sea_orm_repositories(db, blobs), event_publisher)
    }

    /// Build the domain service over an explicit set of repositories
    pub fn init_with_repositories(
        &self,
        repos: Repositories,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Result<Arc<Service>> {
        let config = self.config();
        config.validate()?;

        let ttl = i64::try_from(config.auth.token_ttl_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "token_ttl_secs {} is out of range",
                    config.auth.token_ttl_secs
                )
            })?;
        let tokens = TokenIssuer::new(&config.auth.jwt_secret, config.auth.issuer.clone(), ttl);

        let service = Arc::new(Service::new(repos, event_publisher, tokens, config));
        *self.service.write() = Some(service.clone());

        tracing::info!("Society service initialized");
        Ok(service)
    }

    /// The initialized domain service
    pub fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// In-process client for other modules
    pub fn client(&self) -> Result<Arc<dyn SocietyApi>> {
        Ok(Arc::new(NativeClient::new(self.service()?)))
    }

    /// Mount the REST routes onto a router
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;

        tracing::info!("Registering society service REST routes");
        Ok(router.merge(crate::api::rest::router(service)))
    }
}
