//! Domain service - business logic orchestration
//!
//! Every operation is an independent sequence of store calls; the store is
//! the only arbiter of concurrent writes and no call spans a transaction.

mod directory;
mod documents;
mod maintenance;
mod notices;
mod payments;
mod residents;
mod societies;

use super::auth::TokenIssuer;
use super::events::{DomainEvent, EventPublisher};
use super::repository::Repositories;
use crate::config::Config;
use crate::contract::{AuthContext, Profile, Role, Society, SocietyError};
use std::sync::Arc;
use uuid::Uuid;

/// Domain service for society management
pub struct Service {
    repos: Repositories,
    event_publisher: Arc<dyn EventPublisher>,
    tokens: TokenIssuer,
    config: Config,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        repos: Repositories,
        event_publisher: Arc<dyn EventPublisher>,
        tokens: TokenIssuer,
        config: Config,
    ) -> Self {
        Self {
            repos,
            event_publisher,
            tokens,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ===== Helper Methods =====

    /// Publish an event, logging instead of failing when the publisher errors
    async fn publish(&self, event: DomainEvent) {
        let name = event.name();
        if let Err(e) = self.event_publisher.publish(event).await {
            tracing::warn!(event = name, error = %e, "failed to publish domain event");
        }
    }

    fn require_admin(&self, auth: &AuthContext) -> Result<(), SocietyError> {
        if auth.role != Role::Admin {
            return Err(SocietyError::forbidden("admin role required"));
        }
        Ok(())
    }

    fn require_tenant(&self, auth: &AuthContext) -> Result<(), SocietyError> {
        if auth.role != Role::Tenant {
            return Err(SocietyError::forbidden("tenant role required"));
        }
        Ok(())
    }

    async fn load_profile(&self, profile_id: Uuid) -> Result<Profile, SocietyError> {
        self.repos
            .profiles
            .find_by_id(profile_id)
            .await
            .map_err(|e| SocietyError::storage("load profile", e))?
            .ok_or_else(|| SocietyError::not_found("profile", profile_id))
    }

    async fn load_society(&self, society_id: Uuid) -> Result<Society, SocietyError> {
        self.repos
            .societies
            .find_by_id(society_id)
            .await
            .map_err(|e| SocietyError::storage("load society", e))?
            .ok_or_else(|| SocietyError::not_found("society", society_id))
    }

    /// Load a society the calling admin provisioned
    async fn owned_society(
        &self,
        auth: &AuthContext,
        society_id: Uuid,
    ) -> Result<Society, SocietyError> {
        self.require_admin(auth)?;
        let society = self.load_society(society_id).await?;
        if society.created_by != auth.profile_id {
            return Err(SocietyError::forbidden(format!(
                "society {} is managed by another admin",
                society_id
            )));
        }
        Ok(society)
    }

    /// Resolve the society an operation applies to
    ///
    /// Admins name the society (falling back to the one linked to their
    /// profile) and must have provisioned it. Tenants always act on the
    /// society linked to their profile.
    async fn member_society(
        &self,
        auth: &AuthContext,
        requested: Option<Uuid>,
    ) -> Result<Uuid, SocietyError> {
        match auth.role {
            Role::Admin => {
                let society_id = match requested {
                    Some(id) => id,
                    None => self
                        .load_profile(auth.profile_id)
                        .await?
                        .society_id
                        .ok_or_else(|| SocietyError::validation("society_id is required"))?,
                };
                self.owned_society(auth, society_id).await?;
                Ok(society_id)
            }
            Role::Tenant => {
                let profile = self.load_profile(auth.profile_id).await?;
                let society_id = profile
                    .society_id
                    .ok_or_else(|| SocietyError::forbidden("not a member of any society"))?;
                if requested.is_some_and(|id| id != society_id) {
                    return Err(SocietyError::forbidden(
                        "tenants can only access their own society",
                    ));
                }
                Ok(society_id)
            }
        }
    }
}
