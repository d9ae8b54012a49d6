//! Native client trait for inter-module communication
//!
//! This trait defines the API that other modules use to interact with society service.
//! NO HTTP - direct function calls.

use super::{
    error::SocietyError,
    model::{
        AuthContext, MaintenanceFilter, MaintenanceRequest, MaintenanceRequestPatch,
        MaintenanceRequestView, NewMaintenanceRequest, NewNotice, NewSociety, Notice, Society,
        SocietyProvisioning,
    },
};
use async_trait::async_trait;
use uuid::Uuid;

/// Society service API for inter-module communication
#[async_trait]
pub trait SocietyApi: Send + Sync {
    // ===== Society Operations =====

    /// Create a society, attach its workers and link it to the caller's profile
    async fn provision_society(
        &self,
        auth: &AuthContext,
        form: NewSociety,
    ) -> Result<SocietyProvisioning, SocietyError>;

    /// Get a society visible to the caller
    async fn get_society(&self, auth: &AuthContext, society_id: Uuid)
        -> Result<Society, SocietyError>;

    // ===== Maintenance Operations =====

    /// File a maintenance request as a tenant
    async fn create_maintenance_request(
        &self,
        auth: &AuthContext,
        form: NewMaintenanceRequest,
    ) -> Result<MaintenanceRequest, SocietyError>;

    /// Apply changed fields to a maintenance request
    async fn update_maintenance_request(
        &self,
        auth: &AuthContext,
        request_id: Uuid,
        patch: MaintenanceRequestPatch,
    ) -> Result<MaintenanceRequest, SocietyError>;

    /// List maintenance requests joined with tenant names
    async fn list_maintenance_requests(
        &self,
        auth: &AuthContext,
        society_id: Option<Uuid>,
        filter: MaintenanceFilter,
    ) -> Result<Vec<MaintenanceRequestView>, SocietyError>;

    // ===== Notice Operations =====

    /// Publish a notice to a society
    async fn publish_notice(
        &self,
        auth: &AuthContext,
        society_id: Option<Uuid>,
        form: NewNotice,
    ) -> Result<Notice, SocietyError>;

    /// List active notices of a society
    async fn list_notices(
        &self,
        auth: &AuthContext,
        society_id: Option<Uuid>,
    ) -> Result<Vec<Notice>, SocietyError>;
}
