//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    AuthContext, MaintenanceFilter, MaintenanceRequest, MaintenanceRequestPatch,
    MaintenanceRequestView, NewMaintenanceRequest, NewNotice, NewSociety, Notice, Society,
    SocietyApi, SocietyError, SocietyProvisioning,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Native client implementation that directly calls the domain service
///
/// Used by code running in the same process, without HTTP or token handling.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl SocietyApi for NativeClient {
    async fn provision_society(
        &self,
        auth: &AuthContext,
        form: NewSociety,
    ) -> Result<SocietyProvisioning, SocietyError> {
        self.service.provision_society(auth, form).await
    }

    async fn get_society(
        &self,
        auth: &AuthContext,
        society_id: Uuid,
    ) -> Result<Society, SocietyError> {
        self.service.get_society(auth, society_id).await
    }

    async fn create_maintenance_request(
        &self,
        auth: &AuthContext,
        form: NewMaintenanceRequest,
    ) -> Result<MaintenanceRequest, SocietyError> {
        self.service.create_maintenance_request(auth, form).await
    }

    async fn update_maintenance_request(
        &self,
        auth: &AuthContext,
        request_id: Uuid,
        patch: MaintenanceRequestPatch,
    ) -> Result<MaintenanceRequest, SocietyError> {
        self.service
            .update_maintenance_request(auth, request_id, patch)
            .await
    }

    async fn list_maintenance_requests(
        &self,
        auth: &AuthContext,
        society_id: Option<Uuid>,
        filter: MaintenanceFilter,
    ) -> Result<Vec<MaintenanceRequestView>, SocietyError> {
        self.service
            .list_maintenance_requests(auth, society_id, filter)
            .await
    }

    async fn publish_notice(
        &self,
        auth: &AuthContext,
        society_id: Option<Uuid>,
        form: NewNotice,
    ) -> Result<Notice, SocietyError> {
        self.service.publish_notice(auth, society_id, form).await
    }

    async fn list_notices(
        &self,
        auth: &AuthContext,
        society_id: Option<Uuid>,
    ) -> Result<Vec<Notice>, SocietyError> {
        self.service.list_notices(auth, society_id).await
    }
}
