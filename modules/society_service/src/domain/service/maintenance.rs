//! Maintenance request flow

use super::Service;
use crate::contract::{
    AuthContext, MaintenanceFilter, MaintenanceRequest, MaintenanceRequestPatch,
    MaintenanceRequestView, NewMaintenanceRequest, RequestStatus, Role, SocietyError,
    UNKNOWN_USER,
};
use crate::domain::events::DomainEvent;
use crate::domain::validation;
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

impl Service {
    /// File a maintenance request for the tenant's society
    pub async fn create_maintenance_request(
        &self,
        auth: &AuthContext,
        form: NewMaintenanceRequest,
    ) -> Result<MaintenanceRequest, SocietyError> {
        self.require_tenant(auth)?;
        validation::require_fields(&[
            ("title", form.title.as_str()),
            ("description", form.description.as_str()),
        ])?;

        let profile = self.load_profile(auth.profile_id).await?;
        let society_id = profile.society_id.ok_or_else(|| {
            SocietyError::forbidden("join a society before filing maintenance requests")
        })?;

        if let Some(property_id) = form.property_id {
            let in_society = self
                .repos
                .properties
                .find_by_id(property_id)
                .await
                .map_err(|e| SocietyError::storage("load property", e))?
                .is_some_and(|p| p.society_id == society_id);
            if !in_society {
                return Err(SocietyError::validation(format!(
                    "property {} is not part of your society",
                    property_id
                )));
            }
        }

        let now = Utc::now();
        let request = MaintenanceRequest {
            id: Uuid::new_v4(),
            society_id,
            tenant_id: auth.profile_id,
            property_id: form.property_id,
            title: form.title,
            description: form.description,
            category: form.category,
            priority: form.priority,
            status: RequestStatus::Pending,
            assigned_worker_id: None,
            created_at: now,
            updated_at: now,
            resolved_at: None,
        };

        let request = self
            .repos
            .maintenance
            .create(&request)
            .await
            .map_err(|e| SocietyError::storage("create maintenance request", e))?;

        tracing::info!(request_id = %request.id, %society_id, "maintenance request filed");
        self.publish(DomainEvent::maintenance_requested(&request)).await;
        Ok(request)
    }

    /// Get a maintenance request visible to the caller
    pub async fn get_maintenance_request(
        &self,
        auth: &AuthContext,
        request_id: Uuid,
    ) -> Result<MaintenanceRequestView, SocietyError> {
        let request = self.visible_request(auth, request_id).await?;
        let mut views = self.join_tenant_names(vec![request]).await?;
        views
            .pop()
            .ok_or_else(|| SocietyError::not_found("maintenance_request", request_id))
    }

    /// Apply the changed fields with a single update
    ///
    /// Tenants edit the text and priority of their own open requests and may
    /// cancel them. Admins triage: status, priority and worker assignment.
    pub async fn update_maintenance_request(
        &self,
        auth: &AuthContext,
        request_id: Uuid,
        patch: MaintenanceRequestPatch,
    ) -> Result<MaintenanceRequest, SocietyError> {
        if patch.is_empty() {
            return Err(SocietyError::validation("no fields to update"));
        }

        let mut request = self.visible_request(auth, request_id).await?;
        if request.status.is_terminal() {
            return Err(SocietyError::conflict(format!(
                "maintenance request {} is already {}",
                request_id,
                request.status.as_str()
            )));
        }

        match auth.role {
            Role::Tenant => {
                if patch.assigned_worker_id.is_some() {
                    return Err(SocietyError::forbidden("only admins assign workers"));
                }
                if patch
                    .status
                    .is_some_and(|status| status != RequestStatus::Cancelled)
                {
                    return Err(SocietyError::forbidden(
                        "tenants can only cancel their requests",
                    ));
                }
            }
            Role::Admin => {
                if patch.title.is_some() || patch.description.is_some() {
                    return Err(SocietyError::forbidden(
                        "the request text belongs to the tenant",
                    ));
                }
            }
        }

        if let Some(title) = &patch.title {
            validation::require_fields(&[("title", title.as_str())])?;
        }
        if let Some(description) = &patch.description {
            validation::require_fields(&[("description", description.as_str())])?;
        }

        if let Some(worker_id) = patch.assigned_worker_id {
            let same_society = self
                .repos
                .workers
                .find_by_id(worker_id)
                .await
                .map_err(|e| SocietyError::storage("load worker", e))?
                .is_some_and(|w| w.society_id == request.society_id);
            if !same_society {
                return Err(SocietyError::validation(format!(
                    "worker {} does not serve this society",
                    worker_id
                )));
            }
            request.assigned_worker_id = Some(worker_id);
            if patch.status.is_none() && request.status == RequestStatus::Pending {
                request.status = RequestStatus::InProgress;
            }
        }

        if let Some(title) = patch.title {
            request.title = title;
        }
        if let Some(description) = patch.description {
            request.description = description;
        }
        if let Some(priority) = patch.priority {
            request.priority = priority;
        }

        let now = Utc::now();
        if let Some(status) = patch.status {
            request.status = status;
            if status == RequestStatus::Resolved {
                request.resolved_at = Some(now);
            }
        }
        request.updated_at = now;

        let request = self
            .repos
            .maintenance
            .update(&request)
            .await
            .map_err(|e| SocietyError::storage("update maintenance request", e))?;

        self.publish(DomainEvent::maintenance_updated(&request, auth.profile_id))
            .await;
        Ok(request)
    }

    /// List maintenance requests joined with the tenant's name
    ///
    /// Admins see their society's requests, tenants see their own. Rows keep
    /// storage order; a missing profile row reads as "Unknown User".
    pub async fn list_maintenance_requests(
        &self,
        auth: &AuthContext,
        society_id: Option<Uuid>,
        filter: MaintenanceFilter,
    ) -> Result<Vec<MaintenanceRequestView>, SocietyError> {
        let requests = match auth.role {
            Role::Admin => {
                let society_id = self.member_society(auth, society_id).await?;
                self.repos
                    .maintenance
                    .list_by_society(society_id, filter.status)
                    .await
            }
            Role::Tenant => {
                self.repos
                    .maintenance
                    .list_by_tenant(auth.profile_id, filter.status)
                    .await
            }
        }
        .map_err(|e| SocietyError::storage("list maintenance requests", e))?;

        self.join_tenant_names(requests).await
    }

    async fn visible_request(
        &self,
        auth: &AuthContext,
        request_id: Uuid,
    ) -> Result<MaintenanceRequest, SocietyError> {
        let request = self
            .repos
            .maintenance
            .find_by_id(request_id)
            .await
            .map_err(|e| SocietyError::storage("load maintenance request", e))?
            .ok_or_else(|| SocietyError::not_found("maintenance_request", request_id))?;

        match auth.role {
            Role::Admin => {
                self.owned_society(auth, request.society_id).await?;
            }
            Role::Tenant if request.tenant_id != auth.profile_id => {
                return Err(SocietyError::not_found("maintenance_request", request_id));
            }
            Role::Tenant => {}
        }
        Ok(request)
    }

    async fn join_tenant_names(
        &self,
        requests: Vec<MaintenanceRequest>,
    ) -> Result<Vec<MaintenanceRequestView>, SocietyError> {
        let mut tenant_ids: Vec<Uuid> = requests.iter().map(|r| r.tenant_id).collect();
        tenant_ids.sort_unstable();
        tenant_ids.dedup();

        let names: HashMap<Uuid, String> = self
            .repos
            .profiles
            .find_many(&tenant_ids)
            .await
            .map_err(|e| SocietyError::storage("load tenant profiles", e))?
            .into_iter()
            .filter_map(|p| p.display_name().map(|name| (p.id, name)))
            .collect();

        Ok(requests
            .into_iter()
            .map(|request| {
                let tenant_name = names
                    .get(&request.tenant_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_USER.to_string());
                MaintenanceRequestView {
                    request,
                    tenant_name,
                }
            })
            .collect())
    }
}
