//! Mapper implementations for converting between DTOs and contract models
//!
//! This module contains all From/Into implementations for bidirectional
//! conversion between REST DTOs and transport-agnostic contract models.

use super::dto::*;
use crate::contract;

// ===== Enum conversions =====

impl From<contract::Role> for RoleDto {
    fn from(role: contract::Role) -> Self {
        match role {
            contract::Role::Admin => Self::Admin,
            contract::Role::Tenant => Self::Tenant,
        }
    }
}

impl From<RoleDto> for contract::Role {
    fn from(role: RoleDto) -> Self {
        match role {
            RoleDto::Admin => Self::Admin,
            RoleDto::Tenant => Self::Tenant,
        }
    }
}

impl From<contract::WorkerCategory> for WorkerCategoryDto {
    fn from(category: contract::WorkerCategory) -> Self {
        use contract::WorkerCategory as C;
        match category {
            C::Plumber => Self::Plumber,
            C::Electrician => Self::Electrician,
            C::Carpenter => Self::Carpenter,
            C::Cleaner => Self::Cleaner,
            C::Security => Self::Security,
            C::Gardener => Self::Gardener,
            C::Other => Self::Other,
        }
    }
}

impl From<WorkerCategoryDto> for contract::WorkerCategory {
    fn from(category: WorkerCategoryDto) -> Self {
        use WorkerCategoryDto as C;
        match category {
            C::Plumber => Self::Plumber,
            C::Electrician => Self::Electrician,
            C::Carpenter => Self::Carpenter,
            C::Cleaner => Self::Cleaner,
            C::Security => Self::Security,
            C::Gardener => Self::Gardener,
            C::Other => Self::Other,
        }
    }
}

impl From<contract::RequestStatus> for RequestStatusDto {
    fn from(status: contract::RequestStatus) -> Self {
        use contract::RequestStatus as S;
        match status {
            S::Pending => Self::Pending,
            S::InProgress => Self::InProgress,
            S::Resolved => Self::Resolved,
            S::Cancelled => Self::Cancelled,
        }
    }
}

impl From<RequestStatusDto> for contract::RequestStatus {
    fn from(status: RequestStatusDto) -> Self {
        use RequestStatusDto as S;
        match status {
            S::Pending => Self::Pending,
            S::InProgress => Self::InProgress,
            S::Resolved => Self::Resolved,
            S::Cancelled => Self::Cancelled,
        }
    }
}

impl From<contract::Priority> for PriorityDto {
    fn from(priority: contract::Priority) -> Self {
        use contract::Priority as P;
        match priority {
            P::Low => Self::Low,
            P::Medium => Self::Medium,
            P::High => Self::High,
            P::Urgent => Self::Urgent,
        }
    }
}

impl From<PriorityDto> for contract::Priority {
    fn from(priority: PriorityDto) -> Self {
        use PriorityDto as P;
        match priority {
            P::Low => Self::Low,
            P::Medium => Self::Medium,
            P::High => Self::High,
            P::Urgent => Self::Urgent,
        }
    }
}

impl From<contract::PaymentStatus> for PaymentStatusDto {
    fn from(status: contract::PaymentStatus) -> Self {
        use contract::PaymentStatus as S;
        match status {
            S::Pending => Self::Pending,
            S::Paid => Self::Paid,
            S::Overdue => Self::Overdue,
        }
    }
}

// ===== Session / profile conversions =====

impl From<contract::Profile> for ProfileDto {
    fn from(profile: contract::Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            role: profile.role.into(),
            society_id: profile.society_id,
            phone: profile.phone,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

impl From<contract::Session> for SessionDto {
    fn from(session: contract::Session) -> Self {
        Self {
            token: session.token,
            expires_at: session.expires_at,
            profile: session.profile.into(),
            redirect_to: session.redirect_to,
        }
    }
}

impl From<SignUpRequest> for contract::SignUp {
    fn from(req: SignUpRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            role: req.role.into(),
            phone: req.phone,
        }
    }
}

impl From<UpdateProfileRequest> for contract::ProfilePatch {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone,
        }
    }
}

// ===== Society conversions =====

impl From<contract::Society> for SocietyDto {
    fn from(society: contract::Society) -> Self {
        Self {
            id: society.id,
            name: society.name,
            address: society.address,
            city: society.city,
            state: society.state,
            pincode: society.pincode,
            total_units: society.total_units,
            created_by: society.created_by,
            created_at: society.created_at,
            updated_at: society.updated_at,
        }
    }
}

impl From<CreateSocietyRequest> for contract::NewSociety {
    fn from(req: CreateSocietyRequest) -> Self {
        Self {
            name: req.name,
            address: req.address,
            city: req.city,
            state: req.state,
            pincode: req.pincode,
            total_units: req.total_units,
            workers: req.workers.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<UpdateSocietyRequest> for contract::SocietyPatch {
    fn from(req: UpdateSocietyRequest) -> Self {
        Self {
            name: req.name,
            address: req.address,
            city: req.city,
            state: req.state,
            pincode: req.pincode,
            total_units: req.total_units,
        }
    }
}

impl From<contract::UtilityWorker> for WorkerDto {
    fn from(worker: contract::UtilityWorker) -> Self {
        Self {
            id: worker.id,
            society_id: worker.society_id,
            name: worker.name,
            phone: worker.phone,
            category: worker.category.into(),
            created_at: worker.created_at,
        }
    }
}

impl From<CreateWorkerRequest> for contract::NewWorker {
    fn from(req: CreateWorkerRequest) -> Self {
        Self {
            name: req.name,
            phone: req.phone,
            category: req.category.into(),
        }
    }
}

impl From<contract::SocietyProvisioning> for SocietyProvisioningDto {
    fn from(provisioning: contract::SocietyProvisioning) -> Self {
        Self {
            society: provisioning.society.into(),
            workers: provisioning.workers.into_iter().map(Into::into).collect(),
            failed_workers: provisioning
                .failed_workers
                .into_iter()
                .map(|f| WorkerFailureDto {
                    name: f.name,
                    reason: f.reason,
                })
                .collect(),
            profile_linked: provisioning.profile_linked,
        }
    }
}

impl From<contract::SocietyOverview> for SocietyOverviewDto {
    fn from(overview: contract::SocietyOverview) -> Self {
        Self {
            society_id: overview.society_id,
            tenants: overview.tenants,
            properties: overview.properties,
            occupied_properties: overview.occupied_properties,
            open_requests: overview.open_requests,
            resolved_requests: overview.resolved_requests,
            pending_payments_cents: overview.pending_payments_cents,
            collected_payments_cents: overview.collected_payments_cents,
        }
    }
}

// ===== Property conversions =====

impl From<contract::Property> for PropertyDto {
    fn from(property: contract::Property) -> Self {
        Self {
            id: property.id,
            society_id: property.society_id,
            unit_number: property.unit_number,
            block: property.block,
            floor: property.floor,
            monthly_rent_cents: property.monthly_rent_cents,
            tenant_id: property.tenant_id,
            created_at: property.created_at,
            updated_at: property.updated_at,
        }
    }
}

impl From<CreatePropertyRequest> for contract::NewProperty {
    fn from(req: CreatePropertyRequest) -> Self {
        Self {
            unit_number: req.unit_number,
            block: req.block,
            floor: req.floor,
            monthly_rent_cents: req.monthly_rent_cents,
        }
    }
}

// ===== Maintenance conversions =====

impl From<contract::MaintenanceRequest> for MaintenanceRequestDto {
    fn from(request: contract::MaintenanceRequest) -> Self {
        Self {
            id: request.id,
            society_id: request.society_id,
            tenant_id: request.tenant_id,
            tenant_name: None,
            property_id: request.property_id,
            title: request.title,
            description: request.description,
            category: request.category.into(),
            priority: request.priority.into(),
            status: request.status.into(),
            assigned_worker_id: request.assigned_worker_id,
            created_at: request.created_at,
            updated_at: request.updated_at,
            resolved_at: request.resolved_at,
        }
    }
}

impl From<contract::MaintenanceRequestView> for MaintenanceRequestDto {
    fn from(view: contract::MaintenanceRequestView) -> Self {
        let mut dto = Self::from(view.request);
        dto.tenant_name = Some(view.tenant_name);
        dto
    }
}

impl From<CreateMaintenanceRequest> for contract::NewMaintenanceRequest {
    fn from(req: CreateMaintenanceRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            category: req.category.into(),
            priority: req.priority.into(),
            property_id: req.property_id,
        }
    }
}

impl From<UpdateMaintenanceRequest> for contract::MaintenanceRequestPatch {
    fn from(req: UpdateMaintenanceRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            priority: req.priority.map(Into::into),
            status: req.status.map(Into::into),
            assigned_worker_id: req.assigned_worker_id,
        }
    }
}

// ===== Notice conversions =====

impl From<contract::Notice> for NoticeDto {
    fn from(notice: contract::Notice) -> Self {
        Self {
            id: notice.id,
            society_id: notice.society_id,
            author_id: notice.author_id,
            title: notice.title,
            content: notice.content,
            created_at: notice.created_at,
            expires_at: notice.expires_at,
        }
    }
}

impl From<CreateNoticeRequest> for contract::NewNotice {
    fn from(req: CreateNoticeRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            expires_at: req.expires_at,
        }
    }
}

// ===== Payment conversions =====

impl From<contract::Payment> for PaymentDto {
    fn from(payment: contract::Payment) -> Self {
        Self {
            id: payment.id,
            society_id: payment.society_id,
            tenant_id: payment.tenant_id,
            property_id: payment.property_id,
            amount_cents: payment.amount_cents,
            description: payment.description,
            status: payment.status.into(),
            due_date: payment.due_date,
            paid_at: payment.paid_at,
            created_at: payment.created_at,
        }
    }
}

impl From<CreatePaymentRequest> for contract::NewPayment {
    fn from(req: CreatePaymentRequest) -> Self {
        Self {
            tenant_id: req.tenant_id,
            property_id: req.property_id,
            amount_cents: req.amount_cents,
            description: req.description,
            due_date: req.due_date,
        }
    }
}

// ===== Document conversions =====

impl From<contract::Document> for DocumentDto {
    fn from(document: contract::Document) -> Self {
        Self {
            id: document.id,
            society_id: document.society_id,
            uploaded_by: document.uploaded_by,
            file_name: document.file_name,
            content_type: document.content_type,
            size_bytes: document.size_bytes,
            sha256: document.sha256,
            created_at: document.created_at,
        }
    }
}

// ===== Directory conversions =====

impl From<contract::DirectorySociety> for DirectorySocietyDto {
    fn from(society: contract::DirectorySociety) -> Self {
        Self {
            id: society.id,
            name: society.name,
            location: society.location,
            created_by: society.created_by,
            created_at: society.created_at,
        }
    }
}

impl From<contract::DirectoryTenant> for DirectoryTenantDto {
    fn from(tenant: contract::DirectoryTenant) -> Self {
        Self {
            id: tenant.id,
            name: tenant.name,
            email: tenant.email,
            created_at: tenant.created_at,
        }
    }
}
