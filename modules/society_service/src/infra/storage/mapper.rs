//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{
    directory_society, directory_tenant, document, maintenance_request, notice, payment,
    profile, property, society, utility_worker,
};
use crate::contract::{
    Credential, DirectorySociety, DirectoryTenant, Document, MaintenanceRequest, Notice, Payment,
    PaymentStatus, Priority, Profile, Property, RequestStatus, Role, Society, UtilityWorker,
    WorkerCategory,
};
use anyhow::anyhow;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};

// ===== Profile Conversions =====

impl TryFrom<profile::Model> for Profile {
    type Error = anyhow::Error;

    fn try_from(entity: profile::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            email: entity.email,
            first_name: entity.first_name,
            last_name: entity.last_name,
            role: parse_column("profiles.role", &entity.role, Role::parse)?,
            society_id: entity.society_id,
            phone: entity.phone,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

impl From<&profile::Model> for Credential {
    fn from(entity: &profile::Model) -> Self {
        Self {
            profile_id: entity.id,
            password_hash: entity.password_hash.clone(),
        }
    }
}

/// Active model for inserting a profile together with its credential
pub fn new_profile(model: &Profile, credential: &Credential) -> profile::ActiveModel {
    profile::ActiveModel {
        id: Set(model.id),
        email: Set(model.email.clone()),
        first_name: Set(model.first_name.clone()),
        last_name: Set(model.last_name.clone()),
        role: Set(model.role.as_str().to_string()),
        society_id: Set(model.society_id),
        phone: Set(model.phone.clone()),
        password_hash: Set(credential.password_hash.clone()),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    }
}

/// Active model updating the editable profile columns, leaving the credential untouched
pub fn profile_changes(model: &Profile) -> profile::ActiveModel {
    profile::ActiveModel {
        id: Unchanged(model.id),
        email: NotSet,
        first_name: Set(model.first_name.clone()),
        last_name: Set(model.last_name.clone()),
        role: NotSet,
        society_id: Set(model.society_id),
        phone: Set(model.phone.clone()),
        password_hash: NotSet,
        created_at: NotSet,
        updated_at: Set(model.updated_at),
    }
}

// ===== Society Conversions =====

impl TryFrom<society::Model> for Society {
    type Error = anyhow::Error;

    fn try_from(entity: society::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            name: entity.name,
            address: entity.address,
            city: entity.city,
            state: entity.state,
            pincode: entity.pincode,
            total_units: u32::try_from(entity.total_units).map_err(|_| {
                anyhow::anyhow!(
                    "societies.total_units out of range: {}",
                    entity.total_units
                )
            })?,
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

impl From<&Society> for society::ActiveModel {
    fn from(model: &Society) -> Self {
        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            address: Set(model.address.clone()),
            city: Set(model.city.clone()),
            state: Set(model.state.clone()),
            pincode: Set(model.pincode.clone()),
            total_units: Set(i64::from(model.total_units)),
            created_by: Set(model.created_by),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

// ===== Worker Conversions =====

impl TryFrom<utility_worker::Model> for UtilityWorker {
    type Error = anyhow::Error;

    fn try_from(entity: utility_worker::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            society_id: entity.society_id,
            name: entity.name,
            phone: entity.phone,
            category: parse_column(
                "utility_workers.category",
                &entity.category,
                WorkerCategory::parse,
            )?,
            created_at: entity.created_at,
        })
    }
}

impl From<&UtilityWorker> for utility_worker::ActiveModel {
    fn from(model: &UtilityWorker) -> Self {
        Self {
            id: Set(model.id),
            society_id: Set(model.society_id),
            name: Set(model.name.clone()),
            phone: Set(model.phone.clone()),
            category: Set(model.category.as_str().to_string()),
            created_at: Set(model.created_at),
        }
    }
}

// ===== Property Conversions =====

impl From<property::Model> for Property {
    fn from(entity: property::Model) -> Self {
        Self {
            id: entity.id,
            society_id: entity.society_id,
            unit_number: entity.unit_number,
            block: entity.block,
            floor: entity.floor,
            monthly_rent_cents: entity.monthly_rent_cents,
            tenant_id: entity.tenant_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&Property> for property::ActiveModel {
    fn from(model: &Property) -> Self {
        Self {
            id: Set(model.id),
            society_id: Set(model.society_id),
            unit_number: Set(model.unit_number.clone()),
            block: Set(model.block.clone()),
            floor: Set(model.floor),
            monthly_rent_cents: Set(model.monthly_rent_cents),
            tenant_id: Set(model.tenant_id),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

// ===== Maintenance Request Conversions =====

impl TryFrom<maintenance_request::Model> for MaintenanceRequest {
    type Error = anyhow::Error;

    fn try_from(entity: maintenance_request::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            society_id: entity.society_id,
            tenant_id: entity.tenant_id,
            property_id: entity.property_id,
            title: entity.title,
            description: entity.description,
            category: parse_column(
                "maintenance_requests.category",
                &entity.category,
                WorkerCategory::parse,
            )?,
            priority: parse_column(
                "maintenance_requests.priority",
                &entity.priority,
                Priority::parse,
            )?,
            status: parse_column(
                "maintenance_requests.status",
                &entity.status,
                RequestStatus::parse,
            )?,
            assigned_worker_id: entity.assigned_worker_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            resolved_at: entity.resolved_at,
        })
    }
}

impl From<&MaintenanceRequest> for maintenance_request::ActiveModel {
    fn from(model: &MaintenanceRequest) -> Self {
        Self {
            id: Set(model.id),
            society_id: Set(model.society_id),
            tenant_id: Set(model.tenant_id),
            property_id: Set(model.property_id),
            title: Set(model.title.clone()),
            description: Set(model.description.clone()),
            category: Set(model.category.as_str().to_string()),
            priority: Set(model.priority.as_str().to_string()),
            status: Set(model.status.as_str().to_string()),
            assigned_worker_id: Set(model.assigned_worker_id),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
            resolved_at: Set(model.resolved_at),
        }
    }
}

// ===== Notice Conversions =====

impl From<notice::Model> for Notice {
    fn from(entity: notice::Model) -> Self {
        Self {
            id: entity.id,
            society_id: entity.society_id,
            author_id: entity.author_id,
            title: entity.title,
            content: entity.content,
            created_at: entity.created_at,
            expires_at: entity.expires_at,
        }
    }
}

impl From<&Notice> for notice::ActiveModel {
    fn from(model: &Notice) -> Self {
        Self {
            id: Set(model.id),
            society_id: Set(model.society_id),
            author_id: Set(model.author_id),
            title: Set(model.title.clone()),
            content: Set(model.content.clone()),
            created_at: Set(model.created_at),
            expires_at: Set(model.expires_at),
        }
    }
}

// ===== Payment Conversions =====

impl TryFrom<payment::Model> for Payment {
    type Error = anyhow::Error;

    fn try_from(entity: payment::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            society_id: entity.society_id,
            tenant_id: entity.tenant_id,
            property_id: entity.property_id,
            amount_cents: entity.amount_cents,
            description: entity.description,
            status: parse_column("payments.status", &entity.status, PaymentStatus::parse)?,
            due_date: entity.due_date,
            paid_at: entity.paid_at,
            created_at: entity.created_at,
        })
    }
}

impl From<&Payment> for payment::ActiveModel {
    fn from(model: &Payment) -> Self {
        // Overdue is derived at read time and never stored
        let status = match model.status {
            PaymentStatus::Overdue => PaymentStatus::Pending,
            status => status,
        };
        Self {
            id: Set(model.id),
            society_id: Set(model.society_id),
            tenant_id: Set(model.tenant_id),
            property_id: Set(model.property_id),
            amount_cents: Set(model.amount_cents),
            description: Set(model.description.clone()),
            status: Set(status.as_str().to_string()),
            due_date: Set(model.due_date),
            paid_at: Set(model.paid_at),
            created_at: Set(model.created_at),
        }
    }
}

// ===== Document Conversions =====

impl From<document::Model> for Document {
    fn from(entity: document::Model) -> Self {
        Self {
            id: entity.id,
            society_id: entity.society_id,
            uploaded_by: entity.uploaded_by,
            file_name: entity.file_name,
            content_type: entity.content_type,
            size_bytes: entity.size_bytes,
            sha256: entity.sha256,
            storage_key: entity.storage_key,
            created_at: entity.created_at,
        }
    }
}

impl From<&Document> for document::ActiveModel {
    fn from(model: &Document) -> Self {
        Self {
            id: Set(model.id),
            society_id: Set(model.society_id),
            uploaded_by: Set(model.uploaded_by),
            file_name: Set(model.file_name.clone()),
            content_type: Set(model.content_type.clone()),
            size_bytes: Set(model.size_bytes),
            sha256: Set(model.sha256.clone()),
            storage_key: Set(model.storage_key.clone()),
            created_at: Set(model.created_at),
        }
    }
}

// ===== Directory Conversions =====

impl From<directory_society::Model> for DirectorySociety {
    fn from(entity: directory_society::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            location: entity.location,
            created_by: entity.created_by,
            created_at: entity.created_at,
        }
    }
}

impl From<&DirectorySociety> for directory_society::ActiveModel {
    fn from(model: &DirectorySociety) -> Self {
        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            location: Set(model.location.clone()),
            created_by: Set(model.created_by.clone()),
            created_at: Set(model.created_at),
        }
    }
}

impl From<directory_tenant::Model> for DirectoryTenant {
    fn from(entity: directory_tenant::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            created_at: entity.created_at,
        }
    }
}

impl From<&DirectoryTenant> for directory_tenant::ActiveModel {
    fn from(model: &DirectoryTenant) -> Self {
        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            email: Set(model.email.clone()),
            created_at: Set(model.created_at),
        }
    }
}

// ===== Helpers =====

fn parse_column<T>(column: &str, value: &str, parse: fn(&str) -> Option<T>) -> anyhow::Result<T> {
    parse(value).ok_or_else(|| anyhow!("unexpected value '{}' in column {}", value, column))
}
