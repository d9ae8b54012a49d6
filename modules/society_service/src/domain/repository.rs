//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{
    Credential, DirectorySociety, DirectoryTenant, Document, MaintenanceRequest, Notice, Payment,
    Profile, Property, RequestStatus, Role, Society, UtilityWorker,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Repository for user profiles and their credentials
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert a profile together with its credential
    async fn create(&self, profile: &Profile, credential: &Credential) -> Result<Profile>;

    /// Find a profile by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>>;

    /// Find a profile by (lowercased) email
    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>>;

    /// Find many profiles by id; missing ids are skipped
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Profile>>;

    /// Load the credential of a profile
    async fn find_credential(&self, profile_id: Uuid) -> Result<Option<Credential>>;

    /// Profiles linked to a society, optionally restricted to a role
    async fn list_by_society(&self, society_id: Uuid, role: Option<Role>) -> Result<Vec<Profile>>;

    /// Update a profile
    async fn update(&self, profile: &Profile) -> Result<Profile>;

    /// Link a profile to a society
    async fn set_society(&self, profile_id: Uuid, society_id: Uuid) -> Result<()>;
}

/// Repository for societies
#[async_trait]
pub trait SocietyRepository: Send + Sync {
    /// Insert a society
    async fn create(&self, society: &Society) -> Result<Society>;

    /// Find a society by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Society>>;

    /// Societies provisioned by an admin
    async fn list_by_creator(&self, admin_id: Uuid) -> Result<Vec<Society>>;

    /// Update a society
    async fn update(&self, society: &Society) -> Result<Society>;
}

/// Repository for utility workers
#[async_trait]
pub trait WorkerRepository: Send + Sync {
    async fn create(&self, worker: &UtilityWorker) -> Result<UtilityWorker>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UtilityWorker>>;

    async fn list_by_society(&self, society_id: Uuid) -> Result<Vec<UtilityWorker>>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Repository for properties (units)
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn create(&self, property: &Property) -> Result<Property>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>>;

    async fn list_by_society(&self, society_id: Uuid) -> Result<Vec<Property>>;

    async fn update(&self, property: &Property) -> Result<Property>;
}

/// Repository for maintenance requests
#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    async fn create(&self, request: &MaintenanceRequest) -> Result<MaintenanceRequest>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceRequest>>;

    async fn update(&self, request: &MaintenanceRequest) -> Result<MaintenanceRequest>;

    /// Requests of a society in storage order
    async fn list_by_society(
        &self,
        society_id: Uuid,
        status: Option<RequestStatus>,
    ) -> Result<Vec<MaintenanceRequest>>;

    /// Requests filed by a tenant in storage order
    async fn list_by_tenant(
        &self,
        tenant_id: Uuid,
        status: Option<RequestStatus>,
    ) -> Result<Vec<MaintenanceRequest>>;
}

/// Repository for notices
#[async_trait]
pub trait NoticeRepository: Send + Sync {
    async fn create(&self, notice: &Notice) -> Result<Notice>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notice>>;

    async fn list_by_society(&self, society_id: Uuid) -> Result<Vec<Notice>>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Repository for payments
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: &Payment) -> Result<Payment>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>>;

    async fn update(&self, payment: &Payment) -> Result<Payment>;

    async fn list_by_society(&self, society_id: Uuid) -> Result<Vec<Payment>>;

    async fn list_by_tenant(&self, tenant_id: Uuid) -> Result<Vec<Payment>>;
}

/// Repository for document metadata
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn create(&self, document: &Document) -> Result<Document>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>>;

    async fn list_by_society(&self, society_id: Uuid) -> Result<Vec<Document>>;
}

/// Repository for the directory records behind `/api/admin` and `/api/tenants`
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    async fn create_society(&self, society: &DirectorySociety) -> Result<DirectorySociety>;

    async fn list_societies(&self) -> Result<Vec<DirectorySociety>>;

    async fn create_tenant(&self, tenant: &DirectoryTenant) -> Result<DirectoryTenant>;

    async fn list_tenants(&self) -> Result<Vec<DirectoryTenant>>;
}

/// Content store for uploaded documents
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write content under a key, replacing any previous content
    async fn put(&self, key: &str, content: &[u8]) -> Result<()>;

    /// Read content stored under a key
    async fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Remove content stored under a key
    async fn delete(&self, key: &str) -> Result<()>;
}

/// All repositories the domain service depends on
#[derive(Clone)]
pub struct Repositories {
    pub profiles: Arc<dyn ProfileRepository>,
    pub societies: Arc<dyn SocietyRepository>,
    pub workers: Arc<dyn WorkerRepository>,
    pub properties: Arc<dyn PropertyRepository>,
    pub maintenance: Arc<dyn MaintenanceRepository>,
    pub notices: Arc<dyn NoticeRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub documents: Arc<dyn DocumentRepository>,
    pub directory: Arc<dyn DirectoryRepository>,
    pub blobs: Arc<dyn BlobStore>,
}
