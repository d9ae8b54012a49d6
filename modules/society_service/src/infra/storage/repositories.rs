//! SeaORM repository implementations
//!
//! Lists are returned in storage order: creation time, then id.

use crate::contract::{
    Credential, DirectorySociety, DirectoryTenant, Document, MaintenanceRequest, Notice, Payment,
    Profile, Property, RequestStatus, Role, Society, UtilityWorker,
};
use crate::domain::repository::{
    DirectoryRepository, DocumentRepository, MaintenanceRepository, NoticeRepository,
    PaymentRepository, ProfileRepository, PropertyRepository, Repositories, SocietyRepository,
    WorkerRepository,
};
use crate::domain::BlobStore;
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{
    prelude::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use std::sync::Arc;
use uuid::Uuid;

use super::entity::{
    directory_society, directory_tenant, document, maintenance_request, notice, payment,
    profile, property, society, utility_worker,
};
use super::mapper;

/// Build the full repository set over one connection
pub fn sea_orm_repositories(db: Arc<DatabaseConnection>, blobs: Arc<dyn BlobStore>) -> Repositories {
    Repositories {
        profiles: Arc::new(SeaOrmProfileRepository::new(db.clone())),
        societies: Arc::new(SeaOrmSocietyRepository::new(db.clone())),
        workers: Arc::new(SeaOrmWorkerRepository::new(db.clone())),
        properties: Arc::new(SeaOrmPropertyRepository::new(db.clone())),
        maintenance: Arc::new(SeaOrmMaintenanceRepository::new(db.clone())),
        notices: Arc::new(SeaOrmNoticeRepository::new(db.clone())),
        payments: Arc::new(SeaOrmPaymentRepository::new(db.clone())),
        documents: Arc::new(SeaOrmDocumentRepository::new(db.clone())),
        directory: Arc::new(SeaOrmDirectoryRepository::new(db)),
        blobs,
    }
}

// ===== Profile Repository =====

pub struct SeaOrmProfileRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmProfileRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for SeaOrmProfileRepository {
    async fn create(&self, profile: &Profile, credential: &Credential) -> Result<Profile> {
        let active = mapper::new_profile(profile, credential);
        let result = profile::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;

        result.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>> {
        profile::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(Profile::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>> {
        profile::Entity::find()
            .filter(profile::Column::Email.eq(email))
            .one(&*self.db)
            .await?
            .map(Profile::try_from)
            .transpose()
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Profile>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = profile::Entity::find()
            .filter(profile::Column::Id.is_in(ids.iter().copied()))
            .all(&*self.db)
            .await?;

        results.into_iter().map(Profile::try_from).collect()
    }

    async fn find_credential(&self, profile_id: Uuid) -> Result<Option<Credential>> {
        let result = profile::Entity::find_by_id(profile_id)
            .one(&*self.db)
            .await?;

        Ok(result.as_ref().map(Credential::from))
    }

    async fn list_by_society(&self, society_id: Uuid, role: Option<Role>) -> Result<Vec<Profile>> {
        let mut query = profile::Entity::find().filter(profile::Column::SocietyId.eq(society_id));

        if let Some(role) = role {
            query = query.filter(profile::Column::Role.eq(role.as_str()));
        }

        let results = query
            .order_by_asc(profile::Column::CreatedAt)
            .order_by_asc(profile::Column::Id)
            .all(&*self.db)
            .await?;

        results.into_iter().map(Profile::try_from).collect()
    }

    async fn update(&self, profile: &Profile) -> Result<Profile> {
        let result = profile::Entity::update(mapper::profile_changes(profile))
            .exec(&*self.db)
            .await?;

        result.try_into()
    }

    async fn set_society(&self, profile_id: Uuid, society_id: Uuid) -> Result<()> {
        let result = profile::Entity::update_many()
            .col_expr(profile::Column::SocietyId, Expr::value(society_id))
            .col_expr(profile::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(profile::Column::Id.eq(profile_id))
            .exec(&*self.db)
            .await?;

        if result.rows_affected == 0 {
            anyhow::bail!("profile {} does not exist", profile_id);
        }

        Ok(())
    }
}

// ===== Society Repository =====

pub struct SeaOrmSocietyRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmSocietyRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SocietyRepository for SeaOrmSocietyRepository {
    async fn create(&self, society: &Society) -> Result<Society> {
        let active: society::ActiveModel = society.into();
        let result = society::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;

        result.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Society>> {
        society::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(Society::try_from)
            .transpose()
    }

    async fn list_by_creator(&self, admin_id: Uuid) -> Result<Vec<Society>> {
        let results = society::Entity::find()
            .filter(society::Column::CreatedBy.eq(admin_id))
            .order_by_asc(society::Column::CreatedAt)
            .order_by_asc(society::Column::Id)
            .all(&*self.db)
            .await?;

        results.into_iter().map(Society::try_from).collect()
    }

    async fn update(&self, society: &Society) -> Result<Society> {
        let active: society::ActiveModel = society.into();
        let result = society::Entity::update(active).exec(&*self.db).await?;

        result.try_into()
    }
}

// ===== Worker Repository =====

pub struct SeaOrmWorkerRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmWorkerRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WorkerRepository for SeaOrmWorkerRepository {
    async fn create(&self, worker: &UtilityWorker) -> Result<UtilityWorker> {
        let active: utility_worker::ActiveModel = worker.into();
        let result = utility_worker::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;

        result.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UtilityWorker>> {
        utility_worker::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(UtilityWorker::try_from)
            .transpose()
    }

    async fn list_by_society(&self, society_id: Uuid) -> Result<Vec<UtilityWorker>> {
        let results = utility_worker::Entity::find()
            .filter(utility_worker::Column::SocietyId.eq(society_id))
            .order_by_asc(utility_worker::Column::CreatedAt)
            .order_by_asc(utility_worker::Column::Id)
            .all(&*self.db)
            .await?;

        results.into_iter().map(UtilityWorker::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        utility_worker::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await?;

        Ok(())
    }
}

// ===== Property Repository =====

pub struct SeaOrmPropertyRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPropertyRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PropertyRepository for SeaOrmPropertyRepository {
    async fn create(&self, property: &Property) -> Result<Property> {
        let active: property::ActiveModel = property.into();
        let result = property::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>> {
        let result = property::Entity::find_by_id(id).one(&*self.db).await?;

        Ok(result.map(|e| e.into()))
    }

    async fn list_by_society(&self, society_id: Uuid) -> Result<Vec<Property>> {
        let results = property::Entity::find()
            .filter(property::Column::SocietyId.eq(society_id))
            .order_by_asc(property::Column::CreatedAt)
            .order_by_asc(property::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn update(&self, property: &Property) -> Result<Property> {
        let active: property::ActiveModel = property.into();
        let result = property::Entity::update(active).exec(&*self.db).await?;

        Ok(result.into())
    }
}

// ===== Maintenance Repository =====

pub struct SeaOrmMaintenanceRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmMaintenanceRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MaintenanceRepository for SeaOrmMaintenanceRepository {
    async fn create(&self, request: &MaintenanceRequest) -> Result<MaintenanceRequest> {
        let active: maintenance_request::ActiveModel = request.into();
        let result = maintenance_request::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;

        result.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceRequest>> {
        maintenance_request::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(MaintenanceRequest::try_from)
            .transpose()
    }

    async fn update(&self, request: &MaintenanceRequest) -> Result<MaintenanceRequest> {
        let active: maintenance_request::ActiveModel = request.into();
        let result = maintenance_request::Entity::update(active)
            .exec(&*self.db)
            .await?;

        result.try_into()
    }

    async fn list_by_society(
        &self,
        society_id: Uuid,
        status: Option<RequestStatus>,
    ) -> Result<Vec<MaintenanceRequest>> {
        let mut query = maintenance_request::Entity::find()
            .filter(maintenance_request::Column::SocietyId.eq(society_id));

        if let Some(status) = status {
            query = query.filter(maintenance_request::Column::Status.eq(status.as_str()));
        }

        let results = query
            .order_by_asc(maintenance_request::Column::CreatedAt)
            .order_by_asc(maintenance_request::Column::Id)
            .all(&*self.db)
            .await?;

        results.into_iter().map(MaintenanceRequest::try_from).collect()
    }

    async fn list_by_tenant(
        &self,
        tenant_id: Uuid,
        status: Option<RequestStatus>,
    ) -> Result<Vec<MaintenanceRequest>> {
        let mut query = maintenance_request::Entity::find()
            .filter(maintenance_request::Column::TenantId.eq(tenant_id));

        if let Some(status) = status {
            query = query.filter(maintenance_request::Column::Status.eq(status.as_str()));
        }

        let results = query
            .order_by_asc(maintenance_request::Column::CreatedAt)
            .order_by_asc(maintenance_request::Column::Id)
            .all(&*self.db)
            .await?;

        results.into_iter().map(MaintenanceRequest::try_from).collect()
    }
}

// ===== Notice Repository =====

pub struct SeaOrmNoticeRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmNoticeRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NoticeRepository for SeaOrmNoticeRepository {
    async fn create(&self, notice: &Notice) -> Result<Notice> {
        let active: notice::ActiveModel = notice.into();
        let result = notice::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notice>> {
        let result = notice::Entity::find_by_id(id).one(&*self.db).await?;

        Ok(result.map(|e| e.into()))
    }

    async fn list_by_society(&self, society_id: Uuid) -> Result<Vec<Notice>> {
        let results = notice::Entity::find()
            .filter(notice::Column::SocietyId.eq(society_id))
            .order_by_asc(notice::Column::CreatedAt)
            .order_by_asc(notice::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        notice::Entity::delete_by_id(id).exec(&*self.db).await?;

        Ok(())
    }
}

// ===== Payment Repository =====

pub struct SeaOrmPaymentRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn create(&self, payment: &Payment) -> Result<Payment> {
        let active: payment::ActiveModel = payment.into();
        let result = payment::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;

        result.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>> {
        payment::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(Payment::try_from)
            .transpose()
    }

    async fn update(&self, payment: &Payment) -> Result<Payment> {
        let active: payment::ActiveModel = payment.into();
        let result = payment::Entity::update(active).exec(&*self.db).await?;

        result.try_into()
    }

    async fn list_by_society(&self, society_id: Uuid) -> Result<Vec<Payment>> {
        let results = payment::Entity::find()
            .filter(payment::Column::SocietyId.eq(society_id))
            .order_by_asc(payment::Column::CreatedAt)
            .order_by_asc(payment::Column::Id)
            .all(&*self.db)
            .await?;

        results.into_iter().map(Payment::try_from).collect()
    }

    async fn list_by_tenant(&self, tenant_id: Uuid) -> Result<Vec<Payment>> {
        let results = payment::Entity::find()
            .filter(payment::Column::TenantId.eq(tenant_id))
            .order_by_asc(payment::Column::CreatedAt)
            .order_by_asc(payment::Column::Id)
            .all(&*self.db)
            .await?;

        results.into_iter().map(Payment::try_from).collect()
    }
}

// ===== Document Repository =====

pub struct SeaOrmDocumentRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmDocumentRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DocumentRepository for SeaOrmDocumentRepository {
    async fn create(&self, document: &Document) -> Result<Document> {
        let active: document::ActiveModel = document.into();
        let result = document::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>> {
        let result = document::Entity::find_by_id(id).one(&*self.db).await?;

        Ok(result.map(|e| e.into()))
    }

    async fn list_by_society(&self, society_id: Uuid) -> Result<Vec<Document>> {
        let results = document::Entity::find()
            .filter(document::Column::SocietyId.eq(society_id))
            .order_by_asc(document::Column::CreatedAt)
            .order_by_asc(document::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }
}

// ===== Directory Repository =====

pub struct SeaOrmDirectoryRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmDirectoryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DirectoryRepository for SeaOrmDirectoryRepository {
    async fn create_society(&self, society: &DirectorySociety) -> Result<DirectorySociety> {
        let active: directory_society::ActiveModel = society.into();
        let result = directory_society::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;

        Ok(result.into())
    }

    async fn list_societies(&self) -> Result<Vec<DirectorySociety>> {
        let results = directory_society::Entity::find()
            .order_by_asc(directory_society::Column::CreatedAt)
            .order_by_asc(directory_society::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn create_tenant(&self, tenant: &DirectoryTenant) -> Result<DirectoryTenant> {
        let active: directory_tenant::ActiveModel = tenant.into();
        let result = directory_tenant::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;

        Ok(result.into())
    }

    async fn list_tenants(&self) -> Result<Vec<DirectoryTenant>> {
        let results = directory_tenant::Entity::find()
            .order_by_asc(directory_tenant::Column::CreatedAt)
            .order_by_asc(directory_tenant::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }
}
