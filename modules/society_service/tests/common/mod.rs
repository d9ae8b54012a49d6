//! Common test utilities: in-memory store, recording publisher and fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::RwLock;
use society_service::contract::*;
use society_service::domain::repository::*;
use society_service::domain::{DomainEvent, EventPublisher, Service};
use society_service::SocietyServiceModule;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret-0123456789abcdef";
pub const TEST_PASSWORD: &str = "correct horse battery";

// ===== In-memory store =====

/// One store backing every repository trait
///
/// Rows live in vectors so listings come back in insertion (storage) order.
#[derive(Default)]
pub struct MemoryStore {
    profiles: RwLock<Vec<(Profile, Credential)>>,
    societies: RwLock<Vec<Society>>,
    workers: RwLock<Vec<UtilityWorker>>,
    properties: RwLock<Vec<Property>>,
    maintenance: RwLock<Vec<MaintenanceRequest>>,
    notices: RwLock<Vec<Notice>>,
    payments: RwLock<Vec<Payment>>,
    documents: RwLock<Vec<Document>>,
    directory_societies: RwLock<Vec<DirectorySociety>>,
    directory_tenants: RwLock<Vec<DirectoryTenant>>,
    blobs: RwLock<HashMap<String, Vec<u8>>>,

    // Failure injection
    society_create_error: RwLock<Option<String>>,
    failing_workers: RwLock<HashSet<String>>,
    set_society_error: RwLock<Option<String>>,
    maintenance_create_error: RwLock<Option<String>>,
    document_create_error: RwLock<Option<String>>,

    // Call counters
    pub society_create_calls: AtomicUsize,
    pub worker_create_calls: AtomicUsize,
    pub set_society_calls: AtomicUsize,
    pub maintenance_update_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            profiles: self.clone(),
            societies: self.clone(),
            workers: self.clone(),
            properties: self.clone(),
            maintenance: self.clone(),
            notices: self.clone(),
            payments: self.clone(),
            documents: self.clone(),
            directory: self.clone(),
            blobs: self.clone(),
        }
    }

    /// Make the next society inserts fail with the given store message
    pub fn fail_society_create(&self, message: &str) {
        *self.society_create_error.write() = Some(message.to_string());
    }

    /// Make inserts of the named worker fail
    pub fn fail_worker(&self, name: &str) {
        self.failing_workers.write().insert(name.to_string());
    }

    pub fn fail_set_society(&self, message: &str) {
        *self.set_society_error.write() = Some(message.to_string());
    }

    pub fn fail_maintenance_create(&self, message: &str) {
        *self.maintenance_create_error.write() = Some(message.to_string());
    }

    pub fn fail_document_create(&self, message: &str) {
        *self.document_create_error.write() = Some(message.to_string());
    }

    /// Drop a profile row, leaving rows that reference it dangling
    pub fn remove_profile(&self, id: Uuid) {
        self.profiles.write().retain(|(p, _)| p.id != id);
    }

    /// Overwrite a stored payment (e.g. to move its due date)
    pub fn put_payment(&self, payment: Payment) {
        let mut payments = self.payments.write();
        if let Some(existing) = payments.iter_mut().find(|p| p.id == payment.id) {
            *existing = payment;
        }
    }

    pub fn societies(&self) -> Vec<Society> {
        self.societies.read().clone()
    }

    pub fn workers(&self) -> Vec<UtilityWorker> {
        self.workers.read().clone()
    }

    pub fn maintenance_requests(&self) -> Vec<MaintenanceRequest> {
        self.maintenance.read().clone()
    }

    pub fn blob_count(&self) -> usize {
        self.blobs.read().len()
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

fn injected(error: &RwLock<Option<String>>) -> anyhow::Result<()> {
    match error.read().as_ref() {
        Some(message) => Err(anyhow::anyhow!("{}", message)),
        None => Ok(()),
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn create(&self, profile: &Profile, credential: &Credential) -> anyhow::Result<Profile> {
        let mut profiles = self.profiles.write();
        if profiles.iter().any(|(p, _)| p.email == profile.email) {
            anyhow::bail!("duplicate key value violates unique constraint \"profiles_email_key\"");
        }
        profiles.push((profile.clone(), credential.clone()));
        Ok(profile.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Profile>> {
        Ok(self
            .profiles
            .read()
            .iter()
            .find(|(p, _)| p.id == id)
            .map(|(p, _)| p.clone()))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Profile>> {
        Ok(self
            .profiles
            .read()
            .iter()
            .find(|(p, _)| p.email == email)
            .map(|(p, _)| p.clone()))
    }

    async fn find_many(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Profile>> {
        Ok(self
            .profiles
            .read()
            .iter()
            .filter(|(p, _)| ids.contains(&p.id))
            .map(|(p, _)| p.clone())
            .collect())
    }

    async fn find_credential(&self, profile_id: Uuid) -> anyhow::Result<Option<Credential>> {
        Ok(self
            .profiles
            .read()
            .iter()
            .find(|(p, _)| p.id == profile_id)
            .map(|(_, c)| c.clone()))
    }

    async fn list_by_society(
        &self,
        society_id: Uuid,
        role: Option<Role>,
    ) -> anyhow::Result<Vec<Profile>> {
        Ok(self
            .profiles
            .read()
            .iter()
            .filter(|(p, _)| p.society_id == Some(society_id))
            .filter(|(p, _)| role.is_none_or(|r| p.role == r))
            .map(|(p, _)| p.clone())
            .collect())
    }

    async fn update(&self, profile: &Profile) -> anyhow::Result<Profile> {
        let mut profiles = self.profiles.write();
        let (stored, _) = profiles
            .iter_mut()
            .find(|(p, _)| p.id == profile.id)
            .ok_or_else(|| anyhow::anyhow!("profile {} not found", profile.id))?;
        *stored = profile.clone();
        Ok(profile.clone())
    }

    async fn set_society(&self, profile_id: Uuid, society_id: Uuid) -> anyhow::Result<()> {
        self.set_society_calls.fetch_add(1, Ordering::SeqCst);
        injected(&self.set_society_error)?;

        let mut profiles = self.profiles.write();
        let (stored, _) = profiles
            .iter_mut()
            .find(|(p, _)| p.id == profile_id)
            .ok_or_else(|| anyhow::anyhow!("profile {} does not exist", profile_id))?;
        stored.society_id = Some(society_id);
        Ok(())
    }
}

#[async_trait]
impl SocietyRepository for MemoryStore {
    async fn create(&self, society: &Society) -> anyhow::Result<Society> {
        self.society_create_calls.fetch_add(1, Ordering::SeqCst);
        injected(&self.society_create_error)?;

        self.societies.write().push(society.clone());
        Ok(society.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Society>> {
        Ok(self.societies.read().iter().find(|s| s.id == id).cloned())
    }

    async fn list_by_creator(&self, admin_id: Uuid) -> anyhow::Result<Vec<Society>> {
        Ok(self
            .societies
            .read()
            .iter()
            .filter(|s| s.created_by == admin_id)
            .cloned()
            .collect())
    }

    async fn update(&self, society: &Society) -> anyhow::Result<Society> {
        let mut societies = self.societies.write();
        let stored = societies
            .iter_mut()
            .find(|s| s.id == society.id)
            .ok_or_else(|| anyhow::anyhow!("society {} not found", society.id))?;
        *stored = society.clone();
        Ok(society.clone())
    }
}

#[async_trait]
impl WorkerRepository for MemoryStore {
    async fn create(&self, worker: &UtilityWorker) -> anyhow::Result<UtilityWorker> {
        self.worker_create_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_workers.read().contains(&worker.name) {
            anyhow::bail!("new row for relation \"utility_workers\" violates check constraint");
        }

        self.workers.write().push(worker.clone());
        Ok(worker.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UtilityWorker>> {
        Ok(self.workers.read().iter().find(|w| w.id == id).cloned())
    }

    async fn list_by_society(&self, society_id: Uuid) -> anyhow::Result<Vec<UtilityWorker>> {
        Ok(self
            .workers
            .read()
            .iter()
            .filter(|w| w.society_id == society_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        self.workers.write().retain(|w| w.id != id);
        Ok(())
    }
}

#[async_trait]
impl PropertyRepository for MemoryStore {
    async fn create(&self, property: &Property) -> anyhow::Result<Property> {
        self.properties.write().push(property.clone());
        Ok(property.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Property>> {
        Ok(self.properties.read().iter().find(|p| p.id == id).cloned())
    }

    async fn list_by_society(&self, society_id: Uuid) -> anyhow::Result<Vec<Property>> {
        Ok(self
            .properties
            .read()
            .iter()
            .filter(|p| p.society_id == society_id)
            .cloned()
            .collect())
    }

    async fn update(&self, property: &Property) -> anyhow::Result<Property> {
        let mut properties = self.properties.write();
        let stored = properties
            .iter_mut()
            .find(|p| p.id == property.id)
            .ok_or_else(|| anyhow::anyhow!("property {} not found", property.id))?;
        *stored = property.clone();
        Ok(property.clone())
    }
}

#[async_trait]
impl MaintenanceRepository for MemoryStore {
    async fn create(&self, request: &MaintenanceRequest) -> anyhow::Result<MaintenanceRequest> {
        injected(&self.maintenance_create_error)?;
        self.maintenance.write().push(request.clone());
        Ok(request.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<MaintenanceRequest>> {
        Ok(self.maintenance.read().iter().find(|r| r.id == id).cloned())
    }

    async fn update(&self, request: &MaintenanceRequest) -> anyhow::Result<MaintenanceRequest> {
        self.maintenance_update_calls.fetch_add(1, Ordering::SeqCst);
        let mut requests = self.maintenance.write();
        let stored = requests
            .iter_mut()
            .find(|r| r.id == request.id)
            .ok_or_else(|| anyhow::anyhow!("maintenance request {} not found", request.id))?;
        *stored = request.clone();
        Ok(request.clone())
    }

    async fn list_by_society(
        &self,
        society_id: Uuid,
        status: Option<RequestStatus>,
    ) -> anyhow::Result<Vec<MaintenanceRequest>> {
        Ok(self
            .maintenance
            .read()
            .iter()
            .filter(|r| r.society_id == society_id)
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect())
    }

    async fn list_by_tenant(
        &self,
        tenant_id: Uuid,
        status: Option<RequestStatus>,
    ) -> anyhow::Result<Vec<MaintenanceRequest>> {
        Ok(self
            .maintenance
            .read()
            .iter()
            .filter(|r| r.tenant_id == tenant_id)
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl NoticeRepository for MemoryStore {
    async fn create(&self, notice: &Notice) -> anyhow::Result<Notice> {
        self.notices.write().push(notice.clone());
        Ok(notice.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Notice>> {
        Ok(self.notices.read().iter().find(|n| n.id == id).cloned())
    }

    async fn list_by_society(&self, society_id: Uuid) -> anyhow::Result<Vec<Notice>> {
        Ok(self
            .notices
            .read()
            .iter()
            .filter(|n| n.society_id == society_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        self.notices.write().retain(|n| n.id != id);
        Ok(())
    }
}

#[async_trait]
impl PaymentRepository for MemoryStore {
    async fn create(&self, payment: &Payment) -> anyhow::Result<Payment> {
        self.payments.write().push(payment.clone());
        Ok(payment.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Payment>> {
        Ok(self.payments.read().iter().find(|p| p.id == id).cloned())
    }

    async fn update(&self, payment: &Payment) -> anyhow::Result<Payment> {
        let mut payments = self.payments.write();
        let stored = payments
            .iter_mut()
            .find(|p| p.id == payment.id)
            .ok_or_else(|| anyhow::anyhow!("payment {} not found", payment.id))?;
        *stored = payment.clone();
        Ok(payment.clone())
    }

    async fn list_by_society(&self, society_id: Uuid) -> anyhow::Result<Vec<Payment>> {
        Ok(self
            .payments
            .read()
            .iter()
            .filter(|p| p.society_id == society_id)
            .cloned()
            .collect())
    }

    async fn list_by_tenant(&self, tenant_id: Uuid) -> anyhow::Result<Vec<Payment>> {
        Ok(self
            .payments
            .read()
            .iter()
            .filter(|p| p.tenant_id == tenant_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DocumentRepository for MemoryStore {
    async fn create(&self, document: &Document) -> anyhow::Result<Document> {
        injected(&self.document_create_error)?;
        self.documents.write().push(document.clone());
        Ok(document.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Document>> {
        Ok(self.documents.read().iter().find(|d| d.id == id).cloned())
    }

    async fn list_by_society(&self, society_id: Uuid) -> anyhow::Result<Vec<Document>> {
        Ok(self
            .documents
            .read()
            .iter()
            .filter(|d| d.society_id == society_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DirectoryRepository for MemoryStore {
    async fn create_society(&self, society: &DirectorySociety) -> anyhow::Result<DirectorySociety> {
        self.directory_societies.write().push(society.clone());
        Ok(society.clone())
    }

    async fn list_societies(&self) -> anyhow::Result<Vec<DirectorySociety>> {
        Ok(self.directory_societies.read().clone())
    }

    async fn create_tenant(&self, tenant: &DirectoryTenant) -> anyhow::Result<DirectoryTenant> {
        self.directory_tenants.write().push(tenant.clone());
        Ok(tenant.clone())
    }

    async fn list_tenants(&self) -> anyhow::Result<Vec<DirectoryTenant>> {
        Ok(self.directory_tenants.read().clone())
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn put(&self, key: &str, content: &[u8]) -> anyhow::Result<()> {
        self.blobs.write().insert(key.to_string(), content.to_vec());
        Ok(())
    }

    async fn get(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        self.blobs
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("blob {} not found", key))
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.blobs.write().remove(key);
        Ok(())
    }
}

// ===== Event recording =====

#[derive(Default)]
pub struct RecordingEventPublisher {
    events: RwLock<Vec<DomainEvent>>,
}

impl RecordingEventPublisher {
    pub fn names(&self) -> Vec<&'static str> {
        self.events.read().iter().map(|e| e.name()).collect()
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.read().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, event: DomainEvent) -> anyhow::Result<()> {
        self.events.write().push(event);
        Ok(())
    }
}

// ===== Fixtures =====

pub fn test_config() -> society_service::Config {
    let mut config = society_service::Config::default();
    config.auth.jwt_secret = TEST_SECRET.to_string();
    config
}

/// A service wired to an in-memory store
pub struct TestEnv {
    pub store: Arc<MemoryStore>,
    pub events: Arc<RecordingEventPublisher>,
    pub module: SocietyServiceModule,
    pub service: Arc<Service>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: society_service::Config) -> Self {
        let store = MemoryStore::new();
        let events = Arc::new(RecordingEventPublisher::default());
        let module = SocietyServiceModule::new(config);
        let service = module
            .init_with_repositories(store.repositories(), events.clone())
            .unwrap();

        Self {
            store,
            events,
            module,
            service,
        }
    }

    pub async fn sign_up(&self, email: &str, role: Role, first: &str, last: &str) -> Session {
        self.service
            .sign_up(SignUp {
                email: email.to_string(),
                password: TEST_PASSWORD.to_string(),
                first_name: first.to_string(),
                last_name: last.to_string(),
                role,
                phone: None,
            })
            .await
            .unwrap()
    }

    pub async fn admin(&self, email: &str) -> AuthContext {
        let session = self.sign_up(email, Role::Admin, "Asha", "Rao").await;
        AuthContext::admin(session.profile.id)
    }

    pub async fn tenant(&self, email: &str, first: &str, last: &str) -> AuthContext {
        let session = self.sign_up(email, Role::Tenant, first, last).await;
        AuthContext::tenant(session.profile.id)
    }

    /// Provision a society for the admin
    pub async fn society(&self, admin: &AuthContext) -> Society {
        self.service
            .provision_society(admin, new_society("Green Meadows"))
            .await
            .unwrap()
            .society
    }

    /// Sign up a tenant and link it to the society
    pub async fn tenant_in(&self, society_id: Uuid, email: &str) -> AuthContext {
        let tenant = self.tenant(email, "Ravi", "Kumar").await;
        self.service.join_society(&tenant, society_id).await.unwrap();
        tenant
    }
}

pub fn new_society(name: &str) -> NewSociety {
    NewSociety {
        name: name.to_string(),
        address: "12 Lake Road".to_string(),
        city: "Bengaluru".to_string(),
        state: "Karnataka".to_string(),
        pincode: "560001".to_string(),
        total_units: 24,
        workers: Vec::new(),
    }
}

pub fn new_worker(name: &str, category: WorkerCategory) -> NewWorker {
    NewWorker {
        name: name.to_string(),
        phone: "+91 98450 12345".to_string(),
        category,
    }
}

pub fn new_request(title: &str) -> NewMaintenanceRequest {
    NewMaintenanceRequest {
        title: title.to_string(),
        description: "Water dripping under the sink".to_string(),
        category: WorkerCategory::Plumber,
        priority: Priority::Medium,
        property_id: None,
    }
}

pub fn print_test_header(test_name: &str, purpose: &str) {
    println!("\n🧪 TEST: {}", test_name);
    println!("📋 PURPOSE: {}", purpose);
}
