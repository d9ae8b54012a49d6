//! Contract models for society service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Tenant name reported when the joined profile row is missing
pub const UNKNOWN_USER: &str = "Unknown User";

/// Role of an authenticated profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Manages societies, properties, workers and notices
    Admin,
    /// Occupant of a property inside a society
    Tenant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Tenant => "tenant",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "tenant" => Some(Self::Tenant),
            _ => None,
        }
    }
}

/// User profile (one per account)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    /// Society this profile belongs to (admins: the last provisioned one)
    pub society_id: Option<Uuid>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// First and last name joined by a single space, `None` when both are blank
    pub fn display_name(&self) -> Option<String> {
        let name = [self.first_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

/// Editable profile fields
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

/// Stored credential for a profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub profile_id: Uuid,
    /// Argon2id hash in PHC string format, salt included
    pub password_hash: String,
}

/// Managed residential property group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Society {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub total_units: u32,
    /// Admin profile that provisioned the society
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Society creation form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewSociety {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub total_units: u32,
    /// Utility workers attached right after the society row is created
    pub workers: Vec<NewWorker>,
}

/// Partial society update
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SocietyPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub total_units: Option<u32>,
}

/// Trade of a utility worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerCategory {
    Plumber,
    Electrician,
    Carpenter,
    Cleaner,
    Security,
    Gardener,
    Other,
}

impl WorkerCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plumber => "plumber",
            Self::Electrician => "electrician",
            Self::Carpenter => "carpenter",
            Self::Cleaner => "cleaner",
            Self::Security => "security",
            Self::Gardener => "gardener",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "plumber" => Some(Self::Plumber),
            "electrician" => Some(Self::Electrician),
            "carpenter" => Some(Self::Carpenter),
            "cleaner" => Some(Self::Cleaner),
            "security" => Some(Self::Security),
            "gardener" => Some(Self::Gardener),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Service worker attached to a society
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtilityWorker {
    pub id: Uuid,
    pub society_id: Uuid,
    pub name: String,
    pub phone: String,
    pub category: WorkerCategory,
    pub created_at: DateTime<Utc>,
}

/// Worker creation form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorker {
    pub name: String,
    pub phone: String,
    pub category: WorkerCategory,
}

/// Worker that could not be attached during provisioning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerFailure {
    pub name: String,
    pub reason: String,
}

/// Outcome of provisioning a society
///
/// The society row is the only mandatory part; worker inserts and the profile
/// link are best effort and reported here instead of failing the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocietyProvisioning {
    pub society: Society,
    pub workers: Vec<UtilityWorker>,
    pub failed_workers: Vec<WorkerFailure>,
    pub profile_linked: bool,
}

/// Unit inside a society
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub id: Uuid,
    pub society_id: Uuid,
    pub unit_number: String,
    pub block: Option<String>,
    pub floor: Option<i32>,
    pub monthly_rent_cents: i64,
    pub tenant_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Property creation form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProperty {
    pub unit_number: String,
    pub block: Option<String>,
    pub floor: Option<i32>,
    pub monthly_rent_cents: i64,
}

/// Maintenance request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    Pending,
    InProgress,
    Resolved,
    Cancelled,
}

impl RequestStatus {
    /// Terminal requests accept no further updates
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "resolved" => Some(Self::Resolved),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Maintenance request priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }
}

/// Tenant-filed issue ticket routed to a utility worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceRequest {
    pub id: Uuid,
    pub society_id: Uuid,
    pub tenant_id: Uuid,
    pub property_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub category: WorkerCategory,
    pub priority: Priority,
    pub status: RequestStatus,
    pub assigned_worker_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Maintenance request creation form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMaintenanceRequest {
    pub title: String,
    pub description: String,
    pub category: WorkerCategory,
    pub priority: Priority,
    pub property_id: Option<Uuid>,
}

/// Changed fields of a maintenance request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MaintenanceRequestPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<RequestStatus>,
    pub assigned_worker_id: Option<Uuid>,
}

impl MaintenanceRequestPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.assigned_worker_id.is_none()
    }
}

/// Maintenance request joined with the tenant's display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceRequestView {
    pub request: MaintenanceRequest,
    pub tenant_name: String,
}

/// Filter for maintenance listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaintenanceFilter {
    pub status: Option<RequestStatus>,
}

/// Admin-authored announcement visible to tenants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: Uuid,
    pub society_id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Notice creation form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotice {
    pub title: String,
    pub content: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Pending,
    Paid,
    /// Reported for pending payments past their due date, never stored
    Overdue,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }
}

/// Amount billed to a tenant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: Uuid,
    pub society_id: Uuid,
    pub tenant_id: Uuid,
    pub property_id: Option<Uuid>,
    pub amount_cents: i64,
    pub description: String,
    pub status: PaymentStatus,
    pub due_date: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Status as reported to callers at `now`
    pub fn effective_status(&self, now: DateTime<Utc>) -> PaymentStatus {
        match self.status {
            PaymentStatus::Pending if self.due_date < now => PaymentStatus::Overdue,
            status => status,
        }
    }
}

/// Payment creation form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub tenant_id: Uuid,
    pub property_id: Option<Uuid>,
    pub amount_cents: i64,
    pub description: String,
    pub due_date: DateTime<Utc>,
}

/// Uploaded society document metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: Uuid,
    pub society_id: Uuid,
    pub uploaded_by: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    /// Hex-encoded SHA-256 of the content
    pub sha256: String,
    /// Key of the content inside the blob store
    pub storage_key: String,
    pub created_at: DateTime<Utc>,
}

/// Document upload form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub file_name: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

/// Aggregated counters for a society dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocietyOverview {
    pub society_id: Uuid,
    pub tenants: usize,
    pub properties: usize,
    pub occupied_properties: usize,
    pub open_requests: usize,
    pub resolved_requests: usize,
    pub pending_payments_cents: i64,
    pub collected_payments_cents: i64,
}

/// Society record behind the `/api/admin` directory route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySociety {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Tenant record behind the `/api/tenants` directory route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryTenant {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Sign-up form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub phone: Option<String>,
}

/// Issued session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub profile: Profile,
    /// Local path the client should navigate to after signing in
    pub redirect_to: String,
}

/// Authentication context for privilege-aware operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub profile_id: Uuid,
    pub role: Role,
}

impl AuthContext {
    pub fn admin(profile_id: Uuid) -> Self {
        Self {
            profile_id,
            role: Role::Admin,
        }
    }

    pub fn tenant(profile_id: Uuid) -> Self {
        Self {
            profile_id,
            role: Role::Tenant,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
