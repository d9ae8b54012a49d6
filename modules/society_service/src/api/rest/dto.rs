//! REST DTOs with serde derives for HTTP API
//!
//! Create requests default their string fields so that missing fields reach
//! the service's required-field check and are reported together.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Enums =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoleDto {
    Admin,
    Tenant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WorkerCategoryDto {
    Plumber,
    Electrician,
    Carpenter,
    Cleaner,
    Security,
    Gardener,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatusDto {
    Pending,
    InProgress,
    Resolved,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PriorityDto {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatusDto {
    Pending,
    Paid,
    Overdue,
}

// ===== Common =====

/// List envelope shared by all collection endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> ListResponse<T> {
    pub fn from_models<M>(models: Vec<M>) -> Self
    where
        M: Into<T>,
    {
        let items: Vec<T> = models.into_iter().map(Into::into).collect();
        let total = items.len();
        Self { items, total }
    }
}

/// Optional society scope for admin requests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocietyScopeQuery {
    pub society_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

// ===== Authentication DTOs =====

/// Authentication page descriptor returned by `GET /auth`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthPageDto {
    #[schema(example = "/api/v1/auth/sign-in")]
    pub sign_in: String,
    #[schema(example = "/api/v1/auth/sign-up")]
    pub sign_up: String,
    /// Path to return to after signing in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthPageQuery {
    pub redirect_to: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignUpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: RoleDto,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignInRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Local path to return to after signing in
    pub redirect_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionDto {
    /// Bearer token for subsequent requests
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub profile: ProfileDto,
    #[schema(example = "/admin/dashboard")]
    pub redirect_to: String,
}

// ===== Profile DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileDto {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: RoleDto,
    pub society_id: Option<Uuid>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct JoinSocietyRequest {
    pub society_id: Uuid,
}

// ===== Society DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SocietyDto {
    pub id: Uuid,
    #[schema(example = "Green Meadows")]
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    #[schema(example = "560001")]
    pub pincode: String,
    pub total_units: u32,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateSocietyRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default = "default_total_units")]
    pub total_units: u32,
    /// Utility workers attached after the society is created
    #[serde(default)]
    pub workers: Vec<CreateWorkerRequest>,
}

fn default_total_units() -> u32 {
    1
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateSocietyRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub total_units: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkerDto {
    pub id: Uuid,
    pub society_id: Uuid,
    pub name: String,
    pub phone: String,
    pub category: WorkerCategoryDto,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateWorkerRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub category: WorkerCategoryDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkerFailureDto {
    pub name: String,
    pub reason: String,
}

/// Result of provisioning a society
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SocietyProvisioningDto {
    pub society: SocietyDto,
    pub workers: Vec<WorkerDto>,
    /// Workers whose insert failed; the society itself was created
    pub failed_workers: Vec<WorkerFailureDto>,
    /// Whether the creating admin's profile now points at the society
    pub profile_linked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SocietyOverviewDto {
    pub society_id: Uuid,
    pub tenants: usize,
    pub properties: usize,
    pub occupied_properties: usize,
    pub open_requests: usize,
    pub resolved_requests: usize,
    pub pending_payments_cents: i64,
    pub collected_payments_cents: i64,
}

// ===== Property DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PropertyDto {
    pub id: Uuid,
    pub society_id: Uuid,
    #[schema(example = "A-101")]
    pub unit_number: String,
    pub block: Option<String>,
    pub floor: Option<i32>,
    pub monthly_rent_cents: i64,
    pub tenant_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePropertyRequest {
    pub society_id: Option<Uuid>,
    #[serde(default)]
    pub unit_number: String,
    pub block: Option<String>,
    pub floor: Option<i32>,
    #[serde(default)]
    pub monthly_rent_cents: i64,
}

/// Assign (or with `null`, vacate) the tenant of a property
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignTenantRequest {
    pub tenant_id: Option<Uuid>,
}

// ===== Maintenance DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceRequestDto {
    pub id: Uuid,
    pub society_id: Uuid,
    pub tenant_id: Uuid,
    /// Joined tenant display name, `Unknown User` when unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_name: Option<String>,
    pub property_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub category: WorkerCategoryDto,
    pub priority: PriorityDto,
    pub status: RequestStatusDto,
    pub assigned_worker_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateMaintenanceRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: WorkerCategoryDto,
    #[serde(default)]
    pub priority: PriorityDto,
    pub property_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateMaintenanceRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<PriorityDto>,
    pub status: Option<RequestStatusDto>,
    pub assigned_worker_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaintenanceListQuery {
    pub society_id: Option<Uuid>,
    pub status: Option<RequestStatusDto>,
}

// ===== Notice DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoticeDto {
    pub id: Uuid,
    pub society_id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateNoticeRequest {
    pub society_id: Option<Uuid>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub expires_at: Option<DateTime<Utc>>,
}

// ===== Payment DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentDto {
    pub id: Uuid,
    pub society_id: Uuid,
    pub tenant_id: Uuid,
    pub property_id: Option<Uuid>,
    pub amount_cents: i64,
    pub description: String,
    pub status: PaymentStatusDto,
    pub due_date: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    pub society_id: Option<Uuid>,
    pub tenant_id: Uuid,
    pub property_id: Option<Uuid>,
    pub amount_cents: i64,
    #[serde(default)]
    pub description: String,
    pub due_date: DateTime<Utc>,
}

// ===== Document DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentDto {
    pub id: Uuid,
    pub society_id: Uuid,
    pub uploaded_by: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    /// Hex-encoded SHA-256 of the content
    pub sha256: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UploadDocumentRequest {
    pub society_id: Option<Uuid>,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub content_type: String,
    /// Standard base64 encoding of the file content
    #[serde(default)]
    pub content_base64: String,
}

// ===== Directory DTOs =====

/// Directory society as served by `/api/admin`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySocietyDto {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDirectorySocietyRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub created_by: String,
}

/// Directory tenant as served by `/api/tenants`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryTenantDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateDirectoryTenantRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}
