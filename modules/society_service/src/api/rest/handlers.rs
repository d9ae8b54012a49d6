//! HTTP request handlers - thin layer that delegates to domain service

use crate::contract::{AuthContext, MaintenanceFilter, NewDocument};
use crate::domain::{validation, Service};
use super::{
    auth::AUTH_PAGE,
    dto::*,
    error::{map_domain_error, Problem},
};
use axum::{
    extract::{Path, Query},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use base64::Engine;
use std::sync::Arc;
use uuid::Uuid;

type Svc = Extension<Arc<Service>>;
type Auth = Extension<AuthContext>;

// ===== Public Handlers =====

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Describe the authentication endpoints, echoing a local return path
pub async fn auth_page(Query(query): Query<AuthPageQuery>) -> Json<AuthPageDto> {
    Json(AuthPageDto {
        sign_in: "/api/v1/auth/sign-in".to_string(),
        sign_up: "/api/v1/auth/sign-up".to_string(),
        redirect_to: query
            .redirect_to
            .filter(|target| validation::is_local_redirect(target) && target != AUTH_PAGE),
    })
}

pub async fn sign_up(
    Extension(service): Svc,
    Json(req): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<SessionDto>), Problem> {
    let session = service.sign_up(req.into()).await.map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(session.into())))
}

pub async fn sign_in(
    Extension(service): Svc,
    Json(req): Json<SignInRequest>,
) -> Result<Json<SessionDto>, Problem> {
    let session = service
        .sign_in(&req.email, &req.password, req.redirect_to)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(session.into()))
}

// ===== Directory Handlers =====

pub async fn list_directory_societies(
    Extension(service): Svc,
) -> Result<Json<ListResponse<DirectorySocietyDto>>, Problem> {
    let societies = service
        .list_directory_societies()
        .await
        .map_err(map_domain_error)?;

    Ok(Json(ListResponse::from_models(societies)))
}

pub async fn create_directory_society(
    Extension(service): Svc,
    Json(req): Json<CreateDirectorySocietyRequest>,
) -> Result<(StatusCode, Json<DirectorySocietyDto>), Problem> {
    let society = service
        .create_directory_society(req.name, req.location, req.created_by)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(society.into())))
}

pub async fn list_directory_tenants(
    Extension(service): Svc,
) -> Result<Json<ListResponse<DirectoryTenantDto>>, Problem> {
    let tenants = service
        .list_directory_tenants()
        .await
        .map_err(map_domain_error)?;

    Ok(Json(ListResponse::from_models(tenants)))
}

pub async fn create_directory_tenant(
    Extension(service): Svc,
    Json(req): Json<CreateDirectoryTenantRequest>,
) -> Result<(StatusCode, Json<DirectoryTenantDto>), Problem> {
    let tenant = service
        .create_directory_tenant(req.name, req.email)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(tenant.into())))
}

// ===== Profile Handlers =====

pub async fn get_me(
    Extension(service): Svc,
    Extension(auth): Auth,
) -> Result<Json<ProfileDto>, Problem> {
    let profile = service.get_profile(&auth).await.map_err(map_domain_error)?;

    Ok(Json(profile.into()))
}

pub async fn update_me(
    Extension(service): Svc,
    Extension(auth): Auth,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileDto>, Problem> {
    let profile = service
        .update_profile(&auth, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(profile.into()))
}

pub async fn join_society(
    Extension(service): Svc,
    Extension(auth): Auth,
    Json(req): Json<JoinSocietyRequest>,
) -> Result<Json<ProfileDto>, Problem> {
    let profile = service
        .join_society(&auth, req.society_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(profile.into()))
}

// ===== Society Handlers =====

pub async fn list_societies(
    Extension(service): Svc,
    Extension(auth): Auth,
) -> Result<Json<ListResponse<SocietyDto>>, Problem> {
    let societies = service.list_societies(&auth).await.map_err(map_domain_error)?;

    Ok(Json(ListResponse::from_models(societies)))
}

pub async fn provision_society(
    Extension(service): Svc,
    Extension(auth): Auth,
    Json(req): Json<CreateSocietyRequest>,
) -> Result<(StatusCode, Json<SocietyProvisioningDto>), Problem> {
    let provisioning = service
        .provision_society(&auth, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(provisioning.into())))
}

pub async fn get_society(
    Extension(service): Svc,
    Extension(auth): Auth,
    Path(society_id): Path<Uuid>,
) -> Result<Json<SocietyDto>, Problem> {
    let society = service
        .get_society(&auth, society_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(society.into()))
}

pub async fn update_society(
    Extension(service): Svc,
    Extension(auth): Auth,
    Path(society_id): Path<Uuid>,
    Json(req): Json<UpdateSocietyRequest>,
) -> Result<Json<SocietyDto>, Problem> {
    let society = service
        .update_society(&auth, society_id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(society.into()))
}

pub async fn society_overview(
    Extension(service): Svc,
    Extension(auth): Auth,
    Path(society_id): Path<Uuid>,
) -> Result<Json<SocietyOverviewDto>, Problem> {
    let overview = service
        .society_overview(&auth, society_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(overview.into()))
}

pub async fn list_society_tenants(
    Extension(service): Svc,
    Extension(auth): Auth,
    Path(society_id): Path<Uuid>,
) -> Result<Json<ListResponse<ProfileDto>>, Problem> {
    let tenants = service
        .list_tenants(&auth, Some(society_id))
        .await
        .map_err(map_domain_error)?;

    Ok(Json(ListResponse::from_models(tenants)))
}

pub async fn list_workers(
    Extension(service): Svc,
    Extension(auth): Auth,
    Path(society_id): Path<Uuid>,
) -> Result<Json<ListResponse<WorkerDto>>, Problem> {
    let workers = service
        .list_workers(&auth, society_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(ListResponse::from_models(workers)))
}

pub async fn add_worker(
    Extension(service): Svc,
    Extension(auth): Auth,
    Path(society_id): Path<Uuid>,
    Json(req): Json<CreateWorkerRequest>,
) -> Result<(StatusCode, Json<WorkerDto>), Problem> {
    let worker = service
        .add_worker(&auth, society_id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(worker.into())))
}

pub async fn remove_worker(
    Extension(service): Svc,
    Extension(auth): Auth,
    Path((society_id, worker_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, Problem> {
    service
        .remove_worker(&auth, society_id, worker_id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Property Handlers =====

pub async fn list_properties(
    Extension(service): Svc,
    Extension(auth): Auth,
    Query(scope): Query<SocietyScopeQuery>,
) -> Result<Json<ListResponse<PropertyDto>>, Problem> {
    let properties = service
        .list_properties(&auth, scope.society_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(ListResponse::from_models(properties)))
}

pub async fn create_property(
    Extension(service): Svc,
    Extension(auth): Auth,
    Json(req): Json<CreatePropertyRequest>,
) -> Result<(StatusCode, Json<PropertyDto>), Problem> {
    let society_id = req.society_id;
    let property = service
        .create_property(&auth, society_id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(property.into())))
}

pub async fn assign_tenant(
    Extension(service): Svc,
    Extension(auth): Auth,
    Path(property_id): Path<Uuid>,
    Json(req): Json<AssignTenantRequest>,
) -> Result<Json<PropertyDto>, Problem> {
    let property = service
        .assign_tenant(&auth, property_id, req.tenant_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(property.into()))
}

// ===== Maintenance Handlers =====

pub async fn list_maintenance_requests(
    Extension(service): Svc,
    Extension(auth): Auth,
    Query(query): Query<MaintenanceListQuery>,
) -> Result<Json<ListResponse<MaintenanceRequestDto>>, Problem> {
    let filter = MaintenanceFilter {
        status: query.status.map(Into::into),
    };
    let requests = service
        .list_maintenance_requests(&auth, query.society_id, filter)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(ListResponse::from_models(requests)))
}

pub async fn create_maintenance_request(
    Extension(service): Svc,
    Extension(auth): Auth,
    Json(req): Json<CreateMaintenanceRequest>,
) -> Result<(StatusCode, Json<MaintenanceRequestDto>), Problem> {
    let request = service
        .create_maintenance_request(&auth, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(request.into())))
}

pub async fn get_maintenance_request(
    Extension(service): Svc,
    Extension(auth): Auth,
    Path(request_id): Path<Uuid>,
) -> Result<Json<MaintenanceRequestDto>, Problem> {
    let view = service
        .get_maintenance_request(&auth, request_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(view.into()))
}

pub async fn update_maintenance_request(
    Extension(service): Svc,
    Extension(auth): Auth,
    Path(request_id): Path<Uuid>,
    Json(req): Json<UpdateMaintenanceRequest>,
) -> Result<Json<MaintenanceRequestDto>, Problem> {
    let request = service
        .update_maintenance_request(&auth, request_id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(request.into()))
}

// ===== Notice Handlers =====

pub async fn list_notices(
    Extension(service): Svc,
    Extension(auth): Auth,
    Query(scope): Query<SocietyScopeQuery>,
) -> Result<Json<ListResponse<NoticeDto>>, Problem> {
    let notices = service
        .list_notices(&auth, scope.society_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(ListResponse::from_models(notices)))
}

pub async fn publish_notice(
    Extension(service): Svc,
    Extension(auth): Auth,
    Json(req): Json<CreateNoticeRequest>,
) -> Result<(StatusCode, Json<NoticeDto>), Problem> {
    let society_id = req.society_id;
    let notice = service
        .publish_notice(&auth, society_id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(notice.into())))
}

pub async fn delete_notice(
    Extension(service): Svc,
    Extension(auth): Auth,
    Path(notice_id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    service
        .delete_notice(&auth, notice_id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Payment Handlers =====

pub async fn list_payments(
    Extension(service): Svc,
    Extension(auth): Auth,
    Query(scope): Query<SocietyScopeQuery>,
) -> Result<Json<ListResponse<PaymentDto>>, Problem> {
    let payments = service
        .list_payments(&auth, scope.society_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(ListResponse::from_models(payments)))
}

pub async fn create_payment(
    Extension(service): Svc,
    Extension(auth): Auth,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<PaymentDto>), Problem> {
    let society_id = req.society_id;
    let payment = service
        .create_payment(&auth, society_id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(payment.into())))
}

pub async fn pay(
    Extension(service): Svc,
    Extension(auth): Auth,
    Path(payment_id): Path<Uuid>,
) -> Result<Json<PaymentDto>, Problem> {
    let payment = service
        .pay(&auth, payment_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(payment.into()))
}

// ===== Document Handlers =====

pub async fn list_documents(
    Extension(service): Svc,
    Extension(auth): Auth,
    Query(scope): Query<SocietyScopeQuery>,
) -> Result<Json<ListResponse<DocumentDto>>, Problem> {
    let documents = service
        .list_documents(&auth, scope.society_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(ListResponse::from_models(documents)))
}

pub async fn upload_document(
    Extension(service): Svc,
    Extension(auth): Auth,
    Json(req): Json<UploadDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentDto>), Problem> {
    let content = base64::engine::general_purpose::STANDARD
        .decode(req.content_base64.trim())
        .map_err(|e| {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error")
                .with_detail(format!("content_base64 is not valid base64: {}", e))
        })?;

    let form = NewDocument {
        file_name: req.file_name,
        content_type: req.content_type,
        content,
    };
    let document = service
        .upload_document(&auth, req.society_id, form)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(document.into())))
}

/// Stream a document's content with its stored content type
pub async fn download_document(
    Extension(service): Svc,
    Extension(auth): Auth,
    Path(document_id): Path<Uuid>,
) -> Result<Response, Problem> {
    let (document, content) = service
        .document_content(&auth, document_id)
        .await
        .map_err(map_domain_error)?;

    let content_type = HeaderValue::from_str(&document.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename*=UTF-8''{}",
        urlencoding::encode(&document.file_name)
    ))
    .map_err(|e| {
        tracing::error!(document_id = %document.id, error = %e, "invalid content disposition");
        map_domain_error(crate::contract::SocietyError::Internal)
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        content,
    )
        .into_response())
}
