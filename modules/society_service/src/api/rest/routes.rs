//! Route registration and OpenAPI document

use crate::domain::Service;
use super::{auth::require_session, dto::*, error::Problem, handlers};
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

/// OpenAPI document built from the DTO schemas
#[derive(OpenApi)]
#[openapi(
    info(title = "Society Hub API", description = "Societies, residents, maintenance and notices"),
    components(schemas(
        Problem,
        HealthResponse,
        AuthPageDto,
        SignUpRequest,
        SignInRequest,
        SessionDto,
        RoleDto,
        ProfileDto,
        UpdateProfileRequest,
        JoinSocietyRequest,
        SocietyDto,
        CreateSocietyRequest,
        UpdateSocietyRequest,
        SocietyProvisioningDto,
        SocietyOverviewDto,
        WorkerDto,
        WorkerCategoryDto,
        CreateWorkerRequest,
        WorkerFailureDto,
        PropertyDto,
        CreatePropertyRequest,
        AssignTenantRequest,
        MaintenanceRequestDto,
        CreateMaintenanceRequest,
        UpdateMaintenanceRequest,
        RequestStatusDto,
        PriorityDto,
        NoticeDto,
        CreateNoticeRequest,
        PaymentDto,
        PaymentStatusDto,
        CreatePaymentRequest,
        DocumentDto,
        UploadDocumentRequest,
        DirectorySocietyDto,
        CreateDirectorySocietyRequest,
        DirectoryTenantDto,
        CreateDirectoryTenantRequest,
    ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full REST router
///
/// Routes under `/api/v1` other than sign-up and sign-in require a session.
pub fn router(service: Arc<Service>) -> Router {
    // base64 inflates uploads by a third
    let upload_limit = service.config().max_document_size / 3 * 4 + 64 * 1024;

    let public = Router::new()
        .route("/health", get(handlers::health))
        .route("/auth", get(handlers::auth_page))
        .route("/openapi.json", get(openapi_json))
        .route("/api/v1/auth/sign-up", post(handlers::sign_up))
        .route("/api/v1/auth/sign-in", post(handlers::sign_in))
        // Directory endpoints
        .route(
            "/api/admin",
            get(handlers::list_directory_societies).post(handlers::create_directory_society),
        )
        .route(
            "/api/tenants",
            get(handlers::list_directory_tenants).post(handlers::create_directory_tenant),
        );

    let protected = Router::new()
        // Profile endpoints
        .route("/api/v1/me", get(handlers::get_me).patch(handlers::update_me))
        .route("/api/v1/me/society", put(handlers::join_society))
        // Society endpoints
        .route(
            "/api/v1/societies",
            get(handlers::list_societies).post(handlers::provision_society),
        )
        .route(
            "/api/v1/societies/{society_id}",
            get(handlers::get_society).patch(handlers::update_society),
        )
        .route(
            "/api/v1/societies/{society_id}/overview",
            get(handlers::society_overview),
        )
        .route(
            "/api/v1/societies/{society_id}/tenants",
            get(handlers::list_society_tenants),
        )
        .route(
            "/api/v1/societies/{society_id}/workers",
            get(handlers::list_workers).post(handlers::add_worker),
        )
        .route(
            "/api/v1/societies/{society_id}/workers/{worker_id}",
            delete(handlers::remove_worker),
        )
        // Property endpoints
        .route(
            "/api/v1/properties",
            get(handlers::list_properties).post(handlers::create_property),
        )
        .route(
            "/api/v1/properties/{property_id}/tenant",
            put(handlers::assign_tenant),
        )
        // Maintenance endpoints
        .route(
            "/api/v1/maintenance-requests",
            get(handlers::list_maintenance_requests).post(handlers::create_maintenance_request),
        )
        .route(
            "/api/v1/maintenance-requests/{request_id}",
            get(handlers::get_maintenance_request).patch(handlers::update_maintenance_request),
        )
        // Notice endpoints
        .route(
            "/api/v1/notices",
            get(handlers::list_notices).post(handlers::publish_notice),
        )
        .route("/api/v1/notices/{notice_id}", delete(handlers::delete_notice))
        // Payment endpoints
        .route(
            "/api/v1/payments",
            get(handlers::list_payments).post(handlers::create_payment),
        )
        .route("/api/v1/payments/{payment_id}/pay", post(handlers::pay))
        // Document endpoints
        .route(
            "/api/v1/documents",
            get(handlers::list_documents)
                .post(handlers::upload_document)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/v1/documents/{document_id}/content",
            get(handlers::download_document),
        )
        .route_layer(middleware::from_fn_with_state(
            service.clone(),
            require_session,
        ));

    public.merge(protected).layer(Extension(service))
}
