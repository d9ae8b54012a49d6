//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::SocietyError;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize, ToSchema)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// A URI reference that identifies the specific occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Blank required fields, in form order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,

    /// Sent as the `Location` header, not in the body
    #[serde(skip)]
    pub location: Option<String>,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            missing_fields: Vec::new(),
            location: None,
        }
    }

    /// Add detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add instance URI
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Add a `Location` header pointing the client somewhere useful
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let location = self
            .location
            .as_deref()
            .and_then(|l| HeaderValue::from_str(l).ok());

        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        if let Some(location) = location {
            response.headers_mut().insert(header::LOCATION, location);
        }
        response
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: SocietyError) -> Problem {
    let detail = error.to_string();
    match error {
        SocietyError::NotFound { resource, .. } => {
            Problem::new(StatusCode::NOT_FOUND, format!("{} Not Found", resource)).with_detail(detail)
        }

        SocietyError::MissingFields { fields } => {
            let mut problem =
                Problem::new(StatusCode::BAD_REQUEST, "Missing Required Fields").with_detail(detail);
            problem.missing_fields = fields;
            problem
        }

        SocietyError::Validation { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error").with_detail(message)
        }

        SocietyError::Conflict { reason } => {
            Problem::new(StatusCode::CONFLICT, "Conflict").with_detail(reason)
        }

        SocietyError::Unauthorized => Problem::new(StatusCode::UNAUTHORIZED, "Unauthorized")
            .with_detail("Sign in to continue"),

        SocietyError::Forbidden { reason } => {
            Problem::new(StatusCode::FORBIDDEN, "Forbidden").with_detail(reason)
        }

        SocietyError::PayloadTooLarge { .. } => {
            Problem::new(StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large").with_detail(detail)
        }

        // The store's own message is surfaced to the caller
        SocietyError::Storage { .. } => {
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Storage Error").with_detail(detail)
        }

        SocietyError::Internal => Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
        )
        .with_detail("An unexpected error occurred"),
    }
}
