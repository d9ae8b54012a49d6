//! Session guard for protected routes
//!
//! Requests without a valid bearer token never reach a handler. Browser
//! navigations are redirected to the authentication page; API clients get a
//! 401 problem. Both carry the original path and query so the client can
//! return there after signing in.

use crate::domain::Service;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use super::error::Problem;

/// Path of the authentication page
pub const AUTH_PAGE: &str = "/auth";

/// Authentication middleware that resolves the bearer token to an `AuthContext`
pub async fn require_session(
    State(service): State<Arc<Service>>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = bearer_token(req.headers()).map(str::to_owned);

    let auth = match token {
        Some(token) => match service.authenticate(&token).await {
            Ok(auth) => Some(auth),
            Err(e) => {
                tracing::debug!(error = %e, "rejected session token");
                None
            }
        },
        None => None,
    };

    match auth {
        Some(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        None => deny(&req),
    }
}

/// Location of the authentication page that returns to `original` afterwards
pub fn auth_redirect_location(original: &str) -> String {
    format!("{}?redirect_to={}", AUTH_PAGE, urlencoding::encode(original))
}

fn deny(req: &Request) -> Response {
    let original = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| req.uri().path());
    let location = auth_redirect_location(original);

    tracing::debug!(path = %original, "unauthenticated request");

    if wants_html(req.headers()) {
        Redirect::to(&location).into_response()
    } else {
        Problem::new(StatusCode::UNAUTHORIZED, "Unauthorized")
            .with_detail("Sign in to continue")
            .with_instance(original.to_string())
            .with_location(location)
            .into_response()
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn wants_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}
