//! REST API layer

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod routes;

pub use routes::{router, ApiDoc};
