//! Domain layer - business logic and services

pub mod auth;
pub mod events;
pub mod repository;
pub mod service;
pub mod validation;

pub use auth::TokenIssuer;
pub use events::{DomainEvent, EventPublisher, NoOpEventPublisher, TracingEventPublisher};
pub use repository::{
    BlobStore, DirectoryRepository, DocumentRepository, MaintenanceRepository,
    NoticeRepository, PaymentRepository, ProfileRepository, PropertyRepository, Repositories,
    SocietyRepository, WorkerRepository,
};
pub use service::Service;
