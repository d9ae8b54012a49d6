/// Domain events for society service
///
/// Events are published after the write they describe succeeded:
/// - Society provisioning, maintenance request changes, notices and payments
/// - Publishing failures are logged and never fail the originating operation
use crate::contract::model::{
    MaintenanceRequest, Notice, Payment, RequestStatus, SocietyProvisioning,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain event types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// Society row created (workers and profile link are best effort)
    SocietyProvisioned(SocietyProvisionedEvent),
    /// Tenant filed a maintenance request
    MaintenanceRequested(MaintenanceEvent),
    /// Maintenance request fields changed
    MaintenanceUpdated(MaintenanceEvent),
    /// Admin published a notice
    NoticePublished(NoticePublishedEvent),
    /// Payment billed or settled
    PaymentRecorded(PaymentRecordedEvent),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocietyProvisionedEvent {
    pub society_id: Uuid,
    pub created_by: Uuid,
    pub workers_attached: usize,
    pub workers_failed: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceEvent {
    pub request_id: Uuid,
    pub society_id: Uuid,
    pub tenant_id: Uuid,
    pub status: String,
    pub assigned_worker_id: Option<Uuid>,
    /// Profile that performed the change
    pub actor_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticePublishedEvent {
    pub notice_id: Uuid,
    pub society_id: Uuid,
    pub title: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecordedEvent {
    pub payment_id: Uuid,
    pub society_id: Uuid,
    pub tenant_id: Uuid,
    pub amount_cents: i64,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent {
    pub fn society_provisioned(provisioning: &SocietyProvisioning) -> Self {
        Self::SocietyProvisioned(SocietyProvisionedEvent {
            society_id: provisioning.society.id,
            created_by: provisioning.society.created_by,
            workers_attached: provisioning.workers.len(),
            workers_failed: provisioning.failed_workers.len(),
            timestamp: Utc::now(),
        })
    }

    pub fn maintenance_requested(request: &MaintenanceRequest) -> Self {
        Self::MaintenanceRequested(MaintenanceEvent::from_request(request, request.tenant_id))
    }

    pub fn maintenance_updated(request: &MaintenanceRequest, actor_id: Uuid) -> Self {
        Self::MaintenanceUpdated(MaintenanceEvent::from_request(request, actor_id))
    }

    pub fn notice_published(notice: &Notice) -> Self {
        Self::NoticePublished(NoticePublishedEvent {
            notice_id: notice.id,
            society_id: notice.society_id,
            title: notice.title.clone(),
            timestamp: Utc::now(),
        })
    }

    pub fn payment_recorded(payment: &Payment) -> Self {
        Self::PaymentRecorded(PaymentRecordedEvent {
            payment_id: payment.id,
            society_id: payment.society_id,
            tenant_id: payment.tenant_id,
            amount_cents: payment.amount_cents,
            status: payment.status.as_str().to_string(),
            timestamp: Utc::now(),
        })
    }

    /// Short event name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::SocietyProvisioned(_) => "society_provisioned",
            Self::MaintenanceRequested(_) => "maintenance_requested",
            Self::MaintenanceUpdated(_) => "maintenance_updated",
            Self::NoticePublished(_) => "notice_published",
            Self::PaymentRecorded(_) => "payment_recorded",
        }
    }

    /// Society the event belongs to
    pub fn society_id(&self) -> Uuid {
        match self {
            Self::SocietyProvisioned(e) => e.society_id,
            Self::MaintenanceRequested(e) | Self::MaintenanceUpdated(e) => e.society_id,
            Self::NoticePublished(e) => e.society_id,
            Self::PaymentRecorded(e) => e.society_id,
        }
    }
}

impl MaintenanceEvent {
    fn from_request(request: &MaintenanceRequest, actor_id: Uuid) -> Self {
        Self {
            request_id: request.id,
            society_id: request.society_id,
            tenant_id: request.tenant_id,
            status: request.status.as_str().to_string(),
            assigned_worker_id: request.assigned_worker_id,
            actor_id,
            timestamp: Utc::now(),
        }
    }

    pub fn status(&self) -> Option<RequestStatus> {
        RequestStatus::parse(&self.status)
    }
}

/// Event publisher trait for publishing domain events
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a domain event
    async fn publish(&self, event: DomainEvent) -> anyhow::Result<()>;
}

/// No-op event publisher for testing or when events are disabled
pub struct NoOpEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: DomainEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Publisher that emits every event as a structured log record
pub struct TracingEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: DomainEvent) -> anyhow::Result<()> {
        let payload = serde_json::to_string(&event)?;
        tracing::info!(
            target: "society_service::events",
            event = event.name(),
            society_id = %event.society_id(),
            payload = %payload,
            "domain event"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::{Priority, WorkerCategory};

    fn request() -> MaintenanceRequest {
        MaintenanceRequest {
            id: Uuid::new_v4(),
            society_id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            property_id: None,
            title: "Leaking tap".to_string(),
            description: "Kitchen tap drips".to_string(),
            category: WorkerCategory::Plumber,
            priority: Priority::Medium,
            status: RequestStatus::Pending,
            assigned_worker_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            resolved_at: None,
        }
    }

    #[test]
    fn test_maintenance_requested_event_uses_tenant_as_actor() {
        let request = request();
        match DomainEvent::maintenance_requested(&request) {
            DomainEvent::MaintenanceRequested(e) => {
                assert_eq!(e.request_id, request.id);
                assert_eq!(e.actor_id, request.tenant_id);
                assert_eq!(e.status(), Some(RequestStatus::Pending));
            }
            other => panic!("Expected MaintenanceRequested event, got {:?}", other),
        }
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let request = request();
        let event = DomainEvent::maintenance_updated(&request, Uuid::new_v4());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"], "maintenance_updated");
        assert_eq!(json["status"], "pending");
        assert_eq!(event.society_id(), request.society_id);
    }

    #[tokio::test]
    async fn test_publishers_accept_events() {
        let event = DomainEvent::maintenance_requested(&request());
        assert!(NoOpEventPublisher.publish(event.clone()).await.is_ok());
        assert!(TracingEventPublisher.publish(event).await.is_ok());
    }
}
