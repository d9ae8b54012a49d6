//! Rent and maintenance dues

use super::Service;
use crate::contract::{AuthContext, NewPayment, Payment, PaymentStatus, Role, SocietyError};
use crate::domain::events::DomainEvent;
use crate::domain::validation;
use chrono::Utc;
use uuid::Uuid;

impl Service {
    /// Bill a tenant of the society
    pub async fn create_payment(
        &self,
        auth: &AuthContext,
        society_id: Option<Uuid>,
        form: NewPayment,
    ) -> Result<Payment, SocietyError> {
        self.require_admin(auth)?;
        let society_id = self.member_society(auth, society_id).await?;

        validation::require_fields(&[("description", form.description.as_str())])?;
        validation::validate_amount(form.amount_cents)?;

        let tenant = self.load_profile(form.tenant_id).await?;
        if tenant.role != Role::Tenant || tenant.society_id != Some(society_id) {
            return Err(SocietyError::validation(format!(
                "profile {} is not a tenant of this society",
                form.tenant_id
            )));
        }

        if let Some(property_id) = form.property_id {
            let in_society = self
                .repos
                .properties
                .find_by_id(property_id)
                .await
                .map_err(|e| SocietyError::storage("load property", e))?
                .is_some_and(|p| p.society_id == society_id);
            if !in_society {
                return Err(SocietyError::validation(format!(
                    "property {} is not part of this society",
                    property_id
                )));
            }
        }

        let payment = Payment {
            id: Uuid::new_v4(),
            society_id,
            tenant_id: form.tenant_id,
            property_id: form.property_id,
            amount_cents: form.amount_cents,
            description: form.description,
            status: PaymentStatus::Pending,
            due_date: form.due_date,
            paid_at: None,
            created_at: Utc::now(),
        };

        let payment = self
            .repos
            .payments
            .create(&payment)
            .await
            .map_err(|e| SocietyError::storage("create payment", e))?;

        self.publish(DomainEvent::payment_recorded(&payment)).await;
        Ok(payment)
    }

    /// Mark one of the caller's pending payments as paid
    pub async fn pay(&self, auth: &AuthContext, payment_id: Uuid) -> Result<Payment, SocietyError> {
        self.require_tenant(auth)?;

        let mut payment = self
            .repos
            .payments
            .find_by_id(payment_id)
            .await
            .map_err(|e| SocietyError::storage("load payment", e))?
            .filter(|p| p.tenant_id == auth.profile_id)
            .ok_or_else(|| SocietyError::not_found("payment", payment_id))?;

        if payment.status == PaymentStatus::Paid {
            return Err(SocietyError::conflict(format!(
                "payment {} is already paid",
                payment_id
            )));
        }

        let now = Utc::now();
        payment.status = PaymentStatus::Paid;
        payment.paid_at = Some(now);

        let payment = self
            .repos
            .payments
            .update(&payment)
            .await
            .map_err(|e| SocietyError::storage("record payment", e))?;

        tracing::info!(payment_id = %payment.id, amount_cents = payment.amount_cents, "payment settled");
        self.publish(DomainEvent::payment_recorded(&payment)).await;
        Ok(payment)
    }

    /// Payments visible to the caller with overdue status applied
    pub async fn list_payments(
        &self,
        auth: &AuthContext,
        society_id: Option<Uuid>,
    ) -> Result<Vec<Payment>, SocietyError> {
        let payments = match auth.role {
            Role::Admin => {
                let society_id = self.member_society(auth, society_id).await?;
                self.repos.payments.list_by_society(society_id).await
            }
            Role::Tenant => self.repos.payments.list_by_tenant(auth.profile_id).await,
        }
        .map_err(|e| SocietyError::storage("list payments", e))?;

        let now = Utc::now();
        Ok(payments
            .into_iter()
            .map(|mut payment| {
                payment.status = payment.effective_status(now);
                payment
            })
            .collect())
    }
}
