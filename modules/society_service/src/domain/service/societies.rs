//! Society provisioning, workers and dashboard counters

use super::Service;
use crate::contract::{
    AuthContext, NewSociety, NewWorker, Payment, PaymentStatus, RequestStatus, Role, Society,
    SocietyError, SocietyOverview, SocietyPatch, SocietyProvisioning, UtilityWorker,
    WorkerFailure,
};
use crate::domain::events::DomainEvent;
use crate::domain::validation;
use chrono::Utc;
use uuid::Uuid;

impl Service {
    // ===== Society Operations =====

    /// Create a society, attach its workers and link it to the admin's profile
    ///
    /// Only the society insert can fail the call. Worker inserts and the
    /// profile link are attempted afterwards; their failures are logged and
    /// reported in the returned provisioning record.
    pub async fn provision_society(
        &self,
        auth: &AuthContext,
        form: NewSociety,
    ) -> Result<SocietyProvisioning, SocietyError> {
        self.require_admin(auth)?;

        validation::require_fields(&[
            ("name", form.name.as_str()),
            ("address", form.address.as_str()),
            ("city", form.city.as_str()),
            ("state", form.state.as_str()),
            ("pincode", form.pincode.as_str()),
        ])?;
        validation::validate_pincode(&form.pincode)?;
        validation::validate_total_units(form.total_units)?;

        if form.workers.len() > self.config.max_workers_per_society {
            return Err(SocietyError::validation(format!(
                "a society can have at most {} workers",
                self.config.max_workers_per_society
            )));
        }
        for worker in &form.workers {
            validate_worker(worker)?;
        }

        let now = Utc::now();
        let society = Society {
            id: Uuid::new_v4(),
            name: form.name,
            address: form.address,
            city: form.city,
            state: form.state,
            pincode: form.pincode,
            total_units: form.total_units,
            created_by: auth.profile_id,
            created_at: now,
            updated_at: now,
        };

        let society = self
            .repos
            .societies
            .create(&society)
            .await
            .map_err(|e| SocietyError::storage("create society", e))?;

        let mut workers = Vec::with_capacity(form.workers.len());
        let mut failed_workers = Vec::new();
        for new_worker in form.workers {
            let worker = UtilityWorker {
                id: Uuid::new_v4(),
                society_id: society.id,
                name: new_worker.name,
                phone: new_worker.phone,
                category: new_worker.category,
                created_at: Utc::now(),
            };
            match self.repos.workers.create(&worker).await {
                Ok(created) => workers.push(created),
                Err(e) => {
                    tracing::warn!(
                        society_id = %society.id,
                        worker = %worker.name,
                        error = %e,
                        "failed to attach utility worker"
                    );
                    failed_workers.push(WorkerFailure {
                        name: worker.name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let profile_linked = match self
            .repos
            .profiles
            .set_society(auth.profile_id, society.id)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    society_id = %society.id,
                    profile_id = %auth.profile_id,
                    error = %e,
                    "failed to link society to admin profile"
                );
                false
            }
        };

        tracing::info!(
            society_id = %society.id,
            workers = workers.len(),
            failed_workers = failed_workers.len(),
            "society provisioned"
        );

        let provisioning = SocietyProvisioning {
            society,
            workers,
            failed_workers,
            profile_linked,
        };
        self.publish(DomainEvent::society_provisioned(&provisioning)).await;

        Ok(provisioning)
    }

    /// Get a society the caller manages or lives in
    pub async fn get_society(
        &self,
        auth: &AuthContext,
        society_id: Uuid,
    ) -> Result<Society, SocietyError> {
        match auth.role {
            Role::Admin => self.owned_society(auth, society_id).await,
            Role::Tenant => {
                let member_of = self.member_society(auth, Some(society_id)).await?;
                self.load_society(member_of).await
            }
        }
    }

    /// Societies visible to the caller
    pub async fn list_societies(&self, auth: &AuthContext) -> Result<Vec<Society>, SocietyError> {
        match auth.role {
            Role::Admin => self
                .repos
                .societies
                .list_by_creator(auth.profile_id)
                .await
                .map_err(|e| SocietyError::storage("list societies", e)),
            Role::Tenant => {
                let profile = self.load_profile(auth.profile_id).await?;
                match profile.society_id {
                    Some(id) => Ok(vec![self.load_society(id).await?]),
                    None => Ok(Vec::new()),
                }
            }
        }
    }

    /// Apply changed fields to a society
    pub async fn update_society(
        &self,
        auth: &AuthContext,
        society_id: Uuid,
        patch: SocietyPatch,
    ) -> Result<Society, SocietyError> {
        let mut society = self.owned_society(auth, society_id).await?;

        let blank: Vec<String> = [
            ("name", &patch.name),
            ("address", &patch.address),
            ("city", &patch.city),
            ("state", &patch.state),
            ("pincode", &patch.pincode),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_some_and(|v| v.trim().is_empty()))
        .map(|(name, _)| name.to_string())
        .collect();
        if !blank.is_empty() {
            return Err(SocietyError::MissingFields { fields: blank });
        }

        if let Some(pincode) = &patch.pincode {
            validation::validate_pincode(pincode)?;
        }
        if let Some(units) = patch.total_units {
            validation::validate_total_units(units)?;
        }

        if let Some(name) = patch.name {
            society.name = name;
        }
        if let Some(address) = patch.address {
            society.address = address;
        }
        if let Some(city) = patch.city {
            society.city = city;
        }
        if let Some(state) = patch.state {
            society.state = state;
        }
        if let Some(pincode) = patch.pincode {
            society.pincode = pincode;
        }
        if let Some(units) = patch.total_units {
            society.total_units = units;
        }
        society.updated_at = Utc::now();

        self.repos
            .societies
            .update(&society)
            .await
            .map_err(|e| SocietyError::storage("update society", e))
    }

    /// Dashboard counters for a society
    pub async fn society_overview(
        &self,
        auth: &AuthContext,
        society_id: Uuid,
    ) -> Result<SocietyOverview, SocietyError> {
        self.owned_society(auth, society_id).await?;

        let tenants = self
            .repos
            .profiles
            .list_by_society(society_id, Some(Role::Tenant))
            .await
            .map_err(|e| SocietyError::storage("list tenants", e))?;
        let properties = self
            .repos
            .properties
            .list_by_society(society_id)
            .await
            .map_err(|e| SocietyError::storage("list properties", e))?;
        let requests = self
            .repos
            .maintenance
            .list_by_society(society_id, None)
            .await
            .map_err(|e| SocietyError::storage("list maintenance requests", e))?;
        let payments = self
            .repos
            .payments
            .list_by_society(society_id)
            .await
            .map_err(|e| SocietyError::storage("list payments", e))?;

        let open_requests = requests.iter().filter(|r| !r.status.is_terminal()).count();
        let resolved_requests = requests
            .iter()
            .filter(|r| r.status == RequestStatus::Resolved)
            .count();
        let (collected, pending): (Vec<_>, Vec<_>) = payments
            .iter()
            .partition(|p| p.status == PaymentStatus::Paid);

        Ok(SocietyOverview {
            society_id,
            tenants: tenants.len(),
            properties: properties.len(),
            occupied_properties: properties.iter().filter(|p| p.tenant_id.is_some()).count(),
            open_requests,
            resolved_requests,
            pending_payments_cents: total_cents(&pending)?,
            collected_payments_cents: total_cents(&collected)?,
        })
    }

    // ===== Worker Operations =====

    /// Attach a utility worker to a society
    pub async fn add_worker(
        &self,
        auth: &AuthContext,
        society_id: Uuid,
        form: NewWorker,
    ) -> Result<UtilityWorker, SocietyError> {
        self.owned_society(auth, society_id).await?;
        validate_worker(&form)?;

        let existing = self
            .repos
            .workers
            .list_by_society(society_id)
            .await
            .map_err(|e| SocietyError::storage("list workers", e))?;
        if existing.len() >= self.config.max_workers_per_society {
            return Err(SocietyError::conflict(format!(
                "society {} already has {} workers",
                society_id,
                existing.len()
            )));
        }

        let worker = UtilityWorker {
            id: Uuid::new_v4(),
            society_id,
            name: form.name,
            phone: form.phone,
            category: form.category,
            created_at: Utc::now(),
        };
        self.repos
            .workers
            .create(&worker)
            .await
            .map_err(|e| SocietyError::storage("create worker", e))
    }

    /// Workers of a society, visible to its admin and tenants
    pub async fn list_workers(
        &self,
        auth: &AuthContext,
        society_id: Uuid,
    ) -> Result<Vec<UtilityWorker>, SocietyError> {
        let society_id = self.member_society(auth, Some(society_id)).await?;
        self.repos
            .workers
            .list_by_society(society_id)
            .await
            .map_err(|e| SocietyError::storage("list workers", e))
    }

    /// Detach a worker from a society
    pub async fn remove_worker(
        &self,
        auth: &AuthContext,
        society_id: Uuid,
        worker_id: Uuid,
    ) -> Result<(), SocietyError> {
        self.owned_society(auth, society_id).await?;

        let worker = self
            .repos
            .workers
            .find_by_id(worker_id)
            .await
            .map_err(|e| SocietyError::storage("load worker", e))?
            .filter(|w| w.society_id == society_id)
            .ok_or_else(|| SocietyError::not_found("worker", worker_id))?;

        self.repos
            .workers
            .delete(worker.id)
            .await
            .map_err(|e| SocietyError::storage("delete worker", e))
    }
}

fn validate_worker(worker: &NewWorker) -> Result<(), SocietyError> {
    validation::require_fields(&[
        ("worker.name", worker.name.as_str()),
        ("worker.phone", worker.phone.as_str()),
    ])?;
    validation::validate_phone(&worker.phone)
}

fn total_cents(payments: &[&Payment]) -> Result<i64, SocietyError> {
    payments
        .iter()
        .try_fold(0i64, |total, p| total.checked_add(p.amount_cents))
        .ok_or_else(|| {
            tracing::error!(payments = payments.len(), "payment total overflows i64");
            SocietyError::Internal
        })
}
