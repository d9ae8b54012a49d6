//! Accounts, profiles and properties

use super::Service;
use crate::contract::{
    AuthContext, NewProperty, Profile, ProfilePatch, Property, Role, Session, SignUp,
    SocietyError,
};
use crate::domain::{auth, validation};
use chrono::Utc;
use uuid::Uuid;

impl Service {
    // ===== Authentication =====

    /// Register a profile and open a session for it
    pub async fn sign_up(&self, form: SignUp) -> Result<Session, SocietyError> {
        validation::require_fields(&[
            ("email", form.email.as_str()),
            ("password", form.password.as_str()),
            ("first_name", form.first_name.as_str()),
            ("last_name", form.last_name.as_str()),
        ])?;
        validation::validate_email(&form.email)?;
        validation::validate_password(&form.password)?;
        if let Some(phone) = &form.phone {
            validation::validate_phone(phone)?;
        }

        let email = normalize_email(&form.email);
        let existing = self
            .repos
            .profiles
            .find_by_email(&email)
            .await
            .map_err(|e| SocietyError::storage("look up email", e))?;
        if existing.is_some() {
            return Err(SocietyError::conflict(format!(
                "an account already exists for {}",
                email
            )));
        }

        let now = Utc::now();
        let profile = Profile {
            id: Uuid::new_v4(),
            email,
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            role: form.role,
            society_id: None,
            phone: form.phone,
            created_at: now,
            updated_at: now,
        };
        let credential = auth::hash_password(profile.id, &form.password)?;

        let profile = self
            .repos
            .profiles
            .create(&profile, &credential)
            .await
            .map_err(|e| SocietyError::storage("create profile", e))?;

        tracing::info!(profile_id = %profile.id, role = profile.role.as_str(), "profile registered");
        self.open_session(profile, None)
    }

    /// Check credentials and open a session
    ///
    /// `redirect_to` is the page the user originally asked for; it is echoed
    /// back when it is a local path, otherwise the role's landing page is used.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        redirect_to: Option<String>,
    ) -> Result<Session, SocietyError> {
        let email = normalize_email(email);
        let profile = self
            .repos
            .profiles
            .find_by_email(&email)
            .await
            .map_err(|e| SocietyError::storage("look up email", e))?
            .ok_or(SocietyError::Unauthorized)?;

        let credential = self
            .repos
            .profiles
            .find_credential(profile.id)
            .await
            .map_err(|e| SocietyError::storage("load credential", e))?
            .ok_or(SocietyError::Unauthorized)?;

        if !auth::verify_password(&credential, password) {
            tracing::debug!(profile_id = %profile.id, "password mismatch");
            return Err(SocietyError::Unauthorized);
        }

        self.open_session(profile, redirect_to)
    }

    /// Resolve a bearer token to the current caller
    ///
    /// The role is taken from the stored profile, so tokens of deleted
    /// profiles stop working immediately.
    pub async fn authenticate(&self, token: &str) -> Result<AuthContext, SocietyError> {
        let claimed = self.tokens.verify(token)?;
        let profile = self
            .repos
            .profiles
            .find_by_id(claimed.profile_id)
            .await
            .map_err(|e| SocietyError::storage("load profile", e))?
            .ok_or(SocietyError::Unauthorized)?;

        Ok(AuthContext {
            profile_id: profile.id,
            role: profile.role,
        })
    }

    /// Landing page for a role
    pub fn landing_page(&self, role: Role) -> &str {
        match role {
            Role::Admin => &self.config.admin_landing_page,
            Role::Tenant => &self.config.tenant_landing_page,
        }
    }

    fn open_session(
        &self,
        profile: Profile,
        redirect_to: Option<String>,
    ) -> Result<Session, SocietyError> {
        let (token, expires_at) = self.tokens.issue(profile.id, profile.role, Utc::now())?;
        let redirect_to = redirect_to
            .filter(|target| validation::is_local_redirect(target))
            .unwrap_or_else(|| self.landing_page(profile.role).to_string());

        Ok(Session {
            token,
            expires_at,
            profile,
            redirect_to,
        })
    }

    // ===== Profile Operations =====

    pub async fn get_profile(&self, auth: &AuthContext) -> Result<Profile, SocietyError> {
        self.load_profile(auth.profile_id).await
    }

    /// Update the caller's own name and phone
    pub async fn update_profile(
        &self,
        auth: &AuthContext,
        patch: ProfilePatch,
    ) -> Result<Profile, SocietyError> {
        let mut profile = self.load_profile(auth.profile_id).await?;

        if let Some(first_name) = patch.first_name {
            validation::require_fields(&[("first_name", first_name.as_str())])?;
            profile.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = patch.last_name {
            validation::require_fields(&[("last_name", last_name.as_str())])?;
            profile.last_name = last_name.trim().to_string();
        }
        if let Some(phone) = patch.phone {
            if phone.trim().is_empty() {
                profile.phone = None;
            } else {
                validation::validate_phone(&phone)?;
                profile.phone = Some(phone);
            }
        }
        profile.updated_at = Utc::now();

        self.repos
            .profiles
            .update(&profile)
            .await
            .map_err(|e| SocietyError::storage("update profile", e))
    }

    /// Link the calling tenant to an existing society
    pub async fn join_society(
        &self,
        auth: &AuthContext,
        society_id: Uuid,
    ) -> Result<Profile, SocietyError> {
        self.require_tenant(auth)?;
        let profile = self.load_profile(auth.profile_id).await?;

        match profile.society_id {
            Some(current) if current == society_id => return Ok(profile),
            Some(current) => {
                return Err(SocietyError::conflict(format!(
                    "already a member of society {}",
                    current
                )))
            }
            None => {}
        }

        self.load_society(society_id).await?;
        self.repos
            .profiles
            .set_society(profile.id, society_id)
            .await
            .map_err(|e| SocietyError::storage("join society", e))?;

        tracing::info!(profile_id = %profile.id, %society_id, "tenant joined society");
        self.load_profile(profile.id).await
    }

    /// Tenants linked to a society
    pub async fn list_tenants(
        &self,
        auth: &AuthContext,
        society_id: Option<Uuid>,
    ) -> Result<Vec<Profile>, SocietyError> {
        self.require_admin(auth)?;
        let society_id = self.member_society(auth, society_id).await?;

        self.repos
            .profiles
            .list_by_society(society_id, Some(Role::Tenant))
            .await
            .map_err(|e| SocietyError::storage("list tenants", e))
    }

    // ===== Property Operations =====

    /// Add a unit to a society
    pub async fn create_property(
        &self,
        auth: &AuthContext,
        society_id: Option<Uuid>,
        form: NewProperty,
    ) -> Result<Property, SocietyError> {
        self.require_admin(auth)?;
        let society_id = self.member_society(auth, society_id).await?;

        validation::require_fields(&[("unit_number", form.unit_number.as_str())])?;
        if form.monthly_rent_cents < 0 {
            return Err(SocietyError::validation("monthly rent cannot be negative"));
        }

        let now = Utc::now();
        let property = Property {
            id: Uuid::new_v4(),
            society_id,
            unit_number: form.unit_number,
            block: form.block.filter(|b| !b.trim().is_empty()),
            floor: form.floor,
            monthly_rent_cents: form.monthly_rent_cents,
            tenant_id: None,
            created_at: now,
            updated_at: now,
        };

        self.repos
            .properties
            .create(&property)
            .await
            .map_err(|e| SocietyError::storage("create property", e))
    }

    /// Units of a society
    pub async fn list_properties(
        &self,
        auth: &AuthContext,
        society_id: Option<Uuid>,
    ) -> Result<Vec<Property>, SocietyError> {
        let society_id = self.member_society(auth, society_id).await?;
        self.repos
            .properties
            .list_by_society(society_id)
            .await
            .map_err(|e| SocietyError::storage("list properties", e))
    }

    /// Assign (or with `None`, vacate) the tenant of a unit
    ///
    /// Assigning also links the tenant's profile to the unit's society.
    pub async fn assign_tenant(
        &self,
        auth: &AuthContext,
        property_id: Uuid,
        tenant_id: Option<Uuid>,
    ) -> Result<Property, SocietyError> {
        let mut property = self
            .repos
            .properties
            .find_by_id(property_id)
            .await
            .map_err(|e| SocietyError::storage("load property", e))?
            .ok_or_else(|| SocietyError::not_found("property", property_id))?;
        self.owned_society(auth, property.society_id).await?;

        if let Some(tenant_id) = tenant_id {
            let tenant = self.load_profile(tenant_id).await?;
            if tenant.role != Role::Tenant {
                return Err(SocietyError::validation(format!(
                    "profile {} is not a tenant",
                    tenant_id
                )));
            }
            if tenant
                .society_id
                .is_some_and(|society_id| society_id != property.society_id)
            {
                return Err(SocietyError::conflict(format!(
                    "tenant {} belongs to another society",
                    tenant_id
                )));
            }
            if tenant.society_id.is_none() {
                self.repos
                    .profiles
                    .set_society(tenant_id, property.society_id)
                    .await
                    .map_err(|e| SocietyError::storage("link tenant to society", e))?;
            }
        }

        property.tenant_id = tenant_id;
        property.updated_at = Utc::now();

        self.repos
            .properties
            .update(&property)
            .await
            .map_err(|e| SocietyError::storage("update property", e))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
