//! Directory records served by `/api/admin` and `/api/tenants`

use super::Service;
use crate::contract::{DirectorySociety, DirectoryTenant, SocietyError};
use crate::domain::validation;
use chrono::Utc;
use uuid::Uuid;

impl Service {
    pub async fn list_directory_societies(&self) -> Result<Vec<DirectorySociety>, SocietyError> {
        self.repos
            .directory
            .list_societies()
            .await
            .map_err(|e| SocietyError::storage("list directory societies", e))
    }

    pub async fn create_directory_society(
        &self,
        name: String,
        location: String,
        created_by: String,
    ) -> Result<DirectorySociety, SocietyError> {
        validation::require_fields(&[
            ("name", name.as_str()),
            ("location", location.as_str()),
            ("createdBy", created_by.as_str()),
        ])?;

        let society = DirectorySociety {
            id: Uuid::new_v4(),
            name,
            location,
            created_by,
            created_at: Utc::now(),
        };
        self.repos
            .directory
            .create_society(&society)
            .await
            .map_err(|e| SocietyError::storage("create directory society", e))
    }

    pub async fn list_directory_tenants(&self) -> Result<Vec<DirectoryTenant>, SocietyError> {
        self.repos
            .directory
            .list_tenants()
            .await
            .map_err(|e| SocietyError::storage("list directory tenants", e))
    }

    pub async fn create_directory_tenant(
        &self,
        name: String,
        email: String,
    ) -> Result<DirectoryTenant, SocietyError> {
        validation::require_fields(&[("name", name.as_str()), ("email", email.as_str())])?;
        validation::validate_email(&email)?;

        let tenant = DirectoryTenant {
            id: Uuid::new_v4(),
            name,
            email: email.trim().to_lowercase(),
            created_at: Utc::now(),
        };
        self.repos
            .directory
            .create_tenant(&tenant)
            .await
            .map_err(|e| SocietyError::storage("create directory tenant", e))
    }
}
