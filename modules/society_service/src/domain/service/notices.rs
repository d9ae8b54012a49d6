//! Notice board

use super::Service;
use crate::contract::{AuthContext, NewNotice, Notice, SocietyError};
use crate::domain::events::DomainEvent;
use crate::domain::validation;
use chrono::Utc;
use uuid::Uuid;

impl Service {
    /// Publish a notice to a society
    pub async fn publish_notice(
        &self,
        auth: &AuthContext,
        society_id: Option<Uuid>,
        form: NewNotice,
    ) -> Result<Notice, SocietyError> {
        self.require_admin(auth)?;
        validation::require_fields(&[
            ("title", form.title.as_str()),
            ("content", form.content.as_str()),
        ])?;

        let length = form.content.chars().count();
        if length > self.config.max_notice_length {
            return Err(SocietyError::validation(format!(
                "notice content is {} characters, limit is {}",
                length, self.config.max_notice_length
            )));
        }

        let now = Utc::now();
        if form.expires_at.is_some_and(|expires_at| expires_at <= now) {
            return Err(SocietyError::validation("expires_at must be in the future"));
        }

        let society_id = self.member_society(auth, society_id).await?;
        let notice = Notice {
            id: Uuid::new_v4(),
            society_id,
            author_id: auth.profile_id,
            title: form.title,
            content: form.content,
            created_at: now,
            expires_at: form.expires_at,
        };

        let notice = self
            .repos
            .notices
            .create(&notice)
            .await
            .map_err(|e| SocietyError::storage("publish notice", e))?;

        self.publish(DomainEvent::notice_published(&notice)).await;
        Ok(notice)
    }

    /// Active notices of a society, newest first
    pub async fn list_notices(
        &self,
        auth: &AuthContext,
        society_id: Option<Uuid>,
    ) -> Result<Vec<Notice>, SocietyError> {
        let society_id = self.member_society(auth, society_id).await?;
        let now = Utc::now();

        let mut notices: Vec<Notice> = self
            .repos
            .notices
            .list_by_society(society_id)
            .await
            .map_err(|e| SocietyError::storage("list notices", e))?
            .into_iter()
            .filter(|n| n.expires_at.is_none_or(|expires_at| expires_at > now))
            .collect();
        notices.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(notices)
    }

    /// Remove a notice
    pub async fn delete_notice(
        &self,
        auth: &AuthContext,
        notice_id: Uuid,
    ) -> Result<(), SocietyError> {
        self.require_admin(auth)?;
        let notice = self
            .repos
            .notices
            .find_by_id(notice_id)
            .await
            .map_err(|e| SocietyError::storage("load notice", e))?
            .ok_or_else(|| SocietyError::not_found("notice", notice_id))?;
        self.owned_society(auth, notice.society_id).await?;

        self.repos
            .notices
            .delete(notice_id)
            .await
            .map_err(|e| SocietyError::storage("delete notice", e))
    }
}
