//! Society documents

use super::Service;
use crate::contract::{AuthContext, Document, NewDocument, SocietyError};
use crate::domain::validation;
use chrono::Utc;
use sha2::{Digest, Sha256};
use uuid::Uuid;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

impl Service {
    /// Store a document for a society
    ///
    /// Content goes to the blob store first; the metadata row is inserted
    /// only once the content is durable.
    pub async fn upload_document(
        &self,
        auth: &AuthContext,
        society_id: Option<Uuid>,
        form: NewDocument,
    ) -> Result<Document, SocietyError> {
        validation::validate_file_name(&form.file_name)?;
        if form.content.is_empty() {
            return Err(SocietyError::validation("document content is empty"));
        }
        if form.content.len() > self.config.max_document_size {
            return Err(SocietyError::PayloadTooLarge {
                limit: self.config.max_document_size,
            });
        }

        let society_id = self.member_society(auth, society_id).await?;
        let id = Uuid::new_v4();
        let storage_key = format!("{}/{}", society_id, id);
        let content_type = if form.content_type.trim().is_empty() {
            DEFAULT_CONTENT_TYPE.to_string()
        } else {
            form.content_type.trim().to_string()
        };

        let document = Document {
            id,
            society_id,
            uploaded_by: auth.profile_id,
            file_name: form.file_name.trim().to_string(),
            content_type,
            size_bytes: form.content.len() as i64,
            sha256: hex::encode(Sha256::digest(&form.content)),
            storage_key,
            created_at: Utc::now(),
        };

        self.repos
            .blobs
            .put(&document.storage_key, &form.content)
            .await
            .map_err(|e| SocietyError::storage("store document content", e))?;

        match self.repos.documents.create(&document).await {
            Ok(document) => {
                tracing::info!(
                    document_id = %document.id,
                    %society_id,
                    size_bytes = document.size_bytes,
                    "document uploaded"
                );
                Ok(document)
            }
            Err(e) => {
                if let Err(cleanup) = self.repos.blobs.delete(&document.storage_key).await {
                    tracing::warn!(
                        key = %document.storage_key,
                        error = %cleanup,
                        "failed to remove orphaned document content"
                    );
                }
                Err(SocietyError::storage("save document", e))
            }
        }
    }

    /// Documents of a society in upload order
    pub async fn list_documents(
        &self,
        auth: &AuthContext,
        society_id: Option<Uuid>,
    ) -> Result<Vec<Document>, SocietyError> {
        let society_id = self.member_society(auth, society_id).await?;
        self.repos
            .documents
            .list_by_society(society_id)
            .await
            .map_err(|e| SocietyError::storage("list documents", e))
    }

    /// Metadata and content of a document
    pub async fn document_content(
        &self,
        auth: &AuthContext,
        document_id: Uuid,
    ) -> Result<(Document, Vec<u8>), SocietyError> {
        let document = self
            .repos
            .documents
            .find_by_id(document_id)
            .await
            .map_err(|e| SocietyError::storage("load document", e))?
            .ok_or_else(|| SocietyError::not_found("document", document_id))?;

        if self.member_society(auth, Some(document.society_id)).await.is_err() {
            return Err(SocietyError::not_found("document", document_id));
        }

        let content = self
            .repos
            .blobs
            .get(&document.storage_key)
            .await
            .map_err(|e| SocietyError::storage("read document content", e))?;

        Ok((document, content))
    }
}
