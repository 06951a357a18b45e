//! Work requests and the shared templates/files behind them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use staffhub_auth::ScopedRecord;
use staffhub_core::{Company, Record, RequestFileId, TemplateId, UserId, WorkRequestId};

use crate::status::RequestStatus;

/// A work request filed by (and owned by) one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkRequest {
    pub id: WorkRequestId,
    pub owner: UserId,
    /// Free-form request kind, e.g. "it_support" or "certificate".
    pub kind: String,
    pub title: String,
    pub description: String,
    pub status: RequestStatus,
    pub admin_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkRequest {
    pub fn new(
        owner: UserId,
        kind: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: WorkRequestId::new(),
            owner,
            kind: kind.into(),
            title: title.into(),
            description: description.into(),
            status: RequestStatus::Pending,
            admin_comment: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for WorkRequest {
    type Id = WorkRequestId;

    fn id(&self) -> &WorkRequestId {
        &self.id
    }
}

impl ScopedRecord for WorkRequest {
    fn owner(&self) -> Option<UserId> {
        Some(self.owner)
    }
}

/// A reusable request template, shared within a company.
///
/// `company: None` marks a general template visible to everyone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestTemplate {
    pub id: TemplateId,
    pub title: String,
    pub description: Option<String>,
    pub company: Option<Company>,
    pub icon: Option<String>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl RequestTemplate {
    pub fn new(
        created_by: UserId,
        title: impl Into<String>,
        description: Option<String>,
        company: Option<Company>,
    ) -> Self {
        Self {
            id: TemplateId::new(),
            title: title.into(),
            description,
            company,
            icon: None,
            created_by,
            created_at: Utc::now(),
        }
    }
}

impl Record for RequestTemplate {
    type Id = TemplateId;

    fn id(&self) -> &TemplateId {
        &self.id
    }
}

impl ScopedRecord for RequestTemplate {
    fn company(&self) -> Option<&Company> {
        self.company.as_ref()
    }
}

/// A stored file backing request workflows, shared within a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestFile {
    pub id: RequestFileId,
    pub template_id: Option<TemplateId>,
    pub filename: String,
    pub original_name: Option<String>,
    pub url: String,
    pub file_type: Option<String>,
    pub company: Option<Company>,
    pub uploaded_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl RequestFile {
    pub fn new(
        uploaded_by: UserId,
        filename: impl Into<String>,
        url: impl Into<String>,
        company: Option<Company>,
    ) -> Self {
        Self {
            id: RequestFileId::new(),
            template_id: None,
            filename: filename.into(),
            original_name: None,
            url: url.into(),
            file_type: None,
            company,
            uploaded_by,
            created_at: Utc::now(),
        }
    }
}

impl Record for RequestFile {
    type Id = RequestFileId;

    fn id(&self) -> &RequestFileId {
        &self.id
    }
}

impl ScopedRecord for RequestFile {
    fn company(&self) -> Option<&Company> {
        self.company.as_ref()
    }
}
