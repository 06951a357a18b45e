use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{Value, json};

use staffhub_records::{
    Activity, Broadcast, EmployeeRecord, KnowledgeArticle, KnowledgeCategory, NewsItem,
    Notification, Poll, Reminder, RequestFile, RequestTemplate, Vacation, WorkRequest,
};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub messenger_id: String,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub messenger_id: String,
}

#[derive(Debug, Deserialize)]
pub struct BootstrapLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SwitchRoleRequest {
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub phone: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateVacationRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkRequestRequest {
    pub kind: String,
    pub title: String,
    pub description: String,
}

/// Status update for a vacation or work request (admin review).
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub status: String,
    pub admin_comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTemplateRequest {
    pub title: String,
    pub description: Option<String>,
    /// Ignored unless the caller's write scope is unrestricted.
    pub company: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateFileRequest {
    pub template_id: Option<String>,
    pub filename: String,
    pub original_name: Option<String>,
    pub url: String,
    pub file_type: Option<String>,
    /// Ignored unless the caller's write scope is unrestricted.
    pub company: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateNotificationRequest {
    pub title: String,
    pub message: String,
    /// Target user; `None` fans the notification out to every employee.
    pub target: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateReminderRequest {
    pub title: String,
    pub message: Option<String>,
    pub remind_at: DateTime<Utc>,
    /// Reminding someone else is admin-gated.
    pub target: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateActivityRequest {
    pub user_id: String,
    pub kind: String,
    pub description: Option<String>,
    pub points: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateNewsRequest {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub category_id: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePollRequest {
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub option: usize,
}

#[derive(Debug, Deserialize)]
pub struct CreateBroadcastRequest {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AssignRoleRequest {
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

// -------------------------
// Response mapping
// -------------------------

pub fn employee_to_json(rec: &EmployeeRecord) -> Value {
    json!({
        "id": rec.id.to_string(),
        "messenger_id": rec.messenger_id,
        "username": rec.username,
        "email": rec.email,
        "first_name": rec.first_name,
        "last_name": rec.last_name,
        "display_name": rec.display_name(),
        "phone": rec.phone,
        "company": rec.company.as_ref().map(|c| c.as_str()),
        "position": rec.position,
        "department": rec.department,
        "role": rec.role.as_str(),
        "level": rec.level(),
        "points": rec.points,
        "onboarding_completed": rec.onboarding_completed,
        "is_active": rec.is_active,
        "hire_date": rec.hire_date,
        "created_at": rec.created_at,
    })
}

pub fn vacation_to_json(v: &Vacation) -> Value {
    json!({
        "id": v.id.to_string(),
        "owner": v.owner.to_string(),
        "start_date": v.start_date,
        "end_date": v.end_date,
        "days": v.days,
        "status": v.status.as_str(),
        "reason": v.reason,
        "admin_comment": v.admin_comment,
        "created_at": v.created_at,
    })
}

pub fn work_request_to_json(r: &WorkRequest) -> Value {
    json!({
        "id": r.id.to_string(),
        "owner": r.owner.to_string(),
        "kind": r.kind,
        "title": r.title,
        "description": r.description,
        "status": r.status.as_str(),
        "admin_comment": r.admin_comment,
        "created_at": r.created_at,
        "updated_at": r.updated_at,
    })
}

pub fn template_to_json(t: &RequestTemplate) -> Value {
    json!({
        "id": t.id.to_string(),
        "title": t.title,
        "description": t.description,
        "company": t.company.as_ref().map(|c| c.as_str()),
        "icon": t.icon,
        "created_by": t.created_by.to_string(),
        "created_at": t.created_at,
    })
}

pub fn file_to_json(f: &RequestFile) -> Value {
    json!({
        "id": f.id.to_string(),
        "template_id": f.template_id.map(|t| t.to_string()),
        "filename": f.filename,
        "original_name": f.original_name,
        "url": f.url,
        "file_type": f.file_type,
        "company": f.company.as_ref().map(|c| c.as_str()),
        "uploaded_by": f.uploaded_by.to_string(),
        "created_at": f.created_at,
    })
}

pub fn notification_to_json(n: &Notification) -> Value {
    json!({
        "id": n.id.to_string(),
        "owner": n.owner.to_string(),
        "title": n.title,
        "message": n.message,
        "read": n.read,
        "created_at": n.created_at,
    })
}

pub fn reminder_to_json(r: &Reminder) -> Value {
    json!({
        "id": r.id.to_string(),
        "owner": r.owner.to_string(),
        "title": r.title,
        "message": r.message,
        "remind_at": r.remind_at,
        "sent": r.sent,
        "created_at": r.created_at,
    })
}

pub fn activity_to_json(a: &Activity) -> Value {
    json!({
        "id": a.id.to_string(),
        "owner": a.owner.to_string(),
        "kind": a.kind,
        "description": a.description,
        "points": a.points,
        "created_at": a.created_at,
    })
}

pub fn news_to_json(n: &NewsItem) -> Value {
    json!({
        "id": n.id.to_string(),
        "title": n.title,
        "content": n.content,
        "category": n.category,
        "author": n.author,
        "views": n.views,
        "created_at": n.created_at,
    })
}

pub fn category_to_json(c: &KnowledgeCategory) -> Value {
    json!({
        "id": c.id.to_string(),
        "name": c.name,
        "description": c.description,
        "icon": c.icon,
        "created_at": c.created_at,
    })
}

pub fn article_to_json(a: &KnowledgeArticle) -> Value {
    json!({
        "id": a.id.to_string(),
        "category_id": a.category_id.to_string(),
        "title": a.title,
        "content": a.content,
        "author": a.author,
        "views": a.views,
        "created_at": a.created_at,
        "updated_at": a.updated_at,
    })
}

/// Polls expose counts, never who voted for what.
pub fn poll_to_json(p: &Poll) -> Value {
    json!({
        "id": p.id.to_string(),
        "question": p.question,
        "options": p.options,
        "tally": p.tally(),
        "total_votes": p.votes.len(),
        "active": p.active,
        "created_at": p.created_at,
    })
}

pub fn broadcast_to_json(b: &Broadcast) -> Value {
    json!({
        "id": b.id.to_string(),
        "title": b.title,
        "message": b.message,
        "sent_by": b.sent_by.to_string(),
        "created_at": b.created_at,
    })
}
