//! `staffhub-core` — portal foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod company;
pub mod error;
pub mod id;
pub mod record;

pub use company::Company;
pub use error::{DomainError, DomainResult};
pub use id::{
    ActivityId, ArticleId, BroadcastId, CategoryId, NewsId, NotificationId, PollId, ReminderId,
    RequestFileId, TemplateId, UserId, VacationId, WorkRequestId,
};
pub use record::Record;
