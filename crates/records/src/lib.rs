//! `staffhub-records` — the portal's record types.
//!
//! Plain data rows plus their scoping accessors. Authorization logic lives
//! in `staffhub-auth`; persistence in `staffhub-infra`.

pub mod activity;
pub mod employee;
pub mod knowledge;
pub mod news;
pub mod notify;
pub mod poll;
pub mod request;
pub mod status;
pub mod vacation;

pub use activity::Activity;
pub use employee::{EmployeeRecord, ProfileUpdate};
pub use knowledge::{KnowledgeArticle, KnowledgeCategory};
pub use news::NewsItem;
pub use notify::{Broadcast, Notification, Reminder};
pub use poll::Poll;
pub use request::{RequestFile, RequestTemplate, WorkRequest};
pub use status::RequestStatus;
pub use vacation::Vacation;
