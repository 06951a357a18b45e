use axum::{Router, routing::get};

pub mod activities;
pub mod admin;
pub mod auth;
pub mod broadcasts;
pub mod dashboard;
pub mod employees;
pub mod knowledge;
pub mod news;
pub mod notifications;
pub mod polls;
pub mod reminders;
pub mod requests;
pub mod search;
pub mod system;
pub mod vacations;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/auth/switch-role", axum::routing::post(auth::switch_role))
        .route("/dashboard", get(dashboard::stats))
        .route("/search", get(search::search))
        .nest("/employees", employees::router())
        .nest("/vacations", vacations::router())
        .nest("/requests", requests::router())
        .nest("/notifications", notifications::router())
        .nest("/reminders", reminders::router())
        .nest("/activities", activities::router())
        .nest("/news", news::router())
        .nest("/knowledge", knowledge::router())
        .nest("/polls", polls::router())
        .nest("/broadcasts", broadcasts::router())
        .nest("/admin", admin::router())
}
