use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use staffhub_auth::{Principal, Role, Scope, require_min_level};
use staffhub_core::{DomainError, PollId};
use staffhub_records::Poll;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one))
        .route("/:id/vote", post(vote))
        .route("/:id/close", post(close))
}

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(_principal): Extension<Principal>,
) -> axum::response::Response {
    match services.polls.list(&Scope::All).await {
        Ok(items) => {
            let items: Vec<_> = items.iter().map(dto::poll_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error("/polls", e),
    }
}

pub async fn get_one(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(_principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: PollId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::see_other("/polls", &e.to_string()),
    };
    match services.polls.get(&Scope::All, &id).await {
        Ok(poll) => (StatusCode::OK, Json(dto::poll_to_json(&poll))).into_response(),
        Err(e) => errors::store_error("/polls", e),
    }
}

pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreatePollRequest>,
) -> axum::response::Response {
    if let Err(e) = require_min_level(&principal, Role::Admin) {
        return errors::auth_error(e);
    }
    let poll = match Poll::new(body.question, body.options) {
        Ok(poll) => poll,
        Err(e) => return errors::see_other("/polls", &e.to_string()),
    };

    let json = dto::poll_to_json(&poll);
    match services.polls.insert(poll).await {
        Ok(()) => (StatusCode::CREATED, Json(json)).into_response(),
        Err(e) => errors::store_error("/polls", e),
    }
}

/// Voting again replaces the caller's previous choice.
pub async fn vote(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(body): Json<dto::VoteRequest>,
) -> axum::response::Response {
    let id: PollId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::see_other("/polls", &e.to_string()),
    };

    let voter = principal.id;
    let apply = |p: &mut Poll| -> Result<(), DomainError> { p.vote(voter, body.option) };
    match services.polls.update_with(&Scope::All, &id, &apply).await {
        Ok(poll) => (StatusCode::OK, Json(dto::poll_to_json(&poll))).into_response(),
        Err(e) => errors::store_error("/polls", e),
    }
}

pub async fn close(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = require_min_level(&principal, Role::Admin) {
        return errors::auth_error(e);
    }
    let id: PollId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::see_other("/polls", &e.to_string()),
    };

    let apply = |p: &mut Poll| -> Result<(), DomainError> {
        p.close();
        Ok(())
    };
    match services.polls.update_with(&Scope::All, &id, &apply).await {
        Ok(poll) => (StatusCode::OK, Json(dto::poll_to_json(&poll))).into_response(),
        Err(e) => errors::store_error("/polls", e),
    }
}
