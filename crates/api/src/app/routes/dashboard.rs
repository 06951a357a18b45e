use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use serde_json::Value;

use staffhub_auth::{Principal, Role, Scope};
use staffhub_infra::StoreResult;
use staffhub_records::RequestStatus;

use crate::app::errors;
use crate::app::services::AppServices;

/// Dashboard stats. Elevated principals get portal-wide counts; everyone
/// else gets their own numbers plus the global news count.
pub async fn stats(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> axum::response::Response {
    let stats = if principal.level() >= Role::Admin.level() {
        portal_stats(&services).await
    } else {
        personal_stats(&services, &principal).await
    };

    match stats {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => errors::store_error("/dashboard", e),
    }
}

async fn portal_stats(services: &AppServices) -> StoreResult<Value> {
    let employees = services.employees.list().await?.len();
    let pending_requests = services
        .requests
        .list(&Scope::All)
        .await?
        .iter()
        .filter(|r| r.status == RequestStatus::Pending)
        .count();
    let approved_vacations = services
        .vacations
        .list(&Scope::All)
        .await?
        .iter()
        .filter(|v| v.status == RequestStatus::Approved)
        .count();
    let news = services.news.list(&Scope::All).await?.len();
    let broadcasts = services.broadcasts.list(&Scope::All).await?.len();
    let activities = services.activities.list(&Scope::All).await?.len();

    Ok(serde_json::json!({
        "portal": {
            "employees": employees,
            "pending_requests": pending_requests,
            "approved_vacations": approved_vacations,
            "news": news,
            "broadcasts": broadcasts,
            "activities": activities,
        }
    }))
}

async fn personal_stats(services: &AppServices, principal: &Principal) -> StoreResult<Value> {
    let mine = Scope::Owner(principal.id);

    let requests = services.requests.list(&mine).await?.len();
    let vacations = services.vacations.list(&mine).await?.len();
    let activities = services.activities.list(&mine).await?.len();
    let points = services
        .employees
        .find_by_id(principal.id)
        .await?
        .map(|rec| rec.points)
        .unwrap_or(0);
    let news = services.news.list(&Scope::All).await?.len();

    Ok(serde_json::json!({
        "personal": {
            "requests": requests,
            "vacations": vacations,
            "activities": activities,
            "points": points,
            "news": news,
        }
    }))
}
