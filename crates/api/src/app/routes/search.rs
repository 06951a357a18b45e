//! Portal-wide search.
//!
//! Everyone can search the directory, news and knowledge base. Request
//! and vacation hits appear only for elevated callers; for everyone
//! else those sections are absent rather than empty, so the response
//! does not reveal that the areas exist.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{Value, json};

use staffhub_auth::{Principal, Role, Scope};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn search(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<dto::SearchParams>,
) -> axum::response::Response {
    let needle = params.q.trim().to_lowercase();
    if needle.is_empty() {
        return (StatusCode::OK, Json(json!({ "query": "", "results": {} }))).into_response();
    }

    match collect(&services, &principal, &needle).await {
        Ok(results) => (
            StatusCode::OK,
            Json(json!({ "query": params.q, "results": results })),
        )
            .into_response(),
        Err(e) => errors::store_error("/dashboard", e),
    }
}

async fn collect(
    services: &AppServices,
    principal: &Principal,
    needle: &str,
) -> staffhub_infra::StoreResult<Value> {
    let mut results = serde_json::Map::new();

    let employees: Vec<_> = services
        .employees
        .list()
        .await?
        .iter()
        .filter(|e| {
            matches(&e.first_name, needle)
                || e.last_name.as_deref().is_some_and(|s| matches(s, needle))
                || e.username.as_deref().is_some_and(|s| matches(s, needle))
                || e.email.as_deref().is_some_and(|s| matches(s, needle))
        })
        .map(dto::employee_to_json)
        .collect();
    results.insert("employees".into(), Value::Array(employees));

    let news: Vec<_> = services
        .news
        .list(&Scope::All)
        .await?
        .iter()
        .filter(|n| matches(&n.title, needle) || matches(&n.content, needle))
        .map(dto::news_to_json)
        .collect();
    results.insert("news".into(), Value::Array(news));

    let articles: Vec<_> = services
        .articles
        .list(&Scope::All)
        .await?
        .iter()
        .filter(|a| matches(&a.title, needle) || matches(&a.content, needle))
        .map(dto::article_to_json)
        .collect();
    results.insert("articles".into(), Value::Array(articles));

    if principal.level() >= Role::Admin.level() {
        let requests: Vec<_> = services
            .requests
            .list(&Scope::All)
            .await?
            .iter()
            .filter(|r| matches(&r.title, needle) || matches(&r.kind, needle))
            .map(dto::work_request_to_json)
            .collect();
        results.insert("requests".into(), Value::Array(requests));

        let vacations: Vec<_> = services
            .vacations
            .list(&Scope::All)
            .await?
            .iter()
            .filter(|v| v.reason.as_deref().is_some_and(|s| matches(s, needle)))
            .map(dto::vacation_to_json)
            .collect();
        results.insert("vacations".into(), Value::Array(vacations));
    }

    Ok(Value::Object(results))
}

fn matches(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_is_case_insensitive() {
        assert!(matches("Quarterly Report", "report"));
        assert!(matches("IT-Support", "it-sup"));
        assert!(!matches("Quarterly Report", "budget"));
    }
}
