use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::{Value, json};

use staffhub_api::app::build_app;
use staffhub_api::config::Config;
use staffhub_auth::{Role, SessionClaims};
use staffhub_core::{UserId, VacationId};

const SESSION_SECRET: &str = "test-secret";
const BOOTSTRAP_EMAIL: &str = "dev@portal.test";
const BOOTSTRAP_PASSWORD: &str = "bootstrap-pw";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build app (same router as prod) on in-memory stores, bound to an
        // ephemeral port.
        let config = Config {
            session_secret: SESSION_SECRET.to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            bootstrap_email: Some(BOOTSTRAP_EMAIL.to_string()),
            bootstrap_password: Some(BOOTSTRAP_PASSWORD.to_string()),
            database_url: None,
        };
        let app = build_app(config).await;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Client that surfaces 303 responses instead of following them.
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("failed to build client")
}

fn redirect_target(res: &reqwest::Response) -> String {
    res.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn notice_cookie(res: &reqwest::Response) -> String {
    res.headers()
        .get(reqwest::header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn mint_expired_session() -> String {
    let now = Utc::now();
    let claims = SessionClaims {
        sub: UserId::new(),
        role: Role::Employee,
        original_role: Role::Employee,
        company: None,
        issued_at: now - ChronoDuration::hours(48),
        expires_at: now - ChronoDuration::hours(24),
    };
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SESSION_SECRET.as_bytes()),
    )
    .expect("failed to encode session token")
}

async fn register(client: &reqwest::Client, base: &str, messenger_id: &str, name: &str) -> String {
    let res = client
        .post(format!("{base}/auth/register"))
        .json(&json!({ "messenger_id": messenger_id, "first_name": name }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    body["id"].as_str().unwrap().to_string()
}

async fn login(client: &reqwest::Client, base: &str, messenger_id: &str) -> String {
    let res = client
        .post(format!("{base}/auth/login"))
        .json(&json!({ "messenger_id": messenger_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

async fn developer_token(client: &reqwest::Client, base: &str) -> String {
    let res = client
        .post(format!("{base}/auth/bootstrap"))
        .json(&json!({ "email": BOOTSTRAP_EMAIL, "password": BOOTSTRAP_PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["role"], "developer");
    body["token"].as_str().unwrap().to_string()
}

async fn whoami(client: &reqwest::Client, base: &str, token: &str) -> Value {
    let res = client
        .get(format!("{base}/whoami"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_public_and_protected_routes_redirect_to_login() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // No session at all.
    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(redirect_target(&res), "/login");

    // Expired and garbage tokens look exactly like no session.
    for token in [mint_expired_session(), "not-a-token".to_string()] {
        let res = client
            .get(format!("{}/whoami", srv.base_url))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect_target(&res), "/login");
    }
}

#[tokio::test]
async fn registration_is_find_or_create() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({ "messenger_id": "m-100", "first_name": "Dana", "last_name": "Reeve" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["created"], json!(true));
    assert_eq!(created["role"], "employee");

    // Registering the same messenger id again resolves the same account.
    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({ "messenger_id": "m-100", "first_name": "Dana" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let existing: Value = res.json().await.unwrap();
    assert_eq!(existing["created"], json!(false));
    assert_eq!(existing["id"], created["id"]);

    let token = login(&client, &srv.base_url, "m-100").await;
    let me = whoami(&client, &srv.base_url, &token).await;
    assert_eq!(me["id"], created["id"]);
    assert_eq!(me["role"], "employee");
    assert_eq!(me["level"], json!(1));
    assert_eq!(me["impersonating"], json!(false));
    assert_eq!(me["is_admin"], json!(false));
}

#[tokio::test]
async fn front_door_rejections_redirect_with_a_notice() {
    let srv = TestServer::spawn().await;
    let client = client();

    // Unknown messenger id: go register first.
    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({ "messenger_id": "nobody" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(redirect_target(&res), "/register");
    assert!(notice_cookie(&res).starts_with("notice="));

    // Wrong bootstrap credentials.
    let res = client
        .post(format!("{}/auth/bootstrap", srv.base_url))
        .json(&json!({ "email": BOOTSTRAP_EMAIL, "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(redirect_target(&res), "/login");
}

#[tokio::test]
async fn developers_impersonate_and_step_back_up() {
    let srv = TestServer::spawn().await;
    let client = client();
    let dev = developer_token(&client, &srv.base_url).await;

    let res = client
        .post(format!("{}/auth/switch-role", srv.base_url))
        .bearer_auth(&dev)
        .json(&json!({ "role": "employee" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["role"], "employee");
    assert_eq!(body["original_role"], "developer");
    let lowered = body["token"].as_str().unwrap().to_string();

    let me = whoami(&client, &srv.base_url, &lowered).await;
    assert_eq!(me["role"], "employee");
    assert_eq!(me["level"], json!(1));
    assert_eq!(me["original_role"], "developer");
    assert_eq!(me["impersonating"], json!(true));
    assert_eq!(me["is_admin"], json!(false));

    // The lowered session steps back up: the decision consults the
    // original role, not the active one.
    let res = client
        .post(format!("{}/auth/switch-role", srv.base_url))
        .bearer_auth(&lowered)
        .json(&json!({ "role": "developer" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["role"], "developer");
    assert_eq!(body["original_role"], "developer");
}

#[tokio::test]
async fn role_switching_is_reserved_for_developers() {
    let srv = TestServer::spawn().await;
    let client = client();

    register(&client, &srv.base_url, "m-emp", "Erin").await;
    let token = login(&client, &srv.base_url, "m-emp").await;

    let res = client
        .post(format!("{}/auth/switch-role", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "role": "admin" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(redirect_target(&res), "/dashboard");

    // An unknown role name is a redirect too, never a 4xx.
    let dev = developer_token(&client, &srv.base_url).await;
    let res = client
        .post(format!("{}/auth/switch-role", srv.base_url))
        .bearer_auth(&dev)
        .json(&json!({ "role": "superuser" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(redirect_target(&res), "/dashboard");
}

#[tokio::test]
async fn role_assignment_policy_is_enforced_end_to_end() {
    let srv = TestServer::spawn().await;
    let client = client();
    let dev = developer_token(&client, &srv.base_url).await;

    let alice = register(&client, &srv.base_url, "m-alice", "Alice").await;
    let bob = register(&client, &srv.base_url, "m-bob", "Bob").await;

    // Developers assign anything.
    let res = client
        .post(format!("{}/admin/users/{alice}/role", srv.base_url))
        .bearer_auth(&dev)
        .json(&json!({ "role": "admin" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["role"], "admin");

    // A fresh login picks up the stored role.
    let alice_token = login(&client, &srv.base_url, "m-alice").await;
    let me = whoami(&client, &srv.base_url, &alice_token).await;
    assert_eq!(me["role"], "admin");
    assert_eq!(me["is_admin"], json!(true));

    // Admins never mint admins.
    let res = client
        .post(format!("{}/admin/users/{bob}/role", srv.base_url))
        .bearer_auth(&alice_token)
        .json(&json!({ "role": "admin" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(redirect_target(&res), "/dashboard");

    // Nor touch a peer or superior.
    let dev_me = whoami(&client, &srv.base_url, &dev).await;
    let dev_id = dev_me["id"].as_str().unwrap();
    let res = client
        .post(format!("{}/admin/users/{dev_id}/role", srv.base_url))
        .bearer_auth(&alice_token)
        .json(&json!({ "role": "employee" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    // Strictly below their own level is fine.
    let res = client
        .post(format!("{}/admin/users/{bob}/role", srv.base_url))
        .bearer_auth(&alice_token)
        .json(&json!({ "role": "moderator" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["role"], "moderator");

    // Employees never assign at all.
    let carol = register(&client, &srv.base_url, "m-carol", "Carol").await;
    let carol_token = login(&client, &srv.base_url, "m-carol").await;
    let res = client
        .post(format!("{}/admin/users/{carol}/role", srv.base_url))
        .bearer_auth(&carol_token)
        .json(&json!({ "role": "manager" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(redirect_target(&res), "/dashboard");
}

#[tokio::test]
async fn vacations_outside_the_callers_scope_look_missing() {
    let srv = TestServer::spawn().await;
    let client = client();

    register(&client, &srv.base_url, "m-alice", "Alice").await;
    register(&client, &srv.base_url, "m-bob", "Bob").await;
    let alice_token = login(&client, &srv.base_url, "m-alice").await;
    let bob_token = login(&client, &srv.base_url, "m-bob").await;
    let dev = developer_token(&client, &srv.base_url).await;

    // Alice files a vacation.
    let res = client
        .post(format!("{}/vacations", srv.base_url))
        .bearer_auth(&alice_token)
        .json(&json!({ "start_date": "2026-07-01", "end_date": "2026-07-05", "reason": "summer" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let vacation: Value = res.json().await.unwrap();
    assert_eq!(vacation["days"], json!(5));
    assert_eq!(vacation["status"], "pending");
    let id = vacation["id"].as_str().unwrap().to_string();

    // Alice sees it; Bob's list is empty.
    let res = client
        .get(format!("{}/vacations", srv.base_url))
        .bearer_auth(&alice_token)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 1);

    let res = client
        .get(format!("{}/vacations", srv.base_url))
        .bearer_auth(&bob_token)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 0);

    // For Bob, Alice's vacation and a nonexistent one answer identically.
    let foreign = client
        .get(format!("{}/vacations/{id}", srv.base_url))
        .bearer_auth(&bob_token)
        .send()
        .await
        .unwrap();
    let missing = client
        .get(format!("{}/vacations/{}", srv.base_url, VacationId::new()))
        .bearer_auth(&bob_token)
        .send()
        .await
        .unwrap();
    assert_eq!(foreign.status(), StatusCode::SEE_OTHER);
    assert_eq!(foreign.status(), missing.status());
    assert_eq!(redirect_target(&foreign), redirect_target(&missing));
    assert_eq!(notice_cookie(&foreign), notice_cookie(&missing));

    // The developer sees everything and reviews it.
    let res = client
        .post(format!("{}/vacations/{id}/review", srv.base_url))
        .bearer_auth(&dev)
        .json(&json!({ "status": "approved", "admin_comment": "enjoy" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "approved");
    assert_eq!(body["admin_comment"], "enjoy");

    // The owner sees the review outcome.
    let res = client
        .get(format!("{}/vacations/{id}", srv.base_url))
        .bearer_auth(&alice_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "approved");

    // Elevated accounts review vacations; they do not file them.
    let res = client
        .post(format!("{}/vacations", srv.base_url))
        .bearer_auth(&dev)
        .json(&json!({ "start_date": "2026-07-01", "end_date": "2026-07-02" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(redirect_target(&res), "/dashboard");
}

#[tokio::test]
async fn shared_templates_are_company_scoped() {
    let srv = TestServer::spawn().await;
    let client = client();
    let dev = developer_token(&client, &srv.base_url).await;

    // One Acme template, one untagged (general) template.
    let res = client
        .post(format!("{}/requests/templates", srv.base_url))
        .bearer_auth(&dev)
        .json(&json!({ "title": "Acme onboarding", "company": "Acme" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let acme_template: Value = res.json().await.unwrap();
    assert_eq!(acme_template["company"], "Acme");

    let res = client
        .post(format!("{}/requests/templates", srv.base_url))
        .bearer_auth(&dev)
        .json(&json!({ "title": "General request" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let general: Value = res.json().await.unwrap();
    assert_eq!(general["company"], Value::Null);

    // Alice joins Acme, Bob joins Globex; the company claim is read at
    // login time, so each logs in after updating the profile.
    register(&client, &srv.base_url, "m-alice", "Alice").await;
    let bob_id = register(&client, &srv.base_url, "m-bob", "Bob").await;
    let alice_token = login(&client, &srv.base_url, "m-alice").await;
    let bob_token = login(&client, &srv.base_url, "m-bob").await;

    let res = client
        .post(format!("{}/employees/me", srv.base_url))
        .bearer_auth(&alice_token)
        .json(&json!({ "company": "Acme" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let res = client
        .post(format!("{}/employees/me", srv.base_url))
        .bearer_auth(&bob_token)
        .json(&json!({ "company": "Globex" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let alice_token = login(&client, &srv.base_url, "m-alice").await;
    let bob_token = login(&client, &srv.base_url, "m-bob").await;

    // Acme sees its template plus the general one; Globex only the general.
    let res = client
        .get(format!("{}/requests/templates", srv.base_url))
        .bearer_auth(&alice_token)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 2);

    let res = client
        .get(format!("{}/requests/templates", srv.base_url))
        .bearer_auth(&bob_token)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "General request");

    // Employees cannot manage shared templates.
    let res = client
        .post(format!("{}/requests/templates", srv.base_url))
        .bearer_auth(&bob_token)
        .json(&json!({ "title": "Bob's template" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(redirect_target(&res), "/dashboard");

    // A moderator writes into their own company scope, whatever the
    // request body claims.
    let res = client
        .post(format!("{}/admin/users/{bob_id}/role", srv.base_url))
        .bearer_auth(&dev)
        .json(&json!({ "role": "moderator" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bob_token = login(&client, &srv.base_url, "m-bob").await;

    let res = client
        .post(format!("{}/requests/templates", srv.base_url))
        .bearer_auth(&bob_token)
        .json(&json!({ "title": "Globex form", "company": "Acme" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["company"], "Globex");

    // Acme still sees exactly its two.
    let res = client
        .get(format!("{}/requests/templates", srv.base_url))
        .bearer_auth(&alice_token)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn notifications_fan_out_and_stay_private() {
    let srv = TestServer::spawn().await;
    let client = client();
    let dev = developer_token(&client, &srv.base_url).await;

    register(&client, &srv.base_url, "m-alice", "Alice").await;
    register(&client, &srv.base_url, "m-bob", "Bob").await;
    let alice_token = login(&client, &srv.base_url, "m-alice").await;
    let bob_token = login(&client, &srv.base_url, "m-bob").await;

    // No target: one notification per account, the developer's included.
    let res = client
        .post(format!("{}/notifications", srv.base_url))
        .bearer_auth(&dev)
        .json(&json!({ "title": "Maintenance", "message": "Friday 18:00" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["delivered"], json!(3));

    // Each employee sees exactly their own copy.
    let res = client
        .get(format!("{}/notifications", srv.base_url))
        .bearer_auth(&alice_token)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Maintenance");
    assert_eq!(items[0]["read"], json!(false));
    let alice_notification = items[0]["id"].as_str().unwrap().to_string();

    // Marking someone else's copy read looks like a missing row.
    let res = client
        .post(format!(
            "{}/notifications/{alice_notification}/read",
            srv.base_url
        ))
        .bearer_auth(&bob_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(redirect_target(&res), "/notifications");

    // Marking one's own works.
    let res = client
        .post(format!(
            "{}/notifications/{alice_notification}/read",
            srv.base_url
        ))
        .bearer_auth(&alice_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["read"], json!(true));
}

#[tokio::test]
async fn dashboard_stats_match_the_callers_elevation() {
    let srv = TestServer::spawn().await;
    let client = client();
    let dev = developer_token(&client, &srv.base_url).await;

    register(&client, &srv.base_url, "m-alice", "Alice").await;
    let alice_token = login(&client, &srv.base_url, "m-alice").await;

    let res = client
        .post(format!("{}/vacations", srv.base_url))
        .bearer_auth(&alice_token)
        .json(&json!({ "start_date": "2026-08-03", "end_date": "2026-08-07" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .get(format!("{}/dashboard", srv.base_url))
        .bearer_auth(&alice_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["personal"]["vacations"], json!(1));
    assert!(body.get("portal").is_none());

    let res = client
        .get(format!("{}/dashboard", srv.base_url))
        .bearer_auth(&dev)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["portal"]["employees"], json!(2));
    assert!(body.get("personal").is_none());
}

#[tokio::test]
async fn search_hides_elevated_sections_from_employees() {
    let srv = TestServer::spawn().await;
    let client = client();
    let dev = developer_token(&client, &srv.base_url).await;

    register(&client, &srv.base_url, "m-alice", "Alice").await;
    let alice_token = login(&client, &srv.base_url, "m-alice").await;

    let res = client
        .post(format!("{}/vacations", srv.base_url))
        .bearer_auth(&alice_token)
        .json(&json!({
            "start_date": "2026-09-01",
            "end_date": "2026-09-03",
            "reason": "conference trip"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    // Employees get directory hits but no request/vacation sections.
    let res = client
        .get(format!("{}/search?q=alice", srv.base_url))
        .bearer_auth(&alice_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["results"]["employees"].as_array().unwrap().len(), 1);
    assert!(body["results"].get("vacations").is_none());

    // Elevated callers see the vacation hit.
    let res = client
        .get(format!("{}/search?q=conference", srv.base_url))
        .bearer_auth(&dev)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["results"]["vacations"].as_array().unwrap().len(), 1);
}
