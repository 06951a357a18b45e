//! Store wiring behind the handlers.
//!
//! Handlers program against the store traits only. The in-memory wiring
//! serves dev runs and the black-box tests; setting `DATABASE_URL` swaps
//! the durable classes (employees, vacations, work requests, templates,
//! files) to Postgres while the rest stay in memory.

use std::sync::Arc;

use sqlx::PgPool;

use staffhub_auth::SessionCodec;
use staffhub_infra::{
    EmployeeStore, InMemoryEmployeeStore, InMemoryScopedStore, PgEmployeeStore,
    PgRequestFileStore, PgTemplateStore, PgVacationStore, PgWorkRequestStore, ScopedStore,
    ensure_schema,
};
use staffhub_records::{
    Activity, Broadcast, EmployeeRecord, KnowledgeArticle, KnowledgeCategory, NewsItem,
    Notification, Poll, Reminder, RequestFile, RequestTemplate, Vacation, WorkRequest,
};

use crate::config::Config;

/// Credentials for the developer account seeded from the environment.
#[derive(Clone)]
pub struct BootstrapDeveloper {
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub struct AppServices {
    pub codec: Arc<SessionCodec>,
    pub bootstrap: Option<BootstrapDeveloper>,

    pub employees: Arc<dyn EmployeeStore>,
    pub vacations: Arc<dyn ScopedStore<Vacation>>,
    pub requests: Arc<dyn ScopedStore<WorkRequest>>,
    pub templates: Arc<dyn ScopedStore<RequestTemplate>>,
    pub files: Arc<dyn ScopedStore<RequestFile>>,
    pub notifications: Arc<dyn ScopedStore<Notification>>,
    pub reminders: Arc<dyn ScopedStore<Reminder>>,
    pub activities: Arc<dyn ScopedStore<Activity>>,
    pub news: Arc<dyn ScopedStore<NewsItem>>,
    pub categories: Arc<dyn ScopedStore<KnowledgeCategory>>,
    pub articles: Arc<dyn ScopedStore<KnowledgeArticle>>,
    pub polls: Arc<dyn ScopedStore<Poll>>,
    pub broadcasts: Arc<dyn ScopedStore<Broadcast>>,
}

pub async fn build_services(config: &Config) -> AppServices {
    let codec = Arc::new(SessionCodec::new(config.session_secret.as_bytes()));
    let bootstrap = match (&config.bootstrap_email, &config.bootstrap_password) {
        (Some(email), Some(password)) => Some(BootstrapDeveloper {
            email: email.clone(),
            password: password.clone(),
        }),
        _ => None,
    };

    match &config.database_url {
        Some(url) => {
            let pool = PgPool::connect(url)
                .await
                .expect("failed to connect to Postgres");
            ensure_schema(&pool)
                .await
                .expect("failed to create schema");
            AppServices::postgres(codec, bootstrap, pool)
        }
        None => AppServices::in_memory(codec, bootstrap),
    }
}

impl AppServices {
    pub fn in_memory(
        codec: Arc<SessionCodec>,
        bootstrap: Option<BootstrapDeveloper>,
    ) -> Self {
        Self {
            codec,
            bootstrap,
            employees: Arc::new(InMemoryEmployeeStore::new()),
            vacations: Arc::new(InMemoryScopedStore::new()),
            requests: Arc::new(InMemoryScopedStore::new()),
            templates: Arc::new(InMemoryScopedStore::new()),
            files: Arc::new(InMemoryScopedStore::new()),
            notifications: Arc::new(InMemoryScopedStore::new()),
            reminders: Arc::new(InMemoryScopedStore::new()),
            activities: Arc::new(InMemoryScopedStore::new()),
            news: Arc::new(InMemoryScopedStore::new()),
            categories: Arc::new(InMemoryScopedStore::new()),
            articles: Arc::new(InMemoryScopedStore::new()),
            polls: Arc::new(InMemoryScopedStore::new()),
            broadcasts: Arc::new(InMemoryScopedStore::new()),
        }
    }

    pub fn postgres(
        codec: Arc<SessionCodec>,
        bootstrap: Option<BootstrapDeveloper>,
        pool: PgPool,
    ) -> Self {
        Self {
            codec,
            bootstrap,
            employees: Arc::new(PgEmployeeStore::new(pool.clone())),
            vacations: Arc::new(PgVacationStore::new(pool.clone())),
            requests: Arc::new(PgWorkRequestStore::new(pool.clone())),
            templates: Arc::new(PgTemplateStore::new(pool.clone())),
            files: Arc::new(PgRequestFileStore::new(pool)),
            notifications: Arc::new(InMemoryScopedStore::new()),
            reminders: Arc::new(InMemoryScopedStore::new()),
            activities: Arc::new(InMemoryScopedStore::new()),
            news: Arc::new(InMemoryScopedStore::new()),
            categories: Arc::new(InMemoryScopedStore::new()),
            articles: Arc::new(InMemoryScopedStore::new()),
            polls: Arc::new(InMemoryScopedStore::new()),
            broadcasts: Arc::new(InMemoryScopedStore::new()),
        }
    }

    /// Seed the developer account named by the bootstrap credentials.
    ///
    /// Idempotent; called once at startup so the account shows up in
    /// listings before its first login.
    pub async fn ensure_bootstrap_developer(&self) {
        let Some(bootstrap) = &self.bootstrap else {
            return;
        };
        match self.employees.find_by_email(&bootstrap.email).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                let mut rec = EmployeeRecord::new("Portal");
                rec.last_name = Some("Developer".to_string());
                rec.email = Some(bootstrap.email.clone());
                rec.role = staffhub_auth::Role::Developer;
                if let Err(e) = self.employees.insert(rec).await {
                    tracing::warn!(error = %e, "failed to seed bootstrap developer");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "bootstrap developer lookup failed");
            }
        }
    }
}
