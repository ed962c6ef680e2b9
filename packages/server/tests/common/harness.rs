//! Test harness with testcontainers for integration testing.
//!
//! Uses a shared Postgres container across all tests in a binary. The container
//! and migrations are initialized once on first use, then reused. Every test
//! creates its own users, so tests never see each other's matches.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Duration;
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use server_core::domains::auth::JwtService;
use server_core::kernel::{
    BaseNotifier, InMemoryConnectionRegistry, MockNotifier, NotificationService, ServerDeps,
};
use server_core::server::build_app;
use server_core::Config;

use super::HttpClient;

pub const TEST_JWT_SECRET: &str = "test_secret_key";
pub const TEST_JWT_ISSUER: &str = "test_issuer";

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

/// Global shared infrastructure - initialized once, reused by all tests.
static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        // Run migrations once on the shared database
        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test harness that manages test infrastructure.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let client = ctx.http();
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    /// Database pool - use this for test fixtures.
    pub db_pool: PgPool,
    /// Records every notification the service emits (unused by
    /// `with_notification_service` harnesses).
    pub notifier: MockNotifier,
    pub connections: Arc<InMemoryConnectionRegistry>,
    pub deps: ServerDeps,
    pub jwt_service: Arc<JwtService>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    /// Harness whose notifications are captured by a `MockNotifier`.
    pub async fn new() -> Result<Self> {
        let db_pool = Self::pool().await?;
        let notifier = MockNotifier::new();
        let connections = Arc::new(InMemoryConnectionRegistry::new());
        Ok(Self::assemble(db_pool, Arc::new(notifier.clone()), notifier, connections))
    }

    /// Harness delivering through the real Postgres-backed notification service.
    pub async fn with_notification_service() -> Result<Self> {
        let db_pool = Self::pool().await?;
        let connections = Arc::new(InMemoryConnectionRegistry::new());
        let service = Arc::new(NotificationService::new(db_pool.clone(), connections.clone()));
        Ok(Self::assemble(db_pool, service, MockNotifier::new(), connections))
    }

    fn assemble(
        db_pool: PgPool,
        delivery: Arc<dyn BaseNotifier>,
        notifier: MockNotifier,
        connections: Arc<InMemoryConnectionRegistry>,
    ) -> Self {
        let jwt_service = Arc::new(JwtService::new(TEST_JWT_SECRET, TEST_JWT_ISSUER.to_string()));
        let deps = ServerDeps::new(
            db_pool.clone(),
            delivery,
            connections.clone(),
            jwt_service.clone(),
            Duration::hours(168),
        );

        Self {
            db_pool,
            notifier,
            connections,
            deps,
            jwt_service,
        }
    }

    /// Fresh pool on the shared database.
    pub async fn pool() -> Result<PgPool> {
        let infra = SharedTestInfra::get().await;
        PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")
    }

    pub fn config() -> Config {
        Config {
            database_url: String::new(),
            port: 0,
            db_max_connections: 5,
            jwt_secret: TEST_JWT_SECRET.to_string(),
            jwt_issuer: TEST_JWT_ISSUER.to_string(),
            allowed_origins: vec![],
            match_expiry_hours: 168,
            expiry_sweep_cron: "0 * * * * *".to_string(),
            rate_limit_per_second: 1000,
            rate_limit_burst: 10_000,
        }
    }

    /// An HTTP client driving the full router in-process.
    pub fn http(&self) -> HttpClient {
        let router = build_app(self.deps.clone(), &Self::config()).expect("Failed to build app");
        HttpClient::new(router, self.jwt_service.clone())
    }

    /// Wait until `check` holds, for background notification delivery.
    pub async fn settle_until(&self, check: impl Fn() -> bool) {
        for _ in 0..50 {
            if check() {
                return;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        }
    }
}
