//! Throwaway Postgres for repository tests
//!
//! Each [`TestDatabase`] owns a container with the workspace migrations
//! applied. Everything here needs a Docker daemon, so tests that use it are
//! `#[ignore]`d by default and run with `cargo test -- --ignored`.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use infra_db::{run_migrations, BACKUP_TABLES};

pub type SetupError = Box<dyn std::error::Error + Send + Sync>;

const IMAGE_TAG: &str = "16-alpine";
const USER: &str = "finance";
const PASSWORD: &str = "finance";
const DATABASE: &str = "finance_hub_test";

fn connection_url(host: &str, port: u16) -> String {
    format!("postgres://{USER}:{PASSWORD}@{host}:{port}/{DATABASE}")
}

/// Container plus a migrated pool; the container stops on drop
pub struct TestDatabase {
    _container: ContainerAsync<Postgres>,
    pub url: String,
    pub pool: PgPool,
}

impl TestDatabase {
    pub async fn start() -> Result<Self, SetupError> {
        let container = Postgres::default()
            .with_user(USER)
            .with_password(PASSWORD)
            .with_db_name(DATABASE)
            .with_tag(IMAGE_TAG)
            .start()
            .await?;

        let host = container.get_host().await?.to_string();
        let port = container.get_host_port_ipv4(5432).await?;
        let url = connection_url(&host, port);

        let pool = PgPoolOptions::new().max_connections(5).connect(&url).await?;
        run_migrations(&pool).await?;

        Ok(Self {
            _container: container,
            url,
            pool,
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Deletes every user row, keeping the schema
    pub async fn truncate_all(&self) -> Result<(), SetupError> {
        let statement = format!("TRUNCATE TABLE {} CASCADE", BACKUP_TABLES.join(", "));
        sqlx::query(&statement).execute(&self.pool).await?;
        Ok(())
    }
}

static SHARED: OnceCell<Arc<TestDatabase>> = OnceCell::const_new();

/// One container for the whole test binary
///
/// Rows are not cleaned between tests; scope them to a fresh `UserId`.
///
/// # Panics
///
/// Panics if the container cannot be started
pub async fn get_shared_test_database() -> Arc<TestDatabase> {
    SHARED
        .get_or_init(|| async {
            match TestDatabase::start().await {
                Ok(db) => Arc::new(db),
                Err(e) => panic!("shared test database: {e}"),
            }
        })
        .await
        .clone()
}

/// Declares an ignored tokio test that gets a pool to its own container
#[macro_export]
macro_rules! db_test {
    ($name:ident, |$pool:ident| $body:block) => {
        #[tokio::test]
        #[ignore = "requires Docker"]
        async fn $name() {
            let db = $crate::database::TestDatabase::start()
                .await
                .expect("test database");
            let $pool = db.pool().clone();
            $body
        }
    };
}
