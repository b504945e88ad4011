use std::sync::Arc;

use household_inventory::{AccessPolicy, AllowAll, PostgresService};
use sea_orm::{ConnectionTrait, Database};
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;

pub struct TestContext {
    pub db: Arc<PostgresService>,
    #[allow(dead_code)]
    pub db_url: String,
    pub _container: ContainerAsync<Postgres>,
}

impl TestContext {
    pub async fn new() -> TestContext {
        Self::with_policy(Arc::new(AllowAll)).await
    }

    pub async fn with_policy(policy: Arc<dyn AccessPolicy>) -> TestContext {
        let container = Postgres::default()
            .with_tag("16-alpine")
            .start()
            .await
            .expect("Failed to start postgres container");

        let host = container.get_host().await.expect("Failed to get host");
        let port = container.get_host_port_ipv4(5432).await.expect("Failed to get port");

        let db_url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

        let db = Arc::new(
            PostgresService::new(&db_url, policy)
                .await
                .expect("Failed to initialize PostgresService"),
        );

        TestContext {
            db,
            db_url,
            _container: container,
        }
    }
}

#[allow(dead_code)]
impl TestContext {
    /// Runs SQL as the table owner.
    pub async fn as_owner(&self, sql: &str) {
        self.db
            .connection()
            .execute_unprepared(sql)
            .await
            .expect("owner statement failed");
    }

    /// A service on the same database logged in as `role`, which does not own
    /// the table and so is subject to its row-level security.
    pub async fn connect_as(&self, role: &str, password: &str) -> PostgresService {
        let url = self.db_url.replacen("postgres:postgres@", &format!("{}:{}@", role, password), 1);
        let conn = Database::connect(&url).await.expect("Failed to connect as role");
        PostgresService::with_connection(conn, Arc::new(AllowAll))
    }
}

// Test data helpers
#[allow(dead_code)]
pub mod test_data {
    use household_inventory::CreateItem;

    pub fn rice() -> CreateItem {
        CreateItem::new("food", "rice").quantity(5)
    }

    pub fn soap() -> CreateItem {
        CreateItem::new("daily goods", "soap")
    }
}
