use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};
use tracing::{info, warn};

use crate::policy::{AccessPolicy, Operation};
use crate::types::{caller::Caller, error::AppError};
use entity::household_inventory::Model;

/// Not `Clone`; share it behind an `Arc`.
pub struct PostgresService {
    pub(crate) db: DatabaseConnection,
    pub(crate) policy: Arc<dyn AccessPolicy>,
}

impl PostgresService {
    /// Connects and brings the schema up to date.
    pub async fn new(uri: &str, policy: Arc<dyn AccessPolicy>) -> Result<Self, DbErr> {
        info!("Connecting to PostgreSQL...");
        let db = Database::connect(uri).await?;
        info!("Running migrations...");
        Migrator::up(&db, None).await?;
        info!("Connected to PostgreSQL, migrations finished.");
        Ok(Self::with_connection(db, policy))
    }

    /// Wraps an existing connection as is, without migrating.
    pub fn with_connection(db: DatabaseConnection, policy: Arc<dyn AccessPolicy>) -> Self {
        Self { db, policy }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        Ok(self.db.ping().await?)
    }

    pub(crate) fn can_see(&self, caller: &Caller, row: &Model) -> bool {
        self.policy.permits(caller, Operation::Select, Some(row))
    }

    /// Drops the rows the caller may not read.
    pub(crate) fn visible(&self, caller: &Caller, rows: Vec<Model>) -> Vec<Model> {
        match self.policy.permits_all_rows(caller, Operation::Select) {
            Some(true) => rows,
            Some(false) => Vec::new(),
            None => rows.into_iter().filter(|row| self.can_see(caller, row)).collect(),
        }
    }

    pub(crate) fn authorize(
        &self,
        caller: &Caller,
        operation: Operation,
        row: Option<&Model>,
    ) -> Result<(), AppError> {
        if self.policy.permits(caller, operation, row) {
            return Ok(());
        }
        warn!(?operation, user_id = ?caller.user_id, row_id = ?row.map(|r| r.id), "access policy denied operation");
        Err(AppError::Forbidden)
    }
}
