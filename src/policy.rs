//! Row access decisions.
//!
//! The table itself carries a permissive row-level-security policy. The
//! service mirrors it in-process through [`AccessPolicy`], one predicate that
//! every row operation consults, so a stricter rule can replace [`AllowAll`]
//! without touching the queries in `db`.

use std::sync::Arc;

use entity::household_inventory::Model;
use tracing::warn;

use crate::config::{AccessPolicyKind, EnvConfig};
use crate::types::{caller::Caller, error::AppError};
use crate::utils::secret::{hash_secret, verify_secret};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
}

pub trait AccessPolicy: Send + Sync {
    /// `row` is the row being read, changed or removed; `None` for inserts.
    fn permits(&self, caller: &Caller, operation: Operation, row: Option<&Model>) -> bool;

    /// The answer for every row at once, for policies that never look at the
    /// row. `None` makes the service call `permits` row by row.
    fn permits_all_rows(&self, _caller: &Caller, _operation: Operation) -> Option<bool> {
        None
    }
}

/// `FOR ALL USING (true) WITH CHECK (true)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn permits(&self, _caller: &Caller, _operation: Operation, _row: Option<&Model>) -> bool {
        true
    }

    fn permits_all_rows(&self, _caller: &Caller, _operation: Operation) -> Option<bool> {
        Some(true)
    }
}

/// One household password shared by everybody who may use the inventory.
/// Only an argon2 hash of it is kept.
pub struct SharedSecret {
    hash: String,
}

impl SharedSecret {
    pub fn new(secret: &str) -> Result<Self, AppError> {
        let hash = hash_secret(secret).map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(Self { hash })
    }
}

impl AccessPolicy for SharedSecret {
    fn permits(&self, caller: &Caller, operation: Operation, _row: Option<&Model>) -> bool {
        let Some(secret) = caller.secret.as_deref() else {
            return false;
        };
        match verify_secret(secret, &self.hash) {
            Ok(ok) => ok,
            Err(e) => {
                warn!(?operation, error = %e, "shared secret check failed");
                false
            }
        }
    }

    // one argon2 verification per list instead of one per row
    fn permits_all_rows(&self, caller: &Caller, operation: Operation) -> Option<bool> {
        Some(self.permits(caller, operation, None))
    }
}

pub fn from_config(config: &EnvConfig) -> Result<Arc<dyn AccessPolicy>, AppError> {
    match config.access_policy {
        AccessPolicyKind::AllowAll => Ok(Arc::new(AllowAll)),
        AccessPolicyKind::SharedSecret => {
            let secret = config
                .app_password
                .as_deref()
                .ok_or_else(|| AppError::Config("APP_PASSWORD not set".into()))?;
            Ok(Arc::new(SharedSecret::new(secret)?))
        }
    }
}
