use sea_orm::{DbErr, RuntimeErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // row level
    #[error("not found")]
    NotFound,
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("forbidden")]
    Forbidden,

    // infra things
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Db(DbErr),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbErr> for AppError {
    fn from(e: DbErr) -> Self {
        AppError::from_db(e)
    }
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            Self::Forbidden => "FORBIDDEN",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Db(_) => "DB_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn from_db(err: DbErr) -> Self {
        // RecordNotUpdated: the row vanished between read and UPDATE ... RETURNING
        if let DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated = err {
            return AppError::NotFound;
        }
        match sqlstate(&err) {
            // class 23: integrity constraint violation (23502 not_null, 23505 unique, ...)
            Some((code, message)) if code.starts_with("23") => AppError::ConstraintViolation(message),
            // insufficient_privilege, raised when the table's RLS policy rejects a row
            Some((code, _)) if code == "42501" => AppError::Forbidden,
            _ => AppError::Db(err),
        }
    }
}

/// SQLSTATE and message of a database-side error, if the driver reported one.
fn sqlstate(err: &DbErr) -> Option<(String, String)> {
    let runtime = match err {
        DbErr::Exec(e) | DbErr::Query(e) | DbErr::Conn(e) => e,
        _ => return None,
    };
    match runtime {
        RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(db)) => {
            Some((db.code()?.into_owned(), db.message().to_string()))
        }
        _ => None,
    }
}
