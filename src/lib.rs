pub mod config;
pub mod db;
pub mod policy;
pub mod types;
pub mod utils;

pub use db::postgres_service::PostgresService;
pub use policy::{AccessPolicy, AllowAll, Operation, SharedSecret};
pub use types::{
    caller::Caller,
    error::AppError,
    item::{CreateItem, UpdateItem},
};
