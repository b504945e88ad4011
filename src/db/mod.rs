pub mod inventory;
pub mod postgres_service;
