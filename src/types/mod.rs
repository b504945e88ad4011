pub mod caller;
pub mod error;
pub mod item;
