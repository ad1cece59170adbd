pub mod config;
pub mod db;
pub mod error;
pub mod telemetry;
pub mod users;

pub use error::StoreError;
pub use users::{UpdateFields, User, UserRepository, UserStore};
