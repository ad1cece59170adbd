mod repo;
mod repo_types;
mod store;

pub use repo::UserRepository;
pub use repo_types::{UpdateFields, User};
pub use store::UserStore;
