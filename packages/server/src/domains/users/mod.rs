pub mod models;

pub use models::{User, UserRole};
