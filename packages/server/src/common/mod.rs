// Common types and utilities shared across the application

pub mod entity_ids;
pub mod error;
pub mod id;
pub mod pagination;
pub mod response;

pub use entity_ids::*;
pub use error::{is_unique_violation, ApiError};
pub use id::Id;
pub use pagination::{Page, PageArgs, ValidatedPageArgs};
pub use response::{ApiResponse, ErrorBody};
