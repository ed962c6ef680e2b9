pub mod actor;
pub mod jwt;

pub use actor::Actor;
pub use jwt::{Claims, JwtService};
