// HTTP routes
pub mod health;
pub mod matches;
pub mod stream;

pub use health::*;
pub use matches::*;
pub use stream::*;
