//! Kernel module - server infrastructure and dependencies.

pub mod connection_registry;
pub mod deps;
pub mod notifier;
pub mod scheduled_tasks;
pub mod test_dependencies;
pub mod traits;

pub use connection_registry::InMemoryConnectionRegistry;
pub use deps::ServerDeps;
pub use notifier::NotificationService;
pub use scheduled_tasks::start_scheduler;
pub use test_dependencies::MockNotifier;
pub use traits::*;
