pub mod activity_registry;
pub mod seed;

pub use activity_registry::{ActivityRegistry, Registration};
