//! Parsing and evaluating `allowedDependencies` policies.

mod allowed_dependencies;
mod allowed_dependency;

pub use allowed_dependencies::{AllowedDependencies, OPEN_TOKEN};
pub use allowed_dependency::{AllowedDependency, InterfaceSelector, InvalidAllowedDependency};
