//! Named interfaces: a module's declared public API surface.

mod named_interface;
mod resolver;

pub use named_interface::{NamedInterface, NamedInterfaces, UNNAMED};
pub use resolver::resolve;
