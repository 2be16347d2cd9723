//! Application modules: base package plus nested-module exclusions, with memoized derived views.

mod application_module;
mod dependencies;
mod identifier;

pub use application_module::{ApplicationModule, ModuleInformation, NotInModule};
pub use dependencies::{get_dependencies, detect_dependencies, ApplicationModuleDependencies, DependencyDepth, ResolvedDependency};
pub use identifier::{ApplicationModuleIdentifier, InvalidModuleIdentifier};
