//! The two error categories the core raises: fail-fast configuration errors, and the accumulated
//! [`crate::violation::Violations`] wrapped for the one call path that turns them into an error.

use crate::{name::PackageName, violation::Violations};

/// A fail-fast condition detected while constructing or configuring the module model.
///
/// Distinct from [`crate::violation::Violation`]: these are raised as soon as they are detected
/// (bad input, not a real architecture problem) rather than accumulated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// No classes were found under any of the configured root packages.
    #[error("no classes found under root package(s) {0:?}")]
    EmptyClassUniverse(Vec<PackageName>),

    /// An `allowedDependencies` token referenced a module identifier that does not exist.
    #[error("module {reference:?} referenced in allowed-dependencies of module {from:?} does not exist")]
    UnknownModule {
        /// The module the unresolved token was declared on.
        from: String,
        /// The unresolved module identifier.
        reference: String,
    },

    /// An `allowedDependencies` token referenced a named interface that does not exist on the
    /// target module.
    #[error("named interface {interface:?} of module {module:?} does not exist (referenced from {from:?})")]
    UnknownNamedInterface {
        /// The module the unresolved token was declared on.
        from: String,
        /// The target module named in the token.
        module: String,
        /// The unresolved interface name.
        interface: String,
    },

    /// Two distinct types in the same package claim the same package-level stereotype
    /// annotation.
    #[error(transparent)]
    AmbiguousAnnotation(#[from] crate::class::AmbiguousAnnotation),

    /// An open module declares a type-level named-interface marker with no explicit name; open
    /// modules may not rely on the package-local default name.
    #[error("class {class:?} in open module {module:?} uses a defaulted named interface name; open modules must name interfaces explicitly")]
    OpenModuleDefaultedNamedInterface {
        /// The module the class belongs to.
        module: String,
        /// The offending class.
        class: String,
    },

    /// A container was constructed from root metadata that names neither an application marker
    /// nor a modulithic root marker.
    #[error("no suitable root-level metadata found for root package(s) {0:?}")]
    NoRootMetadata(Vec<PackageName>),

    /// More than one detection strategy was registered for the same container.
    #[error("multiple detection strategies registered: {0:?}")]
    MultipleDetectionStrategies(Vec<String>),

    /// A configuration value failed to parse into its typed representation.
    #[error("configuration key {key:?} has invalid value {value:?}: {reason}")]
    InvalidValue {
        /// The configuration key.
        key: String,
        /// The raw value that failed to parse.
        value: String,
        /// Why parsing failed.
        reason: String,
    },

    /// An `AllowedDependency` token failed to parse.
    #[error(transparent)]
    InvalidAllowedDependency(#[from] crate::policy::InvalidAllowedDependency),
}

/// Raised when [`crate::violation::Violations::throw_if_present`] finds a non-empty set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("architecture verification failed:\n{violations}")]
pub struct VerificationFailed {
    /// The violations that caused verification to fail.
    pub violations: Violations,
}
