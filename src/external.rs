//! Traits the host application implements, supplying everything the core does not itself import,
//! decode, or evaluate. The core never performs service-lookup/reflection-based discovery of
//! these — they are explicit capability parameters passed into [`crate::container::ApplicationModules::of`].

use crate::{class::MarkerAttributes, name::PackageName};

/// A lookup for annotations declared on a package's descriptor type (conventionally
/// `package-info`), keyed by the package and the fully-qualified annotation name.
///
/// Implemented by the host application on top of whichever byte-code/reflection facility it uses
/// to load classes; the core never reads class files itself.
pub trait PackageAnnotationSource {
    /// Returns the attributes of `annotation` as declared on `package`'s descriptor type, or
    /// `None` if the descriptor does not carry it (or has no descriptor at all).
    fn marker_on_package(&self, package: &PackageName, annotation: &str) -> Option<MarkerAttributes>;
}

/// A [`PackageAnnotationSource`] that never reports any package-level annotations.
///
/// Useful for detection strategies and tests that only rely on type-level markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPackageAnnotations;

impl PackageAnnotationSource for NoPackageAnnotations {
    fn marker_on_package(&self, _package: &PackageName, _annotation: &str) -> Option<MarkerAttributes> {
        None
    }
}

/// An externally-supplied architectural rule, evaluated over the full class universe.
///
/// Used to compose rules the core does not itself know about (e.g. layering conventions) into the
/// verifier's own [`crate::violation::Violations`] report.
pub trait ExternalRule {
    /// Evaluates this rule and returns zero or more human-readable violation messages.
    fn evaluate(&self, classes: &crate::classes::Classes) -> Vec<String>;
}
