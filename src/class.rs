//! The read-only class/member model the core analyzes.
//!
//! These are plain value types. They carry exactly the fields the external class importer (§6 of
//! the design notes) is contracted to provide; nothing here performs byte-code decoding.

use std::collections::{HashMap, HashSet};

use crate::name::PackageName;

/// The attribute values of a marker annotation the core reads directly (`ApplicationModule`,
/// `NamedInterface`), rather than treating as an opaque stereotype membership flag.
///
/// The external annotation-metadata provider is contracted to decode these from whichever
/// annotation-element-value representation the host framework uses; the core only ever sees
/// this small, already-typed projection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkerAttributes {
    /// The `id`/`name` attribute used to override a derived [`crate::module::ApplicationModuleIdentifier`].
    pub id: Option<String>,
    /// The `name` attribute of a `NamedInterface` marker; empty means "use the default".
    pub name: Vec<String>,
    /// The `propagate` attribute of a `NamedInterface` marker.
    pub propagate: bool,
    /// An `ApplicationModule` marker's `displayName` attribute.
    pub display_name: Option<String>,
    /// An `ApplicationModule` marker's `type` attribute: `true` for an open module.
    pub is_open: bool,
    /// An `ApplicationModule` marker's `allowedDependencies` attribute, as raw tokens.
    pub allowed_dependencies: Vec<String>,
}

/// Whether a type or member is visible outside its declaring package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Declared `public`.
    Public,
    /// Any non-public visibility (package-private, protected, or private).
    NonPublic,
}

impl Visibility {
    /// Whether this visibility is [`Visibility::Public`].
    #[must_use]
    pub fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

/// A set of fully-qualified annotation type names present on a class or member.
///
/// Meta-annotations are expected to already be resolved into this set by the external annotation
/// provider — from the core's perspective, a meta-annotation and a direct one are indistinguishable.
pub type Annotations = HashSet<String>;

/// A direct class-to-class byte-code reference, outside of field/method signatures (e.g. a
/// `Foo.class` literal, a static method call target, a caught exception type).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassReference {
    /// The fully-qualified name of the referenced type.
    pub target: String,
    /// A short human-readable description of where the reference originates, e.g. `"catch block"`.
    pub description: String,
}

/// A field declared on a [`JavaClass`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    /// The field's name.
    pub name: String,
    /// The fully-qualified (or primitive) type of the field.
    pub field_type: String,
    /// Annotations present on the field.
    pub annotations: Annotations,
}

/// A constructor declared on a [`JavaClass`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstructorDescriptor {
    /// The fully-qualified (or primitive) types of the constructor's parameters, in order.
    pub parameter_types: Vec<String>,
    /// Annotations present on the constructor.
    pub annotations: Annotations,
}

/// A method declared on a [`JavaClass`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    /// The method's name.
    pub name: String,
    /// The fully-qualified (or primitive) types of the method's parameters, in order.
    pub parameter_types: Vec<String>,
    /// The fully-qualified (or primitive) return type, or `None` for `void`.
    pub return_type: Option<String>,
    /// Annotations present on the method.
    pub annotations: Annotations,
    /// Whether the method was synthesized by the compiler (e.g. a bridge method).
    pub is_synthetic: bool,
    /// The `phase` attribute of a `@TransactionalEventListener`, if the method carries one.
    pub transaction_phase: Option<String>,
}

/// A class as seen by the verifier: a normalized, read-only projection of whatever the host
/// application's byte-code importer discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaClass {
    /// The fully-qualified name, e.g. `com.acme.order.OrderService`.
    pub fully_qualified_name: String,
    /// The package this class resides in.
    pub package: PackageName,
    /// Whether the class itself is `public`.
    pub visibility: Visibility,
    /// Annotations present directly on the class.
    pub annotations: Annotations,
    /// Attributes of recognized marker annotations (`ApplicationModule`, `NamedInterface`)
    /// present on this class, keyed by the marker's fully-qualified annotation name.
    pub markers: HashMap<String, MarkerAttributes>,
    /// The direct superclass, or `None` for `java.lang.Object` and interfaces.
    pub super_class: Option<String>,
    /// Interfaces directly implemented by this class.
    pub interfaces: Vec<String>,
    /// Fields declared by this class.
    pub fields: Vec<FieldDescriptor>,
    /// Constructors declared by this class.
    pub constructors: Vec<ConstructorDescriptor>,
    /// Methods declared by this class.
    pub methods: Vec<MethodDescriptor>,
    /// Direct class-to-class references found in this class's byte code.
    pub references: Vec<ClassReference>,
}

impl JavaClass {
    /// The simple (unqualified) name of this class.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.fully_qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.fully_qualified_name)
    }

    /// Whether this class carries the given annotation, directly or (per the importer's contract)
    /// via a meta-annotation.
    #[must_use]
    pub fn has_annotation(&self, fq_annotation_name: &str) -> bool {
        self.annotations.contains(fq_annotation_name)
    }
}

/// An error indicating that more than one type claims to carry the same package-level stereotype
/// annotation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("ambiguous annotation {annotation:?}: carried by both {first:?} and {second:?}")]
pub struct AmbiguousAnnotation {
    /// The annotation that was found more than once.
    pub annotation: String,
    /// The fully-qualified name of the first carrier found.
    pub first: String,
    /// The fully-qualified name of the second carrier found.
    pub second: String,
}

/// Whether `fq_name` denotes a type the core never treats as a dependency target: `java.*`,
/// `javax.*`, or a primitive/`void`.
#[must_use]
pub fn is_core_type(fq_name: &str) -> bool {
    const PRIMITIVES: &[&str] = &[
        "boolean", "byte", "short", "char", "int", "long", "float", "double", "void",
    ];
    fq_name.starts_with("java.") || fq_name.starts_with("javax.") || PRIMITIVES.contains(&fq_name)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[test]
    fn core_java_types_are_filtered() {
        assert!(is_core_type("java.lang.String"));
        assert!(is_core_type("javax.annotation.Nonnull"));
        assert!(is_core_type("int"));
        assert!(!is_core_type("com.acme.order.OrderService"));
    }

    #[test]
    fn simple_name_is_last_segment() {
        let class = test_class("com.acme.order.OrderService");
        assert_eq!("OrderService", class.simple_name());
    }

    pub(crate) fn test_class(fqn: &str) -> JavaClass {
        let package = fqn.rsplit_once('.').map_or_else(
            || PackageName::new(fqn),
            |(package, _)| PackageName::new(package),
        );
        JavaClass {
            fully_qualified_name: fqn.to_owned(),
            package,
            visibility: Visibility::Public,
            annotations: Annotations::new(),
            markers: HashMap::new(),
            super_class: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            references: Vec::new(),
        }
    }
}
