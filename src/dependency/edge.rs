//! A single typed dependency between two classes.

/// The semantic kind of a [`DependencyEdge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DependencyKind {
    /// A Spring-managed component is used (constructor/field/method injection of a bean).
    UsesComponent,
    /// The target is recognized as an event listened to / published across the edge.
    EventListener,
    /// The target is a JPA entity.
    Entity,
    /// None of the more specific kinds apply.
    Default,
}

/// A single directed dependency from one type to another, discovered while walking a class's
/// members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyEdge {
    /// The fully-qualified name of the declaring (source) type.
    pub source: String,
    /// The fully-qualified name of the referenced (target) type.
    pub target: String,
    /// A short human-readable description of where the dependency originates, e.g.
    /// `"constructor parameter"` or `"field someRepository"`.
    pub description: String,
    /// The semantic kind of this edge.
    pub kind: DependencyKind,
}

/// Where an [`DependencyEdge`] of kind [`DependencyKind::UsesComponent`] originates within the
/// declaring class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InjectionSite {
    /// A constructor parameter.
    Constructor,
    /// An annotated field.
    Field,
    /// An annotated method's parameter.
    Method,
}

/// An injection-originated [`DependencyEdge`], together with the member it came from.
///
/// Distinguished from a plain [`DependencyEdge`] because field injection into a non-configuration
/// class is itself a reportable violation, independent of whether the edge is architecturally
/// allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InjectionEdge {
    /// The underlying edge; always of kind [`DependencyKind::UsesComponent`].
    pub edge: DependencyEdge,
    /// The member the injection was found on.
    pub site: InjectionSite,
}
