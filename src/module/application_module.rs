//! A single application module: a base package plus whatever nested modules carved out of it.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, OnceLock},
};

use crate::{
    class::JavaClass,
    classes::Classes,
    dependency::{self, DependencyEdge, ExtractedEdges, InjectionEdge},
    evident_type::ArchitecturallyEvidentType,
    interface::NamedInterfaces,
    module::identifier::ApplicationModuleIdentifier,
    name::PackageName,
    policy::AllowedDependencies,
    stereotype::StereotypeCatalog,
};

/// A failure raised when asking a module about a class it does not contain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("class {class:?} is not part of module {module:?}")]
pub struct NotInModule {
    /// The module that was asked about `class`.
    pub module: String,
    /// The class the module does not contain.
    pub class: String,
}

/// Free-form metadata about a module, independent of its structural composition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleInformation {
    /// An optional human-facing display name, distinct from the identifier.
    pub display_name: Option<String>,
}

/// A subtree of packages, recognized as one unit of architecture: permitted dependencies,
/// encapsulation boundary, named interfaces.
///
/// Immutable after construction, aside from a handful of `OnceLock`-backed memoized derived views.
#[derive(Debug)]
pub struct ApplicationModule {
    identifier: ApplicationModuleIdentifier,
    base_package: PackageName,
    exclusions: Vec<PackageName>,
    classes: Classes,
    is_open: bool,
    information: ModuleInformation,
    declared_dependencies: AllowedDependencies,
    named_interfaces: NamedInterfaces,
    catalog: Arc<StereotypeCatalog>,
    known_beans: Arc<HashSet<String>>,
    entity_types: Arc<HashSet<String>>,
    evident_types: OnceLock<HashMap<String, ArchitecturallyEvidentType>>,
    edges: OnceLock<Vec<DependencyEdge>>,
    injections: OnceLock<Vec<InjectionEdge>>,
    aggregate_roots: OnceLock<Classes>,
    value_types: OnceLock<Classes>,
    published_events: OnceLock<Classes>,
}

impl ApplicationModule {
    /// Constructs a module. Exclusions, classes and named interfaces are expected to already be
    /// resolved by the container; this constructor performs no filesystem or annotation lookups of
    /// its own.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        identifier: ApplicationModuleIdentifier,
        base_package: PackageName,
        exclusions: Vec<PackageName>,
        classes: Classes,
        is_open: bool,
        information: ModuleInformation,
        declared_dependencies: AllowedDependencies,
        named_interfaces: NamedInterfaces,
        catalog: Arc<StereotypeCatalog>,
        known_beans: Arc<HashSet<String>>,
        entity_types: Arc<HashSet<String>>,
    ) -> Self {
        Self {
            identifier,
            base_package,
            exclusions,
            classes,
            is_open,
            information,
            declared_dependencies,
            named_interfaces,
            catalog,
            known_beans,
            entity_types,
            evident_types: OnceLock::new(),
            edges: OnceLock::new(),
            injections: OnceLock::new(),
            aggregate_roots: OnceLock::new(),
            value_types: OnceLock::new(),
            published_events: OnceLock::new(),
        }
    }

    /// This module's identifier.
    #[must_use]
    pub fn identifier(&self) -> &ApplicationModuleIdentifier {
        &self.identifier
    }

    /// The root package this module is rooted at.
    #[must_use]
    pub fn base_package(&self) -> &PackageName {
        &self.base_package
    }

    /// Sub-packages carved out for nested modules.
    #[must_use]
    pub fn exclusions(&self) -> &[PackageName] {
        &self.exclusions
    }

    /// Whether this module hides its internals (closed) or not (open).
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Free-form module metadata.
    #[must_use]
    pub fn information(&self) -> &ModuleInformation {
        &self.information
    }

    /// This module's declared-dependency policy.
    #[must_use]
    pub fn declared_dependencies(&self) -> &AllowedDependencies {
        &self.declared_dependencies
    }

    /// This module's named interfaces.
    #[must_use]
    pub fn named_interfaces(&self) -> &NamedInterfaces {
        &self.named_interfaces
    }

    /// All classes residing in this module (base package, minus nested-module exclusions).
    #[must_use]
    pub fn classes(&self) -> &Classes {
        &self.classes
    }

    /// Whether `fully_qualified_name` is a member of this module.
    #[must_use]
    pub fn contains(&self, fully_qualified_name: &str) -> bool {
        self.classes.get(fully_qualified_name).is_some()
    }

    /// Whether `class` either is a member of this module, or resides under its base package
    /// outside of any nested-module exclusion (used to accept test types conceptually belonging
    /// to this module, even though they weren't part of the imported class universe).
    #[must_use]
    pub fn could_contain(&self, class: &JavaClass) -> bool {
        self.contains(&class.fully_qualified_name)
            || (class.package.is_self_or_sub_package_of(&self.base_package)
                && !self
                    .exclusions
                    .iter()
                    .any(|excluded| class.package.is_self_or_sub_package_of(excluded)))
    }

    fn evident_types(&self) -> &HashMap<String, ArchitecturallyEvidentType> {
        self.evident_types.get_or_init(|| {
            self.classes
                .iter()
                .map(|class| {
                    let evident = ArchitecturallyEvidentType::classify(class, &self.catalog, &self.known_beans);
                    (class.fully_qualified_name.clone(), evident)
                })
                .collect()
        })
    }

    /// This class's architecturally-evident role classification.
    ///
    /// # Errors
    /// Returns [`NotInModule`] if the class does not belong to this module.
    pub fn get_architecturally_evident_type(
        &self,
        fully_qualified_name: &str,
    ) -> Result<&ArchitecturallyEvidentType, NotInModule> {
        self.evident_types().get(fully_qualified_name).ok_or_else(|| NotInModule {
            module: self.identifier.to_string(),
            class: fully_qualified_name.to_owned(),
        })
    }

    fn extracted(&self) -> (&Vec<DependencyEdge>, &Vec<InjectionEdge>) {
        if self.edges.get().is_none() {
            let evident_types = self.evident_types();
            let mut edges = Vec::new();
            let mut injections = Vec::new();
            for class in &self.classes {
                let evident = &evident_types[&class.fully_qualified_name];
                let ExtractedEdges {
                    edges: class_edges,
                    injections: class_injections,
                } = dependency::extract(class, evident, &self.entity_types, &self.catalog);
                edges.extend(class_edges);
                injections.extend(class_injections);
            }
            let _ = self.edges.set(edges);
            let _ = self.injections.set(injections);
        }
        (self.edges.get().unwrap(), self.injections.get().unwrap())
    }

    /// Every dependency edge originating from a class in this module.
    #[must_use]
    pub fn edges(&self) -> &[DependencyEdge] {
        self.extracted().0
    }

    /// Every injection-originated edge, together with where it was found.
    #[must_use]
    pub fn injections(&self) -> &[InjectionEdge] {
        self.extracted().1
    }

    /// Classes playing the role of an aggregate root: entities not referenced from the fields,
    /// constructor parameters, or method signatures of any other entity in this module, plus their
    /// in-module superclasses.
    #[must_use]
    pub fn get_aggregate_roots(&self) -> &Classes {
        self.aggregate_roots.get_or_init(|| {
            let entities: Vec<&JavaClass> = self
                .classes
                .iter()
                .filter(|c| self.entity_types.contains(&c.fully_qualified_name))
                .collect();
            let referenced: HashSet<&str> = entities
                .iter()
                .flat_map(|entity| {
                    entity
                        .fields
                        .iter()
                        .map(|f| f.field_type.as_str())
                        .chain(entity.constructors.iter().flat_map(|c| c.parameter_types.iter().map(String::as_str)))
                        .chain(entity.methods.iter().flat_map(|m| {
                            m.parameter_types
                                .iter()
                                .map(String::as_str)
                                .chain(m.return_type.as_deref())
                        }))
                })
                .filter(|target| self.entity_types.contains(*target))
                .collect();

            let mut roots: Vec<JavaClass> = entities
                .iter()
                .filter(|e| !referenced.contains(e.fully_qualified_name.as_str()))
                .map(|e| (*e).clone())
                .collect();

            let root_names: HashSet<String> = roots.iter().map(|r| r.fully_qualified_name.clone()).collect();
            for root in entities.iter().filter(|e| root_names.contains(&e.fully_qualified_name)) {
                let mut super_name = root.super_class.clone();
                while let Some(name) = super_name {
                    let Some(super_class) = self.classes.get(&name) else {
                        break;
                    };
                    if !root_names.contains(&super_class.fully_qualified_name) {
                        roots.push(super_class.clone());
                    }
                    super_name = super_class.super_class.clone();
                }
            }

            Classes::new(roots)
        })
    }

    /// Classes playing the role of a value type: entities referenced from another entity's
    /// members, i.e. the complement of [`ApplicationModule::get_aggregate_roots`] within the
    /// module's entities.
    #[must_use]
    pub fn get_value_types(&self) -> &Classes {
        self.value_types.get_or_init(|| {
            let roots: HashSet<&str> = self
                .get_aggregate_roots()
                .iter()
                .map(|c| c.fully_qualified_name.as_str())
                .collect();
            Classes::new(
                self.classes
                    .iter()
                    .filter(|c| self.entity_types.contains(&c.fully_qualified_name) && !roots.contains(c.fully_qualified_name.as_str()))
                    .cloned(),
            )
        })
    }

    /// Classes recognized as publishing a domain event: annotated with one of the catalog's
    /// `domain_event` markers.
    #[must_use]
    pub fn get_published_events(&self) -> &Classes {
        self.published_events.get_or_init(|| {
            Classes::new(
                self.classes
                    .iter()
                    .filter(|c| self.catalog.domain_event.iter().any(|a| c.has_annotation(a)))
                    .cloned(),
            )
        })
    }
}
