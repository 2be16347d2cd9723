//! Walks a class's members and emits the dependency edges it carries.

use std::collections::{HashSet, BTreeSet};

use crate::{
    class::{is_core_type, ConstructorDescriptor, FieldDescriptor, JavaClass, MethodDescriptor},
    dependency::edge::{DependencyEdge, DependencyKind, InjectionEdge, InjectionSite},
    evident_type::ArchitecturallyEvidentType,
    stereotype::StereotypeCatalog,
};

/// The edges discovered on a single class, deduplicated and in a deterministic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedEdges {
    /// Every dependency edge found on the class (including injection edges).
    pub edges: Vec<DependencyEdge>,
    /// The subset of edges that originated from field/method/constructor injection, together with
    /// which member they came from.
    pub injections: Vec<InjectionEdge>,
}

/// Extracts all dependency edges from `class`.
///
/// `entity_types` is the set of fully-qualified names, among the classes the caller already knows
/// about, that carry a JPA entity stereotype — used to refine edges to [`DependencyKind::Entity`].
#[must_use]
pub fn extract(
    class: &JavaClass,
    evident: &ArchitecturallyEvidentType,
    entity_types: &HashSet<String>,
    catalog: &StereotypeCatalog,
) -> ExtractedEdges {
    let mut edges = BTreeSet::new();
    let mut injections = Vec::new();

    extract_constructors(class, evident, entity_types, catalog, &mut edges, &mut injections);
    extract_fields(class, catalog, &mut edges, &mut injections);
    extract_methods(class, catalog, entity_types, &mut edges, &mut injections);
    extract_references(class, entity_types, &mut edges);

    ExtractedEdges {
        edges: edges.into_iter().collect(),
        injections,
    }
}

fn uses_constructor_injection(class: &JavaClass, constructor: &ConstructorDescriptor, catalog: &StereotypeCatalog) -> bool {
    class.constructors.len() == 1
        || constructor
            .annotations
            .iter()
            .any(|a| catalog.injection.contains(a))
}

fn extract_constructors(
    class: &JavaClass,
    evident: &ArchitecturallyEvidentType,
    entity_types: &HashSet<String>,
    catalog: &StereotypeCatalog,
    edges: &mut BTreeSet<DependencyEdge>,
    injections: &mut Vec<InjectionEdge>,
) {
    for constructor in &class.constructors {
        let is_injection = evident.is_injectable()
            && !evident.is_configuration_properties()
            && uses_constructor_injection(class, constructor, catalog);
        for param in constructor.parameter_types.iter().filter(|p| !is_core_type(p)) {
            let description = format!("constructor parameter of type {param}");
            if is_injection {
                let edge = DependencyEdge {
                    source: class.fully_qualified_name.clone(),
                    target: param.clone(),
                    description,
                    kind: DependencyKind::UsesComponent,
                };
                injections.push(InjectionEdge {
                    edge: edge.clone(),
                    site: InjectionSite::Constructor,
                });
                edges.insert(edge);
            } else {
                let kind = if entity_types.contains(param) {
                    DependencyKind::Entity
                } else {
                    DependencyKind::Default
                };
                edges.insert(DependencyEdge {
                    source: class.fully_qualified_name.clone(),
                    target: param.clone(),
                    description,
                    kind,
                });
            }
        }
    }
}

fn extract_fields(
    class: &JavaClass,
    catalog: &StereotypeCatalog,
    edges: &mut BTreeSet<DependencyEdge>,
    injections: &mut Vec<InjectionEdge>,
) {
    for field in class.fields.iter().filter(|f| is_injected_field(f, catalog)) {
        if is_core_type(&field.field_type) {
            continue;
        }
        let edge = DependencyEdge {
            source: class.fully_qualified_name.clone(),
            target: field.field_type.clone(),
            description: format!("field {}", field.name),
            kind: DependencyKind::UsesComponent,
        };
        injections.push(InjectionEdge {
            edge: edge.clone(),
            site: InjectionSite::Field,
        });
        edges.insert(edge);
    }
}

fn is_injected_field(field: &FieldDescriptor, catalog: &StereotypeCatalog) -> bool {
    field.annotations.iter().any(|a| catalog.injection.contains(a))
}

fn extract_methods(
    class: &JavaClass,
    catalog: &StereotypeCatalog,
    entity_types: &HashSet<String>,
    edges: &mut BTreeSet<DependencyEdge>,
    injections: &mut Vec<InjectionEdge>,
) {
    for method in &class.methods {
        let is_injected = method.annotations.iter().any(|a| catalog.injection.contains(a));
        let is_listener = method
            .annotations
            .iter()
            .any(|a| catalog.all_event_listener_annotations().contains(a.as_str()));

        for param in method.parameter_types.iter().filter(|p| !is_core_type(p)) {
            let description = format!("method {} parameter of type {param}", method.name);
            if is_injected {
                let edge = DependencyEdge {
                    source: class.fully_qualified_name.clone(),
                    target: param.clone(),
                    description,
                    kind: DependencyKind::UsesComponent,
                };
                injections.push(InjectionEdge {
                    edge: edge.clone(),
                    site: InjectionSite::Method,
                });
                edges.insert(edge);
            } else {
                let kind = method_edge_kind(is_listener, param, entity_types);
                edges.insert(DependencyEdge {
                    source: class.fully_qualified_name.clone(),
                    target: param.clone(),
                    description,
                    kind,
                });
            }
        }

        if !is_injected {
            if let Some(return_type) = &method.return_type {
                if !is_core_type(return_type) {
                    let kind = method_edge_kind(is_listener, return_type, entity_types);
                    edges.insert(DependencyEdge {
                        source: class.fully_qualified_name.clone(),
                        target: return_type.clone(),
                        description: format!("method {} return type", method.name),
                        kind,
                    });
                }
            }
        }
    }
}

fn method_edge_kind(is_listener: bool, referenced_type: &str, entity_types: &HashSet<String>) -> DependencyKind {
    if is_listener {
        DependencyKind::EventListener
    } else if entity_types.contains(referenced_type) {
        DependencyKind::Entity
    } else {
        DependencyKind::Default
    }
}

fn extract_references(class: &JavaClass, entity_types: &HashSet<String>, edges: &mut BTreeSet<DependencyEdge>) {
    for reference in class.references.iter().filter(|r| !is_core_type(&r.target)) {
        let kind = if entity_types.contains(&reference.target) {
            DependencyKind::Entity
        } else {
            DependencyKind::Default
        };
        edges.insert(DependencyEdge {
            source: class.fully_qualified_name.clone(),
            target: reference.target.clone(),
            description: reference.description.clone(),
            kind,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::tests::test_class;

    fn catalog() -> StereotypeCatalog {
        StereotypeCatalog::default()
    }

    fn injectable_class(fqn: &str) -> JavaClass {
        let mut class = test_class(fqn);
        class
            .annotations
            .insert("org.springframework.stereotype.Service".to_owned());
        class
    }

    #[test]
    fn single_constructor_is_injection() {
        let mut class = injectable_class("com.acme.order.OrderService");
        class.constructors.push(ConstructorDescriptor {
            parameter_types: vec!["com.acme.inventory.InventoryClient".to_owned()],
            annotations: Default::default(),
        });
        let evident = ArchitecturallyEvidentType::classify(&class, &catalog(), &HashSet::new());
        let extracted = extract(&class, &evident, &HashSet::new(), &catalog());
        assert_eq!(1, extracted.injections.len());
        assert_eq!(InjectionSite::Constructor, extracted.injections[0].site);
        assert_eq!(DependencyKind::UsesComponent, extracted.edges[0].kind);
    }

    #[test]
    fn multiple_unannotated_constructors_are_default_edges() {
        let mut class = injectable_class("com.acme.order.OrderService");
        class.constructors.push(ConstructorDescriptor {
            parameter_types: vec!["com.acme.inventory.InventoryClient".to_owned()],
            annotations: Default::default(),
        });
        class.constructors.push(ConstructorDescriptor {
            parameter_types: vec![],
            annotations: Default::default(),
        });
        let evident = ArchitecturallyEvidentType::classify(&class, &catalog(), &HashSet::new());
        let extracted = extract(&class, &evident, &HashSet::new(), &catalog());
        assert!(extracted.injections.is_empty());
        assert_eq!(DependencyKind::Default, extracted.edges[0].kind);
    }

    #[test]
    fn injected_field_on_non_configuration_class_is_flagged() {
        let mut class = injectable_class("com.acme.order.OrderService");
        class.fields.push(FieldDescriptor {
            name: "client".to_owned(),
            field_type: "com.acme.inventory.InventoryClient".to_owned(),
            annotations: [catalog().injection.iter().next().unwrap().clone()].into(),
        });
        let evident = ArchitecturallyEvidentType::classify(&class, &catalog(), &HashSet::new());
        let extracted = extract(&class, &evident, &HashSet::new(), &catalog());
        assert_eq!(1, extracted.injections.len());
        assert_eq!(InjectionSite::Field, extracted.injections[0].site);
    }

    #[test]
    fn event_listener_method_parameter_is_tagged() {
        let mut class = injectable_class("com.acme.order.OrderListener");
        class.methods.push(MethodDescriptor {
            name: "on".to_owned(),
            parameter_types: vec!["com.acme.order.OrderPlaced".to_owned()],
            return_type: None,
            annotations: ["org.springframework.context.event.EventListener".to_owned()].into(),
            is_synthetic: false,
            transaction_phase: None,
        });
        let evident = ArchitecturallyEvidentType::classify(&class, &catalog(), &HashSet::new());
        let extracted = extract(&class, &evident, &HashSet::new(), &catalog());
        assert_eq!(DependencyKind::EventListener, extracted.edges[0].kind);
    }

    #[test]
    fn core_java_types_produce_no_edges() {
        let mut class = injectable_class("com.acme.order.OrderService");
        class.constructors.push(ConstructorDescriptor {
            parameter_types: vec!["java.lang.String".to_owned()],
            annotations: Default::default(),
        });
        let evident = ArchitecturallyEvidentType::classify(&class, &catalog(), &HashSet::new());
        let extracted = extract(&class, &evident, &HashSet::new(), &catalog());
        assert!(extracted.edges.is_empty());
    }

    #[test]
    fn entity_reference_is_refined() {
        let mut class = test_class("com.acme.order.OrderService");
        class.references.push(crate::class::ClassReference {
            target: "com.acme.order.Order".to_owned(),
            description: "field type".to_owned(),
        });
        let entity_types = HashSet::from(["com.acme.order.Order".to_owned()]);
        let evident = ArchitecturallyEvidentType::classify(&class, &catalog(), &HashSet::new());
        let extracted = extract(&class, &evident, &entity_types, &catalog());
        assert_eq!(DependencyKind::Entity, extracted.edges[0].kind);
    }

    #[test]
    fn duplicate_edges_are_deduplicated() {
        let mut class = test_class("com.acme.order.OrderService");
        class.references.push(crate::class::ClassReference {
            target: "com.acme.inventory.Stock".to_owned(),
            description: "field type".to_owned(),
        });
        class.references.push(crate::class::ClassReference {
            target: "com.acme.inventory.Stock".to_owned(),
            description: "field type".to_owned(),
        });
        let evident = ArchitecturallyEvidentType::classify(&class, &catalog(), &HashSet::new());
        let extracted = extract(&class, &evident, &HashSet::new(), &catalog());
        assert_eq!(1, extracted.edges.len());
    }
}
