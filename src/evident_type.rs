//! Classifying a class by its structural/annotation role — the "architecturally evident type".

use std::collections::HashSet;

use bitflags::bitflags;

use crate::{class::JavaClass, stereotype::StereotypeCatalog};

bitflags! {
    /// The architectural roles a class was recognized as playing.
    ///
    /// A single flags value, populated by a pipeline of independent detector functions and
    /// unioned together — no per-role struct hierarchy, no virtual dispatch.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Roles: u16 {
        /// Carries a generic component/bean stereotype.
        const COMPONENT = 1 << 0;
        /// Carries a service-layer stereotype.
        const SERVICE = 1 << 1;
        /// Carries a web-controller stereotype.
        const CONTROLLER = 1 << 2;
        /// Carries a persistence-repository stereotype.
        const REPOSITORY = 1 << 3;
        /// Carries a `@Configuration`-style stereotype.
        const CONFIGURATION = 1 << 4;
        /// Carries a `@ConfigurationProperties`-style stereotype.
        const CONFIGURATION_PROPERTIES = 1 << 5;
        /// Declares, or implements, at least one recognized event-listener method.
        const EVENT_LISTENER = 1 << 6;
        /// Carries a JPA entity annotation.
        const ENTITY = 1 << 7;
    }
}

/// A method recognized as an event listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListenerMethod {
    /// The method's name.
    pub name: String,
    /// The parameter types of the method — for a single-argument listener this is the event type.
    pub parameter_types: Vec<String>,
    /// Whether the method is marked `@Async`.
    pub is_async: bool,
    /// The transaction phase the listener fires on, if it is a transactional listener that
    /// declared one.
    pub transaction_phase: Option<String>,
}

/// The architecturally-evident classification of a single class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchitecturallyEvidentType {
    roles: Roles,
    is_known_bean: bool,
    listener_methods: Vec<EventListenerMethod>,
}

impl ArchitecturallyEvidentType {
    /// Classifies `class` against `catalog`, given the set of fully-qualified class names the
    /// enclosing module already knows to be Spring beans (injected somewhere, or annotated as a
    /// component/service/controller/repository/configuration itself).
    ///
    /// `known_beans` is consulted only by [`ArchitecturallyEvidentType::is_injectable`]: a class
    /// can be a known bean (e.g. a `@Bean`-factory-method return type) without carrying any
    /// stereotype annotation of its own.
    #[must_use]
    pub fn classify(class: &JavaClass, catalog: &StereotypeCatalog, known_beans: &HashSet<String>) -> Self {
        let mut roles = Roles::empty();
        roles.set(Roles::COMPONENT, any_annotation(class, &catalog.component));
        roles.set(Roles::SERVICE, any_annotation(class, &catalog.service));
        roles.set(Roles::CONTROLLER, any_annotation(class, &catalog.controller));
        roles.set(Roles::REPOSITORY, any_annotation(class, &catalog.repository));
        roles.set(Roles::CONFIGURATION, any_annotation(class, &catalog.configuration));
        roles.set(
            Roles::CONFIGURATION_PROPERTIES,
            any_annotation(class, &catalog.configuration_properties),
        );
        roles.set(Roles::ENTITY, any_annotation(class, &catalog.jpa_entity));

        let listener_methods = listener_methods(class, catalog);
        roles.set(Roles::EVENT_LISTENER, !listener_methods.is_empty());

        Self {
            roles,
            is_known_bean: known_beans.contains(&class.fully_qualified_name),
            listener_methods,
        }
    }

    /// Carries a generic component/bean stereotype.
    #[must_use]
    pub fn is_component(&self) -> bool {
        self.roles.contains(Roles::COMPONENT)
    }

    /// Carries a service-layer stereotype.
    #[must_use]
    pub fn is_service(&self) -> bool {
        self.roles.contains(Roles::SERVICE)
    }

    /// Carries a web-controller stereotype.
    #[must_use]
    pub fn is_controller(&self) -> bool {
        self.roles.contains(Roles::CONTROLLER)
    }

    /// Carries a persistence-repository stereotype.
    #[must_use]
    pub fn is_repository(&self) -> bool {
        self.roles.contains(Roles::REPOSITORY)
    }

    /// Carries a `@Configuration`-style stereotype.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        self.roles.contains(Roles::CONFIGURATION)
    }

    /// Carries a `@ConfigurationProperties`-style stereotype.
    #[must_use]
    pub fn is_configuration_properties(&self) -> bool {
        self.roles.contains(Roles::CONFIGURATION_PROPERTIES)
    }

    /// Declares, or implements, at least one recognized event-listener method.
    #[must_use]
    pub fn is_event_listener(&self) -> bool {
        self.roles.contains(Roles::EVENT_LISTENER)
    }

    /// Carries a JPA entity annotation.
    #[must_use]
    pub fn is_entity(&self) -> bool {
        self.roles.contains(Roles::ENTITY)
    }

    /// Whether this class is injectable: a service, controller, event listener, configuration
    /// properties holder, a known bean, or a plain component/bean.
    #[must_use]
    pub fn is_injectable(&self) -> bool {
        self.is_known_bean
            || self.roles.intersects(
                Roles::SERVICE
                    | Roles::CONTROLLER
                    | Roles::EVENT_LISTENER
                    | Roles::CONFIGURATION_PROPERTIES
                    | Roles::COMPONENT
                    | Roles::REPOSITORY
                    | Roles::CONFIGURATION,
            )
    }

    /// The distinct parameter types of the methods recognized as event listeners.
    #[must_use]
    pub fn reference_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self
            .listener_methods
            .iter()
            .flat_map(|m| m.parameter_types.iter())
            .map(String::as_str)
            .collect();
        types.sort_unstable();
        types.dedup();
        types
    }

    /// The methods recognized as event listeners.
    #[must_use]
    pub fn reference_methods(&self) -> &[EventListenerMethod] {
        &self.listener_methods
    }
}

fn any_annotation(class: &JavaClass, annotations: &std::collections::HashSet<String>) -> bool {
    annotations.iter().any(|a| class.has_annotation(a))
}

fn listener_methods(class: &JavaClass, catalog: &StereotypeCatalog) -> Vec<EventListenerMethod> {
    let listener_annotations = catalog.all_event_listener_annotations();
    let implements_listener_interface = class
        .interfaces
        .iter()
        .any(|i| i == &catalog.application_listener_interface);

    class
        .methods
        .iter()
        .filter(|m| {
            let annotated = m.annotations.iter().any(|a| listener_annotations.contains(a.as_str()));
            let is_application_listener_callback = implements_listener_interface
                && !m.is_synthetic
                && m.name == catalog.application_listener_method
                && m.parameter_types.len() == 1;
            annotated || is_application_listener_callback
        })
        .map(|m| EventListenerMethod {
            name: m.name.clone(),
            parameter_types: m.parameter_types.clone(),
            is_async: m.annotations.iter().any(|a| catalog.async_method.contains(a)),
            transaction_phase: m.transaction_phase.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::tests::test_class;

    #[test]
    fn service_is_injectable() {
        let catalog = StereotypeCatalog::default();
        let mut class = test_class("com.acme.order.OrderService");
        class
            .annotations
            .insert("org.springframework.stereotype.Service".to_owned());
        let evident = ArchitecturallyEvidentType::classify(&class, &catalog, &HashSet::new());
        assert!(evident.is_service());
        assert!(evident.is_injectable());
        assert!(!evident.is_controller());
    }

    #[test]
    fn application_listener_interface_is_recognized_without_annotation() {
        let catalog = StereotypeCatalog::default();
        let mut class = test_class("com.acme.order.OrderListener");
        class.interfaces.push(catalog.application_listener_interface.clone());
        class.methods.push(crate::class::MethodDescriptor {
            name: "onApplicationEvent".to_owned(),
            parameter_types: vec!["com.acme.order.OrderPlaced".to_owned()],
            return_type: None,
            annotations: Default::default(),
            is_synthetic: false,
            transaction_phase: None,
        });
        let evident = ArchitecturallyEvidentType::classify(&class, &catalog, &HashSet::new());
        assert!(evident.is_event_listener());
        assert_eq!(vec!["com.acme.order.OrderPlaced"], evident.reference_types());
    }

    #[test]
    fn synthetic_bridge_method_is_not_a_listener() {
        let catalog = StereotypeCatalog::default();
        let mut class = test_class("com.acme.order.OrderListener");
        class.interfaces.push(catalog.application_listener_interface.clone());
        class.methods.push(crate::class::MethodDescriptor {
            name: "onApplicationEvent".to_owned(),
            parameter_types: vec!["java.lang.Object".to_owned()],
            return_type: None,
            annotations: Default::default(),
            is_synthetic: true,
            transaction_phase: None,
        });
        let evident = ArchitecturallyEvidentType::classify(&class, &catalog, &HashSet::new());
        assert!(!evident.is_event_listener());
    }

    #[test]
    fn known_bean_without_stereotype_is_injectable() {
        let catalog = StereotypeCatalog::default();
        let class = test_class("com.acme.order.BeanFactoryOutput");
        let known_beans = HashSet::from([class.fully_qualified_name.clone()]);
        let evident = ArchitecturallyEvidentType::classify(&class, &catalog, &known_beans);
        assert!(evident.is_injectable());
        assert!(!evident.is_component());
    }

    #[test]
    fn plain_class_has_no_roles() {
        let catalog = StereotypeCatalog::default();
        let class = test_class("com.acme.order.Whatever");
        let evident = ArchitecturallyEvidentType::classify(&class, &catalog, &HashSet::new());
        assert!(!evident.is_injectable());
        assert!(!evident.is_entity());
    }
}
