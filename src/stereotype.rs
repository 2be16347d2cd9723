//! The stereotype catalog: which fully-qualified annotation names denote which architectural role.
//!
//! This is supplied by the host application (it knows which framework it is analyzing); the core
//! only ever compares annotation FQ names against the sets configured here.

use std::collections::HashSet;

/// Tells the core which fully-qualified annotation names denote each recognized stereotype.
///
/// [`StereotypeCatalog::default`] returns the conventional Spring annotation names; a host
/// targeting a different framework (or a test fixture) builds its own.
#[derive(Debug, Clone)]
pub struct StereotypeCatalog {
    /// Generic component/bean stereotype annotations.
    pub component: HashSet<String>,
    /// Service-layer stereotype annotations.
    pub service: HashSet<String>,
    /// Web controller stereotype annotations.
    pub controller: HashSet<String>,
    /// Persistence repository stereotype annotations.
    pub repository: HashSet<String>,
    /// `@Configuration`-style class annotations.
    pub configuration: HashSet<String>,
    /// `@ConfigurationProperties`-style class annotations.
    pub configuration_properties: HashSet<String>,
    /// Event-listener method annotations.
    pub event_listener: HashSet<String>,
    /// Transactional event-listener method annotations (a refinement of `event_listener`).
    pub transactional_event_listener: HashSet<String>,
    /// `@Async`-style method annotations.
    pub async_method: HashSet<String>,
    /// `@Bean`-style factory method annotations.
    pub bean_factory_method: HashSet<String>,
    /// Domain-event marker annotations.
    pub domain_event: HashSet<String>,
    /// Domain-event-handler method annotations.
    pub domain_event_handler: HashSet<String>,
    /// JPA entity class annotations.
    pub jpa_entity: HashSet<String>,
    /// Bean-validation constraint annotations, used to recognize validator supertypes.
    pub validator_supertype: HashSet<String>,
    /// Constructor/field/method injection annotations (e.g. `@Autowired`, `@Inject`).
    pub injection: HashSet<String>,
    /// The fully-qualified name of the framework's "application listener" interface.
    pub application_listener_interface: String,
    /// The method name an application-listener implementation must declare to count as a
    /// listener (conventionally `onApplicationEvent`).
    pub application_listener_method: String,
}

fn set(names: &[&str]) -> HashSet<String> {
    names.iter().map(|&s| s.to_owned()).collect()
}

impl Default for StereotypeCatalog {
    fn default() -> Self {
        Self {
            component: set(&["org.springframework.stereotype.Component"]),
            service: set(&["org.springframework.stereotype.Service"]),
            controller: set(&[
                "org.springframework.stereotype.Controller",
                "org.springframework.web.bind.annotation.RestController",
            ]),
            repository: set(&["org.springframework.stereotype.Repository"]),
            configuration: set(&["org.springframework.context.annotation.Configuration"]),
            configuration_properties: set(&[
                "org.springframework.boot.context.properties.ConfigurationProperties",
            ]),
            event_listener: set(&["org.springframework.context.event.EventListener"]),
            transactional_event_listener: set(&[
                "org.springframework.transaction.event.TransactionalEventListener",
            ]),
            async_method: set(&["org.springframework.scheduling.annotation.Async"]),
            bean_factory_method: set(&["org.springframework.context.annotation.Bean"]),
            domain_event: set(&["org.springframework.modulith.events.DomainEvent"]),
            domain_event_handler: set(&["org.springframework.modulith.events.ApplicationModuleListener"]),
            jpa_entity: set(&["jakarta.persistence.Entity", "javax.persistence.Entity"]),
            validator_supertype: set(&["jakarta.validation.Constraint", "javax.validation.Constraint"]),
            injection: set(&[
                "org.springframework.beans.factory.annotation.Autowired",
                "jakarta.inject.Inject",
                "javax.inject.Inject",
            ]),
            application_listener_interface: "org.springframework.context.ApplicationListener".to_owned(),
            application_listener_method: "onApplicationEvent".to_owned(),
        }
    }
}

impl StereotypeCatalog {
    /// All annotations that mark a method as an event listener: the union of `event_listener`,
    /// `transactional_event_listener`, and `domain_event_handler`.
    #[must_use]
    pub fn all_event_listener_annotations(&self) -> HashSet<&str> {
        self.event_listener
            .iter()
            .chain(&self.transactional_event_listener)
            .chain(&self.domain_event_handler)
            .map(String::as_str)
            .collect()
    }
}
