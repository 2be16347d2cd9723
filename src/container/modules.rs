//! The top-level entry point: discovers application modules from a class universe and verifies
//! them against the allowed-dependency policy.

use std::{
    collections::{HashMap, HashSet},
    str::FromStr,
    sync::{Arc, OnceLock, RwLock},
};

use crate::{
    classes::Classes,
    config::ApplicationModulesOptions,
    container::{cycle, order},
    error::{ConfigurationError, VerificationFailed},
    interface,
    module::{ApplicationModule, ApplicationModuleIdentifier, ModuleInformation},
    name::PackageName,
    package::JavaPackage,
    policy::{AllowedDependencies, InterfaceSelector},
    violation::{Violation, Violations},
};

/// The discovered, resolved set of application modules for one class universe: the result of
/// applying a [`crate::container::DetectionStrategy`] and resolving every module's markers,
/// named interfaces, and declared dependencies.
///
/// Immutable after construction; [`ApplicationModules::verify`] memoizes its result so repeated
/// calls are free.
#[derive(Debug)]
pub struct ApplicationModules {
    modules: HashMap<String, ApplicationModule>,
    root_packages: Vec<PackageName>,
    shared_modules: Vec<String>,
    ordered_identifiers: Vec<String>,
    static_violations: Violations,
    verified: OnceLock<Violations>,
}

impl ApplicationModules {
    /// Discovers and resolves application modules rooted at `root_packages`, out of the full
    /// `classes` universe.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::EmptyClassUniverse`] if `classes` is empty,
    /// [`ConfigurationError::NoRootMetadata`] if no candidate base package is found, and
    /// propagates annotation-ambiguity, named-interface and allowed-dependency configuration
    /// errors raised while resolving an individual module.
    #[tracing::instrument(skip(classes, options), fields(classes = classes.len()))]
    pub fn of(
        root_packages: Vec<PackageName>,
        classes: Classes,
        options: ApplicationModulesOptions,
    ) -> Result<Self, ConfigurationError> {
        if classes.is_empty() {
            return Err(ConfigurationError::EmptyClassUniverse(root_packages));
        }
        if options.detection_strategy_registrations.len() > 1 {
            return Err(ConfigurationError::MultipleDetectionStrategies(
                options.detection_strategy_registrations.clone(),
            ));
        }

        let catalog = Arc::clone(&options.stereotype_catalog);
        let known_beans: Arc<HashSet<String>> = Arc::new(
            classes
                .iter()
                .flat_map(|c| &c.methods)
                .filter(|m| m.annotations.iter().any(|a| catalog.bean_factory_method.contains(a)))
                .filter_map(|m| m.return_type.clone())
                .collect(),
        );
        let entity_types: Arc<HashSet<String>> = Arc::new(
            classes
                .iter()
                .filter(|c| catalog.jpa_entity.iter().any(|a| c.has_annotation(a)))
                .map(|c| c.fully_qualified_name.clone())
                .collect(),
        );

        let mut candidates: Vec<PackageName> = Vec::new();
        for root in &root_packages {
            candidates.extend(options.detection_strategy.candidate_base_packages(
                root,
                &classes,
                &options.application_module_marker,
                options.package_annotation_source.as_ref(),
            ));
        }
        if let Some(ignore) = &options.ignore {
            candidates.retain(|candidate| !ignore(candidate));
        }
        candidates.sort();
        candidates.dedup();

        if candidates.is_empty() {
            return Err(ConfigurationError::NoRootMetadata(root_packages));
        }
        tracing::debug!(count = candidates.len(), "detected candidate base packages");

        let mut modules = HashMap::new();
        for base_package in &candidates {
            let exclusions: Vec<PackageName> = candidates
                .iter()
                .filter(|other| *other != base_package && other.is_sub_package_of(base_package))
                .cloned()
                .collect();

            let descriptor_package = JavaPackage::of(&classes, base_package.clone()).to_single();
            let attrs = descriptor_package
                .find_annotation(&options.application_module_marker, options.package_annotation_source.as_ref())?
                .unwrap_or_default();

            let root = root_packages
                .iter()
                .find(|root| *base_package == **root || base_package.is_sub_package_of(root))
                .cloned()
                .unwrap_or_else(|| base_package.clone());

            let derived = ApplicationModuleIdentifier::derive(base_package, &root, options.use_fully_qualified_module_names);
            let identifier = attrs
                .id
                .as_deref()
                .filter(|id| !id.is_empty())
                .and_then(|id| ApplicationModuleIdentifier::from_str(id).ok())
                .unwrap_or(derived);

            let module_classes = JavaPackage::of(&classes, base_package.clone()).without(&exclusions).classes().clone();
            let module_package = JavaPackage::of(&module_classes, base_package.clone());

            let named_interfaces = interface::resolve(
                identifier.as_str(),
                &module_classes,
                &module_package,
                attrs.is_open,
                &options.named_interface_marker,
                options.package_annotation_source.as_ref(),
            )?;

            let declared_dependencies = AllowedDependencies::parse(&attrs.allowed_dependencies)?;

            let module = ApplicationModule::new(
                identifier.clone(),
                base_package.clone(),
                exclusions,
                module_classes,
                attrs.is_open,
                ModuleInformation {
                    display_name: attrs.display_name.clone(),
                },
                declared_dependencies,
                named_interfaces,
                Arc::clone(&catalog),
                Arc::clone(&known_beans),
                Arc::clone(&entity_types),
            );

            modules.insert(identifier.as_str().to_owned(), module);
        }

        for module in modules.values() {
            let AllowedDependencies::Closed(deps) = module.declared_dependencies() else {
                continue;
            };
            for dep in deps {
                let Some(target) = modules.get(&dep.target_module) else {
                    return Err(ConfigurationError::UnknownModule {
                        from: module.identifier().to_string(),
                        reference: dep.target_module.clone(),
                    });
                };
                if let InterfaceSelector::Named(name) = &dep.interface {
                    if target.named_interfaces().get(name).is_none() {
                        return Err(ConfigurationError::UnknownNamedInterface {
                            from: module.identifier().to_string(),
                            module: dep.target_module.clone(),
                            interface: name.clone(),
                        });
                    }
                }
            }
        }

        let mut adjacency: HashMap<String, HashSet<String>> = HashMap::new();
        for module in modules.values() {
            let own_id = module.identifier().as_str();
            let entry = adjacency.entry(own_id.to_owned()).or_default();
            for edge in module.edges() {
                let Some(target_id) = modules.values().find(|m| m.contains(&edge.target)).map(|m| m.identifier().as_str()) else {
                    continue;
                };
                if target_id != own_id {
                    entry.insert(target_id.to_owned());
                }
            }
        }

        let mut cycle_adjacency: HashMap<String, HashSet<String>> = HashMap::new();
        for module in modules.values().filter(|m| !m.is_open()) {
            let own_id = module.identifier().as_str();
            let entry = cycle_adjacency.entry(own_id.to_owned()).or_default();
            for edge in module.edges() {
                let Some(target) = modules.values().find(|m| m.contains(&edge.target)) else {
                    continue;
                };
                if target.is_open() {
                    continue;
                }
                let target_id = target.identifier().as_str();
                if target_id != own_id {
                    entry.insert(target_id.to_owned());
                }
            }
        }

        let mut static_violations = Vec::new();
        for found_cycle in cycle::find_cycles(&cycle_adjacency) {
            tracing::warn!(cycle = ?found_cycle, "cycle detected among modules");
            static_violations.push(Violation::new(format!(
                "Cycle detected among modules: {}",
                found_cycle.join(" -> ")
            )));
        }
        for rule in &options.extra_rules {
            for message in rule.evaluate(&classes) {
                static_violations.push(Violation::new(message));
            }
        }

        let ordered_identifiers = order::topological_order(&adjacency);
        let shared_modules: Vec<String> = options
            .shared_modules
            .iter()
            .filter(|id| modules.contains_key(id.as_str()))
            .cloned()
            .collect();

        tracing::info!(modules = modules.len(), "discovered application modules");

        Ok(Self {
            modules,
            root_packages,
            shared_modules,
            ordered_identifiers,
            static_violations: Violations::from_iter(static_violations),
            verified: OnceLock::new(),
        })
    }

    /// The root packages this set was discovered from.
    #[must_use]
    pub fn root_packages(&self) -> &[PackageName] {
        &self.root_packages
    }

    /// Looks up a module by identifier.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&ApplicationModule> {
        self.modules.get(identifier)
    }

    /// Finds the module that owns `fully_qualified_name`, if any.
    #[must_use]
    pub fn module_containing(&self, fully_qualified_name: &str) -> Option<&ApplicationModule> {
        self.modules.values().find(|m| m.contains(fully_qualified_name))
    }

    /// The identifiers explicitly configured as shared: implicitly allowed as a dependency target
    /// of every module.
    #[must_use]
    pub fn shared_modules(&self) -> &[String] {
        &self.shared_modules
    }

    /// Every module, in dependency-then-identifier topological order (§4.7).
    pub fn iter(&self) -> impl Iterator<Item = &ApplicationModule> {
        self.ordered_identifiers.iter().filter_map(|id| self.modules.get(id.as_str()))
    }

    /// The position of the module containing `fully_qualified_name` within [`Self::iter`]'s order,
    /// or `None` if no module contains it. Backs [`crate::container::ModuleOrderComparator`].
    #[must_use]
    pub fn order_index(&self, fully_qualified_name: &str) -> Option<usize> {
        let owner = self.module_containing(fully_qualified_name)?;
        self.ordered_identifiers.iter().position(|id| id == owner.identifier().as_str())
    }

    /// The number of discovered modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether no modules were discovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    #[tracing::instrument(skip(self))]
    fn detect_violations(&self) -> Violations {
        let mut all = self.static_violations.clone();
        for module in self.modules.values() {
            all.extend(crate::module::detect_dependencies(module, self));
        }
        if all.has_violations() {
            tracing::debug!(count = all.len(), "architecture violations detected");
        }
        all
    }

    /// Every architecture violation across every module, computed once and memoized.
    #[must_use]
    pub fn violations(&self) -> &Violations {
        self.verified.get_or_init(|| self.detect_violations())
    }

    /// Verifies every module against the allowed-dependency policy, raising on the first call that
    /// finds any violation. Subsequent calls replay the memoized result at no extra cost.
    ///
    /// # Errors
    /// Returns [`VerificationFailed`] wrapping every accumulated [`Violation`] found.
    pub fn verify(&self) -> Result<(), VerificationFailed> {
        self.violations().clone().throw_if_present()
    }
}

type CacheKey = (Vec<String>, usize, bool);

fn cache() -> &'static RwLock<HashMap<CacheKey, Arc<ApplicationModules>>> {
    static CACHE: OnceLock<RwLock<HashMap<CacheKey, Arc<ApplicationModules>>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

impl ApplicationModules {
    /// Builds (or reuses) a process-wide cached [`ApplicationModules`] for this root-package /
    /// class-universe-size / naming-mode combination.
    ///
    /// Mirrors the compute-once caching a byte-code loader typically performs: the first caller
    /// pays for discovery, later callers with the same key share the result. The cache key is
    /// coarse (it does not hash the full class universe) — callers that mutate the same root
    /// packages' contents between calls without changing its size should call
    /// [`ApplicationModules::of`] directly instead.
    ///
    /// # Errors
    /// Propagates any [`ConfigurationError`] from the underlying [`ApplicationModules::of`] call.
    pub fn cached(
        root_packages: Vec<PackageName>,
        classes: Classes,
        options: ApplicationModulesOptions,
    ) -> Result<Arc<Self>, ConfigurationError> {
        let key: CacheKey = (
            root_packages.iter().map(ToString::to_string).collect(),
            classes.len(),
            options.use_fully_qualified_module_names,
        );

        if let Some(hit) = cache().read().expect("cache lock not poisoned").get(&key) {
            tracing::trace!("application modules cache hit");
            return Ok(Arc::clone(hit));
        }

        let built = Arc::new(Self::of(root_packages, classes, options)?);
        cache().write().expect("cache lock not poisoned").insert(key, Arc::clone(&built));
        Ok(built)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        class::{tests::test_class, MarkerAttributes},
        external::NoPackageAnnotations,
    };

    fn options() -> ApplicationModulesOptions {
        ApplicationModulesOptions::default()
            .application_module_marker("com.acme.ApplicationModule")
            .named_interface_marker("com.acme.NamedInterface")
            .with_package_annotation_source(NoPackageAnnotations)
    }

    #[test]
    fn direct_sub_packages_become_modules() {
        let classes = Classes::new([
            test_class("com.acme.order.OrderService"),
            test_class("com.acme.inventory.Stock"),
        ]);
        let modules = ApplicationModules::of(vec![PackageName::new("com.acme")], classes, options()).unwrap();
        assert_eq!(2, modules.len());
        assert!(modules.get("order").is_some());
        assert!(modules.get("inventory").is_some());
    }

    #[test]
    fn empty_class_universe_is_rejected() {
        let result = ApplicationModules::of(vec![PackageName::new("com.acme")], Classes::default(), options());
        assert!(matches!(result, Err(ConfigurationError::EmptyClassUniverse(_))));
    }

    #[test]
    fn registering_detection_strategy_twice_is_a_configuration_error() {
        let classes = Classes::new([test_class("com.acme.order.OrderService")]);
        let conflicting_options = options()
            .with_detection_strategy(crate::container::DirectSubPackages)
            .with_detection_strategy(crate::container::DirectSubPackages);
        let result = ApplicationModules::of(vec![PackageName::new("com.acme")], classes, conflicting_options);
        assert!(matches!(result, Err(ConfigurationError::MultipleDetectionStrategies(_))));
    }

    #[test]
    fn disallowed_dependency_is_a_violation() {
        let mut order_service = test_class("com.acme.order.OrderService");
        order_service.constructors.push(crate::class::ConstructorDescriptor {
            parameter_types: vec!["com.acme.inventory.Stock".to_owned()],
            annotations: Default::default(),
        });
        let classes = Classes::new([order_service, test_class("com.acme.inventory.Stock")]);
        let modules = ApplicationModules::of(vec![PackageName::new("com.acme")], classes, options()).unwrap();
        assert!(modules.verify().is_err());
    }

    #[test]
    fn declared_dependency_is_allowed() {
        let mut order_service = test_class("com.acme.order.OrderService");
        order_service.constructors.push(crate::class::ConstructorDescriptor {
            parameter_types: vec!["com.acme.inventory.Stock".to_owned()],
            annotations: Default::default(),
        });
        let mut package_info = test_class("com.acme.order.package-info");
        package_info.markers.insert(
            "com.acme.ApplicationModule".to_owned(),
            MarkerAttributes {
                allowed_dependencies: vec!["inventory".to_owned()],
                ..Default::default()
            },
        );
        let classes = Classes::new([order_service, package_info, test_class("com.acme.inventory.Stock")]);
        let modules = ApplicationModules::of(vec![PackageName::new("com.acme")], classes, options()).unwrap();
        assert!(modules.verify().is_ok());
    }

    #[test]
    fn unknown_allowed_dependency_target_is_a_configuration_error() {
        let mut package_info = test_class("com.acme.order.package-info");
        package_info.markers.insert(
            "com.acme.ApplicationModule".to_owned(),
            MarkerAttributes {
                allowed_dependencies: vec!["nonexistent".to_owned()],
                ..Default::default()
            },
        );
        let classes = Classes::new([package_info, test_class("com.acme.order.OrderService")]);
        let result = ApplicationModules::of(vec![PackageName::new("com.acme")], classes, options());
        assert!(matches!(result, Err(ConfigurationError::UnknownModule { .. })));
    }
}
