//! A module's outbound dependencies, and the policy check that validates them.

use std::collections::HashSet;

use crate::{
    container::ApplicationModules,
    dependency::{DependencyEdge, DependencyKind, InjectionSite},
    module::ApplicationModule,
    violation::{Violation, Violations},
};

/// How far [`ApplicationModule::get_dependencies`] should follow the dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyDepth {
    /// Return nothing.
    None,
    /// Only modules directly depended on.
    Immediate,
    /// All modules transitively reached, each visited once.
    All,
}

/// A single resolved dependency: an edge together with the identifier of the module it lands in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDependency {
    /// The underlying edge.
    pub edge: DependencyEdge,
    /// The identifier of the module the edge's target belongs to.
    pub target_module: String,
}

/// The result of [`ApplicationModule::get_dependencies`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationModuleDependencies {
    dependencies: Vec<ResolvedDependency>,
}

impl ApplicationModuleDependencies {
    pub(crate) fn new(dependencies: Vec<ResolvedDependency>) -> Self {
        Self { dependencies }
    }

    /// Iterates over the resolved dependencies.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedDependency> {
        self.dependencies.iter()
    }

    /// The distinct target module identifiers.
    #[must_use]
    pub fn target_modules(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.dependencies.iter().map(|d| d.target_module.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Whether there are no dependencies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

/// Resolves every outbound dependency of `module`, filtered to `kinds` (empty means "all kinds"),
/// up to `depth`.
#[must_use]
pub fn get_dependencies(
    module: &ApplicationModule,
    modules: &ApplicationModules,
    depth: DependencyDepth,
    kinds: &[DependencyKind],
) -> ApplicationModuleDependencies {
    if matches!(depth, DependencyDepth::None) {
        return ApplicationModuleDependencies::default();
    }

    let mut seen_modules = HashSet::new();
    seen_modules.insert(module.identifier().as_str().to_owned());
    let mut frontier = vec![module.identifier().as_str().to_owned()];
    let mut resolved = Vec::new();

    loop {
        let mut next_frontier = Vec::new();
        for module_id in &frontier {
            let Some(current) = modules.get(module_id) else {
                continue;
            };
            for edge in current.edges() {
                if !kinds.is_empty() && !kinds.contains(&edge.kind) {
                    continue;
                }
                let Some(target_module) = modules.module_containing(&edge.target) else {
                    continue;
                };
                if target_module.identifier() == current.identifier() {
                    continue;
                }
                resolved.push(ResolvedDependency {
                    edge: edge.clone(),
                    target_module: target_module.identifier().as_str().to_owned(),
                });
                if matches!(depth, DependencyDepth::All)
                    && seen_modules.insert(target_module.identifier().as_str().to_owned())
                {
                    next_frontier.push(target_module.identifier().as_str().to_owned());
                }
            }
        }
        if matches!(depth, DependencyDepth::Immediate) || next_frontier.is_empty() {
            break;
        }
        frontier = next_frontier;
    }

    ApplicationModuleDependencies::new(resolved)
}

/// Evaluates every outbound edge of `module` against the allowed-dependency policy (§4.6) and
/// accumulates the resulting [`Violations`].
#[must_use]
pub fn detect_dependencies(module: &ApplicationModule, modules: &ApplicationModules) -> Violations {
    let mut violations = Vec::new();

    for edge in module.edges() {
        let Some(target_module) = modules.module_containing(&edge.target) else {
            continue;
        };
        if target_module.identifier() == module.identifier() {
            continue;
        }

        let target_interfaces = target_module.named_interfaces().interfaces_containing(&edge.target);
        let explicitly_allowed = module.declared_dependencies().explicitly_allows(
            target_module.identifier().as_str(),
            &target_interfaces,
        ) || modules
            .shared_modules()
            .iter()
            .any(|shared| shared == target_module.identifier().as_str());

        let allowed = explicitly_allowed
            || target_module.is_open()
            || is_parent_chain_reference(module, target_module);

        if !allowed {
            violations.push(Violation::new(format!(
                "Module '{}' depends on module '{}' via {} -> {} ({}). Allowed targets: {}.",
                module.identifier(),
                target_module.identifier(),
                edge.source,
                edge.target,
                edge.description,
                module.declared_dependencies().describe_targets(),
            )));
        }

        if !target_module.is_open()
            && !target_interfaces.iter().any(|i| *i != crate::interface::UNNAMED || explicitly_allowed)
            && !target_module.named_interfaces().is_exposed(&edge.target)
        {
            violations.push(Violation::new(format!(
                "Module '{}' depends on type {} which is not exposed by module '{}'.",
                module.identifier(),
                edge.target,
                target_module.identifier(),
            )));
        }

        if !is_valid_module_relation(module, target_module) {
            violations.push(Violation::new(format!(
                "Module '{}' references module '{}', but neither is an ancestor of the other.",
                module.identifier(),
                target_module.identifier(),
            )));
        }
    }

    for injection in module.injections() {
        if injection.site != InjectionSite::Field {
            continue;
        }
        let owner_is_configuration = module
            .get_architecturally_evident_type(&injection.edge.source)
            .map(|evident| evident.is_configuration())
            .unwrap_or(false);
        if !owner_is_configuration {
            violations.push(Violation::new(format!(
                "{} uses field injection in module '{}'. Prefer constructor injection instead!",
                injection.edge.source,
                module.identifier(),
            )));
        }
    }

    Violations::from_iter(violations)
}

fn is_parent_chain_reference(module: &ApplicationModule, target_module: &ApplicationModule) -> bool {
    module
        .base_package()
        .is_sub_package_of(target_module.base_package())
}

fn is_valid_module_relation(module: &ApplicationModule, target_module: &ApplicationModule) -> bool {
    let a = module.base_package();
    let b = target_module.base_package();
    a == b
        || a.is_sub_package_of(b)
        || b.is_sub_package_of(a)
        || (a.parent().as_ref() == b.parent().as_ref() && a.parent().is_some())
        || (a.parent().is_none() && b.parent().is_none())
}
