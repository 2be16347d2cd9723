//! A human-readable report of a single module, for tooling and documentation.

use std::fmt::{self, Display, Formatter};

use crate::{container::ApplicationModules, interface::UNNAMED, module::ApplicationModule};

/// Formats a module's structure: display name, openness, parent, identifier, base package,
/// excluded packages, named interfaces, direct dependencies (flagging bootstrap ones), and
/// internal beans (flagging exposed ones).
#[derive(Debug, Clone, Copy)]
pub struct ModuleDescription<'a> {
    module: &'a ApplicationModule,
    modules: &'a ApplicationModules,
}

impl<'a> ModuleDescription<'a> {
    /// Creates a description for `module` within the context of `modules`.
    #[must_use]
    pub fn new(module: &'a ApplicationModule, modules: &'a ApplicationModules) -> Self {
        Self { module, modules }
    }
}

impl Display for ModuleDescription<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let module = self.module;
        let display_name = module
            .information()
            .display_name
            .as_deref()
            .unwrap_or_else(|| module.identifier().as_str());

        writeln!(f, "# {display_name}")?;
        writeln!(f, "> Identifier: {}", module.identifier())?;
        writeln!(f, "> Base package: {}", module.base_package())?;
        writeln!(f, "> Open: {}", module.is_open())?;

        if let Some(parent) = module.base_package().parent() {
            writeln!(f, "> Parent package: {parent}")?;
        }

        if !module.exclusions().is_empty() {
            let excluded: Vec<String> = module.exclusions().iter().map(ToString::to_string).collect();
            writeln!(f, "> Excludes: {}", excluded.join(", "))?;
        }

        writeln!(f, "> Named interfaces:")?;
        for interface in module.named_interfaces().iter() {
            let name = if interface.name() == UNNAMED { "<unnamed>" } else { interface.name() };
            writeln!(f, ">   - {name} ({} classes)", interface.classes().len())?;
        }

        writeln!(f, "> Direct dependencies:")?;
        let dependencies = crate::module::get_dependencies(
            module,
            self.modules,
            crate::module::DependencyDepth::Immediate,
            &[],
        );
        let bootstrap_targets: Vec<&str> = crate::module::get_dependencies(
            module,
            self.modules,
            crate::module::DependencyDepth::Immediate,
            &[crate::dependency::DependencyKind::UsesComponent],
        )
        .target_modules();
        for target in dependencies.target_modules() {
            let marker = if bootstrap_targets.contains(&target) { " (bootstrap)" } else { "" };
            writeln!(f, ">   - {target}{marker}")?;
        }

        write!(f, "> Internal beans:")?;
        for class in module.classes() {
            if module
                .get_architecturally_evident_type(&class.fully_qualified_name)
                .map(|evident| evident.is_injectable())
                .unwrap_or(false)
            {
                let exposed = if module.named_interfaces().is_exposed(&class.fully_qualified_name) {
                    " (exposed)"
                } else {
                    ""
                };
                write!(f, "\n>   - {}{exposed}", class.fully_qualified_name)?;
            }
        }

        Ok(())
    }
}
