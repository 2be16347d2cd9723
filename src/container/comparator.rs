//! Orders arbitrary objects by the ordering position of the module that owns them.

use std::cmp::Ordering;

use crate::container::ApplicationModules;

/// Orders objects by their containing module's position in [`ApplicationModules::iter`]'s order.
///
/// Objects whose fully-qualified name cannot be resolved to any module sort after every object
/// that does resolve. Two objects belonging to the same module (or both unresolved) fall back to
/// an externally supplied tie-breaker, mirroring a framework `@Order`-style comparator.
#[derive(Debug, Clone, Copy)]
pub struct ModuleOrderComparator<'a> {
    modules: &'a ApplicationModules,
}

impl<'a> ModuleOrderComparator<'a> {
    /// Creates a comparator scoped to `modules`.
    #[must_use]
    pub fn new(modules: &'a ApplicationModules) -> Self {
        Self { modules }
    }

    /// Compares `a` and `b`, extracting each object's fully-qualified class name with `key` and
    /// breaking ties (same module, or neither resolves to one) with `tie_break`.
    pub fn compare<T>(
        &self,
        a: &T,
        b: &T,
        key: impl Fn(&T) -> &str,
        tie_break: impl Fn(&T, &T) -> Ordering,
    ) -> Ordering {
        let index_a = self.modules.order_index(key(a));
        let index_b = self.modules.order_index(key(b));
        match (index_a, index_b) {
            (Some(ia), Some(ib)) if ia != ib => ia.cmp(&ib),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            _ => tie_break(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        class::tests::test_class,
        classes::Classes,
        config::ApplicationModulesOptions,
        external::NoPackageAnnotations,
        name::PackageName,
    };

    fn modules() -> ApplicationModules {
        let classes = Classes::new([
            test_class("com.acme.order.OrderService"),
            test_class("com.acme.inventory.Stock"),
        ]);
        let options = ApplicationModulesOptions::default()
            .application_module_marker("com.acme.ApplicationModule")
            .named_interface_marker("com.acme.NamedInterface")
            .with_package_annotation_source(NoPackageAnnotations);
        ApplicationModules::of(vec![PackageName::new("com.acme")], classes, options).unwrap()
    }

    #[test]
    fn unknown_objects_sort_after_known_ones() {
        let modules = modules();
        let comparator = ModuleOrderComparator::new(&modules);
        let ordering = comparator.compare(
            &"com.acme.order.OrderService",
            &"com.acme.unrelated.Ghost",
            |s| *s,
            |_, _| Ordering::Equal,
        );
        assert_eq!(Ordering::Less, ordering);
    }

    #[test]
    fn same_module_objects_use_the_tie_breaker() {
        let modules = modules();
        let comparator = ModuleOrderComparator::new(&modules);
        let ordering = comparator.compare(
            &"com.acme.order.OrderService",
            &"com.acme.order.OrderService",
            |s| *s,
            |_, _| Ordering::Greater,
        );
        assert_eq!(Ordering::Greater, ordering);
    }

    #[test]
    fn both_unknown_uses_the_tie_breaker() {
        let modules = modules();
        let comparator = ModuleOrderComparator::new(&modules);
        let ordering = comparator.compare(
            &"com.acme.unrelated.A",
            &"com.acme.unrelated.B",
            |s| *s,
            |_, _| Ordering::Less,
        );
        assert_eq!(Ordering::Less, ordering);
    }
}
