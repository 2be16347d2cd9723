//! Strategies for choosing which sub-packages of a root package become application modules.

use crate::{classes::Classes, external::PackageAnnotationSource, name::PackageName, package::JavaPackage};

/// Chooses the candidate module base packages beneath a root package.
pub trait DetectionStrategy {
    /// Returns the candidate base packages for modules rooted under `root`.
    fn candidate_base_packages(
        &self,
        root: &PackageName,
        classes: &Classes,
        application_module_marker: &str,
        source: &dyn PackageAnnotationSource,
    ) -> Vec<PackageName>;
}

/// Every direct child package of the root is a module.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectSubPackages;

impl DetectionStrategy for DirectSubPackages {
    fn candidate_base_packages(
        &self,
        root: &PackageName,
        classes: &Classes,
        _application_module_marker: &str,
        _source: &dyn PackageAnnotationSource,
    ) -> Vec<PackageName> {
        JavaPackage::of(classes, root.clone()).direct_sub_packages()
    }
}

/// Any descendant package (at any depth) whose descriptor carries the `ApplicationModule` marker
/// is a module.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitlyAnnotated;

impl DetectionStrategy for ExplicitlyAnnotated {
    fn candidate_base_packages(
        &self,
        root: &PackageName,
        classes: &Classes,
        application_module_marker: &str,
        source: &dyn PackageAnnotationSource,
    ) -> Vec<PackageName> {
        let root_package = JavaPackage::of(classes, root.clone());
        root_package
            .sub_packages()
            .into_iter()
            .filter(|candidate| {
                JavaPackage::of(classes, candidate.clone())
                    .to_single()
                    .find_annotation(application_module_marker, source)
                    .ok()
                    .flatten()
                    .is_some()
            })
            .collect()
    }
}

/// Looks up a built-in [`DetectionStrategy`] by configuration name (`"direct-sub-packages"` or
/// `"explicitly-annotated"`).
#[must_use]
pub fn built_in(name: &str) -> Option<Box<dyn DetectionStrategy>> {
    match name {
        "direct-sub-packages" => Some(Box::new(DirectSubPackages)),
        "explicitly-annotated" => Some(Box::new(ExplicitlyAnnotated)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{class::tests::test_class, external::NoPackageAnnotations};

    #[test]
    fn direct_sub_packages_finds_immediate_children_only() {
        let classes = Classes::new([
            test_class("com.acme.order.OrderService"),
            test_class("com.acme.order.internal.Hidden"),
            test_class("com.acme.inventory.Stock"),
        ]);
        let candidates =
            DirectSubPackages.candidate_base_packages(&PackageName::new("com.acme"), &classes, "", &NoPackageAnnotations);
        assert_eq!(
            vec![PackageName::new("com.acme.inventory"), PackageName::new("com.acme.order")],
            candidates
        );
    }

    #[test]
    fn built_in_rejects_unknown_names() {
        assert!(built_in("nonsense").is_none());
    }
}
