//! A normalized view of a package and the classes within it.

use crate::{
    class::AmbiguousAnnotation,
    class::MarkerAttributes,
    classes::Classes,
    external::PackageAnnotationSource,
    name::PackageName,
};

/// The conventional simple name of a package's descriptor type.
pub(crate) const PACKAGE_DESCRIPTOR_SIMPLE_NAME: &str = "package-info";

/// Whether `class` would be counted among a package's or module's exposed classes: public, and
/// not the package descriptor type itself.
#[must_use]
pub(crate) fn is_exposed_class(class: &crate::class::JavaClass) -> bool {
    class.visibility.is_public() && class.simple_name() != PACKAGE_DESCRIPTOR_SIMPLE_NAME
}

/// A package, together with the classes materialized within it (itself and, depending on how it
/// was constructed, its descendants).
#[derive(Debug, Clone)]
pub struct JavaPackage {
    name: PackageName,
    classes: Classes,
}

impl JavaPackage {
    /// Materializes a package containing all classes in `classes` that reside at or below `name`.
    #[must_use]
    pub fn of(classes: &Classes, name: PackageName) -> Self {
        let classes = classes.in_package_tree(&name);
        Self { name, classes }
    }

    /// The package's dotted name.
    #[must_use]
    pub fn name(&self) -> &PackageName {
        &self.name
    }

    /// Projects this package to one containing only the classes whose own package equals
    /// [`JavaPackage::name`] — i.e. excludes anything in a descendant package.
    #[must_use]
    pub fn to_single(&self) -> Self {
        Self {
            name: self.name.clone(),
            classes: self.classes.directly_in_package(&self.name),
        }
    }

    /// All classes materialized within this package (itself and, if constructed via
    /// [`JavaPackage::of`], its descendants).
    #[must_use]
    pub fn classes(&self) -> &Classes {
        &self.classes
    }

    /// The distinct package names strictly below this one, one level deep, sorted.
    #[must_use]
    pub fn direct_sub_packages(&self) -> Vec<PackageName> {
        let mut names: Vec<PackageName> = self
            .classes
            .iter()
            .filter_map(|c| {
                let trailing = c.package.trailing_name(&self.name)?;
                let first_segment = trailing.split('.').next().unwrap_or(trailing);
                Some(self.name.child(first_segment))
            })
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// All distinct package names strictly below this one (direct and transitive), sorted.
    #[must_use]
    pub fn sub_packages(&self) -> Vec<PackageName> {
        let mut names: Vec<PackageName> = self
            .classes
            .iter()
            .filter(|c| c.package.is_sub_package_of(&self.name))
            .map(|c| c.package.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// The public classes exposed by this package (itself only, not descendants), excluding the
    /// package descriptor type.
    #[must_use]
    pub fn exposed_classes(&self) -> Classes {
        self.to_single().classes.filter(|c| is_exposed_class(c))
    }

    /// Sub-packages (one level deep) whose descriptor, or a stereotype-carrying class directly
    /// within them, carries `annotation`.
    #[must_use]
    pub fn sub_packages_annotated_with(
        &self,
        annotation: &str,
        source: &dyn PackageAnnotationSource,
    ) -> Vec<PackageName> {
        self.direct_sub_packages()
            .into_iter()
            .filter(|sub| {
                JavaPackage::of(&self.classes, sub.clone())
                    .find_annotation(annotation, source)
                    .ok()
                    .flatten()
                    .is_some()
            })
            .collect()
    }

    /// Finds `annotation` on this package's descriptor, or on any class located directly within
    /// this package that carries it as a marker.
    ///
    /// # Errors
    /// Returns [`AmbiguousAnnotation`] if more than one carrier declares the annotation.
    pub fn find_annotation(
        &self,
        annotation: &str,
        source: &dyn PackageAnnotationSource,
    ) -> Result<Option<MarkerAttributes>, AmbiguousAnnotation> {
        let direct = self.to_single();
        let mut carriers: Vec<(String, MarkerAttributes)> = direct
            .classes
            .iter()
            .filter_map(|c| {
                c.markers
                    .get(annotation)
                    .map(|attrs| (c.fully_qualified_name.clone(), attrs.clone()))
            })
            .collect();
        if let Some(from_descriptor) = source.marker_on_package(&self.name, annotation) {
            let descriptor_name = format!("{}.{PACKAGE_DESCRIPTOR_SIMPLE_NAME}", self.name);
            carriers.insert(0, (descriptor_name, from_descriptor));
        }
        match carriers.as_slice() {
            [] => Ok(None),
            [(_, attrs)] => Ok(Some(attrs.clone())),
            [(first, _), (second, _), ..] => Err(AmbiguousAnnotation {
                annotation: annotation.to_owned(),
                first: first.clone(),
                second: second.clone(),
            }),
        }
    }

    /// Returns a package with every class under any of `exclusions` removed — used to carve out
    /// the sub-trees owned by nested application modules.
    #[must_use]
    pub fn without(&self, exclusions: &[PackageName]) -> Self {
        Self {
            name: self.name.clone(),
            classes: self.classes.filter(|c| {
                !exclusions
                    .iter()
                    .any(|excluded| c.package.is_self_or_sub_package_of(excluded))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{class::tests::test_class, external::NoPackageAnnotations};

    fn sample_classes() -> Classes {
        Classes::new([
            test_class("com.acme.order.OrderService"),
            test_class("com.acme.order.internal.Hidden"),
            test_class("com.acme.order.api.Port"),
            test_class("com.acme.inventory.Stock"),
        ])
    }

    #[test]
    fn direct_sub_packages_are_one_level_deep() {
        let classes = sample_classes();
        let order = JavaPackage::of(&classes, PackageName::new("com.acme.order"));
        let subs = order.direct_sub_packages();
        assert_eq!(
            vec![
                PackageName::new("com.acme.order.api"),
                PackageName::new("com.acme.order.internal"),
            ],
            subs
        );
    }

    #[test]
    fn exposed_classes_excludes_descendants_and_descriptor() {
        let classes = Classes::new([
            test_class("com.acme.order.OrderService"),
            test_class("com.acme.order.package-info"),
            test_class("com.acme.order.internal.Hidden"),
        ]);
        let order = JavaPackage::of(&classes, PackageName::new("com.acme.order"));
        let exposed = order.exposed_classes();
        assert_eq!(1, exposed.len());
        assert_eq!(
            "com.acme.order.OrderService",
            exposed.iter().next().unwrap().fully_qualified_name
        );
    }

    #[test]
    fn without_removes_excluded_subtrees() {
        let classes = sample_classes();
        let order = JavaPackage::of(&classes, PackageName::new("com.acme.order"))
            .without(&[PackageName::new("com.acme.order.internal")]);
        assert!(order
            .classes()
            .get("com.acme.order.internal.Hidden")
            .is_none());
        assert!(order.classes().get("com.acme.order.OrderService").is_some());
    }

    #[test]
    fn find_annotation_none_when_absent() {
        let classes = sample_classes();
        let order = JavaPackage::of(&classes, PackageName::new("com.acme.order"));
        let found = order
            .find_annotation("com.acme.NamedInterface", &NoPackageAnnotations)
            .unwrap();
        assert_eq!(None, found);
    }

    #[test]
    fn find_annotation_detects_ambiguity() {
        let mut a = test_class("com.acme.order.A");
        a.markers.insert(
            "com.acme.NamedInterface".to_owned(),
            MarkerAttributes::default(),
        );
        let mut b = test_class("com.acme.order.B");
        b.markers.insert(
            "com.acme.NamedInterface".to_owned(),
            MarkerAttributes::default(),
        );
        let classes = Classes::new([a, b]);
        let order = JavaPackage::of(&classes, PackageName::new("com.acme.order"));
        let result = order.find_annotation("com.acme.NamedInterface", &NoPackageAnnotations);
        assert!(result.is_err());
    }
}
