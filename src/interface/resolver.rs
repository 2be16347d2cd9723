//! Resolves a module's [`NamedInterfaces`] from package- and type-level markers.

use std::collections::{HashSet, VecDeque};

use crate::{
    class::JavaClass,
    classes::Classes,
    error::ConfigurationError,
    external::PackageAnnotationSource,
    interface::named_interface::{NamedInterface, NamedInterfaces, UNNAMED},
    package::JavaPackage,
};

/// Resolves the named interfaces of a module from package-descriptor and type-level markers.
///
/// `module_classes` is the module's full residual class set (base package minus nested-module
/// exclusions); `module_package` is the same scope materialized as a [`JavaPackage`].
///
/// # Errors
/// Returns [`ConfigurationError::OpenModuleDefaultedNamedInterface`] if `is_open` and a
/// type-level marker omits an explicit name, and propagates [`ConfigurationError::AmbiguousAnnotation`]
/// from package-level lookups.
pub fn resolve(
    module_identifier: &str,
    module_classes: &Classes,
    module_package: &JavaPackage,
    is_open: bool,
    named_interface_annotation: &str,
    source: &dyn PackageAnnotationSource,
) -> Result<NamedInterfaces, ConfigurationError> {
    let mut resolved = Vec::new();

    for sub_package in module_package.direct_sub_packages() {
        let sub = JavaPackage::of(module_classes, sub_package.clone());
        if let Some(attrs) = sub.find_annotation(named_interface_annotation, source)? {
            let names = if attrs.name.is_empty() {
                vec![sub_package.local_name().to_owned()]
            } else {
                attrs.name.clone()
            };
            for name in names {
                resolved.push(NamedInterface::new(name, sub.exposed_classes()));
            }
        }
    }

    for class in module_classes {
        let Some(attrs) = class.markers.get(named_interface_annotation) else {
            continue;
        };
        if is_open && attrs.name.is_empty() {
            return Err(ConfigurationError::OpenModuleDefaultedNamedInterface {
                module: module_identifier.to_owned(),
                class: class.fully_qualified_name.clone(),
            });
        }
        let names = if attrs.name.is_empty() {
            vec![class.package.local_name().to_owned()]
        } else {
            attrs.name.clone()
        };
        let classes = if attrs.propagate {
            propagated_classes(class, module_classes)
        } else {
            Classes::new([class.clone()])
        };
        for name in names {
            resolved.push(NamedInterface::new(name, classes.clone()));
        }
    }

    let named_classes: HashSet<&str> = resolved
        .iter()
        .flat_map(|i| i.classes().iter())
        .map(|c| c.fully_qualified_name.as_str())
        .collect();

    let exposed: Classes = module_classes.filter(|c| crate::package::is_exposed_class(c));
    let unnamed_classes = if is_open {
        exposed
    } else {
        exposed.filter(|c| !named_classes.contains(c.fully_qualified_name.as_str()))
    };
    resolved.push(NamedInterface::new(UNNAMED, unnamed_classes));

    Ok(NamedInterfaces::from_resolved(resolved))
}

/// Transitively includes public types related to `seed` through its public constructors and
/// methods (parameter and return types), bounded to `module_classes` and guarded against cycles.
fn propagated_classes(seed: &JavaClass, module_classes: &Classes) -> Classes {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(seed.fully_qualified_name.clone());
    queue.push_back(seed.clone());
    let mut collected = vec![seed.clone()];

    while let Some(current) = queue.pop_front() {
        let related = current
            .constructors
            .iter()
            .flat_map(|c| c.parameter_types.iter())
            .chain(current.methods.iter().filter(|m| !m.is_synthetic).flat_map(|m| {
                m.parameter_types
                    .iter()
                    .chain(m.return_type.as_ref())
            }));
        for related_name in related {
            if seen.contains(related_name) {
                continue;
            }
            let Some(related_class) = module_classes.get(related_name) else {
                continue;
            };
            if !related_class.visibility.is_public() {
                continue;
            }
            seen.insert(related_name.clone());
            collected.push(related_class.clone());
            queue.push_back(related_class.clone());
        }
    }

    Classes::new(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        class::{tests::test_class, MarkerAttributes},
        external::NoPackageAnnotations,
        name::PackageName,
    };

    #[test]
    fn closed_module_with_no_annotations_exposes_direct_public_classes_only() {
        let classes = Classes::new([
            test_class("com.acme.order.OrderService"),
            test_class("com.acme.order.internal.Hidden"),
        ]);
        let module_package = JavaPackage::of(&classes, PackageName::new("com.acme.order"));
        let interfaces = resolve(
            "order",
            &classes,
            &module_package,
            false,
            "com.acme.NamedInterface",
            &NoPackageAnnotations,
        )
        .unwrap();
        assert_eq!(1, interfaces.unnamed().classes().len());
        assert_eq!(
            "com.acme.order.OrderService",
            interfaces.unnamed().classes().iter().next().unwrap().fully_qualified_name
        );
    }

    #[test]
    fn type_annotated_interface_excludes_class_from_unnamed() {
        let mut port = test_class("com.acme.order.Port");
        port.markers.insert(
            "com.acme.NamedInterface".to_owned(),
            MarkerAttributes {
                name: vec!["api".to_owned()],
                ..Default::default()
            },
        );
        let classes = Classes::new([test_class("com.acme.order.OrderService"), port]);
        let module_package = JavaPackage::of(&classes, PackageName::new("com.acme.order"));
        let interfaces = resolve(
            "order",
            &classes,
            &module_package,
            false,
            "com.acme.NamedInterface",
            &NoPackageAnnotations,
        )
        .unwrap();
        assert!(interfaces.get("api").unwrap().contains("com.acme.order.Port"));
        assert!(!interfaces.unnamed().contains("com.acme.order.Port"));
        assert!(interfaces.unnamed().contains("com.acme.order.OrderService"));
    }

    #[test]
    fn open_module_rejects_defaulted_named_interface() {
        let mut port = test_class("com.acme.order.Port");
        port.markers.insert(
            "com.acme.NamedInterface".to_owned(),
            MarkerAttributes::default(),
        );
        let classes = Classes::new([port]);
        let module_package = JavaPackage::of(&classes, PackageName::new("com.acme.order"));
        let result = resolve(
            "order",
            &classes,
            &module_package,
            true,
            "com.acme.NamedInterface",
            &NoPackageAnnotations,
        );
        assert!(matches!(
            result,
            Err(ConfigurationError::OpenModuleDefaultedNamedInterface { .. })
        ));
    }
}
