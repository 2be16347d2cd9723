//! A labelled subset of a module's exposed classes.

use crate::classes::Classes;

/// The name every module's implicit, always-present interface carries.
pub const UNNAMED: &str = "";

/// A labelled subset of an application module's classes, advertised as (part of) its public API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedInterface {
    name: String,
    classes: Classes,
}

impl NamedInterface {
    /// Creates a named interface. Use [`UNNAMED`] for the implicit default interface.
    #[must_use]
    pub fn new(name: impl Into<String>, classes: Classes) -> Self {
        Self {
            name: name.into(),
            classes,
        }
    }

    /// The interface's name, or [`UNNAMED`] for the implicit default interface.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the module's implicit unnamed interface.
    #[must_use]
    pub fn is_unnamed(&self) -> bool {
        self.name == UNNAMED
    }

    /// The classes exposed through this interface.
    #[must_use]
    pub fn classes(&self) -> &Classes {
        &self.classes
    }

    /// Whether `fully_qualified_name` is exposed through this interface.
    #[must_use]
    pub fn contains(&self, fully_qualified_name: &str) -> bool {
        self.classes.get(fully_qualified_name).is_some()
    }

    fn merge(self, other: Self) -> Self {
        debug_assert_eq!(self.name, other.name);
        Self {
            name: self.name,
            classes: self.classes.iter().chain(other.classes.iter()).cloned().collect(),
        }
    }
}

/// An application module's named interfaces: always exactly one [`UNNAMED`] interface, plus zero
/// or more explicitly declared ones, ordered by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedInterfaces {
    interfaces: Vec<NamedInterface>,
}

impl NamedInterfaces {
    /// Builds a [`NamedInterfaces`] from a set of interfaces, merging any that share a name (union
    /// of classes) and sorting by name. Panics if no [`UNNAMED`] interface is present — callers are
    /// expected to always construct one, even if empty.
    #[must_use]
    pub(crate) fn from_resolved(interfaces: Vec<NamedInterface>) -> Self {
        let mut merged: Vec<NamedInterface> = Vec::new();
        for interface in interfaces {
            if let Some(existing) = merged.iter_mut().find(|m: &&mut NamedInterface| m.name == interface.name) {
                let taken = std::mem::replace(existing, NamedInterface::new("", Classes::default()));
                *existing = taken.merge(interface);
            } else {
                merged.push(interface);
            }
        }
        merged.sort_by(|a, b| a.name.cmp(&b.name));
        debug_assert!(
            merged.iter().any(NamedInterface::is_unnamed),
            "NamedInterfaces must always contain the unnamed interface"
        );
        Self { interfaces: merged }
    }

    /// The module's implicit unnamed interface.
    #[must_use]
    pub fn unnamed(&self) -> &NamedInterface {
        self.get(UNNAMED).expect("unnamed interface is always present")
    }

    /// Looks up an interface by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&NamedInterface> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    /// Iterates over all interfaces, ordered by name (unnamed first).
    pub fn iter(&self) -> impl Iterator<Item = &NamedInterface> {
        self.interfaces.iter()
    }

    /// The names of every interface a class with the given fully-qualified name belongs to
    /// (usually either just [`UNNAMED`], or one or more explicit names).
    #[must_use]
    pub fn interfaces_containing<'a>(&'a self, fully_qualified_name: &str) -> Vec<&'a str> {
        self.interfaces
            .iter()
            .filter(|i| i.contains(fully_qualified_name))
            .map(NamedInterface::name)
            .collect()
    }

    /// Whether `fully_qualified_name` belongs to any interface of this module, named or unnamed.
    #[must_use]
    pub fn is_exposed(&self, fully_qualified_name: &str) -> bool {
        self.interfaces
            .iter()
            .any(|i| i.contains(fully_qualified_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::tests::test_class;

    #[test]
    fn unnamed_is_always_present() {
        let interfaces = NamedInterfaces::from_resolved(vec![NamedInterface::new(UNNAMED, Classes::default())]);
        assert!(interfaces.unnamed().classes().is_empty());
    }

    #[test]
    fn same_name_interfaces_merge() {
        let a = NamedInterface::new("api", Classes::new([test_class("com.acme.order.A")]));
        let b = NamedInterface::new("api", Classes::new([test_class("com.acme.order.B")]));
        let interfaces = NamedInterfaces::from_resolved(vec![
            NamedInterface::new(UNNAMED, Classes::default()),
            a,
            b,
        ]);
        assert_eq!(2, interfaces.get("api").unwrap().classes().len());
    }

    #[test]
    fn interfaces_containing_reports_membership() {
        let api = NamedInterface::new("api", Classes::new([test_class("com.acme.order.Port")]));
        let interfaces = NamedInterfaces::from_resolved(vec![
            NamedInterface::new(UNNAMED, Classes::default()),
            api,
        ]);
        assert_eq!(vec!["api"], interfaces.interfaces_containing("com.acme.order.Port"));
        assert!(interfaces.interfaces_containing("com.acme.order.Other").is_empty());
    }
}
