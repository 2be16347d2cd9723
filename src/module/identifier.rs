//! A module's stable, human-chosen or structurally-derived identifier.

use std::{cmp::Ordering, fmt, str::FromStr};

use crate::name::PackageName;

/// A non-empty identifier naming an application module, unique within an [`crate::container::ApplicationModules`].
///
/// May be supplied explicitly (an `ApplicationModule` marker's `id` attribute), or derived from
/// the trailing package-name segments under the root package — or, when the host opts into
/// fully-qualified module names, from the full package name.
#[derive(Debug, Clone, Eq, Hash, PartialOrd, Ord)]
pub struct ApplicationModuleIdentifier {
    value: String,
}

/// An identifier string that is empty or contains the reserved `::` separator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidModuleIdentifier {
    /// The identifier was empty.
    #[error("a module identifier must not be empty")]
    Empty,
    /// The identifier contained `::`, which is reserved to separate a module from an interface
    /// in an `AllowedDependency` token.
    #[error("module identifier {0:?} must not contain '::'")]
    ContainsSeparator(String),
}

impl FromStr for ApplicationModuleIdentifier {
    type Err = InvalidModuleIdentifier;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Err(InvalidModuleIdentifier::Empty);
        }
        if value.contains("::") {
            return Err(InvalidModuleIdentifier::ContainsSeparator(value.to_owned()));
        }
        Ok(Self {
            value: value.to_owned(),
        })
    }
}

impl fmt::Display for ApplicationModuleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl PartialEq for ApplicationModuleIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialEq<str> for ApplicationModuleIdentifier {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl ApplicationModuleIdentifier {
    /// The raw identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Derives an identifier from `module_package`'s position relative to `root`: either the
    /// trailing segments below `root`, or (if `use_fully_qualified_names`) `module_package` itself.
    ///
    /// # Panics
    /// Panics if the derived string would be empty (i.e. `module_package == root` and
    /// `use_fully_qualified_names` is false) — callers must not derive an identifier for the root
    /// package itself.
    #[must_use]
    pub fn derive(module_package: &PackageName, root: &PackageName, use_fully_qualified_names: bool) -> Self {
        if use_fully_qualified_names {
            return Self {
                value: module_package.as_str().to_owned(),
            };
        }
        let trailing = module_package
            .trailing_name(root)
            .expect("module package must be a strict sub-package of its root");
        Self {
            value: trailing.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_trailing_name_by_default() {
        let id = ApplicationModuleIdentifier::derive(
            &PackageName::new("com.acme.order"),
            &PackageName::new("com.acme"),
            false,
        );
        assert_eq!("order", id.as_str());
    }

    #[test]
    fn derives_fully_qualified_name_when_requested() {
        let id = ApplicationModuleIdentifier::derive(
            &PackageName::new("com.acme.order"),
            &PackageName::new("com.acme"),
            true,
        );
        assert_eq!("com.acme.order", id.as_str());
    }

    #[test]
    fn rejects_empty_and_separator() {
        assert!(ApplicationModuleIdentifier::from_str("").is_err());
        assert!(ApplicationModuleIdentifier::from_str("a::b").is_err());
    }
}
