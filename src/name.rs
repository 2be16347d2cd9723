//! Dotted package names.

use std::{cmp::Ordering, fmt::Display, str::FromStr};

/// A dotted Java package name, e.g. `com.acme.order`.
///
/// Segments are compared one at a time; a name that is a strict prefix of another (through the
/// length they share) sorts first, mirroring how Java packages nest.
#[derive(Debug, Clone, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct PackageName {
    #[cfg_attr(test, proptest(strategy = "arb_dotted_name()"))]
    value: String,
}

#[cfg(test)]
fn arb_dotted_name() -> impl proptest::strategy::Strategy<Value = String> {
    use proptest::prelude::*;
    prop::collection::vec("[a-z][a-z0-9]{0,5}", 1..5).prop_map(|segments| segments.join("."))
}

/// An error indicating that a string is not a valid package name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPackageName {
    /// The name was empty.
    #[error("a package name must not be empty")]
    Empty,
    /// One of the segments, once split on `.`, was empty (e.g. `"com..acme"`).
    #[error("package name {0:?} contains an empty segment")]
    EmptySegment(String),
}

impl FromStr for PackageName {
    type Err = InvalidPackageName;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Err(InvalidPackageName::Empty);
        }
        if value.split('.').any(str::is_empty) {
            return Err(InvalidPackageName::EmptySegment(value.to_owned()));
        }
        Ok(Self {
            value: value.to_owned(),
        })
    }
}

impl Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

impl PartialEq for PackageName {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialOrd for PackageName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PackageName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments().cmp(other.segments())
    }
}

impl PackageName {
    /// Creates a package name from an already-dotted string.
    ///
    /// # Panics
    /// Panics if `value` is empty or contains an empty segment. Use [`FromStr`] to handle
    /// malformed input without panicking.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self::from_str(&value).unwrap_or_else(|err| panic!("{err}"))
    }

    /// The dot-separated segments of this package name, in order.
    #[must_use]
    pub fn segments(&self) -> Vec<&str> {
        self.value.split('.').collect()
    }

    /// The raw dotted string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The last segment of this package name, e.g. `order` for `com.acme.order`.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.value.rsplit('.').next().unwrap_or(&self.value)
    }

    /// The parent package, or `None` if this is a top-level (single-segment) package.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.value.rsplit_once('.').map(|(parent, _)| Self {
            value: parent.to_owned(),
        })
    }

    /// Whether `self` is a (strict) sub-package of `other`, i.e. `other` is a proper prefix of
    /// `self` ending on a segment boundary.
    #[must_use]
    pub fn is_sub_package_of(&self, other: &Self) -> bool {
        self.value.len() > other.value.len()
            && self.value.starts_with(other.value.as_str())
            && self.value.as_bytes()[other.value.len()] == b'.'
    }

    /// Whether `self` is `other`, or a sub-package of it.
    #[must_use]
    pub fn is_self_or_sub_package_of(&self, other: &Self) -> bool {
        self == other || self.is_sub_package_of(other)
    }

    /// The trailing segments of `self` relative to an ancestor `parent`, i.e. the suffix after
    /// `parent.as_str()` + `"."`. Returns `None` if `self` is not a strict sub-package of `parent`.
    #[must_use]
    pub fn trailing_name(&self, parent: &Self) -> Option<&str> {
        self.is_sub_package_of(parent)
            .then(|| &self.value[parent.value.len() + 1..])
    }

    /// Appends a segment, producing a child package name.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        Self {
            value: format!("{}.{segment}", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn parent_of_top_level_is_none() {
        assert_eq!(None, PackageName::new("acme").parent());
    }

    #[test]
    fn trailing_name_relative_to_parent() {
        let module = PackageName::new("com.acme.order");
        let root = PackageName::new("com.acme");
        assert_eq!(Some("order"), module.trailing_name(&root));
    }

    #[test]
    fn trailing_name_is_none_for_unrelated_packages() {
        let a = PackageName::new("com.acme.order");
        let b = PackageName::new("com.other");
        assert_eq!(None, a.trailing_name(&b));
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(Err(InvalidPackageName::Empty), PackageName::from_str(""));
    }

    #[test]
    fn empty_segment_is_rejected() {
        assert!(PackageName::from_str("com..acme").is_err());
    }

    #[test]
    fn sub_package_is_strict() {
        let pkg = PackageName::new("com.acme.order");
        assert!(!pkg.is_sub_package_of(&pkg));
        assert!(!pkg.is_self_or_sub_package_of(&PackageName::new("com.acme.orderly")));
    }

    proptest! {
        #[test]
        fn ordering_is_segment_wise(name in any::<PackageName>()) {
            prop_assert_eq!(name.clone(), name.clone());
            if let Some(parent) = name.parent() {
                prop_assert!(parent < name);
                prop_assert!(name.is_sub_package_of(&parent));
            }
        }

        #[test]
        fn round_trip_through_string(name in any::<PackageName>()) {
            let reparsed = PackageName::from_str(name.as_str()).unwrap();
            prop_assert_eq!(name, reparsed);
        }
    }
}
