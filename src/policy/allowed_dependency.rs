//! A single `target[::interface]` token.

use std::{fmt, str::FromStr};

/// Which interface(s) of the target module an [`AllowedDependency`] selects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InterfaceSelector {
    /// The target module's unnamed interface only — the token omitted an explicit interface.
    Unnamed,
    /// Any interface of the target module — the token's interface was `*`.
    Wildcard,
    /// A single, specifically-named interface of the target module.
    Named(String),
}

/// A single permitted-dependency token, e.g. `"inventory"`, `"inventory::api"`, or
/// `"inventory::*"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AllowedDependency {
    /// The target module's identifier.
    pub target_module: String,
    /// The interface selector.
    pub interface: InterfaceSelector,
}

/// A malformed `AllowedDependency` token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAllowedDependency {
    /// The token was empty, or empty after trimming.
    #[error("an allowed-dependency token must not be empty")]
    Empty,
    /// The token contained `::` but named no interface, e.g. `"inventory::"`.
    #[error("allowed-dependency token {0:?} names no interface after '::'")]
    MissingInterfaceName(String),
}

impl FromStr for AllowedDependency {
    type Err = InvalidAllowedDependency;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Err(InvalidAllowedDependency::Empty);
        }
        match value.split_once("::") {
            None => Ok(Self {
                target_module: value.to_owned(),
                interface: InterfaceSelector::Unnamed,
            }),
            Some((target, interface)) => {
                let target = target.trim();
                let interface = interface.trim();
                if target.is_empty() || interface.is_empty() {
                    return Err(InvalidAllowedDependency::MissingInterfaceName(value.to_owned()));
                }
                let interface = if interface == "*" {
                    InterfaceSelector::Wildcard
                } else {
                    InterfaceSelector::Named(interface.to_owned())
                };
                Ok(Self {
                    target_module: target.to_owned(),
                    interface,
                })
            }
        }
    }
}

impl fmt::Display for AllowedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.interface {
            InterfaceSelector::Unnamed => write!(f, "{}", self.target_module),
            InterfaceSelector::Wildcard => write!(f, "{} :: *", self.target_module),
            InterfaceSelector::Named(name) => write!(f, "{} :: {name}", self.target_module),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn bare_module_name_means_unnamed_interface() {
        let dep: AllowedDependency = "inventory".parse().unwrap();
        assert_eq!("inventory", dep.target_module);
        assert_eq!(InterfaceSelector::Unnamed, dep.interface);
        assert_eq!("inventory", dep.to_string());
    }

    #[test]
    fn wildcard_interface() {
        let dep: AllowedDependency = "inventory::*".parse().unwrap();
        assert_eq!(InterfaceSelector::Wildcard, dep.interface);
        assert_eq!("inventory :: *", dep.to_string());
    }

    #[test]
    fn named_interface_with_spaces() {
        let dep: AllowedDependency = "inventory :: api".parse().unwrap();
        assert_eq!(InterfaceSelector::Named("api".to_owned()), dep.interface);
        assert_eq!("inventory :: api", dep.to_string());
    }

    #[test]
    fn empty_token_is_rejected() {
        assert!("   ".parse::<AllowedDependency>().is_err());
    }

    #[test]
    fn missing_interface_name_is_rejected() {
        assert!("inventory::".parse::<AllowedDependency>().is_err());
    }

    fn arb_token() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9]{0,8}"
    }

    proptest! {
        #[test]
        fn round_trip_bare(target in arb_token()) {
            let dep = AllowedDependency { target_module: target, interface: InterfaceSelector::Unnamed };
            let reparsed: AllowedDependency = dep.to_string().parse().unwrap();
            prop_assert_eq!(dep, reparsed);
        }

        #[test]
        fn round_trip_wildcard(target in arb_token()) {
            let dep = AllowedDependency { target_module: target, interface: InterfaceSelector::Wildcard };
            let reparsed: AllowedDependency = dep.to_string().parse().unwrap();
            prop_assert_eq!(dep, reparsed);
        }

        #[test]
        fn round_trip_named(target in arb_token(), interface in arb_token()) {
            let dep = AllowedDependency { target_module: target, interface: InterfaceSelector::Named(interface) };
            let reparsed: AllowedDependency = dep.to_string().parse().unwrap();
            prop_assert_eq!(dep, reparsed);
        }
    }
}
