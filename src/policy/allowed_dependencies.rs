//! The open/closed policy governing which modules (and interfaces) a module may depend on.

use crate::policy::allowed_dependency::{AllowedDependency, InterfaceSelector, InvalidAllowedDependency};

/// The sentinel token meaning "no restriction" when it appears among a module's declared
/// dependencies.
pub const OPEN_TOKEN: &str = "..";

/// Which modules (and interfaces thereof) a module is allowed to depend on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedDependencies {
    /// No restriction: any module, any interface.
    Open,
    /// Exactly the enumerated targets; an empty list means deny-all.
    Closed(Vec<AllowedDependency>),
}

impl AllowedDependencies {
    /// Parses a module's declared-dependencies tokens.
    ///
    /// A list containing [`OPEN_TOKEN`] (conventionally written `".."`) produces
    /// [`AllowedDependencies::Open`] regardless of any other tokens present; otherwise every
    /// token is parsed as an [`AllowedDependency`].
    ///
    /// # Errors
    /// Returns [`InvalidAllowedDependency`] if any token is malformed.
    pub fn parse<S: AsRef<str>>(tokens: impl IntoIterator<Item = S>) -> Result<Self, InvalidAllowedDependency> {
        let tokens: Vec<String> = tokens.into_iter().map(|t| t.as_ref().to_owned()).collect();
        if tokens.iter().any(|t| t.trim() == OPEN_TOKEN) {
            return Ok(Self::Open);
        }
        tokens
            .iter()
            .map(|t| t.parse())
            .collect::<Result<Vec<_>, _>>()
            .map(Self::Closed)
    }

    /// Whether this policy imposes no restriction.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Whether a dependency on `target_module`, where the target class is a member of the named
    /// interfaces in `target_class_interfaces` (using `""` to denote the unnamed interface), is
    /// explicitly permitted by this policy.
    ///
    /// This only covers the *explicit* allow-list check (§4.6 step 1–2); the post-check fallback
    /// (open target modules, parent/child relations, shared modules) is layered on top by the
    /// container.
    #[must_use]
    pub fn explicitly_allows(&self, target_module: &str, target_class_interfaces: &[&str]) -> bool {
        match self {
            Self::Open => true,
            Self::Closed(allowed) => allowed.iter().any(|dep| {
                dep.target_module == target_module
                    && match &dep.interface {
                        InterfaceSelector::Unnamed => target_class_interfaces.contains(&""),
                        InterfaceSelector::Wildcard => true,
                        InterfaceSelector::Named(name) => {
                            target_class_interfaces.contains(&name.as_str())
                        }
                    }
            }),
        }
    }

    /// The allowed targets, formatted for a violation message (e.g. `"inventory, payments::api"`).
    #[must_use]
    pub fn describe_targets(&self) -> String {
        match self {
            Self::Open => "<any>".to_owned(),
            Self::Closed(allowed) => allowed
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_token_makes_the_whole_policy_open() {
        let policy = AllowedDependencies::parse(["inventory", ".."]).unwrap();
        assert_eq!(AllowedDependencies::Open, policy);
        assert!(policy.explicitly_allows("anything", &[]));
    }

    #[test]
    fn empty_token_list_denies_everything() {
        let policy = AllowedDependencies::parse(Vec::<&str>::new()).unwrap();
        assert!(!policy.explicitly_allows("inventory", &[""]));
    }

    #[test]
    fn bare_target_only_matches_unnamed_interface() {
        let policy = AllowedDependencies::parse(["inventory"]).unwrap();
        assert!(policy.explicitly_allows("inventory", &[""]));
        assert!(!policy.explicitly_allows("inventory", &["api"]));
    }

    #[test]
    fn wildcard_matches_any_interface() {
        let policy = AllowedDependencies::parse(["inventory::*"]).unwrap();
        assert!(policy.explicitly_allows("inventory", &["api"]));
        assert!(policy.explicitly_allows("inventory", &[""]));
    }

    #[test]
    fn named_interface_must_match_exactly() {
        let policy = AllowedDependencies::parse(["inventory::api"]).unwrap();
        assert!(policy.explicitly_allows("inventory", &["api"]));
        assert!(!policy.explicitly_allows("inventory", &["other"]));
        assert!(!policy.explicitly_allows("payments", &["api"]));
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert!(AllowedDependencies::parse(["inventory::"]).is_err());
    }
}
