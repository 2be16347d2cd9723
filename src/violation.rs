//! Accumulated architectural rule failures.

use std::fmt::{self, Display, Formatter};

use crate::error::VerificationFailed;

/// A single architectural rule failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The human-readable failure message; carries enough context (module identifiers, type
    /// names) to locate the offending code.
    pub message: String,
}

impl Violation {
    /// Creates a violation from a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// An immutable collection of [`Violation`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// An empty violation set.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Builds a violation set from messages.
    pub fn from_messages(messages: impl IntoIterator<Item = String>) -> Self {
        Self {
            violations: messages.into_iter().map(Violation::new).collect(),
        }
    }

    /// Appends `other`'s violations to a copy of `self`.
    #[must_use]
    pub fn and(mut self, other: Self) -> Self {
        self.violations.extend(other.violations);
        self
    }

    /// Appends violations from an iterator in place.
    pub fn extend(&mut self, violations: impl IntoIterator<Item = Violation>) {
        self.violations.extend(violations);
    }

    /// Whether this set contains any violation.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// The number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether this set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Iterates over the violations.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter()
    }

    /// Converts this set into an error if it is non-empty.
    ///
    /// # Errors
    /// Returns [`VerificationFailed`] wrapping `self` if [`Violations::has_violations`] is true.
    pub fn throw_if_present(self) -> Result<(), VerificationFailed> {
        if self.has_violations() {
            Err(VerificationFailed { violations: self })
        } else {
            Ok(())
        }
    }
}

impl Display for Violations {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "- {violation}")?;
        }
        Ok(())
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<T: IntoIterator<Item = Violation>>(iter: T) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_violations_do_not_throw() {
        assert!(Violations::none().throw_if_present().is_ok());
    }

    #[test]
    fn non_empty_violations_throw() {
        let violations = Violations::from_messages(["boom".to_owned()]);
        let err = violations.throw_if_present().unwrap_err();
        assert_eq!(1, err.violations.len());
    }

    #[test]
    fn and_appends_in_order() {
        let a = Violations::from_messages(["a".to_owned()]);
        let b = Violations::from_messages(["b".to_owned()]);
        let combined = a.and(b);
        let messages: Vec<_> = combined.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(vec!["a", "b"], messages);
    }
}
