use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a person in the debt graph.
///
/// Identity is the name itself: two `PersonId`s are the same participant
/// exactly when their names are equal.
///
/// # Examples
///
/// ```
/// use debtgraph::core::person::PersonId;
///
/// let alice = PersonId::new("alice");
/// let bob = PersonId::new("bob");
/// assert_ne!(alice, bob);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name of this person.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PersonId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PersonId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_equality() {
        let a = PersonId::new("alice");
        let b = PersonId::new("alice");
        let c = PersonId::new("bob");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_person_display() {
        let p = PersonId::new("charlie");
        assert_eq!(format!("{}", p), "charlie");
    }

    #[test]
    fn test_person_ordering() {
        let a = PersonId::new("alice");
        let b = PersonId::new("bob");
        assert!(a < b);
    }
}
