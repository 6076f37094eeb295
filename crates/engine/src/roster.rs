use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Ordered list of the trip participants.
///
/// Names are trimmed, non-empty, distinct and free of `,` (the `Involved`
/// separator). The order matters: the first
/// name is party "A" and the second party "B" of the two-party settlement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Roster(Vec<String>);

impl Roster {
    pub fn new<I, S>(names: I) -> ResultEngine<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(EngineError::InvalidConfig(
                    "participant name must not be empty".to_string(),
                ));
            }
            if name.contains(',') {
                return Err(EngineError::InvalidConfig(format!(
                    "participant \"{name}\" must not contain ','"
                )));
            }
            if out.iter().any(|n| n == name) {
                return Err(EngineError::InvalidConfig(format!(
                    "duplicated participant \"{name}\""
                )));
            }
            out.push(name.to_string());
        }
        if out.is_empty() {
            return Err(EngineError::InvalidConfig(
                "at least one participant is required".to_string(),
            ));
        }
        Ok(Self(out))
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    /// The two parties, when the roster has exactly two names.
    #[must_use]
    pub fn pair(&self) -> Option<(&str, &str)> {
        match self.0.as_slice() {
            [a, b] => Some((a.as_str(), b.as_str())),
            _ => None,
        }
    }

    /// Same names, reversed order.
    #[must_use]
    pub fn reversed(&self) -> Roster {
        Roster(self.0.iter().rev().cloned().collect())
    }
}

impl Default for Roster {
    fn default() -> Self {
        Roster(vec!["Christen".to_string(), "Bill".to_string()])
    }
}

impl TryFrom<Vec<String>> for Roster {
    type Error = EngineError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Roster::new(value)
    }
}

impl From<Roster> for Vec<String> {
    fn from(value: Roster) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_keeps_order() {
        let roster = Roster::new([" Christen ", "Bill"]).unwrap();
        assert_eq!(roster.names(), ["Christen", "Bill"]);
        assert_eq!(roster.pair(), Some(("Christen", "Bill")));
        assert_eq!(roster.reversed().pair(), Some(("Bill", "Christen")));
    }

    #[test]
    fn rejects_duplicates_and_blanks() {
        assert!(Roster::new(["Bill", "Bill"]).is_err());
        assert!(Roster::new(["Bill", " "]).is_err());
        assert!(Roster::new(Vec::<String>::new()).is_err());
    }

    #[test]
    fn rejects_names_with_the_involved_separator() {
        let err = Roster::new(["Smith, J", "Bill"]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
        assert!(err.to_string().contains("Smith, J"));
    }

    #[test]
    fn pair_needs_exactly_two_names() {
        let roster = Roster::new(["A", "B", "C"]).unwrap();
        assert_eq!(roster.pair(), None);
    }
}
