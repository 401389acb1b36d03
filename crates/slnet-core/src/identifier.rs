// ── Subnet identifiers ──
//
// Anywhere a subnet id is accepted, callers may instead pass the subnet's
// network identifier (`10.0.0.0`). Numeric input is used directly; anything
// else is looked up through the manager's resolvers.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A subnet reference: a numeric id or a network identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubnetRef {
    Id(i64),
    Identifier(String),
}

impl SubnetRef {
    pub fn as_id(&self) -> Option<i64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Identifier(_) => None,
        }
    }
}

impl fmt::Display for SubnetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Identifier(s) => f.write_str(s),
        }
    }
}

impl FromStr for SubnetRef {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<i64> for SubnetRef {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for SubnetRef {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        trimmed
            .parse::<i64>()
            .map_or_else(|_| Self::Identifier(trimmed.to_owned()), Self::Id)
    }
}

impl From<String> for SubnetRef {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

/// Strategies for turning a non-numeric subnet reference into ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubnetResolver {
    /// Match `subnets.networkIdentifier` on the account.
    NetworkIdentifier,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strings_are_ids() {
        assert_eq!(SubnetRef::from("1234"), SubnetRef::Id(1234));
        assert_eq!(" 77 ".parse::<SubnetRef>().unwrap(), SubnetRef::Id(77));
    }

    #[test]
    fn network_identifiers_stay_strings() {
        let r = SubnetRef::from("10.0.0.0".to_owned());
        assert_eq!(r, SubnetRef::Identifier("10.0.0.0".into()));
        assert_eq!(r.as_id(), None);
        assert_eq!(r.to_string(), "10.0.0.0");
    }
}
