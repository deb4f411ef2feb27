//! Route name types.

use std::fmt;

/// Error returned when a route prefix or route name is blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route {what}: must not be blank")]
pub struct InvalidRoute {
    what: &'static str,
}

/// The leading characters of a route name, as typed by the user.
///
/// A prefix is never blank and is always stored uppercased, so two prefixes
/// that differ only in case compare equal.
///
/// # Examples
///
/// ```
/// use bus_search::domain::RoutePrefix;
///
/// let p = RoutePrefix::parse(" c ").unwrap();
/// assert_eq!(p.as_str(), "C");
///
/// assert!(RoutePrefix::parse("").is_err());
/// assert!(RoutePrefix::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RoutePrefix(String);

impl RoutePrefix {
    /// Parse a prefix, trimming surrounding whitespace and uppercasing.
    pub fn parse(s: &str) -> Result<Self, InvalidRoute> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidRoute { what: "prefix" });
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Returns the normalised (uppercase) prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `name` starts with this prefix, ignoring case.
    pub fn matches(&self, name: &str) -> bool {
        name.to_uppercase().starts_with(&self.0)
    }
}

impl fmt::Debug for RoutePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoutePrefix({})", self.0)
    }
}

impl fmt::Display for RoutePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An exact route name, e.g. "Chennai to Bangalore".
///
/// Route names are the partition key of the trips table and are compared
/// byte for byte. Only surrounding whitespace is removed.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteName(String);

impl RouteName {
    /// Parse a route name, rejecting blank input.
    pub fn parse(s: &str) -> Result<Self, InvalidRoute> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidRoute { what: "name" });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the route name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteName({})", self.0)
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
