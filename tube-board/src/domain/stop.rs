//! Stop identifiers and stop records.

use std::fmt;

use serde::Serialize;

/// Maximum length accepted for a stop identifier.
const MAX_ID_LEN: usize = 64;

/// Error returned when parsing an invalid stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// A transit API stop identifier, e.g. `940GZZLUOXC`.
///
/// Identifiers are assigned by the API. We only require that they are
/// non-empty and made of characters that are safe to place in a URL path
/// segment, since they are interpolated into the arrivals endpoint.
///
/// # Examples
///
/// ```
/// use tube_board::domain::StopId;
///
/// let oxc = StopId::parse("940GZZLUOXC").unwrap();
/// assert_eq!(oxc.as_str(), "940GZZLUOXC");
///
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse("../etc").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StopId(String);

impl StopId {
    /// Parse a stop identifier.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        if s.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }

        if s.len() > MAX_ID_LEN {
            return Err(InvalidStopId {
                reason: "too long",
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(InvalidStopId {
                reason: "must be ASCII letters, digits, '-' or '_'",
            });
        }

        Ok(StopId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier starts with the given prefix.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A selectable stop in the station directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stop {
    pub id: StopId,
    /// Display name, e.g. "Oxford Circus Underground Station".
    pub name: String,
    /// Transport modes served, e.g. `["tube", "bus"]`.
    pub modes: Vec<String>,
}

impl Stop {
    /// Create a new stop.
    pub fn new(id: StopId, name: impl Into<String>, modes: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            modes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        assert!(StopId::parse("940GZZLUOXC").is_ok());
        assert!(StopId::parse("HUBOXC").is_ok());
        assert!(StopId::parse("490G00008660").is_ok());
        assert!(StopId::parse("a-b_c").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(StopId::parse("").is_err());
    }

    #[test]
    fn reject_path_characters() {
        assert!(StopId::parse("940/GZZ").is_err());
        assert!(StopId::parse("..").is_err());
        assert!(StopId::parse("940 GZZ").is_err());
        assert!(StopId::parse("940?x=1").is_err());
    }

    #[test]
    fn reject_too_long() {
        let long = "A".repeat(MAX_ID_LEN + 1);
        assert!(StopId::parse(&long).is_err());
        assert!(StopId::parse(&"A".repeat(MAX_ID_LEN)).is_ok());
    }

    #[test]
    fn display_and_debug() {
        let id = StopId::parse("940GZZLUBNK").unwrap();
        assert_eq!(format!("{}", id), "940GZZLUBNK");
        assert_eq!(format!("{:?}", id), "StopId(940GZZLUBNK)");
    }

    #[test]
    fn prefix_check() {
        let id = StopId::parse("940GZZLUBNK").unwrap();
        assert!(id.has_prefix("940GZZLU"));
        assert!(!id.has_prefix("490"));
    }
}
