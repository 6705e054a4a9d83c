//! Field selectors.

use serde::{Deserialize, Serialize};

/// Names a field of a [`Record`](crate::Record), optionally nested.
///
/// `"city"` names a top-level field; `"loc.lat"` names `lat` inside the
/// `loc` sub-record. A selector that cannot be resolved is never an error;
/// it simply selects nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selector(String);

impl Selector {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses a comma-separated selector list such as `"ip,loc.lat"`.
    ///
    /// Entries are taken as written; an empty input yields no selectors.
    pub fn parse_list(list: &str) -> Vec<Selector> {
        if list.is_empty() {
            return Vec::new();
        }
        list.split(',').map(Selector::new).collect()
    }

    /// Joins selectors back into their comma-separated form.
    pub fn join(selectors: &[Selector]) -> String {
        selectors
            .iter()
            .map(Selector::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Selector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Selector {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Selector {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
