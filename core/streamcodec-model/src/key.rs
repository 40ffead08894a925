//! Model keys: the identity a codec registry is keyed by.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

const ARRAY_SUFFIX: &str = "[]";

/// Keys of the models shipped in this crate.
pub mod well_known {
    pub const TIMESERIES_DATA: &str = "TimeseriesData";
    pub const EVENT_DATA: &str = "EventData";
    pub const EVENT_DATA_ARRAY: &str = "EventData[]";
    pub const STREAM_PROPERTIES: &str = "StreamProperties";
    pub const PARAMETER_DEFINITIONS: &str = "ParameterDefinitions";
    pub const EVENT_DEFINITIONS: &str = "EventDefinitions";
    pub const STREAM_END: &str = "StreamEnd";

    /// Every well-known key, in registration order.
    pub const ALL: [&str; 7] = [
        TIMESERIES_DATA,
        EVENT_DATA,
        EVENT_DATA_ARRAY,
        STREAM_PROPERTIES,
        PARAMETER_DEFINITIONS,
        EVENT_DEFINITIONS,
        STREAM_END,
    ];
}

/// Identity of a logical model, e.g. `TimeseriesData` or `EventData[]`.
///
/// Two keys are equal iff their strings are equal. Keys are never mutated
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelKey(String);

impl ModelKey {
    /// Creates a key from an explicit identity, taken verbatim.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Derives a key from a type name.
    ///
    /// Module paths and namespaces are dropped and generic arguments are
    /// stripped. Array shapes (`EventData[]`, `[EventData]`, `Vec<EventData>`)
    /// all normalize to `EventData[]`, which is distinct from `EventData`.
    #[must_use]
    pub fn for_type_name(name: &str) -> Self {
        Self(normalize(name))
    }

    /// Parses a key from a type name, rejecting blank input.
    pub fn parse(s: &str) -> Result<Self, ModelError> {
        let key = Self::for_type_name(s);
        if key.0.trim_end_matches(ARRAY_SUFFIX).is_empty() {
            return Err(ModelError::EmptyKey);
        }
        Ok(key)
    }

    /// Returns the key for an array of this model.
    #[must_use]
    pub fn array(&self) -> Self {
        Self(format!("{}{ARRAY_SUFFIX}", self.0))
    }

    /// Returns the element key if this is an array key.
    #[must_use]
    pub fn element(&self) -> Option<Self> {
        self.0.strip_suffix(ARRAY_SUFFIX).map(|e| Self(e.to_string()))
    }

    pub fn is_array(&self) -> bool {
        self.0.ends_with(ARRAY_SUFFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Keys of every model shipped in this crate.
    pub fn well_known() -> Vec<Self> {
        well_known::ALL.iter().map(|k| Self::new(*k)).collect()
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ModelKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<&str> for ModelKey {
    fn from(name: &str) -> Self {
        Self::for_type_name(name)
    }
}

impl From<String> for ModelKey {
    fn from(name: String) -> Self {
        Self::for_type_name(&name)
    }
}

impl From<&ModelKey> for ModelKey {
    fn from(key: &ModelKey) -> Self {
        key.clone()
    }
}

impl AsRef<str> for ModelKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Peels array layers one at a time; the suffixes are re-added at the end.
fn normalize(name: &str) -> String {
    let mut name = name.trim();
    let mut depth = 0;
    while let Some(element) = array_element(name) {
        name = element.trim();
        depth += 1;
    }
    let head = name.find('<').map_or(name, |open| &name[..open]);
    let mut key = last_segment(head).to_string();
    key.push_str(&ARRAY_SUFFIX.repeat(depth));
    key
}

fn array_element(name: &str) -> Option<&str> {
    if let Some(element) = name.strip_suffix(ARRAY_SUFFIX) {
        return Some(element);
    }
    if let Some(element) = name.strip_prefix('[').and_then(|n| n.strip_suffix(']')) {
        return Some(element);
    }
    let args = name.strip_suffix('>')?;
    let open = args.find('<')?;
    (last_segment(&args[..open]) == "Vec").then_some(&args[open + 1..])
}

// `a::b::Name` and `A.B.Name` both yield `Name`.
fn last_segment(path: &str) -> &str {
    path.rsplit(|c: char| c == ':' || c == '.').next().unwrap_or(path).trim()
}
