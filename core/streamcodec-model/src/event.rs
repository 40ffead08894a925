use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{well_known, KeyedModel, ModelError, ModelKey};

/// A single discrete event raised on a stream.
///
/// Batches travel as `Vec<EventData>`, keyed `EventData[]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventData {
    pub timestamp: i64,
    pub id: String,
    pub value: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl EventData {
    pub fn new(timestamp: i64, id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            timestamp,
            id: id.into(),
            value: value.into(),
            tags: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

impl KeyedModel for EventData {
    fn model_key() -> ModelKey {
        ModelKey::new(well_known::EVENT_DATA)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.id.is_empty() {
            return Err(ModelError::Invalid("event id must not be empty".into()));
        }
        Ok(())
    }
}
