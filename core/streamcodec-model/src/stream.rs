use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{well_known, KeyedModel, ModelKey};

/// Descriptive properties of a stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub parents: Vec<String>,
    /// Nanoseconds since the unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_recording: Option<i64>,
}

impl KeyedModel for StreamProperties {
    fn model_key() -> ModelKey {
        ModelKey::new(well_known::STREAM_PROPERTIES)
    }
}

/// How a stream ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamEndType {
    #[default]
    Closed,
    Aborted,
    Terminated,
}

/// Marker sent as the last message of a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamEnd {
    pub stream_end_type: StreamEndType,
}

impl StreamEnd {
    pub fn new(stream_end_type: StreamEndType) -> Self {
        Self { stream_end_type }
    }
}

impl KeyedModel for StreamEnd {
    fn model_key() -> ModelKey {
        ModelKey::new(well_known::STREAM_END)
    }
}
