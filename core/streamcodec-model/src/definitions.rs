use serde::{Deserialize, Serialize};

use crate::{well_known, KeyedModel, ModelError, ModelKey};

/// Describes one parameter (timeseries column) of a stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterDefinition {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_properties: Option<String>,
    /// Slash-separated group path, e.g. "/Car/Engine".
    #[serde(default = "root_location")]
    pub location: String,
}

impl ParameterDefinition {
    /// Shorthand for a definition with only an id, placed at the root.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location: root_location(),
            ..Default::default()
        }
    }

    /// Shorthand for a numeric parameter with a display range.
    pub fn ranged(id: impl Into<String>, minimum: f64, maximum: f64) -> Self {
        Self {
            minimum_value: Some(minimum),
            maximum_value: Some(maximum),
            ..Self::new(id)
        }
    }

    #[must_use]
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

/// All parameter definitions of a stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterDefinitions {
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
}

impl KeyedModel for ParameterDefinitions {
    fn model_key() -> ModelKey {
        ModelKey::new(well_known::PARAMETER_DEFINITIONS)
    }

    fn validate(&self) -> Result<(), ModelError> {
        for p in &self.parameters {
            if let (Some(min), Some(max)) = (p.minimum_value, p.maximum_value) {
                if min > max {
                    return Err(ModelError::Invalid(format!(
                        "parameter `{}` has minimum {min} above maximum {max}",
                        p.id
                    )));
                }
            }
        }
        Ok(())
    }

    fn first_non_finite(&self) -> Option<(String, usize)> {
        self.parameters.iter().enumerate().find_map(|(index, p)| {
            [("MinimumValue", p.minimum_value), ("MaximumValue", p.maximum_value)]
                .into_iter()
                .find(|(_, v)| v.is_some_and(|v| !v.is_finite()))
                .map(|(field, _)| (format!("{}.{field}", p.id), index))
        })
    }
}

/// Severity of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventLevel {
    Trace,
    Debug,
    #[default]
    Information,
    Warning,
    Error,
    Critical,
}

/// Describes one event id raised on a stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventDefinition {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub level: EventLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_properties: Option<String>,
    #[serde(default = "root_location")]
    pub location: String,
}

impl EventDefinition {
    pub fn new(id: impl Into<String>, level: EventLevel) -> Self {
        Self {
            id: id.into(),
            level,
            location: root_location(),
            ..Default::default()
        }
    }
}

/// All event definitions of a stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventDefinitions {
    #[serde(default)]
    pub events: Vec<EventDefinition>,
}

impl KeyedModel for EventDefinitions {
    fn model_key() -> ModelKey {
        ModelKey::new(well_known::EVENT_DEFINITIONS)
    }
}

fn root_location() -> String {
    "/".to_string()
}
