use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{well_known, KeyedModel, ModelError, ModelKey};

/// A block of timeseries samples in columnar form.
///
/// Every column is keyed by parameter id and holds one optional value per
/// entry in `timestamps`. Timestamps are nanoseconds relative to `epoch`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeseriesData {
    pub epoch: i64,
    pub timestamps: Vec<i64>,
    #[serde(default)]
    pub numeric_values: BTreeMap<String, Vec<Option<f64>>>,
    #[serde(default)]
    pub string_values: BTreeMap<String, Vec<Option<String>>>,
    #[serde(default)]
    pub binary_values: BTreeMap<String, Vec<Option<Vec<u8>>>>,
    #[serde(default)]
    pub tag_values: BTreeMap<String, Vec<Option<String>>>,
}

impl TimeseriesData {
    #[must_use]
    pub fn new(epoch: i64, timestamps: Vec<i64>) -> Self {
        Self {
            epoch,
            timestamps,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_numeric(mut self, parameter: &str, values: Vec<Option<f64>>) -> Self {
        self.numeric_values.insert(parameter.into(), values);
        self
    }

    #[must_use]
    pub fn with_string(mut self, parameter: &str, values: Vec<Option<String>>) -> Self {
        self.string_values.insert(parameter.into(), values);
        self
    }

    #[must_use]
    pub fn with_binary(mut self, parameter: &str, values: Vec<Option<Vec<u8>>>) -> Self {
        self.binary_values.insert(parameter.into(), values);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: &str, values: Vec<Option<String>>) -> Self {
        self.tag_values.insert(tag.into(), values);
        self
    }

    /// Number of rows (timestamps).
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Iterates all column names with their lengths, across every value kind.
    fn column_lengths(&self) -> impl Iterator<Item = (&str, usize)> {
        self.numeric_values
            .iter()
            .map(|(k, v)| (k.as_str(), v.len()))
            .chain(self.string_values.iter().map(|(k, v)| (k.as_str(), v.len())))
            .chain(self.binary_values.iter().map(|(k, v)| (k.as_str(), v.len())))
            .chain(self.tag_values.iter().map(|(k, v)| (k.as_str(), v.len())))
    }
}

impl KeyedModel for TimeseriesData {
    fn model_key() -> ModelKey {
        ModelKey::new(well_known::TIMESERIES_DATA)
    }

    fn validate(&self) -> Result<(), ModelError> {
        let expected = self.timestamps.len();
        for (parameter, actual) in self.column_lengths() {
            if parameter.is_empty() {
                return Err(ModelError::Invalid("column name must not be empty".into()));
            }
            if actual != expected {
                return Err(ModelError::MisalignedColumn {
                    parameter: parameter.to_string(),
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }

    fn first_non_finite(&self) -> Option<(String, usize)> {
        self.numeric_values.iter().find_map(|(parameter, column)| {
            column
                .iter()
                .position(|v| v.is_some_and(|v| !v.is_finite()))
                .map(|row| (parameter.clone(), row))
        })
    }
}
