//! Compact JSON for timeseries frames.
//!
//! ```json
//! {"E":0,"T":[0,100],"N":{"speed":[212.5,null]},"B":{"frame":["AAH/",null]}}
//! ```

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use streamcodec_model::{KeyedModel, TimeseriesData};

use crate::codec::{Codec, CodecId, WireFormat};
use crate::error::{DecodeError, EncodeError};

use super::require_finite;

/// Compact JSON codec for [`TimeseriesData`].
///
/// Uses single-letter field names, drops empty column groups and carries
/// binary cells as base64 strings. Non-finite numbers are rejected since
/// JSON has no representation for them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeseriesDataJsonCodec;

impl TimeseriesDataJsonCodec {
    pub const ID: CodecId = CodecId::new("JT");
}

type Column<T> = Vec<Option<T>>;

#[derive(Serialize)]
struct CompactRef<'a> {
    #[serde(rename = "E")]
    epoch: i64,
    #[serde(rename = "T")]
    timestamps: &'a [i64],
    #[serde(rename = "N", skip_serializing_if = "no_columns")]
    numeric: &'a BTreeMap<String, Column<f64>>,
    #[serde(rename = "S", skip_serializing_if = "no_columns")]
    strings: &'a BTreeMap<String, Column<String>>,
    #[serde(rename = "B", skip_serializing_if = "BTreeMap::is_empty")]
    binary: BTreeMap<&'a str, Column<String>>,
    #[serde(rename = "G", skip_serializing_if = "no_columns")]
    tags: &'a BTreeMap<String, Column<String>>,
}

#[derive(Deserialize)]
struct CompactOwned {
    #[serde(rename = "E")]
    epoch: i64,
    #[serde(rename = "T")]
    timestamps: Vec<i64>,
    #[serde(rename = "N", default)]
    numeric: BTreeMap<String, Column<f64>>,
    #[serde(rename = "S", default)]
    strings: BTreeMap<String, Column<String>>,
    #[serde(rename = "B", default)]
    binary: BTreeMap<String, Column<String>>,
    #[serde(rename = "G", default)]
    tags: BTreeMap<String, Column<String>>,
}

fn no_columns<T>(columns: &&BTreeMap<String, Column<T>>) -> bool {
    columns.is_empty()
}

impl Codec for TimeseriesDataJsonCodec {
    type Model = TimeseriesData;

    fn id(&self) -> CodecId {
        Self::ID
    }

    fn format(&self) -> WireFormat {
        WireFormat::CompactJson
    }

    fn encode(&self, model: &TimeseriesData) -> Result<Vec<u8>, EncodeError> {
        model.validate()?;
        require_finite(model)?;

        let binary = model
            .binary_values
            .iter()
            .map(|(parameter, column)| {
                let encoded = column
                    .iter()
                    .map(|cell| cell.as_deref().map(|bytes| STANDARD.encode(bytes)))
                    .collect();
                (parameter.as_str(), encoded)
            })
            .collect();

        let compact = CompactRef {
            epoch: model.epoch,
            timestamps: &model.timestamps,
            numeric: &model.numeric_values,
            strings: &model.string_values,
            binary,
            tags: &model.tag_values,
        };
        Ok(serde_json::to_vec(&compact)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<TimeseriesData, DecodeError> {
        let compact: CompactOwned = serde_json::from_slice(bytes)?;

        let mut binary_values = BTreeMap::new();
        for (parameter, column) in compact.binary {
            let decoded = column
                .into_iter()
                .map(|cell| cell.map(|text| STANDARD.decode(text)).transpose())
                .collect::<Result<Vec<_>, _>>()?;
            binary_values.insert(parameter, decoded);
        }

        let model = TimeseriesData {
            epoch: compact.epoch,
            timestamps: compact.timestamps,
            numeric_values: compact.numeric,
            string_values: compact.strings,
            binary_values,
            tag_values: compact.tags,
        };
        model.validate()?;
        Ok(model)
    }
}
