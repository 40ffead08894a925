//! Protobuf for timeseries frames. Messages are declared with prost derives;
//! there is no `.proto` build step.

use std::collections::BTreeMap;

use prost::Message;
use streamcodec_model::{KeyedModel, TimeseriesData};

use crate::codec::{Codec, CodecId, WireFormat};
use crate::error::{DecodeError, EncodeError};

/// Protobuf codec for [`TimeseriesData`].
///
/// Each column is sent densely: `values` holds only the present cells and
/// `present` has one flag per timestamp.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeseriesDataProtobufCodec;

impl TimeseriesDataProtobufCodec {
    pub const ID: CodecId = CodecId::new("PT");
}

#[derive(Clone, PartialEq, Message)]
struct TimeseriesMessage {
    #[prost(int64, tag = "1")]
    epoch: i64,
    #[prost(int64, repeated, tag = "2")]
    timestamps: Vec<i64>,
    #[prost(message, repeated, tag = "3")]
    numeric: Vec<NumericColumn>,
    #[prost(message, repeated, tag = "4")]
    strings: Vec<StringColumn>,
    #[prost(message, repeated, tag = "5")]
    binary: Vec<BinaryColumn>,
    #[prost(message, repeated, tag = "6")]
    tags: Vec<StringColumn>,
}

#[derive(Clone, PartialEq, Message)]
struct NumericColumn {
    #[prost(string, tag = "1")]
    name: String,
    #[prost(double, repeated, tag = "2")]
    values: Vec<f64>,
    #[prost(bool, repeated, tag = "3")]
    present: Vec<bool>,
}

#[derive(Clone, PartialEq, Message)]
struct StringColumn {
    #[prost(string, tag = "1")]
    name: String,
    #[prost(string, repeated, tag = "2")]
    values: Vec<String>,
    #[prost(bool, repeated, tag = "3")]
    present: Vec<bool>,
}

#[derive(Clone, PartialEq, Message)]
struct BinaryColumn {
    #[prost(string, tag = "1")]
    name: String,
    #[prost(bytes = "vec", repeated, tag = "2")]
    values: Vec<Vec<u8>>,
    #[prost(bool, repeated, tag = "3")]
    present: Vec<bool>,
}

fn pack<T: Clone>(column: &[Option<T>]) -> (Vec<T>, Vec<bool>) {
    let present = column.iter().map(Option::is_some).collect();
    let values = column.iter().flatten().cloned().collect();
    (values, present)
}

fn unpack<T>(
    name: &str,
    values: Vec<T>,
    present: Vec<bool>,
    rows: usize,
) -> Result<Vec<Option<T>>, DecodeError> {
    let set = present.iter().filter(|p| **p).count();
    if present.len() != rows || set != values.len() {
        return Err(DecodeError::Malformed(format!(
            "column `{name}` has {} flags and {} values for {rows} rows",
            present.len(),
            values.len()
        )));
    }
    let mut values = values.into_iter();
    Ok(present
        .into_iter()
        .map(|p| if p { values.next() } else { None })
        .collect())
}

fn string_columns(columns: &BTreeMap<String, Vec<Option<String>>>) -> Vec<StringColumn> {
    columns
        .iter()
        .map(|(name, column)| {
            let (values, present) = pack(column);
            StringColumn {
                name: name.clone(),
                values,
                present,
            }
        })
        .collect()
}

/// Unpacks every column of one group. A name seen twice is malformed.
fn column_map<T>(
    columns: impl IntoIterator<Item = (String, Vec<T>, Vec<bool>)>,
    rows: usize,
) -> Result<BTreeMap<String, Vec<Option<T>>>, DecodeError> {
    let mut map = BTreeMap::new();
    for (name, values, present) in columns {
        if map.contains_key(&name) {
            return Err(DecodeError::Malformed(format!("duplicate column `{name}`")));
        }
        let column = unpack(&name, values, present, rows)?;
        map.insert(name, column);
    }
    Ok(map)
}

fn string_map(
    columns: Vec<StringColumn>,
    rows: usize,
) -> Result<BTreeMap<String, Vec<Option<String>>>, DecodeError> {
    column_map(columns.into_iter().map(|c| (c.name, c.values, c.present)), rows)
}

impl Codec for TimeseriesDataProtobufCodec {
    type Model = TimeseriesData;

    fn id(&self) -> CodecId {
        Self::ID
    }

    fn format(&self) -> WireFormat {
        WireFormat::Protobuf
    }

    fn encode(&self, model: &TimeseriesData) -> Result<Vec<u8>, EncodeError> {
        model.validate()?;
        let message = TimeseriesMessage {
            epoch: model.epoch,
            timestamps: model.timestamps.clone(),
            numeric: model
                .numeric_values
                .iter()
                .map(|(name, column)| {
                    let (values, present) = pack(column);
                    NumericColumn {
                        name: name.clone(),
                        values,
                        present,
                    }
                })
                .collect(),
            strings: string_columns(&model.string_values),
            binary: model
                .binary_values
                .iter()
                .map(|(name, column)| {
                    let (values, present) = pack(column);
                    BinaryColumn {
                        name: name.clone(),
                        values,
                        present,
                    }
                })
                .collect(),
            tags: string_columns(&model.tag_values),
        };
        Ok(message.encode_to_vec())
    }

    fn decode(&self, bytes: &[u8]) -> Result<TimeseriesData, DecodeError> {
        let message = TimeseriesMessage::decode(bytes)?;
        let rows = message.timestamps.len();

        let numeric_values = column_map(
            message.numeric.into_iter().map(|c| (c.name, c.values, c.present)),
            rows,
        )?;
        let binary_values = column_map(
            message.binary.into_iter().map(|c| (c.name, c.values, c.present)),
            rows,
        )?;

        let model = TimeseriesData {
            epoch: message.epoch,
            timestamps: message.timestamps,
            numeric_values,
            string_values: string_map(message.strings, rows)?,
            binary_values,
            tag_values: string_map(message.tags, rows)?,
        };
        model.validate()?;
        Ok(model)
    }
}
