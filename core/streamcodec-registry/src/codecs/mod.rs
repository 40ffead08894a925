//! Built-in codecs.
//!
//! - [`DefaultJsonCodec`]: generic structural JSON for any model
//! - [`TimeseriesDataJsonCodec`]: compact JSON tuned for `TimeseriesData`
//! - [`TimeseriesDataProtobufCodec`]: Protobuf for `TimeseriesData`

mod json;
mod timeseries_json;
mod timeseries_protobuf;

pub use json::DefaultJsonCodec;
pub use timeseries_json::TimeseriesDataJsonCodec;
pub use timeseries_protobuf::TimeseriesDataProtobufCodec;

use streamcodec_model::KeyedModel;

use crate::error::EncodeError;

/// Fails if the model holds a number JSON cannot represent.
fn require_finite<M: KeyedModel>(model: &M) -> Result<(), EncodeError> {
    match model.first_non_finite() {
        Some((field, index)) => Err(EncodeError::Unsupported(format!(
            "`{field}` has a non-finite value at index {index}"
        ))),
        None => Ok(()),
    }
}
