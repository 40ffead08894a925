//! Telemetry model types for streamcodec.
//!
//! Defines the payloads that flow through the codec registry and the keys
//! used to look their codecs up:
//! - [`ModelKey`]: the string identity a codec registry is keyed by
//! - [`KeyedModel`]: implemented by every payload type to declare its key
//! - [`TimeseriesData`], [`EventData`]: the high-volume stream payloads
//! - [`StreamProperties`], [`ParameterDefinitions`], [`EventDefinitions`],
//!   [`StreamEnd`]: low-volume stream metadata
//!
//! The registry treats all of these as opaque serde values; only the
//! format-specific codecs look inside [`TimeseriesData`].

mod definitions;
mod event;
mod key;
mod model;
mod stream;
mod timeseries;

pub use definitions::{
    EventDefinition, EventDefinitions, EventLevel, ParameterDefinition, ParameterDefinitions,
};
pub use event::EventData;
pub use key::{well_known, ModelKey};
pub use model::KeyedModel;
pub use stream::{StreamEnd, StreamEndType, StreamProperties};
pub use timeseries::TimeseriesData;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while building keys or validating models.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("model key must not be empty")]
    EmptyKey,

    #[error("column `{parameter}` has {actual} values but there are {expected} timestamps")]
    MisalignedColumn {
        parameter: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid model: {0}")]
    Invalid(String),
}
