//! Format profiles: named bundles of codec registrations.
//!
//! Every profile registers the same codecs for a key; profiles differ only
//! in which codec they promote to active writer. Switching profiles
//! therefore reorders a key's list and never drops a reader.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use streamcodec_model::{
    EventData, EventDefinitions, KeyedModel, ModelKey, ParameterDefinitions, StreamEnd,
    StreamProperties, TimeseriesData,
};

use crate::codec::{CodecRole, DynCodec, TypedCodec, WireFormat};
use crate::codecs::{DefaultJsonCodec, TimeseriesDataJsonCodec, TimeseriesDataProtobufCodec};
use crate::error::ConfigError;
use crate::registry::CodecEntry;

/// Which wire format producers write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum FormatProfile {
    /// Generic structural JSON for every model.
    #[default]
    Json,
    /// Compact JSON where a model has a tuned codec.
    ImprovedJson,
    /// Protobuf where a model has a Protobuf codec.
    Protobuf,
}

/// One (key, codec, writer?) tuple produced by resolving a profile.
#[derive(Debug, Clone)]
pub struct ProfileRegistration {
    pub entry: CodecEntry,
    pub as_default_writer: bool,
}

impl FormatProfile {
    pub const ALL: [FormatProfile; 3] = [Self::Json, Self::ImprovedJson, Self::Protobuf];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "Json",
            Self::ImprovedJson => "ImprovedJson",
            Self::Protobuf => "Protobuf",
        }
    }

    /// The format this profile promotes to writer where available.
    pub fn writer_format(self) -> WireFormat {
        match self {
            Self::Json => WireFormat::Json,
            Self::ImprovedJson => WireFormat::CompactJson,
            Self::Protobuf => WireFormat::Protobuf,
        }
    }

    /// Expands the profile into ordered registrations.
    ///
    /// For each key the codec matching [`writer_format`](Self::writer_format)
    /// is flagged as writer; keys without one fall back to their generic
    /// default codec.
    pub fn resolve(self) -> Vec<ProfileRegistration> {
        let format = self.writer_format();
        let mut registrations = Vec::new();
        for (key, codecs) in builtin_catalog() {
            let writer = codecs
                .iter()
                .position(|c| c.format() == format)
                .or_else(|| codecs.iter().position(|c| c.role() == CodecRole::Default))
                .unwrap_or(0);
            for (index, codec) in codecs.into_iter().enumerate() {
                registrations.push(ProfileRegistration {
                    entry: CodecEntry::new(key.clone(), codec),
                    as_default_writer: index == writer,
                });
            }
        }
        registrations
    }
}

impl fmt::Display for FormatProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))
    }
}

impl TryFrom<String> for FormatProfile {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn generic<M: KeyedModel>() -> (ModelKey, Vec<Arc<dyn DynCodec>>) {
    (
        M::model_key(),
        vec![TypedCodec::shared(DefaultJsonCodec::<M>::new())],
    )
}

/// Every built-in codec per key. Within a key the generic codec comes
/// first so it keeps the lowest index among readers.
fn builtin_catalog() -> Vec<(ModelKey, Vec<Arc<dyn DynCodec>>)> {
    vec![
        (
            TimeseriesData::model_key(),
            vec![
                TypedCodec::shared(DefaultJsonCodec::<TimeseriesData>::new()),
                TypedCodec::shared(TimeseriesDataJsonCodec),
                TypedCodec::shared(TimeseriesDataProtobufCodec),
            ],
        ),
        generic::<EventData>(),
        generic::<Vec<EventData>>(),
        generic::<StreamProperties>(),
        generic::<ParameterDefinitions>(),
        generic::<EventDefinitions>(),
        generic::<StreamEnd>(),
    ]
}
