//! Error types for the codec layer.

use std::path::PathBuf;

use streamcodec_model::{ModelError, ModelKey};
use thiserror::Error;

use crate::codec::CodecId;

/// Result type for registry operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// A codec rejected a model on the write path.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The model failed its own validation.
    #[error("model rejected: {0}")]
    Invalid(#[from] ModelError),

    /// The model is valid but cannot be represented in this wire format.
    #[error("unsupported by format: {0}")]
    Unsupported(String),

    /// JSON serialization error.
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    /// The codec serves a different model type.
    #[error("codec expects `{expected}`, got `{actual}`")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

/// A codec could not decode a payload.
///
/// On the read path these are collected per codec and only surfaced,
/// wrapped in [`CodecError::NoCodecMatched`], when every codec fails.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("protobuf decode error: {0}")]
    Protobuf(#[from] prost::DecodeError),

    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The payload was well-formed but the decoded model is invalid.
    #[error("decoded model is invalid: {0}")]
    Invalid(#[from] ModelError),

    /// The payload is structurally inconsistent for this format.
    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("codec produces `{expected}`, caller asked for `{actual}`")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

/// One failed decode attempt on the read path.
#[derive(Debug)]
pub struct DecodeAttempt {
    pub codec: CodecId,
    pub error: DecodeError,
}

/// Errors surfaced by [`CodecRegistry`](crate::CodecRegistry).
#[derive(Debug, Error)]
pub enum CodecError {
    /// Nothing was ever registered for the key. Register a profile first.
    #[error("no codecs registered for model key `{0}`")]
    UnknownModelKey(ModelKey),

    /// The active writer rejected the model. No other writer is tried.
    #[error("codec `{codec}` failed to encode `{key}`: {source}")]
    Encode {
        key: ModelKey,
        codec: CodecId,
        #[source]
        source: EncodeError,
    },

    /// Every registered codec failed to decode the payload.
    #[error(
        "none of the {count} codecs registered for `{key}` could decode the payload",
        count = .attempts.len()
    )]
    NoCodecMatched {
        key: ModelKey,
        attempts: Vec<DecodeAttempt>,
    },

    /// The codec named by a tagged payload failed to decode it.
    #[error("codec `{codec}` failed to decode `{key}`: {source}")]
    Decode {
        key: ModelKey,
        codec: CodecId,
        #[source]
        source: DecodeError,
    },

    /// A tagged payload names a codec that is not registered for the key.
    #[error("codec `{codec}` is not registered for model key `{key}`")]
    UnknownCodecId { key: ModelKey, codec: String },

    /// Two different codec types claim the same id for one key.
    #[error("codec id `{codec}` for `{key}` is already taken by `{existing}`")]
    CodecIdConflict {
        key: ModelKey,
        codec: CodecId,
        existing: &'static str,
    },
}

/// Configuration errors. These fail fast at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown codec profile `{0}` (expected Json, ImprovedJson or Protobuf)")]
    UnknownProfile(String),

    #[error("failed to read settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Toml(#[from] toml::de::Error),
}
