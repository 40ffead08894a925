//! Codec contracts.
//!
//! Codecs are written against the generic [`Codec`] trait, which names its
//! model type. The registry stores them behind the object-safe [`DynCodec`]
//! so codecs for different models can share one table; [`TypedCodec`]
//! bridges the two.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use streamcodec_model::{KeyedModel, ModelKey};

use crate::error::{DecodeError, EncodeError};

/// Stable identifier of a codec, carried next to payloads by transports
/// that tag messages with the codec that wrote them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodecId(&'static str);

impl CodecId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Whether a codec is a generic fallback or tuned for one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodecRole {
    /// Schema-less structural codec usable for any model shape.
    Default,
    /// Hand-tuned for one model key and one wire format.
    FormatSpecific,
}

/// The wire format a codec produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireFormat {
    Json,
    CompactJson,
    Protobuf,
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "json",
            Self::CompactJson => "compact-json",
            Self::Protobuf => "protobuf",
        };
        f.write_str(name)
    }
}

/// Encode/decode capability for one model type.
///
/// Implementations must be stateless: the same instance is shared by every
/// caller and may be invoked concurrently.
pub trait Codec: Send + Sync + 'static {
    type Model: KeyedModel;

    fn id(&self) -> CodecId;

    fn format(&self) -> WireFormat;

    fn role(&self) -> CodecRole {
        CodecRole::FormatSpecific
    }

    /// Keys this codec can serve.
    fn keys(&self) -> Vec<ModelKey> {
        vec![Self::Model::model_key()]
    }

    /// Fails with [`EncodeError`] if the model is invalid for this format.
    fn encode(&self, model: &Self::Model) -> Result<Vec<u8>, EncodeError>;

    /// Fails with [`DecodeError`] on malformed or foreign input. Must never
    /// panic, so the read path can move on to the next codec.
    fn decode(&self, bytes: &[u8]) -> Result<Self::Model, DecodeError>;
}

/// Object-safe view of a [`Codec`], as stored in the registry.
pub trait DynCodec: Send + Sync + 'static {
    fn id(&self) -> CodecId;

    fn format(&self) -> WireFormat;

    fn role(&self) -> CodecRole;

    fn keys(&self) -> Vec<ModelKey>;

    /// `TypeId` of the concrete codec; two entries are duplicates iff this
    /// and their key match.
    fn codec_type(&self) -> TypeId;

    fn codec_type_name(&self) -> &'static str;

    fn model_type(&self) -> TypeId;

    fn model_type_name(&self) -> &'static str;

    fn encode_any(&self, model: &dyn Any) -> Result<Vec<u8>, EncodeError>;

    fn decode_any(&self, bytes: &[u8]) -> Result<Box<dyn Any + Send>, DecodeError>;
}

impl dyn DynCodec {
    /// Whether this is an instance of codec type `C`.
    pub fn is<C: Codec>(&self) -> bool {
        self.codec_type() == TypeId::of::<C>()
    }

    pub fn encode_model<M: KeyedModel>(&self, model: &M) -> Result<Vec<u8>, EncodeError> {
        if self.model_type() != TypeId::of::<M>() {
            return Err(EncodeError::TypeMismatch {
                expected: self.model_type_name(),
                actual: type_name::<M>(),
            });
        }
        self.encode_any(model)
    }

    pub fn decode_model<M: KeyedModel>(&self, bytes: &[u8]) -> Result<M, DecodeError> {
        let mismatch = || DecodeError::TypeMismatch {
            expected: self.model_type_name(),
            actual: type_name::<M>(),
        };
        if self.model_type() != TypeId::of::<M>() {
            return Err(mismatch());
        }
        self.decode_any(bytes)?
            .downcast::<M>()
            .map(|model| *model)
            .map_err(|_| mismatch())
    }
}

impl fmt::Debug for dyn DynCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynCodec")
            .field("id", &self.id())
            .field("format", &self.format())
            .field("role", &self.role())
            .field("codec", &self.codec_type_name())
            .finish()
    }
}

/// Wraps a generic [`Codec`] as a [`DynCodec`].
pub struct TypedCodec<C> {
    inner: C,
}

impl<C: Codec> TypedCodec<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    /// Shorthand for the shared trait object the registry stores.
    pub fn shared(inner: C) -> Arc<dyn DynCodec> {
        Arc::new(Self::new(inner))
    }
}

impl<C: Codec> DynCodec for TypedCodec<C> {
    fn id(&self) -> CodecId {
        self.inner.id()
    }

    fn format(&self) -> WireFormat {
        self.inner.format()
    }

    fn role(&self) -> CodecRole {
        self.inner.role()
    }

    fn keys(&self) -> Vec<ModelKey> {
        self.inner.keys()
    }

    fn codec_type(&self) -> TypeId {
        TypeId::of::<C>()
    }

    fn codec_type_name(&self) -> &'static str {
        type_name::<C>()
    }

    fn model_type(&self) -> TypeId {
        TypeId::of::<C::Model>()
    }

    fn model_type_name(&self) -> &'static str {
        type_name::<C::Model>()
    }

    fn encode_any(&self, model: &dyn Any) -> Result<Vec<u8>, EncodeError> {
        match model.downcast_ref::<C::Model>() {
            Some(typed) => self.inner.encode(typed),
            None => Err(EncodeError::TypeMismatch {
                expected: type_name::<C::Model>(),
                actual: "unknown",
            }),
        }
    }

    fn decode_any(&self, bytes: &[u8]) -> Result<Box<dyn Any + Send>, DecodeError> {
        let model = self.inner.decode(bytes)?;
        Ok(Box::new(model))
    }
}
