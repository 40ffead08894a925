//! Generic structural JSON, registered for every model key.

use std::fmt;
use std::marker::PhantomData;

use streamcodec_model::KeyedModel;

use crate::codec::{Codec, CodecId, CodecRole, WireFormat};
use crate::error::{DecodeError, EncodeError};

use super::require_finite;

/// Generic structural JSON codec, the baseline every model key carries.
///
/// Serializes the model with its serde field names. Usable for any
/// [`KeyedModel`], so it is registered for every key as the fallback.
/// Models holding NaN or infinite numbers are rejected, since serde_json
/// would write them as `null`.
pub struct DefaultJsonCodec<M> {
    _model: PhantomData<fn() -> M>,
}

impl<M> DefaultJsonCodec<M> {
    pub const ID: CodecId = CodecId::new("J");

    pub const fn new() -> Self {
        Self {
            _model: PhantomData,
        }
    }
}

impl<M> Default for DefaultJsonCodec<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for DefaultJsonCodec<M> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for DefaultJsonCodec<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DefaultJsonCodec<{}>", std::any::type_name::<M>())
    }
}

impl<M: KeyedModel> Codec for DefaultJsonCodec<M> {
    type Model = M;

    fn id(&self) -> CodecId {
        Self::ID
    }

    fn format(&self) -> WireFormat {
        WireFormat::Json
    }

    fn role(&self) -> CodecRole {
        CodecRole::Default
    }

    fn encode(&self, model: &M) -> Result<Vec<u8>, EncodeError> {
        model.validate()?;
        require_finite(model)?;
        Ok(serde_json::to_vec(model)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<M, DecodeError> {
        let model: M = serde_json::from_slice(bytes)?;
        model.validate()?;
        Ok(model)
    }
}
