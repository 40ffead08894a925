//! Codec registry for streamcodec.
//!
//! Associates each [`ModelKey`] with an ordered list of codecs:
//! - index 0 is the **active writer**, used for every `write`
//! - every codec is tried in order on `read` until one decodes
//!
//! Adding a wire format therefore never breaks readers of old data, and the
//! active write format is a configuration choice ([`FormatProfile`]) rather
//! than a compile-time one.
//!
//! # Example
//!
//! ```
//! use streamcodec_registry::{CodecRegistry, FormatProfile};
//! use streamcodec_model::TimeseriesData;
//!
//! let registry = CodecRegistry::new();
//! registry.register_profile(FormatProfile::ImprovedJson).unwrap();
//!
//! let data = TimeseriesData::new(0, vec![1, 2]).with_numeric("speed", vec![Some(1.0), None]);
//! let bytes = registry.write("TimeseriesData", &data).unwrap();
//! let back: TimeseriesData = registry.read("TimeseriesData", &bytes).unwrap();
//! assert_eq!(back, data);
//! ```

pub mod codec;
pub mod codecs;
mod error;
pub mod profile;
mod registry;
pub mod settings;

pub use codec::{Codec, CodecId, CodecRole, DynCodec, TypedCodec, WireFormat};
pub use error::{CodecError, CodecResult, ConfigError, DecodeAttempt, DecodeError, EncodeError};
pub use profile::{FormatProfile, ProfileRegistration};
pub use registry::{CodecEntry, CodecRegistry, EncodedPayload, Registration};
pub use settings::{set_global_profile, CodecSettings, PROFILE_ENV_VAR};

pub use streamcodec_model::{KeyedModel, ModelKey};
