use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{ModelError, ModelKey};

/// Implemented by every payload type that travels through a codec registry.
///
/// The key is declared explicitly per type rather than derived from the
/// Rust type name, so renaming or moving a type never changes its wire
/// identity.
pub trait KeyedModel: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The registry key of this model.
    fn model_key() -> ModelKey;

    /// Validate the model before it is encoded.
    /// Return `Err` to reject the write.
    fn validate(&self) -> Result<(), ModelError> {
        Ok(())
    }

    /// First number in the model that is NaN or infinite, as
    /// `(field, index)`. Text formats have no representation for these, so
    /// models carrying floats override this.
    fn first_non_finite(&self) -> Option<(String, usize)> {
        None
    }
}

impl<T: KeyedModel> KeyedModel for Vec<T> {
    fn model_key() -> ModelKey {
        T::model_key().array()
    }

    fn validate(&self) -> Result<(), ModelError> {
        self.iter().try_for_each(KeyedModel::validate)
    }

    fn first_non_finite(&self) -> Option<(String, usize)> {
        self.iter().enumerate().find_map(|(item, model)| {
            model
                .first_non_finite()
                .map(|(field, index)| (format!("[{item}].{field}"), index))
        })
    }
}
