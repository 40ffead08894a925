//! The codec registry: model key -> ordered codec list.
//!
//! Index 0 of a key's list is the active writer. Reads try every codec in
//! order until one decodes. The table is an immutable snapshot published
//! through [`ArcSwap`]; registrations build a new snapshot under a writer
//! lock and swap it in, so readers never block and never observe a
//! partially-applied batch.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use arc_swap::ArcSwap;
use streamcodec_model::{KeyedModel, ModelKey};
use tracing::{debug, info};

use crate::codec::{Codec, CodecId, CodecRole, DynCodec, TypedCodec};
use crate::error::{CodecError, CodecResult, DecodeAttempt};
use crate::profile::FormatProfile;

/// One codec registered under one key.
#[derive(Debug, Clone)]
pub struct CodecEntry {
    pub key: ModelKey,
    pub codec: Arc<dyn DynCodec>,
}

impl CodecEntry {
    pub fn new(key: ModelKey, codec: Arc<dyn DynCodec>) -> Self {
        Self { key, codec }
    }

    /// The role the codec declares.
    pub fn role(&self) -> CodecRole {
        self.codec.role()
    }

    /// Creates one entry for every key the codec serves.
    pub fn for_codec<C: Codec>(codec: C) -> Vec<Self> {
        let shared = TypedCodec::shared(codec);
        shared
            .keys()
            .into_iter()
            .map(|key| Self::new(key, Arc::clone(&shared)))
            .collect()
    }

    fn same_codec(&self, other: &CodecEntry) -> bool {
        self.codec.codec_type() == other.codec.codec_type()
    }
}

/// What a single `register` call did to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// New entry appended behind the existing ones.
    Appended,
    /// New entry inserted at index 0.
    InsertedAsWriter,
    /// Existing entry moved to index 0.
    Promoted,
    /// Entry already present and already positioned.
    KeptExisting,
}

/// Bytes produced by the active writer, tagged with the codec that wrote them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    pub key: ModelKey,
    pub codec: CodecId,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Default)]
struct RegistrySnapshot {
    by_key: HashMap<ModelKey, Vec<CodecEntry>>,
}

impl RegistrySnapshot {
    fn writer_id(&self, key: &ModelKey) -> Option<CodecId> {
        self.by_key.get(key).and_then(|l| l.first()).map(|e| e.codec.id())
    }

    fn insert(&mut self, entry: CodecEntry, as_writer: bool) -> CodecResult<Registration> {
        let Some(list) = self.by_key.get_mut(&entry.key) else {
            self.by_key.insert(entry.key.clone(), vec![entry]);
            return Ok(if as_writer {
                Registration::InsertedAsWriter
            } else {
                Registration::Appended
            });
        };

        if let Some(pos) = list.iter().position(|e| e.same_codec(&entry)) {
            if as_writer && pos != 0 {
                let existing = list.remove(pos);
                list.insert(0, existing);
                return Ok(Registration::Promoted);
            }
            return Ok(Registration::KeptExisting);
        }

        let id = entry.codec.id();
        if let Some(clash) = list.iter().find(|e| e.codec.id() == id) {
            return Err(CodecError::CodecIdConflict {
                key: entry.key.clone(),
                codec: id,
                existing: clash.codec.codec_type_name(),
            });
        }

        if as_writer {
            list.insert(0, entry);
            Ok(Registration::InsertedAsWriter)
        } else {
            list.push(entry);
            Ok(Registration::Appended)
        }
    }
}

static GLOBAL: LazyLock<CodecRegistry> = LazyLock::new(CodecRegistry::new);

/// Process-wide table of codecs per model key.
pub struct CodecRegistry {
    snap: ArcSwap<RegistrySnapshot>,
    write_lock: Mutex<()>,
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            snap: ArcSwap::from_pointee(RegistrySnapshot::default()),
            write_lock: Mutex::new(()),
        }
    }

    /// The process-wide registry, created empty on first access.
    pub fn global() -> &'static CodecRegistry {
        &GLOBAL
    }

    // ================================================================
    // Registration
    // ================================================================

    /// Registers one entry.
    ///
    /// With `as_default_writer` the entry becomes index 0; the previous writer
    /// shifts down and stays available for reads. Registering an entry that
    /// is already present never duplicates it but still re-applies the
    /// writer positioning.
    pub fn register(&self, entry: CodecEntry, as_default_writer: bool) -> CodecResult<Registration> {
        let mut actions = self.register_many([(entry, as_default_writer)])?;
        Ok(actions.remove(0))
    }

    /// Registers a typed codec for every key it serves.
    pub fn register_codec<C: Codec>(
        &self,
        codec: C,
        as_default_writer: bool,
    ) -> CodecResult<Vec<Registration>> {
        self.register_many(
            CodecEntry::for_codec(codec)
                .into_iter()
                .map(|entry| (entry, as_default_writer)),
        )
    }

    /// Applies a batch of registrations in order and publishes the result
    /// atomically. If any registration fails nothing is published.
    pub fn register_many<I>(&self, entries: I) -> CodecResult<Vec<Registration>>
    where
        I: IntoIterator<Item = (CodecEntry, bool)>,
    {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let cur = self.snap.load_full();
        let mut next = RegistrySnapshot::clone(&cur);

        let mut actions = Vec::new();
        for (entry, as_writer) in entries {
            let key = entry.key.clone();
            let id = entry.codec.id();
            let action = next.insert(entry, as_writer)?;
            debug!(key = %key, codec = %id, ?action, "codec registered");
            actions.push(action);
        }

        for (key, list) in &next.by_key {
            let Some(prev) = cur.writer_id(key) else {
                continue;
            };
            let now = list[0].codec.id();
            if prev != now {
                info!(key = %key, from = %prev, to = %now, "active writer switched");
            }
        }

        self.snap.store(Arc::new(next));
        Ok(actions)
    }

    /// Resolves a profile and registers all of its codecs as one batch.
    pub fn register_profile(&self, profile: FormatProfile) -> CodecResult<()> {
        let registrations = profile.resolve();
        let count = registrations.len();
        self.register_many(
            registrations
                .into_iter()
                .map(|r| (r.entry, r.as_default_writer)),
        )?;
        info!(%profile, entries = count, "codec profile registered");
        Ok(())
    }

    /// Drops every registration. Intended for test isolation.
    pub fn reset(&self) {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.snap.store(Arc::new(RegistrySnapshot::default()));
        debug!("codec registry reset");
    }

    // ================================================================
    // Lookup
    // ================================================================

    /// Ordered codecs for a key. Index 0 is the active writer.
    ///
    /// Returns a copy; later registrations do not affect it.
    pub fn retrieve_codecs(&self, key: impl Into<ModelKey>) -> CodecResult<Vec<Arc<dyn DynCodec>>> {
        Ok(self
            .retrieve_entries(key)?
            .into_iter()
            .map(|e| e.codec)
            .collect())
    }

    /// Ordered entries for a key, including their roles.
    pub fn retrieve_entries(&self, key: impl Into<ModelKey>) -> CodecResult<Vec<CodecEntry>> {
        let key = key.into();
        let snap = self.snap.load();
        match snap.by_key.get(&key) {
            Some(list) if !list.is_empty() => Ok(list.clone()),
            _ => Err(CodecError::UnknownModelKey(key)),
        }
    }

    /// The active writer for a key.
    pub fn writer(&self, key: impl Into<ModelKey>) -> CodecResult<Arc<dyn DynCodec>> {
        let key = key.into();
        let snap = self.snap.load();
        snap.by_key
            .get(&key)
            .and_then(|list| list.first())
            .map(|e| Arc::clone(&e.codec))
            .ok_or(CodecError::UnknownModelKey(key))
    }

    pub fn is_registered(&self, key: impl Into<ModelKey>) -> bool {
        self.snap.load().by_key.contains_key(&key.into())
    }

    /// Every key with at least one codec, sorted.
    pub fn keys(&self) -> Vec<ModelKey> {
        let mut keys: Vec<ModelKey> = self.snap.load().by_key.keys().cloned().collect();
        keys.sort();
        keys
    }

    // ================================================================
    // Write / read
    // ================================================================

    /// Encodes with the active writer. There is no fallback writer.
    pub fn write<M: KeyedModel>(&self, key: impl Into<ModelKey>, model: &M) -> CodecResult<Vec<u8>> {
        Ok(self.write_tagged(key, model)?.bytes)
    }

    /// Encodes with the active writer and reports which codec wrote it.
    pub fn write_tagged<M: KeyedModel>(
        &self,
        key: impl Into<ModelKey>,
        model: &M,
    ) -> CodecResult<EncodedPayload> {
        let key = key.into();
        let writer = self.writer(&key)?;
        let codec = writer.id();
        match writer.encode_model(model) {
            Ok(bytes) => Ok(EncodedPayload { key, codec, bytes }),
            Err(source) => Err(CodecError::Encode { key, codec, source }),
        }
    }

    /// Encodes under the model's own key.
    pub fn write_model<M: KeyedModel>(&self, model: &M) -> CodecResult<Vec<u8>> {
        self.write(M::model_key(), model)
    }

    /// Decodes with the first codec that accepts the bytes.
    ///
    /// Per-codec failures are collected and only surfaced, as
    /// [`CodecError::NoCodecMatched`], when every codec fails.
    pub fn read<M: KeyedModel>(&self, key: impl Into<ModelKey>, bytes: &[u8]) -> CodecResult<M> {
        let key = key.into();
        let codecs = self.retrieve_codecs(&key)?;
        let mut attempts = Vec::new();
        for (index, codec) in codecs.iter().enumerate() {
            match codec.decode_model::<M>(bytes) {
                Ok(model) => {
                    if index > 0 {
                        debug!(key = %key, codec = %codec.id(), index, "read served by fallback codec");
                    }
                    return Ok(model);
                }
                Err(error) => {
                    debug!(key = %key, codec = %codec.id(), %error, "decode attempt failed");
                    attempts.push(DecodeAttempt {
                        codec: codec.id(),
                        error,
                    });
                }
            }
        }
        Err(CodecError::NoCodecMatched { key, attempts })
    }

    /// Decodes under the model's own key.
    pub fn read_model<M: KeyedModel>(&self, bytes: &[u8]) -> CodecResult<M> {
        self.read(M::model_key(), bytes)
    }

    /// Decodes with the codec named by a transport header.
    ///
    /// Without a codec id this is [`read`](Self::read). With one, only that
    /// codec is tried.
    pub fn read_tagged<M: KeyedModel>(
        &self,
        key: impl Into<ModelKey>,
        codec_id: Option<&str>,
        bytes: &[u8],
    ) -> CodecResult<M> {
        let key = key.into();
        let Some(codec_id) = codec_id else {
            return self.read(key, bytes);
        };
        let codec = self
            .retrieve_codecs(&key)?
            .into_iter()
            .find(|c| c.id().as_str() == codec_id)
            .ok_or_else(|| CodecError::UnknownCodecId {
                key: key.clone(),
                codec: codec_id.to_string(),
            })?;
        codec.decode_model::<M>(bytes).map_err(|source| CodecError::Decode {
            key,
            codec: codec.id(),
            source,
        })
    }
}
