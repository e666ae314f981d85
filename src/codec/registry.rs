//! Registry of error types that are known to survive a round trip.
//!
//! An error value is only stored with its concrete type when that type has
//! been registered here; everything else is reduced to its message. The
//! registry is normally filled once during startup and only read afterwards,
//! but registration stays safe at any time because lookups go through a
//! read-write lock.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::sync::Arc;

use bincode::Options;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::known::{
    AddrError, ConnectError, DnsError, FallbackError, ProtocolError, TimeoutError, UrlError,
};
use super::wire_format;

/// Error value as seen by the registry once every layer of indirection has
/// been removed.
pub(crate) type DynError = dyn StdError + Send + Sync + 'static;

/// Bound shared by every error type that can be registered.
pub trait RecordableError: StdError + Serialize + DeserializeOwned + Send + Sync + 'static {}

impl<T> RecordableError for T where T: StdError + Serialize + DeserializeOwned + Send + Sync + 'static
{}

/// Type-erased encode/decode functions for one registered error type.
pub(crate) struct RegisteredType {
    pub(crate) type_name: String,
    matches: fn(&DynError) -> bool,
    encode: fn(&DynError) -> Option<bincode::Result<Vec<u8>>>,
    decode: fn(&[u8]) -> bincode::Result<anyhow::Error>,
}

impl RegisteredType {
    fn of<E: RecordableError>(type_name: String) -> Self {
        Self {
            type_name,
            matches: |err| pointee::<E>(err).is_some(),
            encode: |err| pointee::<E>(err).map(|err| wire_format().serialize(err)),
            decode: |data| {
                wire_format()
                    .deserialize::<E>(data)
                    .map(anyhow::Error::new)
            },
        }
    }

    pub(crate) fn matches(&self, err: &DynError) -> bool {
        (self.matches)(err)
    }

    /// Returns `None` when `err` is not of this entry's type.
    pub(crate) fn encode(&self, err: &DynError) -> Option<bincode::Result<Vec<u8>>> {
        (self.encode)(err)
    }

    pub(crate) fn decode(&self, data: &[u8]) -> bincode::Result<anyhow::Error> {
        (self.decode)(data)
    }
}

/// Set of known-safe error types, keyed by type identifier. Built once at
/// startup and shared as `Arc<ErrorRegistry>`.
pub struct ErrorRegistry {
    types: RwLock<BTreeMap<String, Arc<RegisteredType>>>,
}

impl ErrorRegistry {
    /// Registry with the fallback type and the built-in transport errors.
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.register::<ProtocolError>();
        registry.register::<DnsError>();
        registry.register::<ConnectError>();
        registry.register::<AddrError>();
        registry.register::<UrlError>();
        registry.register::<TimeoutError>();
        registry
    }

    /// Registry that only knows the fallback type.
    pub fn empty() -> Self {
        let registry = Self {
            types: RwLock::new(BTreeMap::new()),
        };
        registry.register::<FallbackError>();
        registry
    }

    /// Identifier under which `E` is registered by [`ErrorRegistry::register`].
    pub fn type_id_of<E: ?Sized>() -> &'static str {
        std::any::type_name::<E>()
    }

    /// Mark `E` as known-safe. Registering a type twice is a no-op.
    pub fn register<E: RecordableError>(&self) {
        self.register_as::<E>(Self::type_id_of::<E>());
    }

    /// Mark the concrete type of `sample` as known-safe.
    pub fn register_sample<E: RecordableError>(&self, _sample: &E) {
        self.register::<E>();
    }

    /// Register `E` under a caller-chosen identifier.
    ///
    /// Type names produced by the compiler may change between builds; a fixed
    /// identifier keeps recordings decodable across such changes.
    pub fn register_as<E: RecordableError>(&self, type_name: &str) {
        let mut types = self.types.write();
        if types.contains_key(type_name) {
            return;
        }
        tracing::trace!(type_name, "registered recordable error type");
        types.insert(
            type_name.to_string(),
            Arc::new(RegisteredType::of::<E>(type_name.to_string())),
        );
    }

    pub fn is_known_safe(&self, type_name: &str) -> bool {
        self.types.read().contains_key(type_name)
    }

    pub fn type_names(&self) -> Vec<String> {
        self.types.read().keys().cloned().collect()
    }

    pub(crate) fn get(&self, type_name: &str) -> Option<Arc<RegisteredType>> {
        self.types.read().get(type_name).cloned()
    }

    /// Find the registered entry whose type matches `err`.
    pub(crate) fn find(&self, err: &DynError) -> Option<Arc<RegisteredType>> {
        self.types
            .read()
            .values()
            .find(|entry| entry.matches(err))
            .cloned()
    }
}

impl Default for ErrorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ErrorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}

/// `err` as an `E`, held directly or behind a `Box` or `Arc`.
fn pointee<E: RecordableError>(err: &DynError) -> Option<&E> {
    if let Some(err) = err.downcast_ref::<E>() {
        return Some(err);
    }
    if let Some(boxed) = err.downcast_ref::<Box<E>>() {
        return Some(boxed.as_ref());
    }
    err.downcast_ref::<Arc<E>>().map(|shared| shared.as_ref())
}

/// Strip the `anyhow` box, and a boxed `dyn Error` inside it, down to the
/// outermost concrete error.
pub(crate) fn concrete(err: &anyhow::Error) -> &DynError {
    if let Some(boxed) = err.downcast_ref::<Box<DynError>>() {
        return boxed.as_ref();
    }
    err.as_ref()
}
