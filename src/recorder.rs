//! Recording and replaying interactions as storable bytes.

use std::sync::Arc;

use crate::codec::{ErrorCodec, ErrorRegistry};
use crate::config::Config;
use crate::snapshot::{Interaction, QuerySnapshot, SnapshotError};

/// Turns [`Interaction`]s into bytes and back, following a [`Config`].
#[derive(Debug, Clone)]
pub struct Recorder {
    codec: ErrorCodec,
    capture_tls: bool,
}

impl Recorder {
    /// Recorder with a registry built from `config`.
    pub fn new(config: &Config) -> Self {
        let registry = if config.builtin_types {
            ErrorRegistry::new()
        } else {
            ErrorRegistry::empty()
        };
        Self::with_registry(config, Arc::new(registry))
    }

    /// Recorder sharing an existing registry, e.g. one the application has
    /// added its own error types to.
    pub fn with_registry(config: &Config, registry: Arc<ErrorRegistry>) -> Self {
        Self {
            codec: ErrorCodec::new(registry).with_fallback_message(config.fallback_message),
            capture_tls: config.capture_tls,
        }
    }

    pub fn codec(&self) -> &ErrorCodec {
        &self.codec
    }

    pub fn registry(&self) -> &Arc<ErrorRegistry> {
        self.codec.registry()
    }

    pub fn snapshot(&self, interaction: &Interaction) -> Result<QuerySnapshot, SnapshotError> {
        let snapshot = QuerySnapshot::capture(interaction, &self.codec)?;
        if self.capture_tls {
            Ok(snapshot)
        } else {
            Ok(snapshot.without_tls())
        }
    }

    /// # Panics
    ///
    /// See [`QuerySnapshot::reconstruct`].
    pub fn restore(&self, snapshot: &QuerySnapshot) -> Result<Interaction, SnapshotError> {
        Ok(snapshot.reconstruct(&self.codec)?)
    }

    pub fn record(&self, interaction: &Interaction) -> Result<Vec<u8>, SnapshotError> {
        let bytes = self.snapshot(interaction)?.to_bytes()?;
        tracing::debug!(bytes = bytes.len(), "recorded interaction");
        Ok(bytes)
    }

    /// # Panics
    ///
    /// See [`QuerySnapshot::reconstruct`].
    pub fn replay(&self, data: &[u8]) -> Result<Interaction, SnapshotError> {
        let snapshot = QuerySnapshot::from_bytes(data)?;
        self.restore(&snapshot)
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
