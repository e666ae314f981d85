use std::fmt;

/// Panic payload raised when a snapshot cannot be turned back into a live
/// value.
///
/// A replayed request with a corrupt URL could be routed anywhere, so this is
/// never returned as an error value. Callers that want to survive it must
/// catch the unwind and downcast the payload to this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayFailure {
    pub field: &'static str,
    pub value: String,
    pub reason: String,
}

impl fmt::Display for ReplayFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot replay snapshot: {} {:?} is invalid: {}",
            self.field, self.value, self.reason
        )
    }
}

impl std::error::Error for ReplayFailure {}

/// Log and unwind with a [`ReplayFailure`] payload.
pub(crate) fn fail(field: &'static str, value: &str, reason: impl fmt::Display) -> ! {
    let failure = ReplayFailure {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    };
    tracing::error!(field, value, reason = %failure.reason, "replay aborted");
    std::panic::panic_any(failure)
}
