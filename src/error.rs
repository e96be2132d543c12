use tagkit_ndef::NdefError;

use crate::tag::TagIoError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NfcError {
    #[error("NFC hardware not available on this device")]
    HardwareUnavailable,

    #[error("NFC is currently disabled")]
    RadioDisabled,

    #[error("no NFC tag available, start scanning and present a tag first")]
    NoTagPresent,

    #[error("invalid NDEF records payload: {0}")]
    InvalidPayload(String),

    #[error("tag is read only")]
    ReadOnlyTag,

    #[error("tag capacity is insufficient for the provided message, capacity {capacity}, required {required}")]
    CapacityExceeded { capacity: usize, required: usize },

    #[error("tag does not support NDEF")]
    NoNdefSupport,

    #[error("tag does not support NDEF formatting")]
    FormatUnsupported,

    #[error("failed to make the tag read only")]
    LockFailed,

    #[error("NDEF push is not available on this device")]
    PushUnsupported,

    #[error("NDEF push is disabled on this device")]
    PushDisabled,

    #[error("failed to write NDEF message: {0}")]
    WriteFailed(String),

    #[error("tag worker unavailable: {0}")]
    WorkerUnavailable(String),
}

impl NfcError {
    /// Status code for the adapter errors, matches [`crate::adapter::NfcStatus`]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::HardwareUnavailable => Some("NO_NFC"),
            Self::RadioDisabled => Some("NFC_DISABLED"),
            _ => None,
        }
    }

    /// A fault while connecting, writing or formatting
    pub fn from_write_fault(error: TagIoError) -> Self {
        match error {
            TagIoError::Stale => Self::NoTagPresent,
            other => Self::WriteFailed(other.to_string()),
        }
    }
}

impl From<NdefError> for NfcError {
    fn from(error: NdefError) -> Self {
        Self::InvalidPayload(error.to_string())
    }
}
