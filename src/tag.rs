//! Handles to a physical tag and the technologies it exposes
//!
//! The platform radio hands us a [`Tag`] on every presence event. Everything
//! behind it is blocking I/O against a target that can leave the field at any
//! moment, so every call can fail with [`TagIoError::Stale`].

use std::{fmt::Debug, sync::Arc};

/// Technology names as reported by the platform
pub mod tech {
    pub const NDEF: &str = "android.nfc.tech.Ndef";
    pub const NDEF_FORMATABLE: &str = "android.nfc.tech.NdefFormatable";
    pub const MIFARE_ULTRALIGHT: &str = "android.nfc.tech.MifareUltralight";
    pub const NFC_A: &str = "android.nfc.tech.NfcA";
}

pub type Tag = Arc<dyn TagHandle>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagIoError {
    /// The tag left the field, the handle will never work again
    #[error("tag is out of range")]
    Stale,

    #[error("tag i/o failed: {0}")]
    Io(String),

    #[error("operation not supported by this tag")]
    Unsupported,
}

/// Something that has to be connected before use and closed afterwards
pub trait Connectable: Send + Sync {
    fn connect(&self) -> Result<(), TagIoError>;
    fn close(&self) -> Result<(), TagIoError>;
}

/// Chip variants of page addressed memory, only used for logging
#[derive(Debug, Copy, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PagedVariant {
    #[display("MIFARE Ultralight (standard, 64 bytes)")]
    Ultralight,

    #[display("MIFARE Ultralight C (up to 192 bytes)")]
    UltralightC,

    #[display("MIFARE Ultralight (type: {_0}, unknown variant)")]
    Unknown(i32),
}

/// Type 2 style memory, addressed in 4 byte pages
pub trait PagedMemory: Connectable {
    fn variant(&self) -> PagedVariant;

    /// Read 4 pages (16 bytes) starting at `page`, may return fewer bytes near the end of memory
    fn read_pages(&self, page: u16) -> Result<Vec<u8>, TagIoError>;
}

/// The platform's own NDEF technology
pub trait NdefTech: Connectable {
    /// Message the platform read during discovery, without touching the tag again
    fn cached_message(&self) -> Option<Vec<u8>>;

    /// Blocking read, `None` when the tag holds no message
    fn read_message(&self) -> Result<Option<Vec<u8>>, TagIoError>;

    fn write_message(&self, message: &[u8]) -> Result<(), TagIoError>;

    fn is_writable(&self) -> bool;

    /// Capacity in bytes for an encoded message
    fn max_size(&self) -> usize;

    /// Platform tag type, for example `org.nfcforum.ndef.type2`
    fn ndef_type(&self) -> Option<String>;

    /// `None` when the platform can not tell
    fn can_make_read_only(&self) -> Option<bool>;

    /// Permanently lock the tag, `Ok(false)` when the tag refused
    fn make_read_only(&self) -> Result<bool, TagIoError>;
}

/// Tags that are not NDEF yet but can be formatted with a first message
pub trait NdefFormatable: Connectable {
    fn format(&self, message: &[u8]) -> Result<(), TagIoError>;
}

pub trait TagHandle: Send + Sync + Debug {
    fn id(&self) -> Vec<u8>;

    fn tech_types(&self) -> Vec<String>;

    fn paged_memory(&self) -> Option<Arc<dyn PagedMemory>>;

    fn ndef(&self) -> Option<Arc<dyn NdefTech>>;

    fn ndef_formatable(&self) -> Option<Arc<dyn NdefFormatable>>;

    fn has_tech(&self, name: &str) -> bool {
        self.tech_types().iter().any(|tech| tech == name)
    }
}
