//! NFC tag discovery, NDEF decoding and writing for a host driven radio

pub mod adapter;
pub mod classifier;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod manager;
pub mod memory_reader;
pub mod platform;
pub mod push;
pub mod raw_decoder;
pub mod session;
pub mod standard;
pub mod tag;
pub mod wire;
pub mod writer;

pub(crate) mod connection;

#[cfg(test)]
pub(crate) mod mock;

pub use tagkit_ndef as ndef;

pub use config::NfcConfig;
pub use error::NfcError;
pub use lifecycle::ReaderFlags;
pub use manager::{NfcManager, NfcReconcileMessage, NfcReconciler};
pub use platform::NfcPlatform;
pub use tag::{Tag, TagHandle, TagIoError};
