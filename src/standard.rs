//! Reads and writes through the platform's own NDEF technology

use tagkit_ndef::NdefMessage;
use tap::TapFallible as _;
use tracing::{debug, warn};

use crate::{
    connection::Connection,
    dispatcher::ReadSource,
    error::NfcError,
    tag::{NdefFormatable as _, NdefTech, TagHandle},
};

/// Cached message first, then a blocking read, `None` on any fault
pub fn read_message(ndef: &dyn NdefTech) -> Option<(NdefMessage, ReadSource)> {
    if let Some(bytes) = ndef.cached_message() {
        match NdefMessage::from_bytes(&bytes) {
            Ok(message) => return Some((message, ReadSource::StandardCached)),
            Err(error) => debug!("cached NDEF message unusable, reading from tag: {error}"),
        }
    }

    let connection = Connection::open(ndef)
        .tap_err(|error| debug!("unable to connect to NDEF tag: {error}"))
        .ok()?;

    let bytes = match connection.read_message() {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return None,
        Err(error) => {
            debug!("NDEF read failed: {error}");
            return None;
        }
    };

    drop(connection);

    NdefMessage::from_bytes(&bytes)
        .tap_err(|error| warn!("malformed NDEF message on tag: {error}"))
        .ok()
        .map(|message| (message, ReadSource::StandardRead))
}

pub fn write_message(
    tag: &dyn TagHandle,
    message: &NdefMessage,
    allow_format: bool,
) -> Result<(), NfcError> {
    let bytes = message.to_bytes();

    if let Some(ndef) = tag.ndef() {
        let connection = Connection::open(ndef.as_ref()).map_err(NfcError::from_write_fault)?;

        if !connection.is_writable() {
            return Err(NfcError::ReadOnlyTag);
        }

        let capacity = connection.max_size();
        if capacity < bytes.len() {
            return Err(NfcError::CapacityExceeded { capacity, required: bytes.len() });
        }

        connection.write_message(&bytes).map_err(NfcError::from_write_fault)?;
        debug!("wrote {} byte NDEF message", bytes.len());
        return Ok(());
    }

    if !allow_format {
        return Err(NfcError::NoNdefSupport);
    }

    let formatable = tag.ndef_formatable().ok_or(NfcError::FormatUnsupported)?;
    let connection = Connection::open(formatable.as_ref()).map_err(NfcError::from_write_fault)?;
    connection.format(&bytes).map_err(NfcError::from_write_fault)?;

    debug!("formatted tag with {} byte NDEF message", bytes.len());
    Ok(())
}

pub fn make_read_only(tag: &dyn TagHandle) -> Result<(), NfcError> {
    let ndef = tag.ndef().ok_or(NfcError::NoNdefSupport)?;

    let connection = Connection::open(ndef.as_ref())
        .tap_err(|error| warn!("unable to connect to lock tag: {error}"))
        .map_err(|_| NfcError::LockFailed)?;

    match connection.make_read_only() {
        Ok(true) => Ok(()),
        Ok(false) => Err(NfcError::LockFailed),
        Err(error) => {
            warn!("make read only failed: {error}");
            Err(NfcError::LockFailed)
        }
    }
}
