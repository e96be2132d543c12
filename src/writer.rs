//! Write, erase and lock against the current session's tag

use tagkit_ndef::{NdefMessage, NdefRecord};
use tracing::debug;

use crate::{error::NfcError, session::SessionSlot, standard};

pub fn write(
    session: &SessionSlot,
    records: Vec<NdefRecord>,
    allow_format: bool,
) -> Result<(), NfcError> {
    let tag = session.current_tag()?;
    let message = NdefMessage::try_new(records)?;

    debug!("writing {} record(s), allow format: {allow_format}", message.len());
    standard::write_message(tag.as_ref(), &message, allow_format)
}

/// Overwrite with a single empty record, formatting if needed
pub fn erase(session: &SessionSlot) -> Result<(), NfcError> {
    write(session, vec![NdefRecord::empty()], true)
}

pub fn make_read_only(session: &SessionSlot) -> Result<(), NfcError> {
    let tag = session.current_tag()?;
    standard::make_read_only(tag.as_ref())
}
