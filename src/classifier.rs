use serde::Serialize;
use tagkit_ndef::NdefMessage;

use crate::tag::{TagHandle, tech};

/// Label for a discovery event, exactly one per event
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, strum::Display, strum::AsRefStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DiscoveryKind {
    Tag,
    Ndef,
    NdefMime,
    NdefFormatable,
}

/// Listener channels on the host side
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum EventChannel {
    NfcEvent,
    TagDiscovered,
    NdefDiscovered,
    NdefMimeDiscovered,
    NdefFormatableDiscovered,
}

pub fn classify(tag: &dyn TagHandle, message: Option<&NdefMessage>) -> DiscoveryKind {
    match message {
        Some(message) if message.has_mime_record() => DiscoveryKind::NdefMime,
        Some(_) => DiscoveryKind::Ndef,
        None if tag.has_tech(tech::NDEF_FORMATABLE) => DiscoveryKind::NdefFormatable,
        None => DiscoveryKind::Tag,
    }
}

impl DiscoveryKind {
    /// The specific channel, events are also sent on [`EventChannel::NfcEvent`]
    pub fn channel(self) -> EventChannel {
        match self {
            Self::Tag => EventChannel::TagDiscovered,
            Self::Ndef => EventChannel::NdefDiscovered,
            Self::NdefMime => EventChannel::NdefMimeDiscovered,
            Self::NdefFormatable => EventChannel::NdefFormatableDiscovered,
        }
    }
}
