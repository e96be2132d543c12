//! JSON shapes exchanged with the host

use serde::{Deserialize, Serialize};
use tagkit_ndef::{NdefMessage, NdefRecord, Tnf};

use crate::{classifier::DiscoveryKind, error::NfcError, tag::TagHandle};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordJson {
    pub tnf: u8,

    #[serde(rename = "type", default)]
    pub type_: Vec<u8>,

    #[serde(default)]
    pub id: Vec<u8>,

    #[serde(default)]
    pub payload: Vec<u8>,
}

impl From<&NdefRecord> for RecordJson {
    fn from(record: &NdefRecord) -> Self {
        Self {
            tnf: record.tnf.as_u8(),
            type_: record.type_.clone(),
            id: record.id.clone(),
            payload: record.payload.clone(),
        }
    }
}

impl TryFrom<RecordJson> for NdefRecord {
    type Error = NfcError;

    fn try_from(json: RecordJson) -> Result<Self, Self::Error> {
        let tnf = Tnf::try_from(json.tnf)?;
        Ok(NdefRecord::try_new(tnf, json.type_, json.id, json.payload)?)
    }
}

pub fn records_from_json(records: Vec<RecordJson>) -> Result<Vec<NdefRecord>, NfcError> {
    records.into_iter().map(NdefRecord::try_from).collect()
}

pub fn records_from_json_str(json: &str) -> Result<Vec<NdefRecord>, NfcError> {
    let records: Vec<RecordJson> =
        serde_json::from_str(json).map_err(|error| NfcError::InvalidPayload(error.to_string()))?;

    records_from_json(records)
}

pub fn message_from_json(records: Vec<RecordJson>) -> Result<NdefMessage, NfcError> {
    Ok(NdefMessage::try_new(records_from_json(records)?)?)
}

pub fn message_to_json(message: &NdefMessage) -> Vec<RecordJson> {
    message.records().iter().map(RecordJson::from).collect()
}

/// Friendly names for the platform NDEF type strings, others pass through
pub fn translate_ndef_type(ndef_type: &str) -> String {
    match ndef_type {
        "org.nfcforum.ndef.type1" => "NFC Forum Type 1".into(),
        "org.nfcforum.ndef.type2" => "NFC Forum Type 2".into(),
        "org.nfcforum.ndef.type3" => "NFC Forum Type 3".into(),
        "org.nfcforum.ndef.type4" => "NFC Forum Type 4".into(),
        other => other.into(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagJson {
    pub id: Vec<u8>,
    pub tech_types: Vec<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_writable: Option<bool>,

    /// Outer `None` when the tag has no NDEF, inner `None` when the platform can not tell
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_make_read_only: Option<Option<bool>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ndef_message: Option<Vec<RecordJson>>,
}

impl TagJson {
    pub fn new(tag: &dyn TagHandle, message: Option<&NdefMessage>) -> Self {
        let mut json = Self {
            id: tag.id(),
            tech_types: tag.tech_types(),
            type_: None,
            max_size: None,
            is_writable: None,
            can_make_read_only: None,
            ndef_message: message.map(message_to_json),
        };

        if let Some(ndef) = tag.ndef() {
            json.type_ = ndef.ndef_type().map(|ndef_type| translate_ndef_type(&ndef_type));
            json.max_size = Some(ndef.max_size());
            json.is_writable = Some(ndef.is_writable());
            json.can_make_read_only = Some(ndef.can_make_read_only());
        }

        json
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NfcEvent {
    #[serde(rename = "type")]
    pub kind: DiscoveryKind,
    pub tag: TagJson,
}
