//! Well known record payloads, text (`T`) and URI (`U`)

use crate::{record::NdefRecord, tnf::Tnf};

pub const TEXT_TYPE: &[u8] = b"T";
pub const URI_TYPE: &[u8] = b"U";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPayload {
    pub format: TextPayloadFormat,
    pub language: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPayloadFormat {
    Utf8,
    Utf16,
}

/// URI prefix codes as defined in NFC Forum RTD URI specification
pub const URI_PREFIXES: &[&str] = &[
    "",                           // 0x00 - no prepending
    "http://www.",                // 0x01
    "https://www.",               // 0x02
    "http://",                    // 0x03
    "https://",                   // 0x04
    "tel:",                       // 0x05
    "mailto:",                    // 0x06
    "ftp://anonymous:anonymous@", // 0x07
    "ftp://ftp.",                 // 0x08
    "ftps://",                    // 0x09
    "sftp://",                    // 0x0A
    "smb://",                     // 0x0B
    "nfs://",                     // 0x0C
    "ftp://",                     // 0x0D
    "dav://",                     // 0x0E
    "news:",                      // 0x0F
    "telnet://",                  // 0x10
    "imap:",                      // 0x11
    "rtsp://",                    // 0x12
    "urn:",                       // 0x13
    "pop:",                       // 0x14
    "sip:",                       // 0x15
    "sips:",                      // 0x16
    "tftp:",                      // 0x17
    "btspp://",                   // 0x18
    "btl2cap://",                 // 0x19
    "btgoep://",                  // 0x1A
    "tcpobex://",                 // 0x1B
    "irdaobex://",                // 0x1C
    "file://",                    // 0x1D
    "urn:epc:id:",                // 0x1E
    "urn:epc:tag:",               // 0x1F
    "urn:epc:pat:",               // 0x20
    "urn:epc:raw:",               // 0x21
    "urn:epc:",                   // 0x22
    "urn:nfc:",                   // 0x23
];

impl NdefRecord {
    /// UTF-8 text record, the language code is an IANA tag such as "en"
    pub fn new_text(language: &str, text: &str) -> Self {
        // 6 bits of length in the status byte, longer codes are not valid
        let language = &language.as_bytes()[..language.len().min(0x3F)];

        let mut payload = Vec::with_capacity(1 + language.len() + text.len());
        payload.push(language.len() as u8);
        payload.extend_from_slice(language);
        payload.extend_from_slice(text.as_bytes());

        Self {
            tnf: Tnf::WellKnown,
            type_: TEXT_TYPE.to_vec(),
            id: Vec::new(),
            payload,
        }
    }

    /// URI record, using the longest matching abbreviation
    pub fn new_uri(uri: &str) -> Self {
        let (code, prefix) = URI_PREFIXES
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, prefix)| uri.starts_with(**prefix))
            .max_by_key(|(_, prefix)| prefix.len())
            .unwrap_or((0, &""));

        let rest = &uri[prefix.len()..];
        let mut payload = Vec::with_capacity(1 + rest.len());
        payload.push(code as u8);
        payload.extend_from_slice(rest.as_bytes());

        Self {
            tnf: Tnf::WellKnown,
            type_: URI_TYPE.to_vec(),
            id: Vec::new(),
            payload,
        }
    }

    /// Decode a well known text record, `None` for any other record
    pub fn text(&self) -> Option<TextPayload> {
        if self.tnf != Tnf::WellKnown || self.type_ != TEXT_TYPE {
            return None;
        }

        let (&status, rest) = self.payload.split_first()?;
        let is_utf16 = status & 0x80 != 0;
        let language_code_length = (status & 0x3F) as usize;

        if rest.len() < language_code_length {
            return None;
        }

        let (language_code, text) = rest.split_at(language_code_length);

        let parsed_text = if is_utf16 {
            String::from_utf16_lossy(
                &text
                    .chunks_exact(2)
                    .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
                    .collect::<Vec<u16>>(),
            )
        } else {
            String::from_utf8_lossy(text).to_string()
        };

        Some(TextPayload {
            format: if is_utf16 {
                TextPayloadFormat::Utf16
            } else {
                TextPayloadFormat::Utf8
            },
            language: String::from_utf8_lossy(language_code).to_string(),
            text: parsed_text,
        })
    }

    /// Decode a well known URI record, `None` for any other record
    pub fn uri(&self) -> Option<String> {
        if self.tnf != Tnf::WellKnown || self.type_ != URI_TYPE {
            return None;
        }

        let (&code, rest) = self.payload.split_first()?;
        let prefix = URI_PREFIXES.get(code as usize).copied().unwrap_or_default();

        Some(format!("{prefix}{}", String::from_utf8_lossy(rest)))
    }
}
