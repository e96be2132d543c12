use crate::{NdefError, header::NdefHeader, tnf::Tnf};

/// Type and id fields carry a single length byte
pub const MAX_FIELD_LENGTH: usize = u8::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NdefRecord {
    pub tnf: Tnf,
    pub type_: Vec<u8>,
    pub id: Vec<u8>,
    pub payload: Vec<u8>,
}

impl NdefRecord {
    /// Build a record, checking the fields against the rules for its TNF
    pub fn try_new(
        tnf: Tnf,
        type_: impl Into<Vec<u8>>,
        id: impl Into<Vec<u8>>,
        payload: impl Into<Vec<u8>>,
    ) -> Result<Self, NdefError> {
        let record = Self {
            tnf,
            type_: type_.into(),
            id: id.into(),
            payload: payload.into(),
        };

        record.validate()?;
        Ok(record)
    }

    /// A record with the empty TNF and no type, id or payload, used to erase tags
    pub fn empty() -> Self {
        Self {
            tnf: Tnf::Empty,
            type_: Vec::new(),
            id: Vec::new(),
            payload: Vec::new(),
        }
    }

    /// Build a MIME media record
    pub fn mime(mime_type: &str, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            tnf: Tnf::Mime,
            type_: mime_type.as_bytes().to_vec(),
            id: Vec::new(),
            payload: payload.into(),
        }
    }

    pub fn is_mime(&self) -> bool {
        self.tnf == Tnf::Mime
    }

    pub fn validate(&self) -> Result<(), NdefError> {
        if self.type_.len() > MAX_FIELD_LENGTH {
            return Err(NdefError::InvalidRecord("type is longer than 255 bytes"));
        }

        if self.id.len() > MAX_FIELD_LENGTH {
            return Err(NdefError::InvalidRecord("id is longer than 255 bytes"));
        }

        if self.payload.len() > u32::MAX as usize {
            return Err(NdefError::InvalidRecord("payload does not fit a 32 bit length"));
        }

        match self.tnf {
            Tnf::Empty => {
                if !self.type_.is_empty() || !self.id.is_empty() || !self.payload.is_empty() {
                    return Err(NdefError::InvalidRecord(
                        "empty record must not have a type, id or payload",
                    ));
                }
            }

            Tnf::Unknown | Tnf::Reserved => {
                if !self.type_.is_empty() {
                    return Err(NdefError::InvalidRecord("unexpected type field"));
                }
            }

            Tnf::Unchanged => {
                return Err(NdefError::InvalidRecord(
                    "unchanged tnf is only valid for chunk continuations",
                ));
            }

            Tnf::WellKnown | Tnf::Mime | Tnf::AbsoluteUri | Tnf::External => {}
        }

        Ok(())
    }

    pub(crate) fn header(&self, message_begin: bool, message_end: bool) -> NdefHeader {
        let short_record = self.payload.len() < 256;
        let has_id_length = !self.id.is_empty();

        NdefHeader {
            message_begin,
            message_end,
            chunked: false,
            short_record,
            has_id_length,
            type_name_format: self.tnf,
            type_length: self.type_.len() as u8,
            payload_length: self.payload.len() as u32,
            id_length: has_id_length.then_some(self.id.len() as u8),
        }
    }

    /// Length of this record once encoded, flags do not change the size
    pub fn encoded_len(&self) -> usize {
        self.header(false, false).encoded_len()
            + self.type_.len()
            + self.id.len()
            + self.payload.len()
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>, message_begin: bool, message_end: bool) {
        self.header(message_begin, message_end).write_to(out);
        out.extend_from_slice(&self.type_);
        out.extend_from_slice(&self.id);
        out.extend_from_slice(&self.payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_rejects_payload() {
        let error = NdefRecord::try_new(Tnf::Empty, vec![], vec![], vec![1]).unwrap_err();
        assert!(matches!(error, NdefError::InvalidRecord(_)));
        assert!(NdefRecord::try_new(Tnf::Empty, vec![], vec![], vec![]).is_ok());
    }

    #[test]
    fn unknown_record_rejects_type() {
        assert!(NdefRecord::try_new(Tnf::Unknown, b"x".to_vec(), vec![], vec![1]).is_err());
        assert!(NdefRecord::try_new(Tnf::Unknown, vec![], vec![], vec![1]).is_ok());
    }

    #[test]
    fn unchanged_record_is_never_standalone() {
        assert!(NdefRecord::try_new(Tnf::Unchanged, vec![], vec![], vec![]).is_err());
    }

    #[test]
    fn short_record_header_layout() {
        let record =
            NdefRecord::try_new(Tnf::WellKnown, b"U".to_vec(), vec![], vec![0x04]).unwrap();
        let mut out = Vec::new();
        record.write_to(&mut out, true, true);

        assert_eq!(out, vec![0xD1, 0x01, 0x01, b'U', 0x04]);
        assert_eq!(record.encoded_len(), out.len());
    }

    #[test]
    fn long_record_uses_four_byte_length_and_id_length() {
        let payload = vec![0xAB; 300];
        let record =
            NdefRecord::try_new(Tnf::Mime, b"a/b".to_vec(), b"id".to_vec(), payload).unwrap();

        let mut out = Vec::new();
        record.write_to(&mut out, true, false);

        // MB | IL | MIME, no SR
        assert_eq!(out[0], 0x80 | 0x08 | 0x02);
        assert_eq!(out[1], 3);
        assert_eq!(&out[2..6], &300u32.to_be_bytes());
        assert_eq!(out[6], 2);
        assert_eq!(&out[7..10], b"a/b");
        assert_eq!(&out[10..12], b"id");
        assert_eq!(out.len(), record.encoded_len());
    }
}
