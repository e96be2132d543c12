use crate::{
    NdefError,
    parser::{self, RawRecord, stream},
    record::NdefRecord,
    tnf::Tnf,
};

/// An ordered, non empty list of records
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NdefMessage(Vec<NdefRecord>);

impl NdefMessage {
    pub fn try_new(records: Vec<NdefRecord>) -> Result<Self, NdefError> {
        if records.is_empty() {
            return Err(NdefError::Empty);
        }

        for record in &records {
            record.validate()?;
        }

        Ok(Self(records))
    }

    pub fn from_record(record: NdefRecord) -> Self {
        Self(vec![record])
    }

    pub fn records(&self) -> &[NdefRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_mime_record(&self) -> bool {
        self.0.iter().any(NdefRecord::is_mime)
    }

    /// Size of the message once encoded, what gets compared against tag capacity
    pub fn encoded_len(&self) -> usize {
        self.0.iter().map(NdefRecord::encoded_len).sum()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        let last = self.0.len() - 1;

        for (index, record) in self.0.iter().enumerate() {
            record.write_to(&mut out, index == 0, index == last);
        }

        out
    }

    /// Decode a message, joining chunked records, bytes after the last record are ignored
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, NdefError> {
        if bytes.is_empty() {
            return Err(NdefError::Empty);
        }

        let mut input = stream::new(bytes);
        let raw_records = parser::parse_raw_records(&mut input)
            .map_err(|error| NdefError::Malformed(error.to_string()))?;

        let records = assemble_records(raw_records)?;
        Self::try_new(records)
    }
}

impl TryFrom<Vec<NdefRecord>> for NdefMessage {
    type Error = NdefError;

    fn try_from(records: Vec<NdefRecord>) -> Result<Self, Self::Error> {
        Self::try_new(records)
    }
}

impl IntoIterator for NdefMessage {
    type Item = NdefRecord;
    type IntoIter = std::vec::IntoIter<NdefRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn assemble_records(raw_records: Vec<RawRecord>) -> Result<Vec<NdefRecord>, NdefError> {
    let last = raw_records.len().saturating_sub(1);
    let mut records = Vec::with_capacity(raw_records.len());
    let mut chunk: Option<NdefRecord> = None;

    for (index, raw) in raw_records.into_iter().enumerate() {
        let RawRecord {
            header,
            type_,
            id,
            payload,
        } = raw;

        if index == 0 && !header.message_begin {
            return Err(NdefError::MissingMessageBegin);
        }

        if index > 0 && header.message_begin {
            return Err(NdefError::UnexpectedMessageBegin);
        }

        if index == last && !header.message_end {
            return Err(NdefError::MissingMessageEnd);
        }

        match chunk.take() {
            // continuation of a chunked record
            Some(mut partial) => {
                if header.type_name_format != Tnf::Unchanged || !type_.is_empty() || !id.is_empty()
                {
                    return Err(NdefError::InvalidChunk);
                }

                partial.payload.extend_from_slice(&payload);

                if header.chunked {
                    chunk = Some(partial);
                } else {
                    partial.validate()?;
                    records.push(partial);
                }
            }

            None => {
                if header.type_name_format == Tnf::Unchanged {
                    return Err(NdefError::InvalidChunk);
                }

                let record = NdefRecord {
                    tnf: header.type_name_format,
                    type_,
                    id,
                    payload,
                };

                if header.chunked {
                    chunk = Some(record);
                } else {
                    record.validate()?;
                    records.push(record);
                }
            }
        }
    }

    // message ended in the middle of a chunk
    if chunk.is_some() {
        return Err(NdefError::InvalidChunk);
    }

    Ok(records)
}
