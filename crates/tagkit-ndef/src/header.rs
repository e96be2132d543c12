use crate::tnf::Tnf;

pub const FLAG_MB: u8 = 0x80;
pub const FLAG_ME: u8 = 0x40;
pub const FLAG_CF: u8 = 0x20;
pub const FLAG_SR: u8 = 0x10;
pub const FLAG_IL: u8 = 0x08;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefHeader {
    pub message_begin: bool,
    pub message_end: bool,
    pub chunked: bool,
    pub short_record: bool,
    pub has_id_length: bool,
    pub type_name_format: Tnf,
    pub type_length: u8,
    pub payload_length: u32,
    pub id_length: Option<u8>,
}

impl NdefHeader {
    /// The flags byte as it goes on the wire
    pub fn flags_byte(&self) -> u8 {
        let mut byte = self.type_name_format.as_u8();
        if self.message_begin {
            byte |= FLAG_MB;
        }
        if self.message_end {
            byte |= FLAG_ME;
        }
        if self.chunked {
            byte |= FLAG_CF;
        }
        if self.short_record {
            byte |= FLAG_SR;
        }
        if self.has_id_length {
            byte |= FLAG_IL;
        }
        byte
    }

    /// Number of bytes the header itself takes up
    pub fn encoded_len(&self) -> usize {
        let payload_length_len = if self.short_record { 1 } else { 4 };
        let id_length_len = if self.has_id_length { 1 } else { 0 };
        2 + payload_length_len + id_length_len
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.push(self.flags_byte());
        out.push(self.type_length);

        if self.short_record {
            out.push(self.payload_length as u8);
        } else {
            out.extend_from_slice(&self.payload_length.to_be_bytes());
        }

        if let Some(id_length) = self.id_length {
            out.push(id_length);
        }
    }
}
