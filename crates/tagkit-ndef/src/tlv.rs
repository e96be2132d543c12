//! NDEF message TLV as laid out in Type 2 tag memory

use crate::parser::{self, stream};

/// TLV type byte of an NDEF message block
pub const NDEF_TLV_TYPE: u8 = 0x03;

/// Length byte announcing the 3 byte length format
pub const TLV_EXTENDED_LENGTH: u8 = 0xFF;

/// Bytes per memory page
pub const BYTES_PER_PAGE: usize = 4;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TlvHeader {
    /// Length of the NDEF message inside the TLV
    pub length: u16,

    /// 2 for the short length format, 4 for the extended one
    pub header_size: usize,
}

impl TlvHeader {
    /// Header plus message, the number of bytes that have to be read off the tag
    pub fn total_len(&self) -> usize {
        self.header_size + self.length as usize
    }

    /// Pages the read plan has to cover, rounded up to whole pages
    pub fn pages_needed(&self) -> usize {
        self.total_len().div_ceil(BYTES_PER_PAGE)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TlvError {
    #[error("block starts with TLV type {0:#04x}, not an NDEF message")]
    NotNdef(u8),

    #[error("not enough bytes to read the TLV header")]
    Truncated,

    #[error("NDEF TLV has a zero length")]
    ZeroLength,

    #[error("NDEF TLV length {length} is larger than the limit of {max}")]
    TooLong { length: u16, max: u16 },
}

/// Read the TLV header at the start of the first block of user memory
pub fn read_tlv_header(block: &[u8], max_length: u16) -> Result<TlvHeader, TlvError> {
    match block.first() {
        None => return Err(TlvError::Truncated),
        Some(&tlv_type) if tlv_type != NDEF_TLV_TYPE => return Err(TlvError::NotNdef(tlv_type)),
        Some(_) => {}
    }

    let mut input = stream::new(block);
    let header = parser::parse_tlv_header(&mut input).map_err(|_| TlvError::Truncated)?;

    if header.length == 0 {
        return Err(TlvError::ZeroLength);
    }

    if header.length > max_length {
        return Err(TlvError::TooLong {
            length: header.length,
            max: max_length,
        });
    }

    Ok(header)
}
