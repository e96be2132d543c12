//! NDEF records and messages, and the Type 2 TLV envelope they are stored in

pub mod header;
pub mod message;
pub mod parser;
pub mod payload;
pub mod record;
pub mod tlv;
pub mod tnf;

pub use message::NdefMessage;
pub use record::NdefRecord;
pub use tlv::{TlvError, TlvHeader};
pub use tnf::Tnf;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NdefError {
    #[error("an NDEF message needs at least one record")]
    Empty,

    #[error("malformed NDEF data: {0}")]
    Malformed(String),

    #[error("first record is missing the message begin flag")]
    MissingMessageBegin,

    #[error("message begin flag set on a record after the first")]
    UnexpectedMessageBegin,

    #[error("last record is missing the message end flag")]
    MissingMessageEnd,

    #[error("invalid chunked record sequence")]
    InvalidChunk,

    #[error("invalid type name format {0}, must be between 0 and 7")]
    InvalidTnf(u8),

    #[error("invalid record: {0}")]
    InvalidRecord(&'static str),
}
