pub mod stream;

use stream::Stream;
use winnow::{
    ModalResult, Parser,
    binary::{
        Endianness, be_u8, be_u16,
        bits::{bits, bool as take_bool, take as take_bits},
    },
    error::{ContextError, ErrMode},
    token::{any, literal, take},
};

use crate::{
    header::NdefHeader,
    tlv::{NDEF_TLV_TYPE, TLV_EXTENDED_LENGTH, TlvHeader},
    tnf::Tnf,
};

/// A record exactly as it appears on the wire, before chunks are joined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub header: NdefHeader,
    pub type_: Vec<u8>,
    pub id: Vec<u8>,
    pub payload: Vec<u8>,
}

/// Parse records until one carries the message end flag or the input runs out
pub fn parse_raw_records(input: &mut Stream<'_>) -> ModalResult<Vec<RawRecord>> {
    let mut records = Vec::new();

    loop {
        let record = parse_raw_record.parse_next(input)?;
        let message_end = record.header.message_end;
        records.push(record);

        if message_end || input.is_empty() {
            break;
        }
    }

    Ok(records)
}

pub fn parse_raw_record(input: &mut Stream<'_>) -> ModalResult<RawRecord> {
    let header = parse_header.parse_next(input)?;
    let type_ = parse_field(input, header.type_length as usize)?;
    let id = match header.id_length {
        Some(id_length) => parse_field(input, id_length as usize)?,
        None => Vec::new(),
    };
    let payload = parse_field(input, header.payload_length as usize)?;

    Ok(RawRecord {
        header,
        type_,
        id,
        payload,
    })
}

/// Type 2 TLV header: 0x03, then a 1 byte length or 0xFF and a 2 byte big endian length
pub fn parse_tlv_header(input: &mut Stream<'_>) -> ModalResult<TlvHeader> {
    let _ = literal([NDEF_TLV_TYPE]).parse_next(input)?;

    let length_indicator = be_u8.parse_next(input)?;

    let header = if length_indicator == TLV_EXTENDED_LENGTH {
        TlvHeader {
            length: be_u16.parse_next(input)?,
            header_size: 4,
        }
    } else {
        TlvHeader {
            length: length_indicator as u16,
            header_size: 2,
        }
    };

    Ok(header)
}

// private
fn parse_header_byte(input: &mut Stream<'_>) -> ModalResult<(bool, bool, bool, bool, bool, u8)> {
    bits::<_, _, ErrMode<ContextError>, _, _>((
        take_bool,
        take_bool,
        take_bool,
        take_bool,
        take_bool,
        take_bits(3_u8),
    ))
    .parse_next(input)
}

fn parse_header(input: &mut Stream<'_>) -> ModalResult<NdefHeader> {
    let (message_begin, message_end, chunked, short_record, has_id_length, type_name_format) =
        parse_header_byte(input)?;

    let type_length = winnow::binary::u8.parse_next(input)?;

    let payload_length = if short_record {
        any.map(|x: u8| x as u32).parse_next(input)?
    } else {
        winnow::binary::u32(Endianness::Big).parse_next(input)?
    };

    let id_length = if has_id_length {
        Some(any.parse_next(input)?)
    } else {
        None
    };

    Ok(NdefHeader {
        message_begin,
        message_end,
        chunked,
        short_record,
        has_id_length,
        type_name_format: Tnf::from_bits(type_name_format),
        type_length,
        payload_length,
        id_length,
    })
}

fn parse_field(input: &mut Stream<'_>, length: usize) -> ModalResult<Vec<u8>> {
    take(length).map(|s: &[u8]| s.to_vec()).parse_next(input)
}
