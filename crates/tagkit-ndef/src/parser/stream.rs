use winnow::Bytes;

/// Complete, non-partial byte stream, tag reads hand us the whole buffer at once
pub type Stream<'i> = &'i Bytes;

pub fn new(b: &[u8]) -> Stream<'_> {
    Bytes::new(b)
}
