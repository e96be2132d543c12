use tagkit_ndef::NdefMessage;
use tagkit_util::hex_id;
use tracing::{debug, info};

use crate::{
    config::NfcConfig,
    raw_decoder::{self, PagingLimits},
    standard,
    tag::Tag,
};

/// Where the message of a discovery came from
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum ReadSource {
    RawPages,
    StandardCached,
    StandardRead,
    None,
}

#[derive(Debug, Clone)]
pub struct ParsedTagData {
    pub tag: Tag,
    pub message: Option<NdefMessage>,
    pub source: ReadSource,
}

/// Picks the read path for a freshly discovered tag
#[derive(Debug, Clone)]
pub struct Dispatcher {
    raw_paging_techs: Vec<String>,
    limits: PagingLimits,
}

impl Dispatcher {
    pub fn new(config: &NfcConfig) -> Self {
        Self {
            raw_paging_techs: config.raw_paging_techs.clone(),
            limits: config.paging_limits(),
        }
    }

    pub fn prefers_raw_paging(&self, tag: &Tag) -> bool {
        self.raw_paging_techs.iter().any(|tech| tag.has_tech(tech))
    }

    /// Blocking, runs tag I/O
    pub fn discover(&self, tag: Tag) -> ParsedTagData {
        let (message, source) = self.read(&tag).unzip();
        let source = source.unwrap_or(ReadSource::None);

        info!(
            "tag {} discovered, message: {}, source: {source}",
            hex_id(&tag.id()),
            message.as_ref().map_or(0, NdefMessage::len)
        );

        ParsedTagData { tag, message, source }
    }

    fn read(&self, tag: &Tag) -> Option<(NdefMessage, ReadSource)> {
        if self.prefers_raw_paging(tag) {
            if let Some(memory) = tag.paged_memory() {
                match raw_decoder::read_ndef_from_pages(memory.as_ref(), self.limits) {
                    Some(message) => return Some((message, ReadSource::RawPages)),
                    None => debug!("raw page read found nothing, trying platform NDEF"),
                }
            }
        }

        let ndef = tag.ndef()?;
        standard::read_message(ndef.as_ref())
    }
}
