//! Reads an NDEF message straight out of Type 2 paged memory
//!
//! Some chips drop the platform NDEF technology before it can be used, so the
//! message is read page by page as soon as the tag shows up and parsed here.

use tagkit_ndef::{NdefMessage, tlv};
use tagkit_util::result_ext::ResultExt as _;
use tracing::{debug, warn};

use crate::{
    memory_reader::{PAGES_PER_READ, PageReader},
    tag::PagedMemory,
};

/// Bounds for the paging loop
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PagingLimits {
    /// First page of user memory, pages before it hold the UID, lock bytes and capability container
    pub first_page: u16,

    /// Page index the loop never reaches, the memory bound of the largest supported chip
    pub page_cap: u16,

    /// Largest TLV length that is believed
    pub max_ndef_length: u16,
}

impl Default for PagingLimits {
    fn default() -> Self {
        Self {
            first_page: 4,
            page_cap: 260,
            max_ndef_length: 1024,
        }
    }
}

/// Read and decode the NDEF TLV, `None` when there is no complete, well formed message
pub fn read_ndef_from_pages(memory: &dyn PagedMemory, limits: PagingLimits) -> Option<NdefMessage> {
    let reader = PageReader::connect(memory).ok_or_debug("connecting to paged memory")?;
    let variant = reader.variant();
    debug!("paged memory variant: {variant}");

    let first_block = reader
        .read_block(limits.first_page)
        .ok_or_debug("reading first block of user memory")?;

    let header = match tlv::read_tlv_header(&first_block, limits.max_ndef_length) {
        Ok(header) => header,
        Err(error) => {
            debug!("no usable NDEF TLV in paged memory: {error}");
            return None;
        }
    };

    let total_bytes_needed = header.total_len();
    let mut data = Vec::with_capacity(header.pages_needed() * tlv::BYTES_PER_PAGE);
    data.extend_from_slice(&first_block[..first_block.len().min(total_bytes_needed)]);

    let mut last_page = limits.first_page;
    let mut next_page = limits.first_page.checked_add(PAGES_PER_READ);
    while data.len() < total_bytes_needed {
        let Some(current_page) = next_page.filter(|page| *page < limits.page_cap) else { break };

        let block = match reader.read_block(current_page) {
            Ok(block) if !block.is_empty() => block,
            Ok(_) => {
                debug!("empty read at page {current_page}, no more pages");
                break;
            }
            Err(error) => {
                debug!("read stopped at page {current_page}: {error}");
                break;
            }
        };

        let bytes_needed = total_bytes_needed - data.len();
        data.extend_from_slice(&block[..block.len().min(bytes_needed)]);
        last_page = current_page;
        next_page = current_page.checked_add(PAGES_PER_READ);
    }

    drop(reader);

    if data.len() < total_bytes_needed {
        warn!(
            "incomplete NDEF read: read {} bytes, needed {total_bytes_needed} bytes \
             (last page {last_page}, variant: {variant})",
            data.len()
        );
        return None;
    }

    match NdefMessage::from_bytes(&data[header.header_size..total_bytes_needed]) {
        Ok(message) => Some(message),
        Err(error) => {
            warn!("failed to parse NDEF message from paged memory: {error}");
            None
        }
    }
}
