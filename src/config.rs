use std::time::Duration;

use serde::Deserialize;

use crate::{lifecycle::ReaderFlags, raw_decoder::PagingLimits, tag::tech};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unable to parse NFC config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Host tunable settings, every field falls back to its default when missing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NfcConfig {
    /// Raw reader mode flag bits, unknown bits are dropped
    pub reader_flags: u32,
    pub presence_check_delay_ms: u64,

    /// Technologies that are read page by page before the platform NDEF read
    pub raw_paging_techs: Vec<String>,

    pub max_ndef_length: u16,
    pub page_cap: u16,
    pub first_ndef_page: u16,

    pub discovery_channel_capacity: usize,
    pub reconcile_channel_capacity: usize,

    pub start_foregrounded: bool,
}

impl Default for NfcConfig {
    fn default() -> Self {
        let limits = PagingLimits::default();

        Self {
            reader_flags: ReaderFlags::default().bits(),
            presence_check_delay_ms: 100,
            raw_paging_techs: vec![tech::MIFARE_ULTRALIGHT.to_string()],
            max_ndef_length: limits.max_ndef_length,
            page_cap: limits.page_cap,
            first_ndef_page: limits.first_page,
            discovery_channel_capacity: 4,
            reconcile_channel_capacity: 1000,
            start_foregrounded: true,
        }
    }
}

impl NfcConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn reader_flags(&self) -> ReaderFlags {
        ReaderFlags::from_bits_truncate(self.reader_flags)
    }

    pub fn presence_check_delay(&self) -> Duration {
        Duration::from_millis(self.presence_check_delay_ms)
    }

    pub fn paging_limits(&self) -> PagingLimits {
        PagingLimits {
            first_page: self.first_ndef_page,
            page_cap: self.page_cap,
            max_ndef_length: self.max_ndef_length,
        }
    }
}
