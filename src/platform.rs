//! What the host platform has to provide

use std::{fmt::Debug, sync::Arc, time::Duration};

use crate::{lifecycle::ReaderFlags, push::NdefPush};

pub type MainThreadJob = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("radio toggle failed: {0}")]
pub struct RadioError(pub String);

pub trait NfcPlatform: Send + Sync + Debug + 'static {
    /// Whether the device has an NFC adapter at all
    fn has_adapter(&self) -> bool;

    /// Current radio enablement, `false` without an adapter
    fn is_enabled(&self) -> bool;

    fn enable_reader_mode(
        &self,
        flags: ReaderFlags,
        presence_check_delay: Duration,
    ) -> Result<(), RadioError>;

    fn disable_reader_mode(&self) -> Result<(), RadioError>;

    /// Run `job` on the host's main thread, radio toggles must happen there
    fn run_on_main(&self, job: MainThreadJob);

    /// Legacy peer to peer push, `None` when the platform has no such API
    fn ndef_push(&self) -> Option<Arc<dyn NdefPush>>;
}
