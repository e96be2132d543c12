use std::sync::Arc;

use arc_swap::ArcSwap;
use tagkit_ndef::NdefMessage;

use crate::{error::NfcError, tag::Tag};

/// The last discovered tag and the message read from it, always replaced together
#[derive(Debug, Clone, Default)]
pub struct TagSession {
    pub tag: Option<Tag>,
    pub message: Option<NdefMessage>,
}

#[derive(Debug)]
pub struct SessionSlot(ArcSwap<TagSession>);

tagkit_macros::impl_default_for!(SessionSlot);
impl SessionSlot {
    pub fn new() -> Self {
        Self(ArcSwap::from_pointee(TagSession::default()))
    }

    pub fn install(&self, session: TagSession) {
        self.0.store(Arc::new(session));
    }

    pub fn snapshot(&self) -> Arc<TagSession> {
        self.0.load_full()
    }

    pub fn current_tag(&self) -> Result<Tag, NfcError> {
        self.0.load().tag.clone().ok_or(NfcError::NoTagPresent)
    }
}
