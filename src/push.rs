//! Legacy peer to peer NDEF push
//!
//! Only some platforms still ship it. Whether it exists is checked once when the
//! manager starts, afterwards every share request goes through the detected capability.

use std::{fmt::Debug, sync::Arc};

use parking_lot::Mutex;
use tagkit_ndef::NdefMessage;
use tracing::{debug, warn};

use crate::error::NfcError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("push failed: {0}")]
pub struct PushError(pub String);

pub trait NdefPush: Send + Sync + Debug {
    fn is_enabled(&self) -> bool;

    /// Set or clear (`None`) the message offered to peers
    fn set_message(&self, message: Option<&NdefMessage>) -> Result<(), PushError>;
}

#[derive(Debug, Clone)]
pub enum PushCapability {
    Supported(Arc<dyn NdefPush>),
    Disabled(Arc<dyn NdefPush>),
    Unavailable,
}

impl PushCapability {
    pub fn detect(push: Option<Arc<dyn NdefPush>>) -> Self {
        match push {
            Some(push) if push.is_enabled() => Self::Supported(push),
            Some(push) => Self::Disabled(push),
            None => Self::Unavailable,
        }
    }
}

#[derive(Debug)]
pub struct LegacyPush {
    capability: PushCapability,
    shared: Mutex<Option<NdefMessage>>,
}

impl LegacyPush {
    pub fn new(capability: PushCapability) -> Self {
        debug!("push capability: {capability:?}");
        Self { capability, shared: Mutex::new(None) }
    }

    pub fn shared_message(&self) -> Option<NdefMessage> {
        self.shared.lock().clone()
    }

    pub fn share(&self, message: NdefMessage) -> Result<(), NfcError> {
        let push = match &self.capability {
            PushCapability::Supported(push) => push,
            PushCapability::Disabled(_) => return Err(NfcError::PushDisabled),
            PushCapability::Unavailable => return Err(NfcError::PushUnsupported),
        };

        push.set_message(Some(&message)).map_err(|error| {
            warn!("unable to share message: {error}");
            NfcError::PushUnsupported
        })?;

        *self.shared.lock() = Some(message);
        Ok(())
    }

    pub fn unshare(&self) -> Result<(), NfcError> {
        let push = match &self.capability {
            PushCapability::Supported(push) | PushCapability::Disabled(push) => push,
            PushCapability::Unavailable => return Err(NfcError::PushUnsupported),
        };

        push.set_message(None).map_err(|error| {
            warn!("unable to clear shared message: {error}");
            NfcError::PushUnsupported
        })?;

        self.shared.lock().take();
        Ok(())
    }
}
