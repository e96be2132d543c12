use std::sync::Arc;

use act_zero::*;
use tagkit_ndef::NdefRecord;
use tagkit_tokio::unblock::run_blocking;
use tagkit_util::result_ext::ResultExt as _;
use tracing::{debug, error};

use crate::{
    classifier,
    dispatcher::Dispatcher,
    error::NfcError,
    session::{SessionSlot, TagSession},
    tag::Tag,
    wire::{NfcEvent, TagJson},
    writer,
};

use super::reconcile_sender::ReconcileSender;

/// Runs all tag I/O, one operation at a time
#[derive(Debug)]
pub struct TagWorker {
    pub addr: WeakAddr<Self>,
    dispatcher: Arc<Dispatcher>,
    session: Arc<SessionSlot>,
    reconciler: ReconcileSender,
}

#[async_trait::async_trait]
impl Actor for TagWorker {
    async fn started(&mut self, addr: Addr<Self>) -> ActorResult<()> {
        self.addr = addr.downgrade();
        Produces::ok(())
    }

    async fn error(&mut self, error: ActorError) -> bool {
        error!("TagWorker Error: {error:?}");
        false
    }
}

impl TagWorker {
    pub fn new(
        dispatcher: Dispatcher,
        session: Arc<SessionSlot>,
        reconciler: ReconcileSender,
    ) -> Self {
        Self {
            addr: Default::default(),
            dispatcher: Arc::new(dispatcher),
            session,
            reconciler,
        }
    }

    /// Read the tag, install it as the current session and tell the host
    pub async fn discover(&mut self, tag: Tag) -> ActorResult<()> {
        let dispatcher = self.dispatcher.clone();
        let (parsed, event) = run_blocking(move || {
            let parsed = dispatcher.discover(tag);
            let kind = classifier::classify(parsed.tag.as_ref(), parsed.message.as_ref());
            let tag = TagJson::new(parsed.tag.as_ref(), parsed.message.as_ref());
            (parsed, NfcEvent { kind, tag })
        })
        .await?;

        debug!("discovery read from {}, event: {}", parsed.source, event.kind);

        self.session.install(TagSession { tag: Some(parsed.tag), message: parsed.message });

        self.reconciler.discovered(event);

        Produces::ok(())
    }

    pub async fn write(
        &mut self,
        records: Vec<NdefRecord>,
        allow_format: bool,
    ) -> ActorResult<Result<(), NfcError>> {
        let session = self.session.clone();
        let result = run_blocking(move || writer::write(&session, records, allow_format))
            .await
            .map_err_str(NfcError::WriteFailed)
            .and_then(|result| result);

        Produces::ok(result)
    }

    pub async fn erase(&mut self) -> ActorResult<Result<(), NfcError>> {
        let session = self.session.clone();
        let result = run_blocking(move || writer::erase(&session))
            .await
            .map_err_str(NfcError::WriteFailed)
            .and_then(|result| result);

        Produces::ok(result)
    }

    pub async fn make_read_only(&mut self) -> ActorResult<Result<(), NfcError>> {
        let session = self.session.clone();
        let result = run_blocking(move || writer::make_read_only(&session))
            .await
            .map_err_str(|_| NfcError::LockFailed)
            .and_then(|result| result);

        Produces::ok(result)
    }
}
