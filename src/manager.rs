//! The NFC manager, the host facing entry point
//!
//! The host forwards radio callbacks and lifecycle changes into the manager and
//! receives discovery events and adapter changes through [`NfcReconciler`].
//! All tag I/O runs on a single [`TagWorker`] actor.

mod reconcile_sender;
pub mod worker;

use std::sync::Arc;

use act_zero::{Addr, call};
use flume::{Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use tagkit_ndef::{NdefMessage, NdefRecord};
use tagkit_tokio::{AbortableTask, task::spawn_actor};
use tagkit_util::{hex_id, result_ext::ResultExt as _};
use tracing::{debug, error, info, warn};

use crate::{
    adapter::{AdapterMonitor, AdapterState, NfcStateChange, NfcStatus, PlatformRadioState},
    classifier::EventChannel,
    config::NfcConfig,
    dispatcher::Dispatcher,
    error::NfcError,
    lifecycle::{RadioCommand, ReaderFlags, ReaderModeLifecycle, ReaderModePhase, ReaderModeState},
    platform::NfcPlatform,
    push::{LegacyPush, PushCapability},
    session::{SessionSlot, TagSession},
    tag::Tag,
    wire::NfcEvent,
};

pub use reconcile_sender::ReconcileBatch;
use reconcile_sender::ReconcileSender;
use worker::TagWorker;

type Message = NfcReconcileMessage;
type Reconciler = dyn NfcReconciler;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NfcReconcileMessage {
    /// A discovery event for one listener channel
    Discovered { channel: EventChannel, event: NfcEvent },
    StateChanged(NfcStateChange),
}

pub trait NfcReconciler: Send + Sync + std::fmt::Debug + 'static {
    fn reconcile(&self, message: Message);

    fn reconcile_many(&self, messages: Vec<Message>) {
        for message in messages {
            self.reconcile(message);
        }
    }
}

#[derive(Debug)]
pub struct NfcManager {
    platform: Arc<dyn NfcPlatform>,
    config: NfcConfig,

    session: Arc<SessionSlot>,
    worker: Addr<TagWorker>,
    discovered: Sender<Tag>,
    _discovery_pump: AbortableTask<()>,

    push: LegacyPush,
    adapter: Mutex<AdapterMonitor>,
    lifecycle: Arc<Mutex<ReaderModeLifecycle>>,

    reconciler: ReconcileSender,
    reconcile_receiver: Arc<Receiver<ReconcileBatch>>,
}

impl NfcManager {
    /// Must be called from inside a tokio runtime
    pub fn new(platform: Arc<dyn NfcPlatform>, config: NfcConfig) -> Arc<Self> {
        crate::logging::init();
        tagkit_tokio::init();

        let (sender, receiver) = flume::bounded(config.reconcile_channel_capacity);
        let reconciler = ReconcileSender::new(sender);

        let session = Arc::new(SessionSlot::new());
        let worker = spawn_actor(TagWorker::new(
            Dispatcher::new(&config),
            session.clone(),
            reconciler.clone(),
        ));

        let (discovered, discovery_receiver) = flume::bounded(config.discovery_channel_capacity);
        let discovery_pump =
            AbortableTask::spawn(pump_discoveries(discovery_receiver, worker.clone()));

        let push = LegacyPush::new(PushCapability::detect(platform.ndef_push()));

        let adapter_state = AdapterState::derive(platform.has_adapter(), platform.is_enabled());
        let mut adapter = AdapterMonitor::default();
        if let Some(change) = adapter.observe(adapter_state) {
            reconciler.state_changed(change);
        }

        let lifecycle = ReaderModeLifecycle::new(
            config.start_foregrounded,
            adapter_state.is_enabled(),
            config.reader_flags(),
        );

        info!("nfc manager started, adapter: {adapter_state}");

        Arc::new(Self {
            platform,
            config,
            session,
            worker,
            discovered,
            _discovery_pump: discovery_pump,
            push,
            adapter: Mutex::new(adapter),
            lifecycle: Arc::new(Mutex::new(lifecycle)),
            reconciler,
            reconcile_receiver: Arc::new(receiver),
        })
    }

    pub fn listen_for_updates(&self, reconciler: Box<Reconciler>) {
        let reconcile_receiver = self.reconcile_receiver.clone();

        std::thread::spawn(move || {
            while let Ok(batch) = reconcile_receiver.recv() {
                match batch {
                    ReconcileBatch::Single(message) => reconciler.reconcile(message),
                    ReconcileBatch::Many(messages) => reconciler.reconcile_many(messages),
                }
            }
        });
    }

    // MARK: adapter

    fn adapter_state(&self) -> AdapterState {
        AdapterState::derive(self.platform.has_adapter(), self.platform.is_enabled())
    }

    pub fn status(&self) -> NfcStatus {
        self.adapter_state().status()
    }

    pub fn ensure_adapter_available(&self) -> Result<(), NfcError> {
        match self.adapter_state() {
            AdapterState::Absent => Err(NfcError::HardwareUnavailable),
            AdapterState::Off => Err(NfcError::RadioDisabled),
            AdapterState::On => Ok(()),
        }
    }

    pub fn on_adapter_state_changed(&self, report: PlatformRadioState) {
        let platform = &self.platform;
        let change = self.adapter.lock().on_platform_report(report, platform.has_adapter(), || {
            platform.is_enabled()
        });

        let Some(change) = change else { return };
        self.reconciler.state_changed(change);

        let command = self.lifecycle.lock().set_adapter_present(change.enabled);
        self.dispatch_radio(command);
    }

    // MARK: reader mode

    /// Uses the configured flags when `flags` is `None`
    pub fn start_scanning(&self, flags: Option<ReaderFlags>) -> Result<(), NfcError> {
        self.ensure_adapter_available()?;

        let flags = flags.unwrap_or_else(|| self.config.reader_flags());
        let command = self.lifecycle.lock().start(flags);
        self.dispatch_radio(command);

        Ok(())
    }

    pub fn stop_scanning(&self) {
        let command = self.lifecycle.lock().stop();
        self.dispatch_radio(command);
    }

    pub fn on_host_foregrounded(&self) {
        let command = self.lifecycle.lock().foregrounded();
        self.dispatch_radio(command);
    }

    pub fn on_host_backgrounded(&self) {
        let command = self.lifecycle.lock().backgrounded();
        self.dispatch_radio(command);
    }

    pub fn lifecycle_state(&self) -> ReaderModeState {
        self.lifecycle.lock().state()
    }

    pub fn lifecycle_phase(&self) -> ReaderModePhase {
        self.lifecycle.lock().phase()
    }

    fn dispatch_radio(&self, command: Option<RadioCommand>) {
        let Some(command) = command else { return };
        debug!("dispatching radio command {command:?}");

        let platform = self.platform.clone();
        let lifecycle = self.lifecycle.clone();
        let presence_check_delay = self.config.presence_check_delay();

        self.platform.run_on_main(Box::new(move || {
            let mut next = Some(command);
            while let Some(command) = next {
                let result = match command {
                    RadioCommand::Enable(flags) => {
                        platform.enable_reader_mode(flags, presence_check_delay)
                    }
                    RadioCommand::Disable => platform.disable_reader_mode(),
                };

                next = lifecycle.lock().radio_toggled(command, result);
            }
        }));
    }

    // MARK: discovery

    /// Called by the radio for every tag in range, never blocks
    pub fn on_tag_discovered(&self, tag: Tag) {
        match self.discovered.try_send(tag) {
            Ok(()) => {}
            Err(TrySendError::Full(tag)) => {
                warn!("discovery queue is full, dropping tag {}", hex_id(&tag.id()));
            }
            Err(TrySendError::Disconnected(_)) => {
                error!("discovery pump is gone, dropping tag");
            }
        }
    }

    pub fn session(&self) -> Arc<TagSession> {
        self.session.snapshot()
    }

    // MARK: write

    pub async fn write(
        &self,
        records: Vec<NdefRecord>,
        allow_format: bool,
    ) -> Result<(), NfcError> {
        call!(self.worker.write(records, allow_format))
            .await
            .map_err_str(NfcError::WorkerUnavailable)?
    }

    pub async fn erase(&self) -> Result<(), NfcError> {
        call!(self.worker.erase()).await.map_err_str(NfcError::WorkerUnavailable)?
    }

    pub async fn make_read_only(&self) -> Result<(), NfcError> {
        call!(self.worker.make_read_only()).await.map_err_str(NfcError::WorkerUnavailable)?
    }

    // MARK: push

    pub fn share(&self, records: Vec<NdefRecord>) -> Result<(), NfcError> {
        self.ensure_adapter_available()?;
        let message = NdefMessage::try_new(records)?;
        self.push.share(message)
    }

    pub fn unshare(&self) -> Result<(), NfcError> {
        if self.adapter_state() == AdapterState::Absent {
            return Err(NfcError::HardwareUnavailable);
        }

        self.push.unshare()
    }

    pub fn shared_message(&self) -> Option<NdefMessage> {
        self.push.shared_message()
    }
}

async fn pump_discoveries(receiver: Receiver<Tag>, worker: Addr<TagWorker>) {
    while let Ok(tag) = receiver.recv_async().await {
        if let Err(error) = call!(worker.discover(tag)).await {
            error!("tag discovery failed: {error}");
        }
    }
}
