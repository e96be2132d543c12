//! Scripted tags, technologies and platform for tests

use std::{
    collections::VecDeque,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use parking_lot::Mutex;
use tagkit_ndef::NdefMessage;

use crate::{
    lifecycle::ReaderFlags,
    manager::{NfcReconcileMessage, NfcReconciler},
    platform::{MainThreadJob, NfcPlatform, RadioError},
    push::{NdefPush, PushError},
    tag::{
        Connectable, NdefFormatable, NdefTech, PagedMemory, PagedVariant, Tag, TagHandle,
        TagIoError, tech,
    },
};

#[derive(Debug, Default)]
struct Counters {
    connects: AtomicUsize,
    closes: AtomicUsize,
}

impl Counters {
    fn connect(&self, fail: &Option<TagIoError>) -> Result<(), TagIoError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        match fail {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn close(&self) -> Result<(), TagIoError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

macro_rules! impl_counters {
    ($ty:ty) => {
        impl $ty {
            pub fn connects(&self) -> usize {
                self.counters.connects.load(Ordering::SeqCst)
            }

            pub fn closes(&self) -> usize {
                self.counters.closes.load(Ordering::SeqCst)
            }

            pub fn fail_connect(mut self, error: TagIoError) -> Self {
                self.fail_connect = Some(error);
                self
            }
        }

        impl Connectable for $ty {
            fn connect(&self) -> Result<(), TagIoError> {
                self.counters.connect(&self.fail_connect)
            }

            fn close(&self) -> Result<(), TagIoError> {
                self.counters.close()
            }
        }
    };
}

// MARK: paged memory

#[derive(Debug)]
enum Script {
    Blocks(Mutex<VecDeque<Result<Vec<u8>, TagIoError>>>),
    UserMemory(Vec<u8>),
}

#[derive(Debug)]
pub struct MockPagedMemory {
    script: Script,
    pages_read: Mutex<Vec<u16>>,
    counters: Counters,
    fail_connect: Option<TagIoError>,
}

impl MockPagedMemory {
    /// Each read returns the next scripted result, then empty reads
    pub fn with_blocks(blocks: Vec<Result<Vec<u8>, TagIoError>>) -> Self {
        Self::new(Script::Blocks(Mutex::new(blocks.into())))
    }

    /// User memory starting at page 4, reads past the end come back empty
    pub fn with_user_memory(memory: Vec<u8>) -> Self {
        Self::new(Script::UserMemory(memory))
    }

    fn new(script: Script) -> Self {
        Self {
            script,
            pages_read: Mutex::new(vec![]),
            counters: Counters::default(),
            fail_connect: None,
        }
    }

    pub fn pages_read(&self) -> Vec<u16> {
        self.pages_read.lock().clone()
    }
}

impl_counters!(MockPagedMemory);

impl PagedMemory for MockPagedMemory {
    fn variant(&self) -> PagedVariant {
        PagedVariant::Ultralight
    }

    fn read_pages(&self, page: u16) -> Result<Vec<u8>, TagIoError> {
        self.pages_read.lock().push(page);

        match &self.script {
            Script::Blocks(blocks) => blocks.lock().pop_front().unwrap_or(Ok(vec![])),
            Script::UserMemory(memory) => {
                let start = (usize::from(page) - 4) * 4;
                if start >= memory.len() {
                    return Ok(vec![]);
                }

                let end = memory.len().min(start + 16);
                Ok(memory[start..end].to_vec())
            }
        }
    }
}

// MARK: ndef

#[derive(Debug)]
pub struct MockNdef {
    cached: Option<Vec<u8>>,
    stored: Option<Vec<u8>>,
    written: Mutex<Option<Vec<u8>>>,
    writable: bool,
    max_size: usize,
    ndef_type: Option<String>,
    lockable: bool,
    fail_read: Option<TagIoError>,
    fail_write: Option<TagIoError>,
    counters: Counters,
    fail_connect: Option<TagIoError>,
}

tagkit_macros::impl_default_for!(MockNdef);
impl MockNdef {
    pub fn new() -> Self {
        Self {
            cached: None,
            stored: None,
            written: Mutex::new(None),
            writable: true,
            max_size: 1024,
            ndef_type: None,
            lockable: true,
            fail_read: None,
            fail_write: None,
            counters: Counters::default(),
            fail_connect: None,
        }
    }

    pub fn cached(mut self, cached: Option<Vec<u8>>) -> Self {
        self.cached = cached;
        self
    }

    pub fn stored(mut self, stored: Option<Vec<u8>>) -> Self {
        self.stored = stored;
        self
    }

    pub fn writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn ndef_type(mut self, ndef_type: &str) -> Self {
        self.ndef_type = Some(ndef_type.to_string());
        self
    }

    pub fn lockable(mut self, lockable: bool) -> Self {
        self.lockable = lockable;
        self
    }

    pub fn fail_read(mut self, error: TagIoError) -> Self {
        self.fail_read = Some(error);
        self
    }

    pub fn fail_write(mut self, error: TagIoError) -> Self {
        self.fail_write = Some(error);
        self
    }

    pub fn written(&self) -> Option<Vec<u8>> {
        self.written.lock().clone()
    }
}

impl_counters!(MockNdef);

impl NdefTech for MockNdef {
    fn cached_message(&self) -> Option<Vec<u8>> {
        self.cached.clone()
    }

    fn read_message(&self) -> Result<Option<Vec<u8>>, TagIoError> {
        match &self.fail_read {
            Some(error) => Err(error.clone()),
            None => Ok(self.stored.clone()),
        }
    }

    fn write_message(&self, message: &[u8]) -> Result<(), TagIoError> {
        if let Some(error) = &self.fail_write {
            return Err(error.clone());
        }

        *self.written.lock() = Some(message.to_vec());
        Ok(())
    }

    fn is_writable(&self) -> bool {
        self.writable
    }

    fn max_size(&self) -> usize {
        self.max_size
    }

    fn ndef_type(&self) -> Option<String> {
        self.ndef_type.clone()
    }

    fn can_make_read_only(&self) -> Option<bool> {
        None
    }

    fn make_read_only(&self) -> Result<bool, TagIoError> {
        Ok(self.lockable)
    }
}

// MARK: formatable

#[derive(Debug)]
pub struct MockFormatable {
    formatted: Mutex<Option<Vec<u8>>>,
    counters: Counters,
    fail_connect: Option<TagIoError>,
}

tagkit_macros::impl_default_for!(MockFormatable);
impl MockFormatable {
    pub fn new() -> Self {
        Self { formatted: Mutex::new(None), counters: Counters::default(), fail_connect: None }
    }

    pub fn formatted(&self) -> Option<Vec<u8>> {
        self.formatted.lock().clone()
    }
}

impl_counters!(MockFormatable);

impl NdefFormatable for MockFormatable {
    fn format(&self, message: &[u8]) -> Result<(), TagIoError> {
        *self.formatted.lock() = Some(message.to_vec());
        Ok(())
    }
}

// MARK: tag

#[derive(Debug, Default)]
pub struct MockTag {
    id: Vec<u8>,
    techs: Vec<String>,
    paged: Option<Arc<MockPagedMemory>>,
    ndef: Option<Arc<MockNdef>>,
    formatable: Option<Arc<MockFormatable>>,
}

#[derive(Debug, Default)]
pub struct MockTagBuilder(MockTag);

impl MockTag {
    pub fn builder() -> MockTagBuilder {
        MockTagBuilder::default()
    }
}

impl MockTagBuilder {
    pub fn id(mut self, id: Vec<u8>) -> Self {
        self.0.id = id;
        self
    }

    pub fn tech(mut self, name: &str) -> Self {
        self.0.techs.push(name.to_string());
        self
    }

    pub fn paged(self, memory: Arc<MockPagedMemory>) -> Self {
        let mut builder = self.tech(tech::NFC_A).tech(tech::MIFARE_ULTRALIGHT);
        builder.0.paged = Some(memory);
        builder
    }

    pub fn ndef(self, ndef: Arc<MockNdef>) -> Self {
        let mut builder = self.tech(tech::NDEF);
        builder.0.ndef = Some(ndef);
        builder
    }

    pub fn formatable(self, formatable: Arc<MockFormatable>) -> Self {
        let mut builder = self.tech(tech::NDEF_FORMATABLE);
        builder.0.formatable = Some(formatable);
        builder
    }

    pub fn build(self) -> Tag {
        Arc::new(self.0)
    }
}

impl TagHandle for MockTag {
    fn id(&self) -> Vec<u8> {
        self.id.clone()
    }

    fn tech_types(&self) -> Vec<String> {
        self.techs.clone()
    }

    fn paged_memory(&self) -> Option<Arc<dyn PagedMemory>> {
        self.paged.clone().map(|memory| memory as Arc<dyn PagedMemory>)
    }

    fn ndef(&self) -> Option<Arc<dyn NdefTech>> {
        self.ndef.clone().map(|ndef| ndef as Arc<dyn NdefTech>)
    }

    fn ndef_formatable(&self) -> Option<Arc<dyn NdefFormatable>> {
        self.formatable.clone().map(|formatable| formatable as Arc<dyn NdefFormatable>)
    }
}

// MARK: push

#[derive(Debug)]
pub struct MockPush {
    enabled: bool,
    current: Mutex<Option<NdefMessage>>,
}

impl MockPush {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, current: Mutex::new(None) }
    }

    pub fn current(&self) -> Option<NdefMessage> {
        self.current.lock().clone()
    }
}

impl NdefPush for MockPush {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_message(&self, message: Option<&NdefMessage>) -> Result<(), PushError> {
        *self.current.lock() = message.cloned();
        Ok(())
    }
}

// MARK: platform

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadioCall {
    Enable(ReaderFlags, Duration),
    Disable,
}

/// Jobs waiting for the host's main thread
#[derive(Default)]
struct MainQueue(Mutex<VecDeque<MainThreadJob>>);

impl std::fmt::Debug for MainQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MainQueue({} jobs)", self.0.lock().len())
    }
}

#[derive(Debug)]
pub struct MockPlatform {
    has_adapter: bool,
    enabled: Mutex<bool>,
    fail_enable: bool,
    push: Option<Arc<MockPush>>,
    radio_calls: Mutex<Vec<RadioCall>>,
    radio_on: Mutex<bool>,

    /// `None` runs main thread jobs straight away
    main_queue: Option<MainQueue>,
}

impl MockPlatform {
    pub fn new(has_adapter: bool, enabled: bool) -> Self {
        Self {
            has_adapter,
            enabled: Mutex::new(enabled),
            fail_enable: false,
            push: None,
            radio_calls: Mutex::new(vec![]),
            radio_on: Mutex::new(false),
            main_queue: None,
        }
    }

    /// Main thread jobs wait until [`MockPlatform::drain_main`], like a busy UI thread
    pub fn deferred_main(mut self) -> Self {
        self.main_queue = Some(MainQueue::default());
        self
    }

    pub fn with_push(mut self, push: Arc<MockPush>) -> Self {
        self.push = Some(push);
        self
    }

    pub fn failing_enable(mut self) -> Self {
        self.fail_enable = true;
        self
    }

    pub fn set_enabled(&self, enabled: bool) {
        *self.enabled.lock() = enabled;
    }

    pub fn radio_calls(&self) -> Vec<RadioCall> {
        self.radio_calls.lock().clone()
    }

    /// Whether reader mode is on after the last successful toggle
    pub fn radio_on(&self) -> bool {
        *self.radio_on.lock()
    }

    pub fn pending_main_jobs(&self) -> usize {
        self.main_queue.as_ref().map_or(0, |queue| queue.0.lock().len())
    }

    /// Run queued main thread jobs in order
    pub fn drain_main(&self) {
        let Some(queue) = &self.main_queue else { return };

        loop {
            let job = queue.0.lock().pop_front();
            let Some(job) = job else { break };
            job();
        }
    }
}

impl NfcPlatform for MockPlatform {
    fn has_adapter(&self) -> bool {
        self.has_adapter
    }

    fn is_enabled(&self) -> bool {
        self.has_adapter && *self.enabled.lock()
    }

    fn enable_reader_mode(
        &self,
        flags: ReaderFlags,
        presence_check_delay: Duration,
    ) -> Result<(), RadioError> {
        self.radio_calls.lock().push(RadioCall::Enable(flags, presence_check_delay));
        if self.fail_enable {
            return Err(RadioError("activity is finishing".into()));
        }

        *self.radio_on.lock() = true;
        Ok(())
    }

    fn disable_reader_mode(&self) -> Result<(), RadioError> {
        self.radio_calls.lock().push(RadioCall::Disable);
        *self.radio_on.lock() = false;
        Ok(())
    }

    fn run_on_main(&self, job: MainThreadJob) {
        match &self.main_queue {
            Some(queue) => queue.0.lock().push_back(job),
            None => job(),
        }
    }

    fn ndef_push(&self) -> Option<Arc<dyn NdefPush>> {
        self.push.clone().map(|push| push as Arc<dyn NdefPush>)
    }
}

// MARK: reconciler

#[derive(Debug)]
pub struct RecordingReconciler(pub flume::Sender<NfcReconcileMessage>);

impl NfcReconciler for RecordingReconciler {
    fn reconcile(&self, message: NfcReconcileMessage) {
        let _ = self.0.send(message);
    }
}
