//! Reader mode lifecycle
//!
//! Tracks whether scanning was requested and whether the radio is actually in
//! reader mode, and decides which radio commands the host has to run as the
//! app moves between foreground and background or the adapter comes and goes.

use tracing::{debug, warn};

use crate::platform::RadioError;

bitflags::bitflags! {
    /// Reader mode flags, same bit values the platform uses
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct ReaderFlags: u32 {
        const NFC_A = 0x1;
        const NFC_B = 0x2;
        const NFC_F = 0x4;
        const NFC_V = 0x8;
        const NFC_BARCODE = 0x10;
        const SKIP_NDEF_CHECK = 0x80;
        const NO_PLATFORM_SOUNDS = 0x100;
    }
}

impl Default for ReaderFlags {
    fn default() -> Self {
        Self::NFC_A
            | Self::NFC_B
            | Self::NFC_F
            | Self::NFC_V
            | Self::SKIP_NDEF_CHECK
            | Self::NO_PLATFORM_SOUNDS
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReaderModeState {
    pub requested: bool,
    pub active: bool,
    pub flags: ReaderFlags,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum ReaderModePhase {
    Idle,
    RequestedInactive,
    Active,
}

/// What the host has to do with the radio
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RadioCommand {
    Enable(ReaderFlags),
    Disable,
}

#[derive(Debug, Clone)]
pub struct ReaderModeLifecycle {
    state: ReaderModeState,
    foreground: bool,
    adapter_present: bool,
}

impl ReaderModeLifecycle {
    pub fn new(foreground: bool, adapter_present: bool, flags: ReaderFlags) -> Self {
        Self {
            state: ReaderModeState { requested: false, active: false, flags },
            foreground,
            adapter_present,
        }
    }

    pub fn state(&self) -> ReaderModeState {
        self.state
    }

    pub fn phase(&self) -> ReaderModePhase {
        match (self.state.requested, self.state.active) {
            (_, true) => ReaderModePhase::Active,
            (true, false) => ReaderModePhase::RequestedInactive,
            (false, false) => ReaderModePhase::Idle,
        }
    }

    pub fn start(&mut self, flags: ReaderFlags) -> Option<RadioCommand> {
        self.state.requested = true;
        self.state.flags = flags;
        self.enable_if_possible()
    }

    /// Always disables when an adapter exists, even if reader mode was not active
    pub fn stop(&mut self) -> Option<RadioCommand> {
        self.state.requested = false;
        self.state.active = false;
        self.adapter_present.then_some(RadioCommand::Disable)
    }

    pub fn backgrounded(&mut self) -> Option<RadioCommand> {
        self.foreground = false;
        if !self.state.active {
            return None;
        }

        self.state.active = false;
        Some(RadioCommand::Disable)
    }

    pub fn foregrounded(&mut self) -> Option<RadioCommand> {
        self.foreground = true;
        if self.state.active {
            return None;
        }

        self.enable_if_possible()
    }

    /// Adapter turned on or off, re-enables a pending request once it is back
    pub fn set_adapter_present(&mut self, present: bool) -> Option<RadioCommand> {
        self.adapter_present = present;
        if !present {
            self.state.active = false;
            return None;
        }

        if self.state.active {
            return None;
        }

        self.enable_if_possible()
    }

    /// Record the outcome of a radio command the host ran
    ///
    /// Commands run later on the main thread, so an enable can land after the
    /// host already backgrounded or stopped. The returned `Disable` turns the
    /// radio back off in that case and has to be run straight away.
    pub fn radio_toggled(
        &mut self,
        command: RadioCommand,
        result: Result<(), RadioError>,
    ) -> Option<RadioCommand> {
        match (command, result) {
            (RadioCommand::Enable(_), Ok(())) => {
                self.state.active = self.state.requested && self.foreground && self.adapter_present;
                debug!("reader mode enabled, active: {}", self.state.active);

                if self.state.active {
                    return None;
                }

                debug!("reader mode no longer wanted, disabling again");
                Some(RadioCommand::Disable)
            }
            (RadioCommand::Disable, Ok(())) => {
                self.state.active = false;
                debug!("reader mode disabled");
                None
            }
            (command, Err(error)) => {
                warn!("unable to run {command:?}: {error}");
                self.state.active = false;
                None
            }
        }
    }

    fn enable_if_possible(&self) -> Option<RadioCommand> {
        let can_enable = self.state.requested && self.foreground && self.adapter_present;
        can_enable.then_some(RadioCommand::Enable(self.state.flags))
    }
}
