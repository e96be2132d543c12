use serde::Serialize;
use tracing::debug;

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum AdapterState {
    Absent,
    Off,
    On,
}

/// Radio state as the platform reports it
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlatformRadioState {
    Off,
    TurningOn,
    On,
    TurningOff,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, strum::Display, strum::AsRefStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum NfcStatus {
    NoNfc,
    NfcDisabled,
    NfcOk,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct NfcStateChange {
    pub status: NfcStatus,
    pub enabled: bool,
}

impl AdapterState {
    pub fn derive(has_adapter: bool, enabled: bool) -> Self {
        match (has_adapter, enabled) {
            (false, _) => Self::Absent,
            (true, false) => Self::Off,
            (true, true) => Self::On,
        }
    }

    pub fn status(self) -> NfcStatus {
        match self {
            Self::Absent => NfcStatus::NoNfc,
            Self::Off => NfcStatus::NfcDisabled,
            Self::On => NfcStatus::NfcOk,
        }
    }

    pub fn is_enabled(self) -> bool {
        self == Self::On
    }

    pub fn state_change(self) -> NfcStateChange {
        NfcStateChange { status: self.status(), enabled: self.is_enabled() }
    }
}

/// Edge triggered view of the adapter, only reports actual transitions
#[derive(Debug, Default)]
pub struct AdapterMonitor {
    state: Option<AdapterState>,
}

impl AdapterMonitor {
    pub fn state(&self) -> Option<AdapterState> {
        self.state
    }

    pub fn observe(&mut self, state: AdapterState) -> Option<NfcStateChange> {
        if self.state == Some(state) {
            return None;
        }

        debug!("adapter state changed: {:?} -> {state}", self.state);
        self.state = Some(state);
        Some(state.state_change())
    }

    /// Transitional reports re-check the adapter through `is_enabled`
    pub fn on_platform_report(
        &mut self,
        report: PlatformRadioState,
        has_adapter: bool,
        is_enabled: impl FnOnce() -> bool,
    ) -> Option<NfcStateChange> {
        let enabled = match report {
            PlatformRadioState::On => true,
            PlatformRadioState::Off => false,
            PlatformRadioState::TurningOn | PlatformRadioState::TurningOff => is_enabled(),
        };

        self.observe(AdapterState::derive(has_adapter, enabled))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn status_strings() {
        assert_eq!(NfcStatus::NoNfc.to_string(), "NO_NFC");
        assert_eq!(NfcStatus::NfcDisabled.as_ref(), "NFC_DISABLED");
        assert_eq!(serde_json::to_string(&NfcStatus::NfcOk).unwrap(), "\"NFC_OK\"");
    }

    #[test]
    fn emits_only_on_transitions() {
        let mut monitor = AdapterMonitor::default();

        let first = monitor.observe(AdapterState::On);
        assert_eq!(first, Some(NfcStateChange { status: NfcStatus::NfcOk, enabled: true }));
        assert_eq!(monitor.observe(AdapterState::On), None);

        let off = monitor.on_platform_report(PlatformRadioState::Off, true, || true);
        assert_eq!(off, Some(NfcStateChange { status: NfcStatus::NfcDisabled, enabled: false }));
        assert_eq!(monitor.on_platform_report(PlatformRadioState::Off, true, || true), None);
    }

    #[test]
    fn transitional_reports_use_current_enablement() {
        let mut monitor = AdapterMonitor::default();
        monitor.observe(AdapterState::Off);

        assert_eq!(monitor.on_platform_report(PlatformRadioState::TurningOn, true, || false), None);

        let change = monitor.on_platform_report(PlatformRadioState::TurningOff, true, || true);
        assert_eq!(change.map(|change| change.status), Some(NfcStatus::NfcOk));
    }

    #[test]
    fn no_adapter_is_always_absent() {
        assert_eq!(AdapterState::derive(false, true), AdapterState::Absent);
        assert_eq!(AdapterState::Absent.status(), NfcStatus::NoNfc);
        assert!(!AdapterState::Absent.is_enabled());
    }
}
