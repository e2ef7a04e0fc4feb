//! Controller error types.

use relact_common::relay::RelayError;
use thiserror::Error;

/// Errors returned by controller operations.
///
/// `AlreadyRunning`, `NotRunning` and `InvalidArgument` are ordinary
/// results for the caller; `HardwareFault` ends the current run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    /// `start()` while a run is active.
    #[error("Actuator is already running")]
    AlreadyRunning,

    /// `stop()` with no active run.
    #[error("Actuator is not running")]
    NotRunning,

    /// Rejected configuration input.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Relay line could not be driven or released.
    #[error("Hardware fault: {0}")]
    HardwareFault(#[from] RelayError),

    /// The runner thread could not be started.
    #[error("Failed to spawn cycle runner: {0}")]
    SpawnFailed(String),
}

impl ControlError {
    /// Whether the error is a caller mistake rather than a system failure.
    #[inline]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::AlreadyRunning | Self::NotRunning | Self::InvalidArgument(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(ControlError::AlreadyRunning.is_client_error());
        assert!(ControlError::NotRunning.is_client_error());
        assert!(ControlError::InvalidArgument("x".into()).is_client_error());
        assert!(!ControlError::HardwareFault(RelayError::Released).is_client_error());
        assert!(!ControlError::SpawnFailed("x".into()).is_client_error());
    }

    #[test]
    fn messages() {
        assert!(ControlError::AlreadyRunning.to_string().contains("already"));
        assert!(ControlError::NotRunning.to_string().contains("not running"));
        let fault = ControlError::from(RelayError::HardwareFault {
            pin: 23,
            reason: "bus error".into(),
        });
        assert!(fault.to_string().contains("bus error"));
    }
}
