//! Error types for the DinoJumper firmware.
//!
//! Only start-up can fail.  Once the loop runs, every fault is swallowed
//! and logged: samples are never validated and a failed PWM write leaves
//! the servo where it was until the next wake.

use core::fmt;

use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// The servo could not be brought to its initial position.
    Actuator(ActuatorError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// A configured duty is above what the PWM channel can produce.
    DutyOutOfRange { duty: u16, max: u16 },
    /// Writing the initial duty failed.
    PwmWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DutyOutOfRange { duty, max } => {
                write!(f, "duty {duty} exceeds channel maximum {max}")
            }
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
        }
    }
}

impl std::error::Error for ActuatorError {}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_nests_source() {
        let e = Error::from(ActuatorError::DutyOutOfRange { duty: 5000, max: 4095 });
        assert_eq!(e.to_string(), "actuator: duty 5000 exceeds channel maximum 4095");
    }

    #[test]
    fn init_error_converts() {
        let e: Error = HwInitError::AdcStartFailed(-1).into();
        assert!(matches!(e, Error::Init(HwInitError::AdcStartFailed(-1))));
    }
}
