//! Compile-time tuning for the light trigger and the servo.
//!
//! These constants are the whole configuration surface.  There is no
//! runtime configuration and nothing is persisted: retuning means
//! editing this file (or toggling the `light-background` feature) and
//! re-flashing.

use crate::app::controller::ActuatorTarget;
use crate::sensors::light::Reading;

// --- Sampler ---

/// Width of a published reading.  The ADC converts at 12 bit; results
/// are scaled down so readings always fall in `0..=READING_MAX`.
pub const ADC_RESOLUTION_BITS: u32 = 10;
/// Largest value a reading can take (1023).
pub const READING_MAX: Reading = (1 << ADC_RESOLUTION_BITS) - 1;

// --- Servo PWM ---

/// LEDC timer frequency.  With 12-bit resolution this matches the
/// ~101.7 Hz single-slope waveform the servo was tuned against.
pub const PWM_FREQUENCY_HZ: u32 = 100;
/// LEDC duty resolution (bits).
pub const PWM_RESOLUTION_BITS: u32 = 12;
/// Top of the PWM counter; duties are expressed in these ticks.
pub const PWM_PERIOD: u16 = 0x0FFF;

/// Duty while the servo is pressing the key down.
pub const SERVO_ENGAGED_DUTY: u16 = 0x00FF;
/// Duty while the servo is resting off the key.
pub const SERVO_RELEASED_DUTY: u16 = 0x00DC;

// --- Trigger ---

/// Which side of the threshold counts as "obstacle in front of the sensor".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Dark game background: obstacles are brighter, readings drop below
    /// the threshold.
    DarkBackground,
    /// Light game background: obstacles are darker, readings rise above
    /// the threshold.
    LightBackground,
}

#[cfg(not(feature = "light-background"))]
pub const POLARITY: Polarity = Polarity::DarkBackground;
#[cfg(feature = "light-background")]
pub const POLARITY: Polarity = Polarity::LightBackground;

/// Reading that separates "jump" from "no jump".
#[cfg(not(feature = "light-background"))]
pub const JUMP_THRESHOLD: Reading = 700;
#[cfg(feature = "light-background")]
pub const JUMP_THRESHOLD: Reading = 300;

const _: () = assert!(SERVO_ENGAGED_DUTY <= PWM_PERIOD);
const _: () = assert!(SERVO_RELEASED_DUTY <= PWM_PERIOD);
const _: () = assert!(PWM_PERIOD as u32 == (1 << PWM_RESOLUTION_BITS) - 1);
const _: () = assert!(JUMP_THRESHOLD <= READING_MAX + 1);

/// Immutable bundle of the trigger and actuator constants.
///
/// Built once at compile time as [`ControlConfig::BUILD`]; there are no
/// setters.  Tests construct their own values with [`ControlConfig::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlConfig {
    pub threshold: Reading,
    pub polarity: Polarity,
    pub engaged_duty: u16,
    pub released_duty: u16,
}

impl ControlConfig {
    /// The configuration this firmware image was built with.
    pub const BUILD: Self = Self::new(
        JUMP_THRESHOLD,
        POLARITY,
        SERVO_ENGAGED_DUTY,
        SERVO_RELEASED_DUTY,
    );

    pub const fn new(
        threshold: Reading,
        polarity: Polarity,
        engaged_duty: u16,
        released_duty: u16,
    ) -> Self {
        Self {
            threshold,
            polarity,
            engaged_duty,
            released_duty,
        }
    }

    /// Dark-background config with the build duties and a custom threshold.
    pub const fn with_threshold(threshold: Reading) -> Self {
        Self::new(
            threshold,
            Polarity::DarkBackground,
            SERVO_ENGAGED_DUTY,
            SERVO_RELEASED_DUTY,
        )
    }

    /// PWM duty that commands `target`.
    pub const fn duty_for(&self, target: ActuatorTarget) -> u16 {
        match target {
            ActuatorTarget::Engaged => self.engaged_duty,
            ActuatorTarget::Released => self.released_duty,
        }
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self::BUILD
    }
}
