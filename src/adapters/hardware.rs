//! Hardware adapter: bridges the light sensor and servo to port traits.
//!
//! Owns the [`LightSensor`] and the [`ServoDriver`], exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  On non-espidf targets
//! the underlying drivers use cfg-gated simulation stubs.

use embedded_hal::pwm::SetDutyCycle;

use crate::app::controller::ActuatorTarget;
use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::servo::ServoDriver;
use crate::sensors::light::{LightSensor, Reading};

pub struct HardwareAdapter<P: SetDutyCycle> {
    light: LightSensor,
    servo: ServoDriver<P>,
}

impl<P: SetDutyCycle> HardwareAdapter<P> {
    pub fn new(light: LightSensor, servo: ServoDriver<P>) -> Self {
        Self { light, servo }
    }

    pub fn servo(&self) -> &ServoDriver<P> {
        &self.servo
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P: SetDutyCycle> SensorPort for HardwareAdapter<P> {
    fn latest_reading(&self) -> Reading {
        self.light.read()
    }

    fn conversions(&self) -> u32 {
        self.light.conversions()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P: SetDutyCycle> ActuatorPort for HardwareAdapter<P> {
    fn set_target(&mut self, target: ActuatorTarget) {
        self.servo.set_target(target);
    }

    fn target(&self) -> ActuatorTarget {
        self.servo.target()
    }
}
