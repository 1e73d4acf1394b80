//! Two-position servo driver.
//!
//! Presses or releases the key by writing one of two duties to a PWM
//! channel.  Generic over `embedded_hal::pwm::SetDutyCycle` so the same
//! driver runs on the LEDC channel and on a fake in tests.
//!
//! Writes are level-triggered: every [`ServoDriver::set_target`] call
//! hits the channel, even when the target did not change.

use embedded_hal::pwm::SetDutyCycle;
use log::{info, warn};

use crate::app::controller::ActuatorTarget;
use crate::config::ControlConfig;
use crate::error::ActuatorError;

pub struct ServoDriver<P: SetDutyCycle> {
    pwm: P,
    config: ControlConfig,
    target: ActuatorTarget,
    hw_duty: u16,
    failed_writes: u32,
}

impl<P: SetDutyCycle> ServoDriver<P> {
    /// Take ownership of the channel and move the servo to Released.
    ///
    /// Fails if either configured duty is beyond the channel's range or
    /// the first write does not go through.
    pub fn new(mut pwm: P, config: ControlConfig) -> Result<Self, ActuatorError> {
        let max = pwm.max_duty_cycle();
        for duty in [config.engaged_duty, config.released_duty] {
            if duty > max {
                return Err(ActuatorError::DutyOutOfRange { duty, max });
            }
        }

        let initial = config.duty_for(ActuatorTarget::Released);
        pwm.set_duty_cycle(initial)
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        info!("Servo: released (duty={}/{})", initial, max);

        Ok(Self {
            pwm,
            config,
            target: ActuatorTarget::Released,
            hw_duty: initial,
            failed_writes: 0,
        })
    }

    /// Command `target`.  A failed write is logged and otherwise ignored;
    /// the next wake retries naturally.
    pub fn set_target(&mut self, target: ActuatorTarget) {
        let duty = self.config.duty_for(target);
        match self.pwm.set_duty_cycle(duty) {
            Ok(()) => {
                self.hw_duty = duty;
                self.target = target;
            }
            Err(e) => {
                self.failed_writes = self.failed_writes.saturating_add(1);
                warn!("Servo: duty write {} for {:?} failed: {:?}", duty, target, e);
            }
        }
    }

    pub fn target(&self) -> ActuatorTarget {
        self.target
    }

    pub fn current_duty(&self) -> u16 {
        self.hw_duty
    }

    pub fn failed_writes(&self) -> u32 {
        self.failed_writes
    }
}
