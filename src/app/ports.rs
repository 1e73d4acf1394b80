//! Port traits: the boundary between the control loop and the hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! The [`ControlLoop`](super::service::ControlLoop) consumes these via
//! generics, so the decision logic never touches a register and runs
//! unchanged against mocks on the host.

use super::controller::ActuatorTarget;
use super::events::AppEvent;
use crate::sensors::light::Reading;

// ───────────────────────────────────────────────────────────────
// Sensor port (hardware → domain)
// ───────────────────────────────────────────────────────────────

pub trait SensorPort {
    /// Most recently completed sample.  May be stale; never blocks.
    fn latest_reading(&self) -> Reading;

    /// Conversions completed since boot, for diagnostics.  Sources that
    /// do not count report 0.
    fn conversions(&self) -> u32 {
        0
    }
}

// ───────────────────────────────────────────────────────────────
// Actuator port (domain → hardware)
// ───────────────────────────────────────────────────────────────

pub trait ActuatorPort {
    /// Command the servo.  Called on every wake, even when unchanged.
    /// Fail-silent: implementations log write errors and carry on.
    fn set_target(&mut self, target: ActuatorTarget);

    /// Last commanded target.
    fn target(&self) -> ActuatorTarget;
}

// ───────────────────────────────────────────────────────────────
// Wake port (suspend until the next sample)
// ───────────────────────────────────────────────────────────────

pub trait WakePort {
    /// Suspend the caller until the sampler signals a new conversion.
    fn wait_for_sample(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging)
// ───────────────────────────────────────────────────────────────

pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
