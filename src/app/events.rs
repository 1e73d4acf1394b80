//! Outbound application events.
//!
//! Emitted by the [`ControlLoop`](super::service::ControlLoop) through
//! the [`EventSink`](super::ports::EventSink) port.  Nothing leaves the
//! board; the only sink on target is the serial log.

use super::controller::ActuatorTarget;
use crate::sensors::light::Reading;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The loop is about to run its first cycle.
    Started {
        threshold: Reading,
        target: ActuatorTarget,
    },

    /// The decision moved the servo to a different position.
    TargetChanged {
        from: ActuatorTarget,
        to: ActuatorTarget,
        reading: Reading,
    },
}
