//! Control loop service: the hexagonal core.
//!
//! [`ControlLoop`] owns the build configuration and the last decision.
//! Each wake it samples the latest reading, decides, and commands the
//! servo.  All I/O flows through port traits injected at call sites.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────┐ ──▶ EventSink
//!                 │   ControlLoop     │
//! ActuatorPort ◀──│  decide · command │
//!                 └──────────────────┘
//!                          ▲
//!                 WakePort ┘ (suspend between samples)
//! ```

use log::{debug, info};

use crate::config::ControlConfig;

use super::controller::{ActuatorTarget, decide};
use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, SensorPort, WakePort};

pub struct ControlLoop {
    config: ControlConfig,
    /// Target commanded by the last step (Released until the first one,
    /// matching the servo's power-on position).
    target: ActuatorTarget,
    cycles: u64,
}

impl ControlLoop {
    pub fn new(config: ControlConfig) -> Self {
        Self {
            config,
            target: ActuatorTarget::Released,
            cycles: 0,
        }
    }

    /// Announce the loop.  Does not command the servo.
    pub fn start(&mut self, hw: &impl ActuatorPort, sink: &mut impl EventSink) {
        self.target = hw.target();
        sink.emit(&AppEvent::Started {
            threshold: self.config.threshold,
            target: self.target,
        });
        info!(
            "ControlLoop started (threshold={}, polarity={:?}, target={:?})",
            self.config.threshold, self.config.polarity, self.target
        );
    }

    // ── Per-wake decision ─────────────────────────────────────

    /// Run one decision: read → decide → command.
    ///
    /// The servo is written on every call, changed or not; only the
    /// event is edge-triggered.
    pub fn step(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> ActuatorTarget {
        self.cycles += 1;

        let reading = hw.latest_reading();
        let target = decide(reading, &self.config);
        hw.set_target(target);

        debug!(
            "cycle {}: reading={} (conversions={}) -> {:?}",
            self.cycles,
            reading,
            hw.conversions(),
            target
        );

        if target != self.target {
            sink.emit(&AppEvent::TargetChanged {
                from: self.target,
                to: target,
                reading,
            });
            self.target = target;
        }
        target
    }

    /// Wake → decide → suspend, forever.  Only power loss or reset ends it.
    pub fn run(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        wake: &mut impl WakePort,
        sink: &mut impl EventSink,
    ) -> ! {
        loop {
            self.step(hw, sink);
            wake.wait_for_sample();
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn target(&self) -> ActuatorTarget {
        self.target
    }

    /// Decisions made since startup.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }
}
