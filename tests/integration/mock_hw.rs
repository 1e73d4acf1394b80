//! Mock hardware adapters for integration tests.
//!
//! `MockHardware` keeps a real [`LatestReading`] cell so tests drive it
//! exactly as the ADC interrupt would, and records every servo command.

use dinojumper::app::controller::ActuatorTarget;
use dinojumper::app::events::AppEvent;
use dinojumper::app::ports::{ActuatorPort, EventSink, SensorPort, WakePort};
use dinojumper::sensors::light::{LatestReading, Reading};

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub cell: LatestReading,
    pub commands: Vec<ActuatorTarget>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            cell: LatestReading::new(),
            commands: Vec::new(),
        }
    }

    /// Behave like one conversion-complete interrupt.
    pub fn fire_conversion(&mut self, reading: Reading) {
        self.cell.publish(reading);
    }

    pub fn last_command(&self) -> Option<ActuatorTarget> {
        self.commands.last().copied()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn latest_reading(&self) -> Reading {
        self.cell.latest()
    }

    fn conversions(&self) -> u32 {
        self.cell.conversions()
    }
}

impl ActuatorPort for MockHardware {
    fn set_target(&mut self, target: ActuatorTarget) {
        self.commands.push(target);
    }

    fn target(&self) -> ActuatorTarget {
        self.last_command().unwrap_or(ActuatorTarget::Released)
    }
}

// ── MockWake ──────────────────────────────────────────────────

#[derive(Default)]
pub struct MockWake {
    pub waits: usize,
}

impl WakePort for MockWake {
    fn wait_for_sample(&mut self) {
        self.waits += 1;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn changes(&self) -> Vec<(ActuatorTarget, ActuatorTarget)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::TargetChanged { from, to, .. } => Some((*from, *to)),
                AppEvent::Started { .. } => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
