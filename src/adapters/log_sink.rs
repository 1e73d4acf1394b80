//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the
//! ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { threshold, target } => {
                info!("START | threshold={} servo={:?}", threshold, target);
            }
            AppEvent::TargetChanged { from, to, reading } => {
                info!("SERVO | {:?} -> {:?} (reading={})", from, to, reading);
            }
        }
    }
}
