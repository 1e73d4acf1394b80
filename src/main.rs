//! DinoJumper Firmware: Main Entry Point
//!
//! Plays the offline dinosaur game: a photoresistor taped to the screen
//! watches for obstacles and a servo presses the space bar.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  ADC (free-running) ──ISR──▶ LatestReading ──┐           │
//! │        │                                     ▼           │
//! │        └── task notify ──▶ wake ──▶ ControlLoop::step    │
//! │                                          │               │
//! │                                          ▼               │
//! │                               ServoDriver (LEDC PWM)     │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use dinojumper::adapters::hardware::HardwareAdapter;
use dinojumper::adapters::log_sink::LogEventSink;
use dinojumper::adapters::wake::NotificationWake;
use dinojumper::app::service::ControlLoop;
use dinojumper::config::ControlConfig;
use dinojumper::drivers::hw_init::{self, LedcPwm};
use dinojumper::drivers::servo::ServoDriver;
use dinojumper::error::Error;
use dinojumper::sensors::light::{LATEST_READING, LightSensor};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("DinoJumper v{}", env!("CARGO_PKG_VERSION"));

    let config = ControlConfig::BUILD;

    // ── 2. Sampler + actuator setup ───────────────────────────
    let mut hw = match bring_up(config) {
        Ok(hw) => hw,
        Err(e) => {
            // Nothing useful can run without the ADC and servo; wait for reset.
            log::error!("Init failed: {}, halting", e);
            #[allow(clippy::empty_loop)]
            loop {}
        }
    };

    // ── 3. Select wait mode ───────────────────────────────────
    let mut wake = NotificationWake::idle();

    // ── 4. Control loop ───────────────────────────────────────
    let mut sink = LogEventSink::new();
    let mut app = ControlLoop::new(config);
    app.start(&hw, &mut sink);

    info!("System ready. Entering control loop.");
    app.run(&mut hw, &mut wake, &mut sink)
}

/// Configure peripherals, park the servo, unmask the ADC interrupt and
/// start free-running conversion.
fn bring_up(config: ControlConfig) -> Result<HardwareAdapter<LedcPwm>, Error> {
    hw_init::init_peripherals()?;
    let servo = ServoDriver::new(LedcPwm::servo(), config)?;
    hw_init::enable_conversion_interrupt()?;
    hw_init::start_conversions()?;
    Ok(HardwareAdapter::new(LightSensor::new(&LATEST_READING), servo))
}
