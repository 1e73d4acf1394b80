//! Photoresistor light sensor fed by the free-running ADC.
//!
//! The ADC converts continuously; every completed DMA frame raises the
//! `on_conv_done` interrupt, whose handler (see `hw_init`) decodes the
//! newest result with [`decode_frame`] and hands it to
//! [`on_conversion_complete`].  The main loop only ever looks at the
//! most recent value.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: the ISR publishes into [`LATEST_READING`].
//! On host/test: [`sim_complete_conversion`] runs the same handler body.

use core::sync::atomic::{AtomicU16, AtomicU32, Ordering};

use crate::config::ADC_RESOLUTION_BITS;
use crate::pins;

/// A light sample in `0..=READING_MAX`.
pub type Reading = u16;

/// Bits the hardware converts at before scaling to [`Reading`].
const HW_RESOLUTION_BITS: u32 = 12;

/// Single-producer / single-consumer cell holding the newest sample.
///
/// Written only from the conversion-complete handler, read only from
/// the main loop.  Older samples are overwritten, never queued.  A `u16`
/// store is a single instruction on the target so the value never tears.
pub struct LatestReading {
    value: AtomicU16,
    conversions: AtomicU32,
}

impl LatestReading {
    pub const fn new() -> Self {
        Self {
            value: AtomicU16::new(0),
            conversions: AtomicU32::new(0),
        }
    }

    /// Overwrite the cell with a freshly completed sample.
    pub fn publish(&self, reading: Reading) {
        self.value.store(reading, Ordering::Release);
        self.conversions.fetch_add(1, Ordering::Relaxed);
    }

    /// Newest sample, or 0 if nothing has been converted yet.
    pub fn latest(&self) -> Reading {
        self.value.load(Ordering::Acquire)
    }

    /// Samples published since boot (wraps).  Diagnostics only.
    pub fn conversions(&self) -> u32 {
        self.conversions.load(Ordering::Relaxed)
    }
}

impl Default for LatestReading {
    fn default() -> Self {
        Self::new()
    }
}

/// The cell shared between the ADC interrupt and the main loop.
pub static LATEST_READING: LatestReading = LatestReading::new();

/// Conversion-complete handler body.  Lock-free, bounded time.
///
/// No range check: whatever the ADC produced flows through as-is.
pub fn on_conversion_complete(reading: Reading) {
    LATEST_READING.publish(reading);
}

/// Pull the newest result for `channel` out of a TYPE2 DMA frame.
///
/// Each result is a little-endian `u32`: bits 0–11 data, 12–15 channel,
/// bit 16 unit (0 = ADC1).  Trailing partial results are ignored.
/// Returns `None` if the frame holds no result for `channel`.
pub fn decode_frame(frame: &[u8], channel: u32) -> Option<Reading> {
    frame
        .chunks_exact(pins::ADC_RESULT_BYTES)
        .rev()
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .find(|word| (word >> 12) & 0xF == channel && (word >> 16) & 0x1 == 0)
        .map(|word| scale_to_reading((word & 0x0FFF) as u16))
}

fn scale_to_reading(raw: u16) -> Reading {
    raw >> (HW_RESOLUTION_BITS - ADC_RESOLUTION_BITS)
}

/// Read side handed to the hardware adapter.
pub struct LightSensor {
    cell: &'static LatestReading,
}

impl LightSensor {
    pub fn new(cell: &'static LatestReading) -> Self {
        Self { cell }
    }

    pub fn read(&self) -> Reading {
        self.cell.latest()
    }

    pub fn conversions(&self) -> u32 {
        self.cell.conversions()
    }
}

/// Inject a completed conversion as if the ADC interrupt had fired.
#[cfg(not(target_os = "espidf"))]
pub fn sim_complete_conversion(reading: Reading) {
    on_conversion_complete(reading);
    crate::drivers::hw_init::sim_raise_notification();
}
