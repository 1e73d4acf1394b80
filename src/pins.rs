//! GPIO / peripheral assignments for the DinoJumper board (ESP32-S3).
//!
//! Single source of truth: drivers reference this module rather than
//! hard-coding pin or channel numbers.

// ---------------------------------------------------------------------------
// Light sensor: LDR + 10 kΩ divider into ADC1
// ---------------------------------------------------------------------------

/// Analog-only pin carrying the divider midpoint.
pub const LDR_ADC_GPIO: i32 = 5;
/// ADC1 channel wired to [`LDR_ADC_GPIO`] on ESP32-S3.
pub const LDR_ADC_CHANNEL: u32 = 4;
/// Continuous conversion rate.  The S3 DMA ADC will not go below 611 Hz.
pub const LDR_SAMPLE_FREQ_HZ: u32 = 1_000;
/// Bytes per TYPE2 conversion result.
pub const ADC_RESULT_BYTES: usize = 4;
/// Results per DMA frame; one completion interrupt fires per frame.
pub const ADC_RESULTS_PER_FRAME: usize = 4;
pub const ADC_FRAME_BYTES: u32 = (ADC_RESULT_BYTES * ADC_RESULTS_PER_FRAME) as u32;
/// Driver-side result pool.  Never drained: the ISR reads results
/// straight out of each frame.
pub const ADC_POOL_BYTES: u32 = ADC_FRAME_BYTES * 4;

// ---------------------------------------------------------------------------
// Servo
// ---------------------------------------------------------------------------

/// LEDC output driving the servo signal line.
pub const SERVO_PWM_GPIO: i32 = 4;
pub const SERVO_LEDC_TIMER: u32 = 0;
pub const SERVO_LEDC_CHANNEL: u32 = 0;
