//! One-shot hardware peripheral initialization and the ADC interrupt.
//!
//! Configures the analog pin, the continuous ADC, and the LEDC timer /
//! channel using raw ESP-IDF sys calls.  Called from `main()` before the
//! control loop starts, in this order:
//!
//! 1. [`init_peripherals`]: pin, ADC, PWM.
//! 2. [`enable_conversion_interrupt`]: register the completion ISR and
//!    the task it wakes.
//! 3. [`start_conversions`]: free-running from here on.

use core::sync::atomic::Ordering;

use embedded_hal::pwm::{ErrorKind, ErrorType, SetDutyCycle};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::config;
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.  Each carries the
/// ESP-IDF return code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    AdcInitFailed(i32),
    AdcCallbackFailed(i32),
    AdcStartFailed(i32),
    LedcTimerFailed(i32),
    LedcChannelFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc)  => write!(f, "LDR pin config failed (rc={})", rc),
            Self::AdcInitFailed(rc)     => write!(f, "continuous ADC init failed (rc={})", rc),
            Self::AdcCallbackFailed(rc) => write!(f, "ADC callback registration failed (rc={})", rc),
            Self::AdcStartFailed(rc)    => write!(f, "ADC start failed (rc={})", rc),
            Self::LedcTimerFailed(rc)   => write!(f, "LEDC timer config failed (rc={})", rc),
            Self::LedcChannelFailed(rc) => write!(f, "LEDC channel config failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
fn check(ret: esp_err_t, err: fn(i32) -> HwInitError) -> Result<(), HwInitError> {
    if ret == ESP_OK as i32 { Ok(()) } else { Err(err(ret)) }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the loop; single-threaded.
    unsafe {
        init_ldr_pin()?;
        init_adc()?;
        init_ledc()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── Analog pin ────────────────────────────────────────────────

/// Analog-only pin: digital input buffer off, no pulls, no GPIO interrupt.
#[cfg(target_os = "espidf")]
unsafe fn init_ldr_pin() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::LDR_ADC_GPIO,
        mode: gpio_mode_t_GPIO_MODE_DISABLE,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    check(unsafe { gpio_config(&cfg) }, HwInitError::GpioConfigFailed)?;
    info!("hw_init: LDR pin GPIO{} set analog-only", pins::LDR_ADC_GPIO);
    Ok(())
}

// ── ADC (continuous) ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC_HANDLE: adc_continuous_handle_t = core::ptr::null_mut();

/// SAFETY: ADC_HANDLE is written once in `init_adc()`, before any
/// reader; afterwards it is only read.
#[cfg(target_os = "espidf")]
unsafe fn adc_handle() -> adc_continuous_handle_t {
    unsafe { ADC_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let handle_cfg = adc_continuous_handle_cfg_t {
        max_store_buf_size: pins::ADC_POOL_BYTES,
        conv_frame_size: pins::ADC_FRAME_BYTES,
        ..Default::default()
    };
    // SAFETY: ADC_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_continuous_new_handle(&handle_cfg, &raw mut ADC_HANDLE) };
    check(ret, HwInitError::AdcInitFailed)?;

    // The driver copies the pattern table, so a stack array is fine.
    let mut pattern = [adc_digi_pattern_config_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12 as u8,
        channel: pins::LDR_ADC_CHANNEL as u8,
        unit: adc_unit_t_ADC_UNIT_1 as u8,
        bit_width: adc_bitwidth_t_ADC_BITWIDTH_12 as u8,
    }];
    let cfg = adc_continuous_config_t {
        pattern_num: pattern.len() as u32,
        adc_pattern: pattern.as_mut_ptr(),
        sample_freq_hz: pins::LDR_SAMPLE_FREQ_HZ,
        conv_mode: adc_digi_convert_mode_t_ADC_CONV_SINGLE_UNIT_1,
        format: adc_digi_output_format_t_ADC_DIGI_OUTPUT_FORMAT_TYPE2,
    };
    check(unsafe { adc_continuous_config(adc_handle(), &cfg) }, HwInitError::AdcInitFailed)?;

    info!(
        "hw_init: ADC1 CH{} free-running at {} Hz, {} results/frame",
        pins::LDR_ADC_CHANNEL,
        pins::LDR_SAMPLE_FREQ_HZ,
        pins::ADC_RESULTS_PER_FRAME
    );
    Ok(())
}

// ── Conversion-complete interrupt ─────────────────────────────

/// Task woken by the ADC ISR.  Null until the interrupt is enabled.
#[cfg(target_os = "espidf")]
static NOTIFY_TASK: core::sync::atomic::AtomicPtr<tskTaskControlBlock> =
    core::sync::atomic::AtomicPtr::new(core::ptr::null_mut());

/// Runs in ISR context once per DMA frame.  Copies the newest result into
/// the reading cell and wakes the main task; nothing else.  The driver
/// acknowledges the DMA interrupt itself.
#[cfg(target_os = "espidf")]
unsafe extern "C" fn adc_conv_done_isr(
    _handle: adc_continuous_handle_t,
    edata: *const adc_continuous_evt_data_t,
    _user_data: *mut core::ffi::c_void,
) -> bool {
    // SAFETY: the driver passes a valid event whose buffer holds `size`
    // bytes for the duration of this callback.
    let frame = unsafe {
        let edata = &*edata;
        core::slice::from_raw_parts(edata.conv_frame_buffer, edata.size as usize)
    };
    if let Some(reading) = crate::sensors::light::decode_frame(frame, pins::LDR_ADC_CHANNEL) {
        crate::sensors::light::on_conversion_complete(reading);
    }

    let task = NOTIFY_TASK.load(Ordering::Acquire);
    if task.is_null() {
        return false;
    }
    // SAFETY: `task` is the main task handle, valid for the program's life.
    // Returns whether a higher-priority task woke; the driver yields on it.
    unsafe { esp_idf_hal::task::notify(task, core::num::NonZeroU32::MIN) }
}

/// Register the completion ISR and make the calling task its wake target.
/// Call from the task that will run the control loop.
#[cfg(target_os = "espidf")]
pub fn enable_conversion_interrupt() -> Result<(), HwInitError> {
    if let Some(task) = esp_idf_hal::task::current() {
        NOTIFY_TASK.store(task, Ordering::Release);
    }

    let cbs = adc_continuous_evt_cbs_t {
        on_conv_done: Some(adc_conv_done_isr),
        on_pool_ovf: None,
    };
    // SAFETY: handle initialised in init_adc(); the callback is a static fn
    // that only touches atomics.
    let ret = unsafe {
        adc_continuous_register_event_callbacks(adc_handle(), &cbs, core::ptr::null_mut())
    };
    check(ret, HwInitError::AdcCallbackFailed)?;
    info!("hw_init: ADC conversion-complete interrupt enabled");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn enable_conversion_interrupt() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): conversion interrupt simulated");
    Ok(())
}

/// Kick off free-running conversion.  No further commands are needed.
#[cfg(target_os = "espidf")]
pub fn start_conversions() -> Result<(), HwInitError> {
    // SAFETY: handle configured and callbacks registered beforehand.
    check(unsafe { adc_continuous_start(adc_handle()) }, HwInitError::AdcStartFailed)?;
    info!("hw_init: ADC conversions started");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn start_conversions() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): conversions driven by sim_complete_conversion()");
    Ok(())
}

// ── Wake-up ───────────────────────────────────────────────────

/// Block the calling task until the ADC ISR notifies it.  While blocked,
/// the FreeRTOS idle task parks the core in `waiti`.
#[cfg(target_os = "espidf")]
pub fn wait_for_notification() {
    let _ = esp_idf_hal::task::wait_notification(esp_idf_hal::delay::BLOCK);
}

#[cfg(not(target_os = "espidf"))]
static SIM_NOTIFIED: core::sync::atomic::AtomicBool = core::sync::atomic::AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
const SIM_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(1);

/// Host stand-in: polls a flag instead of sleeping on an interrupt.
#[cfg(not(target_os = "espidf"))]
pub fn wait_for_notification() {
    while !SIM_NOTIFIED.swap(false, Ordering::AcqRel) {
        std::thread::sleep(SIM_POLL_INTERVAL);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_raise_notification() {
    SIM_NOTIFIED.store(true, Ordering::Release);
}

// ── LEDC PWM ─────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    // SAFETY: Called from single main-task context via init_peripherals().
    let timer = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: pins::SERVO_LEDC_TIMER,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_12_BIT,
        freq_hz: config::PWM_FREQUENCY_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    check(unsafe { ledc_timer_config(&timer) }, HwInitError::LedcTimerFailed)?;

    let channel = ledc_channel_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        channel: pins::SERVO_LEDC_CHANNEL,
        timer_sel: pins::SERVO_LEDC_TIMER,
        gpio_num: pins::SERVO_PWM_GPIO,
        duty: 0,
        hpoint: 0,
        ..Default::default()
    };
    check(unsafe { ledc_channel_config(&channel) }, HwInitError::LedcChannelFailed)?;

    info!(
        "hw_init: LEDC servo on GPIO{} ({} Hz, {}-bit)",
        pins::SERVO_PWM_GPIO,
        config::PWM_FREQUENCY_HZ,
        config::PWM_RESOLUTION_BITS
    );
    Ok(())
}

/// ESP-IDF return code from a failed LEDC duty write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmError(pub i32);

impl embedded_hal::pwm::Error for PwmError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// One LEDC channel exposed through `embedded_hal::pwm::SetDutyCycle`.
pub struct LedcPwm {
    channel: u32,
    max_duty: u16,
}

impl LedcPwm {
    /// The servo channel set up by [`init_peripherals`].
    pub fn servo() -> Self {
        Self {
            channel: pins::SERVO_LEDC_CHANNEL,
            max_duty: config::PWM_PERIOD,
        }
    }

    pub fn channel(&self) -> u32 {
        self.channel
    }
}

impl ErrorType for LedcPwm {
    type Error = PwmError;
}

impl SetDutyCycle for LedcPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        ledc_set(self.channel, duty)
    }
}

#[cfg(target_os = "espidf")]
fn ledc_set(channel: u32, duty: u16) -> Result<(), PwmError> {
    // SAFETY: channel configured in init_ledc(); only the main loop writes.
    unsafe {
        let ret = ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty as u32);
        if ret != ESP_OK as i32 {
            return Err(PwmError(ret));
        }
        let ret = ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
        if ret != ESP_OK as i32 {
            return Err(PwmError(ret));
        }
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
static SIM_LEDC_DUTY: core::sync::atomic::AtomicU16 = core::sync::atomic::AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
fn ledc_set(_channel: u32, duty: u16) -> Result<(), PwmError> {
    SIM_LEDC_DUTY.store(duty, Ordering::Relaxed);
    Ok(())
}

/// Duty last written to the simulated servo channel.
#[cfg(not(target_os = "espidf"))]
pub fn sim_ledc_duty() -> u16 {
    SIM_LEDC_DUTY.load(Ordering::Relaxed)
}
