//! Wake source adapter: suspends the control loop between samples.
//!
//! On ESP-IDF the main task blocks on a FreeRTOS task notification sent
//! by the ADC conversion-complete ISR.  With the only application task
//! blocked, the idle task halts the core in `waiti` until the next
//! interrupt: the lowest wait state that still services the ADC.
//!
//! On host/test there is no interrupt; the wait polls a simulated
//! notification flag instead, which is a deliberate deviation from the
//! interrupt-driven contract.

use log::info;

use crate::app::ports::WakePort;
use crate::drivers::hw_init;

/// Wait modes the firmware can select between samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitMode {
    /// Core halted, peripherals and interrupts live.
    Idle,
}

pub struct NotificationWake {
    mode: WaitMode,
    wakes: u64,
}

impl NotificationWake {
    /// Select the wait mode.  Call after conversions have started.
    pub fn idle() -> Self {
        info!("Wake: idle wait on ADC notification");
        Self {
            mode: WaitMode::Idle,
            wakes: 0,
        }
    }

    pub fn mode(&self) -> WaitMode {
        self.mode
    }

    /// Times the loop has been woken.
    pub fn wakes(&self) -> u64 {
        self.wakes
    }
}

impl WakePort for NotificationWake {
    fn wait_for_sample(&mut self) {
        hw_init::wait_for_notification();
        self.wakes += 1;
    }
}
