//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                      |
//! |------------|--------------|----------------------------------|
//! | `hardware` | SensorPort   | ADC reading cell                 |
//! |            | ActuatorPort | Servo on LEDC PWM                |
//! | `wake`     | WakePort     | ADC ISR task notification        |
//! | `log_sink` | EventSink    | Serial log output                |

pub mod hardware;
pub mod log_sink;
pub mod wake;
