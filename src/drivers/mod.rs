//! Peripheral initialisation and the servo actuator driver.

pub mod hw_init;
pub mod servo;
