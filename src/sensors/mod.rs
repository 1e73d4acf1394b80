//! Sensor subsystem.
//!
//! A single analog input: the photoresistor read through the free-running
//! ADC.  The interrupt side publishes into a lock-free cell; the main loop
//! samples it through [`light::LightSensor`].

pub mod light;
