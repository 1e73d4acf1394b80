//! Application core: pure domain logic, zero I/O.
//!
//! The threshold decision and the wake → decide → suspend loop.  All
//! interaction with hardware happens through the port traits in
//! [`ports`].

pub mod controller;
pub mod events;
pub mod ports;
pub mod service;
