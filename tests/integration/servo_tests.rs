//! Integration tests for the hardware adapter over the simulated LEDC
//! channel.  This binary is the only writer of the simulated duty.

use dinojumper::adapters::hardware::HardwareAdapter;
use dinojumper::app::controller::ActuatorTarget;
use dinojumper::app::ports::{ActuatorPort, SensorPort};
use dinojumper::app::service::ControlLoop;
use dinojumper::config::{ControlConfig, SERVO_ENGAGED_DUTY, SERVO_RELEASED_DUTY};
use dinojumper::drivers::hw_init::{self, LedcPwm};
use dinojumper::drivers::servo::ServoDriver;
use dinojumper::sensors::light::{LATEST_READING, LightSensor, sim_complete_conversion};

use crate::mock_hw::RecordingSink;

#[test]
fn sim_bring_up_drives_ledc_duty() {
    hw_init::init_peripherals().unwrap();
    let servo = ServoDriver::new(LedcPwm::servo(), ControlConfig::BUILD).unwrap();
    assert_eq!(hw_init::sim_ledc_duty(), SERVO_RELEASED_DUTY);
    hw_init::enable_conversion_interrupt().unwrap();
    hw_init::start_conversions().unwrap();

    let mut hw = HardwareAdapter::new(LightSensor::new(&LATEST_READING), servo);
    let mut app = ControlLoop::new(ControlConfig::with_threshold(700));
    let mut sink = RecordingSink::default();
    app.start(&hw, &mut sink);

    sim_complete_conversion(120);
    assert_eq!(hw.latest_reading(), 120);
    app.step(&mut hw, &mut sink);
    assert_eq!(hw.target(), ActuatorTarget::Engaged);
    assert_eq!(hw_init::sim_ledc_duty(), SERVO_ENGAGED_DUTY);

    sim_complete_conversion(1000);
    app.step(&mut hw, &mut sink);
    assert_eq!(hw.target(), ActuatorTarget::Released);
    assert_eq!(hw_init::sim_ledc_duty(), SERVO_RELEASED_DUTY);
}
