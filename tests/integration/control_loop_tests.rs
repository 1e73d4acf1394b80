//! Integration tests for the sampler → ControlLoop → servo pipeline.
//!
//! Readings enter through the same cell the ADC interrupt publishes to;
//! decisions leave as recorded servo commands.

use crate::mock_hw::{MockHardware, MockWake, RecordingSink};

use dinojumper::app::controller::ActuatorTarget::{Engaged, Released};
use dinojumper::app::events::AppEvent;
use dinojumper::app::ports::WakePort;
use dinojumper::app::service::ControlLoop;
use dinojumper::config::ControlConfig;

fn make_loop() -> (ControlLoop, MockHardware, RecordingSink) {
    let mut app = ControlLoop::new(ControlConfig::with_threshold(700));
    let hw = MockHardware::new();
    let mut sink = RecordingSink::default();
    app.start(&hw, &mut sink);
    (app, hw, sink)
}

#[test]
fn reading_just_below_threshold_presses() {
    let (mut app, mut hw, mut sink) = make_loop();
    hw.fire_conversion(699);
    assert_eq!(app.step(&mut hw, &mut sink), Engaged);
    assert_eq!(hw.last_command(), Some(Engaged));
}

#[test]
fn reading_at_threshold_releases() {
    let (mut app, mut hw, mut sink) = make_loop();
    hw.fire_conversion(700);
    assert_eq!(app.step(&mut hw, &mut sink), Released);
    assert_eq!(hw.last_command(), Some(Released));
    assert!(sink.changes().is_empty());
}

#[test]
fn wake_cycles_follow_reading_sequence() {
    let (mut app, mut hw, mut sink) = make_loop();
    let mut wake = MockWake::default();

    let mut targets = Vec::new();
    for reading in [800, 650, 750] {
        hw.fire_conversion(reading);
        targets.push(app.step(&mut hw, &mut sink));
        wake.wait_for_sample();
    }

    assert_eq!(targets, [Released, Engaged, Released]);
    assert_eq!(hw.commands, [Released, Engaged, Released]);
    assert_eq!(sink.changes(), [(Released, Engaged), (Engaged, Released)]);
    assert_eq!(wake.waits, 3);
    assert_eq!(app.cycles(), 3);
}

#[test]
fn no_conversion_ever_keeps_servo_pressed() {
    let (mut app, mut hw, mut sink) = make_loop();

    for _ in 0..5 {
        assert_eq!(app.step(&mut hw, &mut sink), Engaged);
    }

    assert_eq!(hw.commands, [Engaged; 5]);
    assert_eq!(sink.changes(), [(Released, Engaged)]);
    assert_eq!(hw.cell.conversions(), 0);
}

#[test]
fn only_newest_of_several_conversions_is_acted_on() {
    let (mut app, mut hw, mut sink) = make_loop();

    // Three interrupts land while the loop is suspended.
    for reading in [100, 900, 650] {
        hw.fire_conversion(reading);
    }
    assert_eq!(app.step(&mut hw, &mut sink), Engaged);
    assert_eq!(hw.commands, [Engaged]);
    assert_eq!(hw.cell.conversions(), 3);
}

#[test]
fn chatter_at_threshold_is_passed_through() {
    let (mut app, mut hw, mut sink) = make_loop();

    for reading in [699, 700, 699, 700] {
        hw.fire_conversion(reading);
        app.step(&mut hw, &mut sink);
    }

    assert_eq!(hw.commands, [Engaged, Released, Engaged, Released]);
    assert_eq!(sink.changes().len(), 4);
}

#[test]
fn started_event_precedes_changes() {
    let (mut app, mut hw, mut sink) = make_loop();
    hw.fire_conversion(10);
    app.step(&mut hw, &mut sink);

    assert_eq!(
        sink.events[0],
        AppEvent::Started {
            threshold: 700,
            target: Released
        }
    );
    assert_eq!(
        sink.events[1],
        AppEvent::TargetChanged {
            from: Released,
            to: Engaged,
            reading: 10
        }
    );
}
