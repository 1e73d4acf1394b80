//! Threshold decision: light reading in, servo target out.
//!
//! Level-triggered and stateless.  There is deliberately no hysteresis
//! band: a reading hovering at the threshold flips the target on every
//! evaluation.

use crate::config::{ControlConfig, Polarity};
use crate::sensors::light::Reading;

/// Commanded servo position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorTarget {
    /// Pressing the key.
    Engaged,
    /// Resting off the key.
    Released,
}

/// Map a reading to a target.
///
/// A reading equal to the threshold is never a trigger, whatever the
/// polarity, so ties always release.
pub fn decide(reading: Reading, config: &ControlConfig) -> ActuatorTarget {
    let triggered = match config.polarity {
        Polarity::DarkBackground => reading < config.threshold,
        Polarity::LightBackground => reading > config.threshold,
    };
    if triggered {
        ActuatorTarget::Engaged
    } else {
        ActuatorTarget::Released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DARK_700: ControlConfig = ControlConfig::with_threshold(700);

    #[test]
    fn below_threshold_engages() {
        assert_eq!(decide(699, &DARK_700), ActuatorTarget::Engaged);
    }

    #[test]
    fn at_threshold_releases() {
        assert_eq!(decide(700, &DARK_700), ActuatorTarget::Released);
    }

    #[test]
    fn sequence_follows_each_reading() {
        let targets: Vec<_> = [800, 650, 750]
            .into_iter()
            .map(|r| decide(r, &DARK_700))
            .collect();
        assert_eq!(
            targets,
            [
                ActuatorTarget::Released,
                ActuatorTarget::Engaged,
                ActuatorTarget::Released
            ]
        );
    }

    #[test]
    fn initial_zero_reading_engages() {
        assert_eq!(decide(0, &DARK_700), ActuatorTarget::Engaged);
    }

    #[test]
    fn full_scale_reading_releases() {
        assert_eq!(decide(1023, &DARK_700), ActuatorTarget::Released);
    }

    #[test]
    fn chatters_across_threshold() {
        let seq: Vec<_> = [699, 700, 699, 700]
            .into_iter()
            .map(|r| decide(r, &DARK_700))
            .collect();
        assert_eq!(
            seq,
            [
                ActuatorTarget::Engaged,
                ActuatorTarget::Released,
                ActuatorTarget::Engaged,
                ActuatorTarget::Released
            ]
        );
    }

    #[test]
    fn light_background_flips_polarity() {
        let cfg = ControlConfig::new(300, Polarity::LightBackground, 0xFF, 0xDC);
        assert_eq!(decide(301, &cfg), ActuatorTarget::Engaged);
        assert_eq!(decide(300, &cfg), ActuatorTarget::Released);
        assert_eq!(decide(0, &cfg), ActuatorTarget::Released);
    }
}
