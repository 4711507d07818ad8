// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    analog::SampledInputs,
    config::Config,
    hw::{Board, OutputPin},
};

/// Decide whether the heatsink fan shall run.
///
/// Recomputed from scratch every iteration. There is no hysteresis,
/// so near a threshold the fan may toggle from one cycle to the next.
pub fn wanted(inputs: &SampledInputs, on_ticks: u8, config: &Config) -> bool {
    inputs.solar_voltage > config.solar_stop_counts()
        && on_ticks > config.fan_min_on_ticks()
        && inputs.heatsink_temp > config.thermal_fan_counts()
}

pub fn set(board: &mut impl Board, on: bool) {
    board.set_output(OutputPin::Fan, on);
}

#[cfg(test)]
mod test {
    use super::*;

    fn inputs(solar_voltage: u8, heatsink_temp: u8) -> SampledInputs {
        SampledInputs {
            solar_voltage,
            heatsink_temp,
        }
    }

    #[test]
    fn test_conditions() {
        let c = Config::MAINS_50HZ;
        let hot = c.thermal_fan_counts() + 1;
        let on = c.fan_min_on_ticks() + 1;

        assert!(wanted(&inputs(200, hot), on, &c));
        assert!(!wanted(&inputs(c.solar_stop_counts(), hot), on, &c));
        assert!(!wanted(&inputs(200, hot), c.fan_min_on_ticks(), &c));
        assert!(!wanted(&inputs(200, c.thermal_fan_counts()), on, &c));
        assert!(!wanted(&inputs(200, hot), 0, &c));
    }

    #[test]
    fn test_no_history() {
        let c = Config::MAINS_50HZ;
        let hot = c.thermal_fan_counts() + 1;
        let cool = c.thermal_fan_counts();
        let probe = inputs(200, hot);

        let a = wanted(&probe, 40, &c);
        // Whatever happened in between, the same inputs give the same answer.
        assert!(!wanted(&inputs(200, cool), 40, &c));
        assert!(wanted(&inputs(200, hot), 60, &c));
        let b = wanted(&probe, 40, &c);
        assert_eq!(a, b);
        assert!(a);
    }
}

// vim: ts=4 sw=4 expandtab
