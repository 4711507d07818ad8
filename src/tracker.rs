// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Solar hill-climb duty tracking.
//!
//! The duty cycle moves by one tick every 16 iterations: up while the
//! solar voltage holds at or above the start threshold, down while it
//! sags below. The slow rate keeps the output free of flicker and
//! audible steps and avoids hunting around the maximum power point.

use crate::{config::Config, system::ControlState};

/// The tracker steps when these bits of the cycle counter are all zero.
const STEP_INTERVAL_MASK: u8 = 0x0F;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TrackStep {
    /// Not a stepping iteration.
    NotDue,
    Up,
    Down,
    /// Stepping iteration, but already at the limit.
    Hold,
}

pub fn run(state: &mut ControlState, solar_voltage: u8, config: &Config) -> TrackStep {
    state.cycle_counter = state.cycle_counter.wrapping_add(1);
    if state.cycle_counter & STEP_INTERVAL_MASK != 0 {
        return TrackStep::NotDue;
    }

    if solar_voltage < config.solar_start_counts() {
        if state.on_ticks > 0 {
            state.on_ticks -= 1;
            TrackStep::Down
        } else {
            TrackStep::Hold
        }
    } else if state.on_ticks < config.duty_max() {
        state.on_ticks += 1;
        TrackStep::Up
    } else {
        TrackStep::Hold
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SUNNY: u8 = 200;
    const CLOUDY: u8 = 100;

    #[test]
    fn test_step_every_16() {
        let c = Config::MAINS_50HZ;
        let mut s = ControlState::default();

        for i in 1..=16 * 5 {
            let step = run(&mut s, SUNNY, &c);
            if i % 16 == 0 {
                assert_eq!(step, TrackStep::Up);
            } else {
                assert_eq!(step, TrackStep::NotDue);
            }
        }
        assert_eq!(s.on_ticks, 5);
    }

    #[test]
    fn test_max_one_step_per_16() {
        let c = Config::MAINS_50HZ;
        let mut s = ControlState::default();
        let mut prev = s.on_ticks;
        let mut last_change = 0_u32;
        for i in 1..=2000_u32 {
            let solar = if (i / 300) % 2 == 0 { SUNNY } else { CLOUDY };
            run(&mut s, solar, &c);
            if s.on_ticks != prev {
                assert_eq!(s.on_ticks.abs_diff(prev), 1);
                assert!(last_change == 0 || i - last_change >= 16);
                last_change = i;
                prev = s.on_ticks;
            }
        }
    }

    #[test]
    fn test_clamp_high() {
        let c = Config::MAINS_50HZ;
        let mut s = ControlState::default();
        for _ in 0..16 * 200 {
            run(&mut s, SUNNY, &c);
        }
        assert_eq!(s.on_ticks, c.duty_max());
        for _ in 0..15 {
            run(&mut s, SUNNY, &c);
        }
        assert_eq!(run(&mut s, SUNNY, &c), TrackStep::Hold);
        assert_eq!(s.on_ticks, c.duty_max());
    }

    #[test]
    fn test_clamp_low() {
        let c = Config::MAINS_50HZ;
        let mut s = ControlState {
            on_ticks: 2,
            ..Default::default()
        };
        for _ in 0..16 * 3 {
            run(&mut s, CLOUDY, &c);
        }
        assert_eq!(s.on_ticks, 0);
        for _ in 0..16 * 3 {
            run(&mut s, CLOUDY, &c);
        }
        assert_eq!(s.on_ticks, 0);
    }

    #[test]
    fn test_start_threshold_counts_as_sunny() {
        let c = Config::MAINS_50HZ;
        let mut s = ControlState {
            cycle_counter: 15,
            ..Default::default()
        };
        assert_eq!(run(&mut s, c.solar_start_counts(), &c), TrackStep::Up);
        s.cycle_counter = 15;
        assert_eq!(run(&mut s, c.solar_start_counts() - 1, &c), TrackStep::Down);
    }

    #[test]
    fn test_counter_wraps() {
        let c = Config::MAINS_50HZ;
        let mut s = ControlState {
            cycle_counter: 255,
            ..Default::default()
        };
        assert_eq!(run(&mut s, SUNNY, &c), TrackStep::Up);
        assert_eq!(s.cycle_counter, 0);
    }
}

// vim: ts=4 sw=4 expandtab
