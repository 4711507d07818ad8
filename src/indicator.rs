// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    config::Config,
    hw::{Board, OutputPin, STATUS_LINES},
};

/// Duty cycle shown on the status bar graph.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum DutyLevel {
    Off = 0,
    Low,
    Mid,
    High,
    Full,
}

impl DutyLevel {
    pub const fn from_duty(on_ticks: u8, duty_max: u8) -> Self {
        let on = on_ticks as u16;
        let max = duty_max as u16;
        if on_ticks == duty_max {
            Self::Full
        } else if on > (max * 3) / 4 {
            Self::High
        } else if on > (max * 2) / 4 {
            Self::Mid
        } else if on > max / 4 {
            Self::Low
        } else {
            Self::Off
        }
    }

    /// Number of lit status lines.
    pub const fn lit(self) -> u8 {
        self as u8
    }
}

/// Show the duty level on the status lines.
pub fn update(board: &mut impl Board, on_ticks: u8, config: &Config) -> DutyLevel {
    let level = DutyLevel::from_duty(on_ticks, config.duty_max());
    for line in 0..STATUS_LINES {
        board.set_output(OutputPin::Status(line), line < level.lit());
    }
    level
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sim::SimBoard;

    #[test]
    fn test_levels() {
        // duty_max 67: 1/4 -> 16, 2/4 -> 33, 3/4 -> 50
        assert_eq!(DutyLevel::from_duty(0, 67), DutyLevel::Off);
        assert_eq!(DutyLevel::from_duty(16, 67), DutyLevel::Off);
        assert_eq!(DutyLevel::from_duty(17, 67), DutyLevel::Low);
        assert_eq!(DutyLevel::from_duty(33, 67), DutyLevel::Low);
        assert_eq!(DutyLevel::from_duty(34, 67), DutyLevel::Mid);
        assert_eq!(DutyLevel::from_duty(50, 67), DutyLevel::Mid);
        assert_eq!(DutyLevel::from_duty(51, 67), DutyLevel::High);
        assert_eq!(DutyLevel::from_duty(66, 67), DutyLevel::High);
        assert_eq!(DutyLevel::from_duty(67, 67), DutyLevel::Full);
    }

    #[test]
    fn test_monotonic() {
        let mut prev = DutyLevel::Off;
        for on in 0..=55 {
            let level = DutyLevel::from_duty(on, 55);
            assert!(level >= prev);
            prev = level;
        }
        assert_eq!(prev, DutyLevel::Full);
    }

    #[test]
    fn test_bar_graph() {
        let c = Config::MAINS_50HZ;
        let mut board = SimBoard::new(&c);

        assert_eq!(update(&mut board, 40, &c), DutyLevel::Mid);
        assert!(board.output(OutputPin::Status(0)));
        assert!(board.output(OutputPin::Status(1)));
        assert!(!board.output(OutputPin::Status(2)));
        assert!(!board.output(OutputPin::Status(3)));

        assert_eq!(update(&mut board, c.duty_max(), &c), DutyLevel::Full);
        for line in 0..STATUS_LINES {
            assert!(board.output(OutputPin::Status(line)));
        }

        assert_eq!(update(&mut board, 0, &c), DutyLevel::Off);
        for line in 0..STATUS_LINES {
            assert!(!board.output(OutputPin::Status(line)));
        }
    }
}

// vim: ts=4 sw=4 expandtab
