// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Minimum duration of the shoot-through guard delay.
///
/// This is the time a bridge switch needs to open physically before
/// the complementary switch of the same leg may close.
pub const SHOOT_THROUGH_GUARD_NS: u32 = 400;

/// Number of status indicator lines.
pub const STATUS_LINES: u8 = 4;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum AdcChannel {
    SolarVoltage,
    HeatsinkTemp,
}

impl AdcChannel {
    pub const fn select_next(self) -> Self {
        match self {
            Self::SolarVoltage => Self::HeatsinkTemp,
            Self::HeatsinkTemp => Self::SolarVoltage,
        }
    }
}

/// One arm of the H-bridge.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Leg {
    Left,
    Right,
}

/// Switch position within one leg.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
    High,
    Low,
}

impl Side {
    pub const fn complement(self) -> Self {
        match self {
            Self::High => Self::Low,
            Self::Low => Self::High,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutputPin {
    /// Bridge switch. Only driven by [crate::bridge::Bridge].
    Switch(Leg, Side),
    Fan,
    AuxRelay,
    MainRelay,
    /// Status indicator line `0..STATUS_LINES`.
    Status(u8),
}

/// Hardware capabilities used by the control loop.
///
/// Output levels are logical: `true` means switch closed, fan running,
/// relay energized or status line lit. Electrical polarity is up to
/// the implementation.
pub trait Board {
    /// Route an analog channel to the converter.
    fn adc_select(&mut self, chan: AdcChannel);

    /// Start one conversion on the selected channel.
    fn adc_start(&mut self);

    /// Check whether the running conversion has completed.
    fn adc_done(&mut self) -> bool;

    /// 8-bit result of the last completed conversion.
    fn adc_result(&mut self) -> u8;

    fn set_output(&mut self, pin: OutputPin, level: bool);

    /// Busy-wait for `ticks` times the configured tick period.
    ///
    /// The absolute duration must be exact. Time spent between
    /// consecutive calls must not shorten the next delay.
    fn delay_ticks(&mut self, ticks: u8);

    /// Busy-wait for at least [SHOOT_THROUGH_GUARD_NS].
    fn guard_delay(&mut self);

    fn acknowledge_watchdog(&mut self);
}

// vim: ts=4 sw=4 expandtab
