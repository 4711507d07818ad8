// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::hw::{F_CPU_MHZ, mcu};
use core::cmp::Ordering;

const TIMER_PRESCALE: u32 = 64;

/// 4 us per timer tick.
pub const TIMER_TICK_US: u8 = (TIMER_PRESCALE / F_CPU_MHZ) as u8;

/// 8 bit free running Timer 1 count.
#[derive(PartialEq, Eq, Copy, Clone)]
pub struct Timestamp(pub u8);

/// Distance between two [Timestamp]s.
#[derive(PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct RelTimestamp(pub i8);

impl RelTimestamp {
    #[inline]
    pub const fn from_micros(us: i32) -> Self {
        RelTimestamp((us / TIMER_TICK_US as i32) as i8)
    }
}

impl Ord for Timestamp {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        if self.0 == other.0 {
            Ordering::Equal
        } else if self.0.wrapping_sub(other.0) & 0x80 == 0 {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    }
}

impl PartialOrd for Timestamp {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl core::ops::Add<RelTimestamp> for Timestamp {
    type Output = Self;

    #[inline]
    fn add(self, other: RelTimestamp) -> Self::Output {
        Timestamp(self.0.wrapping_add(other.0 as u8))
    }
}

#[allow(non_snake_case)]
pub struct Timer {
    TC1: mcu::TC1,
}

impl Timer {
    pub fn new(tc1: mcu::TC1) -> Self {
        Self { TC1: tc1 }
    }

    #[rustfmt::skip]
    pub fn init(&self) {
        // Timer 1 configuration:
        // CS: 64 -> 4 us per timer tick.
        self.TC1.tc1h().write(|w| w);
        self.TC1.tcnt1().write(|w| w);
        self.TC1.tccr1a().write(|w| w);
        self.TC1.tccr1c().write(|w| w);
        self.TC1.tccr1d().write(|w| w);
        self.TC1.tccr1e().write(|w| w);
        self.TC1.ocr1c().write(|w| w.set(0xFF)); // TOP value
        self.TC1.dt1().write(|w| w);
        self.TC1.tccr1b().write(|w| w.cs1().prescale_64());
    }

    #[inline(always)]
    pub fn now(&self) -> Timestamp {
        Timestamp(self.TC1.tcnt1().read().bits())
    }

    /// Busy wait for `count` times `period`.
    ///
    /// Each period ends relative to the end of the previous one,
    /// so the loop overhead does not accumulate.
    pub fn delay(&self, period: RelTimestamp, count: u8) {
        let mut end = self.now();
        for _ in 0..count {
            end = end + period;
            while self.now() < end {}
        }
    }
}

// vim: ts=4 sw=4 expandtab
