// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use derive_more::Display;

/// Delivered energy proxy: on-ticks summed once per full cycle.
///
/// Never decreases and is never reset while the system runs.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Debug, Display)]
pub struct Energy(u32);

impl Energy {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub fn accumulate(&mut self, on_ticks: u8) {
        self.0 = self.0.saturating_add(on_ticks.into());
    }

    pub const fn exceeds(self, limit: u32) -> bool {
        self.0 > limit
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_accumulate() {
        let mut e = Energy::default();
        e.accumulate(0);
        assert_eq!(e.value(), 0);
        e.accumulate(67);
        e.accumulate(67);
        assert_eq!(e.value(), 134);
    }

    #[test]
    fn test_monotonic_at_ceiling() {
        let mut e = Energy::new(u32::MAX - 10);
        let mut prev = e;
        for _ in 0..5 {
            e.accumulate(67);
            assert!(e >= prev);
            prev = e;
        }
        assert_eq!(e.value(), u32::MAX);
    }

    #[test]
    fn test_exceeds() {
        assert!(!Energy::new(1000).exceeds(1000));
        assert!(Energy::new(1001).exceeds(1000));
        assert!(!Energy::new(999).exceeds(1000));
    }

    #[test]
    fn test_display() {
        use core::fmt::Write as _;
        let mut s: heapless::String<16> = heapless::String::new();
        write!(s, "{}", Energy::new(12345)).unwrap();
        assert_eq!(s.as_str(), "12345");
    }
}

// vim: ts=4 sw=4 expandtab
