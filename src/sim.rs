// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated hardware backend.
//!
//! Keeps a simulated clock, records every hardware access in an event log
//! and checks the bridge switching rules while doing so.

use crate::{
    bridge::BridgeOutputs,
    config::Config,
    hw::{AdcChannel, Board, Leg, OutputPin, SHOOT_THROUGH_GUARD_NS, STATUS_LINES, Side},
};
use derive_more::{Add, AddAssign, Sub};

#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Debug, Add, Sub, AddAssign)]
pub struct Nanos(pub u64);

impl Nanos {
    pub const fn from_micros(us: u64) -> Self {
        Self(us * 1_000)
    }

    pub const fn from_millis(ms: u64) -> Self {
        Self(ms * 1_000_000)
    }

    pub const fn as_micros(self) -> u64 {
        self.0 / 1_000
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Event {
    WatchdogAck { at: Nanos },
    Sample { chan: AdcChannel, value: u8, at: Nanos },
    Output { pin: OutputPin, level: bool, at: Nanos },
    Guard { at: Nanos },
    Delay { ticks: u8, at: Nanos },
}

pub const EVENT_CAPACITY: usize = 128;

const fn switch_index(leg: Leg, side: Side) -> usize {
    match (leg, side) {
        (Leg::Left, Side::High) => 0,
        (Leg::Left, Side::Low) => 1,
        (Leg::Right, Side::High) => 2,
        (Leg::Right, Side::Low) => 3,
    }
}

pub struct SimBoard {
    now: Nanos,
    tick: Nanos,
    analog: [u8; 2],
    selected: Option<AdcChannel>,
    converting: Option<(AdcChannel, Nanos)>,
    result: u8,
    result_chan: AdcChannel,
    unselected_conversions: u32,
    bridge: BridgeOutputs,
    opened_at: [Option<Nanos>; 4],
    shoot_throughs: u32,
    guard_violations: u32,
    fan: bool,
    aux_relay: bool,
    main_relay: bool,
    status: [bool; STATUS_LINES as usize],
    last_ack: Option<Nanos>,
    max_ack_interval: Nanos,
    events: heapless::Vec<Event, EVENT_CAPACITY>,
    events_dropped: bool,
}

impl SimBoard {
    /// Duration of one analog conversion.
    pub const CONVERSION_TIME: Nanos = Nanos::from_micros(104);
    /// Time consumed by one conversion-done poll.
    pub const POLL_TIME: Nanos = Nanos(500);

    pub fn new(config: &Config) -> Self {
        Self {
            now: Nanos(0),
            tick: Nanos::from_micros(config.tick_period_us().into()),
            analog: [0; 2],
            selected: None,
            converting: None,
            result: 0,
            result_chan: AdcChannel::SolarVoltage,
            unselected_conversions: 0,
            bridge: BridgeOutputs::default(),
            opened_at: [None; 4],
            shoot_throughs: 0,
            guard_violations: 0,
            fan: false,
            aux_relay: false,
            main_relay: false,
            status: [false; STATUS_LINES as usize],
            last_ack: None,
            max_ack_interval: Nanos(0),
            events: heapless::Vec::new(),
            events_dropped: false,
        }
    }

    fn record(&mut self, event: Event) {
        if self.events.push(event).is_err() {
            self.events_dropped = true;
        }
    }

    /// Set the value the next conversion of `chan` returns.
    pub fn set_analog(&mut self, chan: AdcChannel, value: u8) {
        self.analog[chan as usize] = value;
    }

    pub fn now(&self) -> Nanos {
        self.now
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
        self.events_dropped = false;
    }

    /// The event log overflowed since the last [Self::clear_events].
    pub fn events_dropped(&self) -> bool {
        self.events_dropped
    }

    pub fn output(&self, pin: OutputPin) -> bool {
        match pin {
            OutputPin::Switch(leg, side) => self.bridge.get(leg, side),
            OutputPin::Fan => self.fan,
            OutputPin::AuxRelay => self.aux_relay,
            OutputPin::MainRelay => self.main_relay,
            OutputPin::Status(line) => self.status.get(line as usize).copied().unwrap_or(false),
        }
    }

    pub fn bridge(&self) -> &BridgeOutputs {
        &self.bridge
    }

    /// Number of times both switches of one leg were closed at once.
    pub fn shoot_throughs(&self) -> u32 {
        self.shoot_throughs
    }

    /// Number of switch closures less than the guard time after
    /// the complementary switch opened.
    pub fn guard_violations(&self) -> u32 {
        self.guard_violations
    }

    /// Number of conversions started without a selected channel.
    pub fn unselected_conversions(&self) -> u32 {
        self.unselected_conversions
    }

    /// Longest time between two watchdog acknowledgments.
    pub fn max_watchdog_interval(&self) -> Nanos {
        self.max_ack_interval
    }

    fn set_switch(&mut self, leg: Leg, side: Side, level: bool) {
        let index = switch_index(leg, side);
        if level {
            let complement = side.complement();
            if self.bridge.get(leg, complement) {
                self.shoot_throughs += 1;
            } else if let Some(opened) = self.opened_at[switch_index(leg, complement)]
                && self.now - opened < Nanos(SHOOT_THROUGH_GUARD_NS.into())
            {
                self.guard_violations += 1;
            }
        } else if self.bridge.get(leg, side) || self.opened_at[index].is_none() {
            self.opened_at[index] = Some(self.now);
        }
        self.bridge.set(leg, side, level);
    }
}

impl Board for SimBoard {
    fn adc_select(&mut self, chan: AdcChannel) {
        self.selected = Some(chan);
    }

    fn adc_start(&mut self) {
        match self.selected {
            Some(chan) => {
                self.converting = Some((chan, self.now + Self::CONVERSION_TIME));
            }
            None => {
                self.unselected_conversions += 1;
                self.converting = Some((AdcChannel::SolarVoltage, self.now));
            }
        }
    }

    fn adc_done(&mut self) -> bool {
        self.now += Self::POLL_TIME;
        match self.converting {
            Some((chan, end)) if self.now >= end => {
                self.result = self.analog[chan as usize];
                self.result_chan = chan;
                self.converting = None;
                true
            }
            Some(_) => false,
            None => true,
        }
    }

    fn adc_result(&mut self) -> u8 {
        self.record(Event::Sample {
            chan: self.result_chan,
            value: self.result,
            at: self.now,
        });
        self.result
    }

    fn set_output(&mut self, pin: OutputPin, level: bool) {
        self.record(Event::Output {
            pin,
            level,
            at: self.now,
        });
        match pin {
            OutputPin::Switch(leg, side) => self.set_switch(leg, side, level),
            OutputPin::Fan => self.fan = level,
            OutputPin::AuxRelay => self.aux_relay = level,
            OutputPin::MainRelay => self.main_relay = level,
            OutputPin::Status(line) => {
                if let Some(status) = self.status.get_mut(line as usize) {
                    *status = level;
                }
            }
        }
    }

    fn delay_ticks(&mut self, ticks: u8) {
        self.record(Event::Delay { ticks, at: self.now });
        self.now += Nanos(self.tick.0 * u64::from(ticks));
    }

    fn guard_delay(&mut self) {
        self.record(Event::Guard { at: self.now });
        self.now += Nanos(SHOOT_THROUGH_GUARD_NS.into());
    }

    fn acknowledge_watchdog(&mut self) {
        self.record(Event::WatchdogAck { at: self.now });
        if let Some(last) = self.last_ack {
            let interval = self.now - last;
            if interval > self.max_ack_interval {
                self.max_ack_interval = interval;
            }
        }
        self.last_ack = Some(self.now);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_detects_shoot_through() {
        let mut board = SimBoard::new(&Config::MAINS_50HZ);
        board.set_output(OutputPin::Switch(Leg::Left, Side::High), true);
        board.set_output(OutputPin::Switch(Leg::Left, Side::Low), true);
        assert_eq!(board.shoot_throughs(), 1);
        assert!(board.bridge().is_shoot_through());
    }

    #[test]
    fn test_detects_missing_guard() {
        let mut board = SimBoard::new(&Config::MAINS_50HZ);
        board.set_output(OutputPin::Switch(Leg::Right, Side::Low), true);
        board.set_output(OutputPin::Switch(Leg::Right, Side::Low), false);
        board.set_output(OutputPin::Switch(Leg::Right, Side::High), true);
        assert_eq!(board.shoot_throughs(), 0);
        assert_eq!(board.guard_violations(), 1);

        board.set_output(OutputPin::Switch(Leg::Right, Side::High), false);
        board.guard_delay();
        board.set_output(OutputPin::Switch(Leg::Right, Side::Low), true);
        assert_eq!(board.guard_violations(), 1);
    }

    #[test]
    fn test_delay_time() {
        let mut board = SimBoard::new(&Config::MAINS_50HZ);
        board.delay_ticks(67);
        assert_eq!(board.now(), Nanos::from_micros(6_700));
        board.delay_ticks(0);
        assert_eq!(board.now(), Nanos::from_micros(6_700));
    }

    #[test]
    fn test_unselected_conversion() {
        let mut board = SimBoard::new(&Config::MAINS_50HZ);
        board.adc_start();
        assert!(board.adc_done());
        assert_eq!(board.unselected_conversions(), 1);
    }

    #[test]
    fn test_event_overflow() {
        let mut board = SimBoard::new(&Config::MAINS_50HZ);
        for _ in 0..EVENT_CAPACITY + 1 {
            board.guard_delay();
        }
        assert!(board.events_dropped());
        assert_eq!(board.events().len(), EVENT_CAPACITY);
        board.clear_events();
        assert!(!board.events_dropped());
    }
}

// vim: ts=4 sw=4 expandtab
