// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::hw::{AdcChannel, Board};

/// Most recent readings of both analog channels.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct SampledInputs {
    pub solar_voltage: u8,
    pub heatsink_temp: u8,
}

impl SampledInputs {
    pub fn store(&mut self, chan: AdcChannel, value: u8) {
        match chan {
            AdcChannel::SolarVoltage => self.solar_voltage = value,
            AdcChannel::HeatsinkTemp => self.heatsink_temp = value,
        }
    }
}

/// Blocking sampler in front of the shared analog converter.
pub struct Sampler {
    /// Channel currently routed to the converter. None until the first select.
    chan: Option<AdcChannel>,
}

impl Sampler {
    pub const fn new() -> Self {
        Self { chan: None }
    }

    /// Preselect the solar voltage channel for the first conversion.
    pub fn init(&mut self, board: &mut impl Board) {
        self.select(board, AdcChannel::SolarVoltage);
    }

    fn select(&mut self, board: &mut impl Board, chan: AdcChannel) {
        board.adc_select(chan);
        self.chan = Some(chan);
    }

    /// Currently selected channel.
    pub fn selected(&self) -> Option<AdcChannel> {
        self.chan
    }

    /// Convert one channel and wait for the result.
    ///
    /// Afterwards the other channel is selected,
    /// so that the multiplexer has settled before its next conversion.
    pub fn sample(&mut self, board: &mut impl Board, chan: AdcChannel) -> u8 {
        if self.chan != Some(chan) {
            self.select(board, chan);
        }
        board.adc_start();
        while !board.adc_done() {}
        let value = board.adc_result();
        self.select(board, chan.select_next());
        value
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}


// vim: ts=4 sw=4 expandtab
