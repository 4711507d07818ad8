// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::hw::mcu;
use solarinv::hw::AdcChannel;

#[allow(non_snake_case)]
pub struct Adc {
    ADC: mcu::ADC,
}

impl Adc {
    pub fn new(adc: mcu::ADC) -> Self {
        Self { ADC: adc }
    }

    #[rustfmt::skip]
    pub fn init(&self) {
        // Digital input buffers off on the analog pins.
        self.ADC.didr0().write(|w| {
            w.adc0d().set_bit()
             .adc1d().set_bit()
        });
        self.ADC.adcsra().write(|w| {
            w.adps().prescaler_128()
             .adie().clear_bit()
             .adif().set_bit()
             .adsc().clear_bit()
             .aden().set_bit()
        });
    }

    pub fn select(&self, chan: AdcChannel) {
        match chan {
            AdcChannel::SolarVoltage => {
                self.ADC.admux().write(|w| w.refs().vcc().mux().adc0());
            }
            AdcChannel::HeatsinkTemp => {
                self.ADC.admux().write(|w| w.refs().vcc().mux().adc1());
            }
        }
    }

    #[rustfmt::skip]
    #[inline]
    pub fn start(&self) {
        self.ADC.adcsra().modify(|_, w| {
            w.adif().set_bit()
             .adsc().set_bit()
        });
    }

    #[inline]
    pub fn done(&self) -> bool {
        self.ADC.adcsra().read().adif().bit_is_set()
    }

    /// Upper 8 bits of the 10 bit conversion result.
    #[inline]
    pub fn result(&self) -> u8 {
        (self.ADC.adc().read().bits() >> 2) as u8
    }
}

// vim: ts=4 sw=4 expandtab
