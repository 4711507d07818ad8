// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::hw::mcu;

#[rustfmt::skip]
macro_rules! impl_port {
    (
        $struct:ident,
        $name:ident,
        $port:ident,
        $bit0:ident,
        $bit1:ident,
        $bit2:ident,
        $bit3:ident,
        $bit4:ident,
        $bit5:ident,
        $bit6:ident,
        $bit7:ident
    ) => {
        #[allow(non_snake_case)]
        pub struct $struct {
            pub $name: mcu::$name,
        }

        impl $struct {
            pub fn new($name: mcu::$name) -> Self {
                Self { $name }
            }

            #[inline(always)]
            pub fn set(&self, bit: usize, value: bool) {
                match bit {
                    0 => self.$name.$port().modify(|_, w| w.$bit0().bit(value)),
                    1 => self.$name.$port().modify(|_, w| w.$bit1().bit(value)),
                    2 => self.$name.$port().modify(|_, w| w.$bit2().bit(value)),
                    3 => self.$name.$port().modify(|_, w| w.$bit3().bit(value)),
                    4 => self.$name.$port().modify(|_, w| w.$bit4().bit(value)),
                    5 => self.$name.$port().modify(|_, w| w.$bit5().bit(value)),
                    6 => self.$name.$port().modify(|_, w| w.$bit6().bit(value)),
                    7 => self.$name.$port().modify(|_, w| w.$bit7().bit(value)),
                    _ => unreachable!(),
                };
            }
        }
    };
}

impl_port!(PortA, PORTA, porta, pa0, pa1, pa2, pa3, pa4, pa5, pa6, pa7);
impl_port!(PortB, PORTB, portb, pb0, pb1, pb2, pb3, pb4, pb5, pb6, pb7);

/// Bit of the first status line on PORTA.
pub const PA_STATUS0: usize = 2;
pub const PA_AUX_RELAY: usize = 6;
pub const PA_MAIN_RELAY: usize = 7;

pub const PB_RIGHT_LOW: usize = 0;
pub const PB_RIGHT_HIGH: usize = 1;
pub const PB_LEFT_HIGH: usize = 2;
pub const PB_LEFT_LOW: usize = 3;
pub const PB_FAN: usize = 6;

fn pin_input(_bit: usize) -> u8 {
    0
}
fn pin_output(bit: usize) -> u8 {
    1 << bit
}
fn pin_low(_bit: usize) -> u8 {
    0
}
fn pin_high(bit: usize) -> u8 {
    1 << bit
}
fn pin_floating(_bit: usize) -> u8 {
    0
}

impl PortA {
    pub fn setup(&self) {
        // SAFETY: Called once during init, before the control loop runs.
        unsafe {
            self.PORTA.porta().write(|w| {
                w.bits(
                    pin_floating(0) | // solar voltage, single ended ADC
                    pin_floating(1) | // heatsink temperature, single ended ADC
                    pin_high(2) | // status 0, active low
                    pin_high(3) | // status 1, active low
                    pin_high(4) | // status 2, active low
                    pin_high(5) | // status 3, active low
                    pin_low(6) | // AC aux relay
                    pin_low(7), // AC main relay
                )
            });
            self.PORTA.ddra().write(|w| {
                w.bits(
                    pin_input(0) | // solar voltage, single ended ADC
                    pin_input(1) | // heatsink temperature, single ended ADC
                    pin_output(2) | // status 0, active low
                    pin_output(3) | // status 1, active low
                    pin_output(4) | // status 2, active low
                    pin_output(5) | // status 3, active low
                    pin_output(6) | // AC aux relay
                    pin_output(7), // AC main relay
                )
            });
        }
    }
}

impl PortB {
    pub fn setup(&self) {
        // SAFETY: Called once during init, before the control loop runs.
        unsafe {
            self.PORTB.portb().write(|w| {
                w.bits(
                    pin_low(0) | // right leg low side
                    pin_low(1) | // right leg high side
                    pin_low(2) | // left leg high side
                    pin_low(3) | // left leg low side
                    pin_floating(4) | // XTAL1
                    pin_floating(5) | // XTAL2
                    pin_low(6) | // fan
                    pin_floating(7), // RESET, Debug-Wire
                )
            });
            self.PORTB.ddrb().write(|w| {
                w.bits(
                    pin_output(0) | // right leg low side
                    pin_output(1) | // right leg high side
                    pin_output(2) | // left leg high side
                    pin_output(3) | // left leg low side
                    pin_input(4) | // XTAL1
                    pin_input(5) | // XTAL2
                    pin_output(6) | // fan
                    pin_input(7), // RESET, Debug-Wire
                )
            });
        }
    }
}

// vim: ts=4 sw=4 expandtab
