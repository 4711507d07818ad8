// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    analog::Adc,
    hw::{F_CPU_MHZ, Peripherals, mcu, nop3},
    ports::{
        PA_AUX_RELAY, PA_MAIN_RELAY, PA_STATUS0, PB_FAN, PB_LEFT_HIGH, PB_LEFT_LOW,
        PB_RIGHT_HIGH, PB_RIGHT_LOW, PortA, PortB,
    },
    timer::{RelTimestamp, Timer},
};
use solarinv::{
    Board, Config,
    hw::{AdcChannel, Leg, OutputPin, SHOOT_THROUGH_GUARD_NS, STATUS_LINES, Side},
};

/// Number of [nop3] calls covering the shoot-through guard time.
const GUARD_NOP3: u32 = (SHOOT_THROUGH_GUARD_NS * F_CPU_MHZ).div_ceil(3 * 1000);

/// ATtiny861A board.
pub struct AvrBoard {
    porta: PortA,
    portb: PortB,
    adc: Adc,
    timer: Timer,
    tick: RelTimestamp,
    wdt: mcu::WDT,
}

impl AvrBoard {
    pub fn new(dp: Peripherals, config: &Config) -> Self {
        let tick_us = config.tick_period_us() as i32;
        Self {
            porta: PortA::new(dp.PORTA),
            portb: PortB::new(dp.PORTB),
            adc: Adc::new(dp.ADC),
            timer: Timer::new(dp.TC1),
            tick: RelTimestamp::from_micros(tick_us),
            wdt: dp.WDT,
        }
    }

    pub fn init(&self) {
        self.porta.setup();
        self.portb.setup();
        self.timer.init();
        self.adc.init();
    }
}

impl Board for AvrBoard {
    fn adc_select(&mut self, chan: AdcChannel) {
        self.adc.select(chan);
    }

    fn adc_start(&mut self) {
        self.adc.start();
    }

    fn adc_done(&mut self) -> bool {
        self.adc.done()
    }

    fn adc_result(&mut self) -> u8 {
        self.adc.result()
    }

    fn set_output(&mut self, pin: OutputPin, level: bool) {
        match pin {
            OutputPin::Switch(Leg::Right, Side::Low) => self.portb.set(PB_RIGHT_LOW, level),
            OutputPin::Switch(Leg::Right, Side::High) => self.portb.set(PB_RIGHT_HIGH, level),
            OutputPin::Switch(Leg::Left, Side::High) => self.portb.set(PB_LEFT_HIGH, level),
            OutputPin::Switch(Leg::Left, Side::Low) => self.portb.set(PB_LEFT_LOW, level),
            OutputPin::Fan => self.portb.set(PB_FAN, level),
            OutputPin::AuxRelay => self.porta.set(PA_AUX_RELAY, level),
            OutputPin::MainRelay => self.porta.set(PA_MAIN_RELAY, level),
            // Status LEDs are active low.
            OutputPin::Status(line) if line < STATUS_LINES => {
                self.porta.set(PA_STATUS0 + line as usize, !level)
            }
            OutputPin::Status(_) => (),
        }
    }

    fn delay_ticks(&mut self, ticks: u8) {
        self.timer.delay(self.tick, ticks);
    }

    #[inline(always)]
    fn guard_delay(&mut self) {
        for _ in 0..GUARD_NOP3 {
            nop3();
        }
    }

    fn acknowledge_watchdog(&mut self) {
        wdt_poke(&self.wdt);
    }
}

#[inline(always)]
fn wdt_poke(_wdt: &mcu::WDT) {
    avr_device::asm::wdr();
}

// vim: ts=4 sw=4 expandtab
