// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![no_std]
#![no_main]
#![feature(asm_experimental_arch)]

mod analog;
mod board;
mod hw;
mod ports;
mod timer;

use crate::{
    board::AvrBoard,
    hw::{Peripherals, unwrap_option},
    timer::TIMER_TICK_US,
};
use solarinv::{Config, System};

#[cfg(not(feature = "mains-60hz"))]
const CONFIG: Config = Config::MAINS_50HZ;
#[cfg(feature = "mains-60hz")]
const CONFIG: Config = Config::MAINS_60HZ;

// One control tick must fit into the 8 bit timer comparison window.
const _: () = assert!(CONFIG.tick_period_us() / TIMER_TICK_US as u16 <= i8::MAX as u16);

fn wdt_init() {
    // SAFETY: The asm code only accesses the WDT registers
    //         which are not accessed from anywhere else in the program.
    unsafe {
        // Enable WDT with timeout 64 ms
        core::arch::asm!(
            "ldi {tmp}, 0x10", // WDCE=1
            "out {WDTCR}, {tmp}",
            "ldi {tmp}, 0x1A", // WDCE=1, WDE=1, WDP2=0, WDP1=1, WDP0=0
            "out {WDTCR}, {tmp}",
            tmp = out(reg_upper) _,
            WDTCR = const 0x21,
            options(nostack, preserves_flags)
        );
    }
}

#[avr_device::entry]
fn main() -> ! {
    wdt_init();

    let dp = unwrap_option(Peripherals::take());

    let mut board = AvrBoard::new(dp, &CONFIG);
    board.init();

    let mut system = System::new(CONFIG);
    system.init(&mut board);

    loop {
        system.run(&mut board);
    }
}

// vim: ts=4 sw=4 expandtab
