// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debug value log.
//!
//! Every slot holds the latest value logged to it. The slots live in RAM,
//! so they can be inspected with a debugger on the target or read back
//! by a host tool. Logging is compiled in with the `debug` feature only.

use core::cell::Cell;
use critical_section::Mutex;

#[derive(Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Debug {
    SolarVoltage,
    HeatsinkTemp,
    OnTicks,
    Trip,
    Fan,
    Energy,
}
pub const NRVALUES: usize = 6;

static VALUES: Mutex<[Cell<u32>; NRVALUES]> = Mutex::new([
    Cell::new(0),
    Cell::new(0),
    Cell::new(0),
    Cell::new(0),
    Cell::new(0),
    Cell::new(0),
]);

impl Debug {
    pub const ALL: [Debug; NRVALUES] = [
        Debug::SolarVoltage,
        Debug::HeatsinkTemp,
        Debug::OnTicks,
        Debug::Trip,
        Debug::Fan,
        Debug::Energy,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Debug::SolarVoltage => "solar",
            Debug::HeatsinkTemp => "temp",
            Debug::OnTicks => "on",
            Debug::Trip => "trip",
            Debug::Fan => "fan",
            Debug::Energy => "energy",
        }
    }

    #[cfg_attr(not(feature = "debug"), allow(unused_variables))]
    pub fn log_u32(&self, value: u32) {
        #[cfg(feature = "debug")]
        critical_section::with(|cs| {
            VALUES.borrow(cs)[*self as usize].set(value);
        });
    }

    pub fn log_u8(&self, value: u8) {
        self.log_u32(value.into())
    }

    pub fn log_bool(&self, value: bool) {
        self.log_u32(value.into())
    }

    pub fn get(&self) -> u32 {
        critical_section::with(|cs| VALUES.borrow(cs)[*self as usize].get())
    }
}

/// Read all slots at once.
pub fn snapshot() -> [u32; NRVALUES] {
    critical_section::with(|cs| {
        let values = VALUES.borrow(cs);
        core::array::from_fn(|i| values[i].get())
    })
}

// vim: ts=4 sw=4 expandtab
