// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Control core of a single-phase solar H-bridge inverter.
//!
//! The control loop in [system] samples the solar voltage and the heatsink
//! temperature, tracks the usable solar power with a slow duty integrator,
//! enforces the safety limits and drives the bridge through one full mains
//! cycle per iteration. All hardware access goes through [hw::Board].

#![no_std]

pub mod analog;
pub mod bridge;
pub mod config;
pub mod debug;
pub mod energy;
pub mod fan;
pub mod hw;
pub mod indicator;
pub mod mon;
pub mod shutoff;
#[cfg(any(test, feature = "sim"))]
pub mod sim;
pub mod system;
pub mod tracker;

pub use crate::{
    config::{Config, ConfigError, LineFrequency, Params},
    hw::Board,
    system::{ControlState, CycleReport, System},
};

// vim: ts=4 sw=4 expandtab
