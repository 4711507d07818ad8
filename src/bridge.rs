// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! H-bridge commutation.
//!
//! One half-cycle of the output looks like this:
//!
//! ```text
//!   left leg:   commutate to drive side
//!               hold on_ticks
//!   right leg:  commutate to drive side
//!               hold off_ticks (both legs on the same rail, zero output)
//! ```
//!
//! A commutation always opens the complementary switch first, waits for the
//! shoot-through guard delay and only then closes the drive side switch.

use crate::{
    config::Config,
    hw::{Board, Leg, OutputPin, Side},
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HalfWave {
    Positive,
    Negative,
}

impl HalfWave {
    /// The switch side that is closed during the active phase.
    pub const fn drive_side(self) -> Side {
        match self {
            Self::Positive => Side::High,
            Self::Negative => Side::Low,
        }
    }
}

/// State of the four bridge switches.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct BridgeOutputs {
    pub left_high: bool,
    pub left_low: bool,
    pub right_high: bool,
    pub right_low: bool,
}

impl BridgeOutputs {
    pub const fn get(&self, leg: Leg, side: Side) -> bool {
        match (leg, side) {
            (Leg::Left, Side::High) => self.left_high,
            (Leg::Left, Side::Low) => self.left_low,
            (Leg::Right, Side::High) => self.right_high,
            (Leg::Right, Side::Low) => self.right_low,
        }
    }

    pub fn set(&mut self, leg: Leg, side: Side, level: bool) {
        match (leg, side) {
            (Leg::Left, Side::High) => self.left_high = level,
            (Leg::Left, Side::Low) => self.left_low = level,
            (Leg::Right, Side::High) => self.right_high = level,
            (Leg::Right, Side::Low) => self.right_low = level,
        }
    }

    /// Both switches of one leg closed.
    pub const fn is_shoot_through(&self) -> bool {
        (self.left_high && self.left_low) || (self.right_high && self.right_low)
    }
}

/// On/off split of one half-cycle.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Duty {
    on_ticks: u8,
    off_ticks: u8,
}

impl Duty {
    /// Clamp `on_ticks` to the duty ceiling and derive the idle time.
    pub const fn new(on_ticks: u8, config: &Config) -> Self {
        let on_ticks = if on_ticks > config.duty_max() {
            config.duty_max()
        } else {
            on_ticks
        };
        Self {
            on_ticks,
            off_ticks: config.half_cycle_ticks() - on_ticks,
        }
    }

    pub const fn on_ticks(&self) -> u8 {
        self.on_ticks
    }

    pub const fn off_ticks(&self) -> u8 {
        self.off_ticks
    }
}

/// Commutation sequencer. Sole owner of the bridge switch outputs.
pub struct Bridge {
    outputs: BridgeOutputs,
}

impl Bridge {
    pub const fn new() -> Self {
        Self {
            outputs: BridgeOutputs {
                left_high: false,
                left_low: false,
                right_high: false,
                right_low: false,
            },
        }
    }

    /// Open all four switches.
    pub fn init(&mut self, board: &mut impl Board) {
        for leg in [Leg::Left, Leg::Right] {
            for side in [Side::High, Side::Low] {
                self.switch(board, leg, side, false);
            }
        }
    }

    pub fn outputs(&self) -> &BridgeOutputs {
        &self.outputs
    }

    fn switch(&mut self, board: &mut impl Board, leg: Leg, side: Side, level: bool) {
        debug_assert!(!level || !self.outputs.get(leg, side.complement()));
        board.set_output(OutputPin::Switch(leg, side), level);
        self.outputs.set(leg, side, level);
    }

    /// Move one leg over to `side`.
    fn commutate(&mut self, board: &mut impl Board, leg: Leg, side: Side) {
        self.switch(board, leg, side.complement(), false);
        board.guard_delay();
        self.switch(board, leg, side, true);
    }

    /// Drive one half-cycle.
    pub fn run(&mut self, board: &mut impl Board, half_wave: HalfWave, duty: Duty) {
        if duty.on_ticks() > 0 {
            let side = half_wave.drive_side();
            self.commutate(board, Leg::Left, side);
            board.delay_ticks(duty.on_ticks());
            self.commutate(board, Leg::Right, side);
        }
        board.delay_ticks(duty.off_ticks());
    }
}

impl Default for Bridge {
    fn default() -> Self {
        Self::new()
    }
}


// vim: ts=4 sw=4 expandtab
