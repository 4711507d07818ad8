// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    analog::{SampledInputs, Sampler},
    bridge::{Bridge, Duty, HalfWave},
    config::Config,
    debug::Debug,
    energy::Energy,
    fan,
    hw::{AdcChannel, Board, OutputPin},
    indicator::{self, DutyLevel},
    mon::{self, Trip},
    tracker::{self, TrackStep},
};

/// State of the control loop.
///
/// A hardware reset is the only way back to all-zero.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct ControlState {
    pub on_ticks: u8,
    pub cycle_counter: u8,
    pub energy: Energy,
}

/// Outcome of the decision part of one iteration.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Regulation {
    pub step: TrackStep,
    pub trip: Trip,
    pub fan: bool,
    pub duty: Duty,
}

/// Run tracking, safety and fan decision for one iteration.
///
/// The safety trip overrides the tracker before the duty cycle is clamped
/// and handed to the bridge.
pub fn regulate(state: &mut ControlState, inputs: &SampledInputs, config: &Config) -> Regulation {
    let step = tracker::run(state, inputs.solar_voltage, config);

    let trip = mon::check(inputs, state.energy, config);
    if trip.shutoff().is_shutoff() {
        state.on_ticks = 0;
    }

    let fan = fan::wanted(inputs, state.on_ticks, config);

    let duty = Duty::new(state.on_ticks, config);
    state.on_ticks = duty.on_ticks();

    Regulation {
        step,
        trip,
        fan,
        duty,
    }
}

/// Summary of one loop iteration.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CycleReport {
    pub regulation: Regulation,
    pub level: DutyLevel,
    pub inputs: SampledInputs,
    pub energy: Energy,
}

pub struct System {
    config: Config,
    state: ControlState,
    inputs: SampledInputs,
    sampler: Sampler,
    bridge: Bridge,
}

impl System {
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            state: ControlState {
                on_ticks: 0,
                cycle_counter: 0,
                energy: Energy::new(0),
            },
            inputs: SampledInputs {
                solar_voltage: 0,
                heatsink_temp: 0,
            },
            sampler: Sampler::new(),
            bridge: Bridge::new(),
        }
    }

    /// Put all outputs into their safe state.
    pub fn init(&mut self, board: &mut impl Board) {
        self.bridge.init(board);
        fan::set(board, false);
        board.set_output(OutputPin::AuxRelay, false);
        board.set_output(OutputPin::MainRelay, false);
        indicator::update(board, 0, &self.config);
        self.sampler.init(board);
    }

    /// Run one full mains cycle.
    pub fn run(&mut self, board: &mut impl Board) -> CycleReport {
        board.acknowledge_watchdog();

        let solar_voltage = self.sampler.sample(board, AdcChannel::SolarVoltage);
        self.inputs.store(AdcChannel::SolarVoltage, solar_voltage);

        let regulation = regulate(&mut self.state, &self.inputs, &self.config);
        fan::set(board, regulation.fan);

        self.bridge.run(board, HalfWave::Positive, regulation.duty);

        let heatsink_temp = self.sampler.sample(board, AdcChannel::HeatsinkTemp);
        self.inputs.store(AdcChannel::HeatsinkTemp, heatsink_temp);

        let level = indicator::update(board, regulation.duty.on_ticks(), &self.config);

        self.state.energy.accumulate(regulation.duty.on_ticks());

        self.bridge.run(board, HalfWave::Negative, regulation.duty);

        Debug::SolarVoltage.log_u8(self.inputs.solar_voltage);
        Debug::HeatsinkTemp.log_u8(self.inputs.heatsink_temp);
        Debug::OnTicks.log_u8(self.state.on_ticks);
        Debug::Trip.log_u8(regulation.trip.bits());
        Debug::Fan.log_bool(regulation.fan);
        Debug::Energy.log_u32(self.state.energy.value());

        CycleReport {
            regulation,
            level,
            inputs: self.inputs,
            energy: self.state.energy,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn inputs(&self) -> &SampledInputs {
        &self.inputs
    }
}


// vim: ts=4 sw=4 expandtab
