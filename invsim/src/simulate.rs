// -*- coding: utf-8 -*-

use crate::plant::{Heatsink, Panel};
use anyhow as ah;
use solarinv::{
    Config, System,
    hw::AdcChannel,
    sim::{Nanos, SimBoard},
    system::CycleReport,
};

/// Watchdog timeout of the target firmware.
pub const WDT_TIMEOUT: Nanos = Nanos::from_millis(64);

pub struct Summary {
    pub cycles: u32,
    pub on_ticks: u8,
    pub energy: u32,
    pub trip_cycles: u32,
    pub fan_toggles: u32,
    pub max_wdt_interval: Nanos,
    pub sim_time: Nanos,
}

pub struct Simulation {
    board: SimBoard,
    system: System,
    panel: Panel,
    heatsink: Heatsink,
}

impl Simulation {
    pub fn new(config: Config, panel: Panel, heatsink: Heatsink) -> Self {
        let mut board = SimBoard::new(&config);
        let mut system = System::new(config);
        system.init(&mut board);
        board.clear_events();
        Self {
            board,
            system,
            panel,
            heatsink,
        }
    }

    fn check_board(&self, cycle: u32) -> ah::Result<()> {
        if self.board.shoot_throughs() > 0 {
            ah::bail!("Cycle {cycle}: bridge shoot-through");
        }
        if self.board.guard_violations() > 0 {
            ah::bail!("Cycle {cycle}: bridge switched without guard delay");
        }
        if self.board.unselected_conversions() > 0 {
            ah::bail!("Cycle {cycle}: conversion without selected channel");
        }
        if self.board.max_watchdog_interval() >= WDT_TIMEOUT {
            ah::bail!(
                "Cycle {cycle}: watchdog acknowledged after {} us",
                self.board.max_watchdog_interval().as_micros()
            );
        }
        if self.board.events_dropped() {
            eprintln!("Cycle {cycle}: event log overflow");
        }
        Ok(())
    }

    /// Run one mains cycle against the plant.
    pub fn step(&mut self, cycle: u32) -> ah::Result<CycleReport> {
        let on_ticks = self.system.state().on_ticks;
        self.board
            .set_analog(AdcChannel::SolarVoltage, self.panel.voltage(on_ticks));
        self.board
            .set_analog(AdcChannel::HeatsinkTemp, self.heatsink.counts());

        let report = self.system.run(&mut self.board);

        self.heatsink
            .step(report.regulation.duty.on_ticks(), report.regulation.fan);
        self.check_board(cycle)?;
        self.board.clear_events();
        Ok(report)
    }

    pub fn run(
        &mut self,
        cycles: u32,
        mut trace: impl FnMut(u32, Nanos, &CycleReport),
    ) -> ah::Result<Summary> {
        let mut trip_cycles = 0;
        let mut fan_toggles = 0;
        let mut prev_fan = false;
        for cycle in 0..cycles {
            let report = self.step(cycle)?;
            if report.regulation.trip.is_tripped() {
                trip_cycles += 1;
            }
            if report.regulation.fan != prev_fan {
                fan_toggles += 1;
                prev_fan = report.regulation.fan;
            }
            trace(cycle, self.board.now(), &report);
        }
        Ok(Summary {
            cycles,
            on_ticks: self.system.state().on_ticks,
            energy: self.system.state().energy.value(),
            trip_cycles,
            fan_toggles,
            max_wdt_interval: self.board.max_watchdog_interval(),
            sim_time: self.board.now(),
        })
    }
}


// vim: ts=4 sw=4 expandtab
