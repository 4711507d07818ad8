// -*- coding: utf-8 -*-

#![forbid(unsafe_code)]

mod plant;
mod simulate;

use crate::{
    plant::{Heatsink, Panel},
    simulate::Simulation,
};
use anyhow::{self as ah, Context as _};
use clap::Parser;
use solarinv::{
    Config, LineFrequency, Params,
    debug::{self, Debug},
    sim::Nanos,
    system::CycleReport,
};

/// Run the inverter control loop against a simulated panel and heatsink.
#[derive(Parser, Debug)]
struct Opts {
    /// Output line frequency in Hz (50 or 60).
    #[arg(short = 'f', long, default_value_t = 50)]
    line_frequency: u32,

    /// Number of mains cycles to simulate.
    #[arg(short = 'n', long, default_value_t = 3000)]
    cycles: u32,

    /// Print a trace line every this many cycles. 0 disables the trace.
    #[arg(short = 'e', long, default_value_t = 50)]
    every: u32,

    /// Panel open circuit voltage, in millivolts.
    #[arg(long, default_value_t = 70_000)]
    voc_mv: u32,

    /// Panel voltage drop per on-tick of duty, in millivolts.
    #[arg(long, default_value_t = 400)]
    droop_mv: u32,

    /// Ambient temperature, in heatsink ADC counts.
    #[arg(long, default_value_t = 150)]
    ambient: u8,

    /// Tick period, in microseconds.
    #[arg(long)]
    tick_period_us: Option<u16>,

    /// Duty ceiling, in percent of a half-cycle.
    #[arg(long)]
    duty_max_percent: Option<u8>,

    /// Energy limit, in accumulated on-ticks.
    #[arg(long)]
    energy_limit: Option<u32>,
}

impl Opts {
    fn config(&self) -> ah::Result<Config> {
        let Some(line_frequency) = LineFrequency::from_hz(self.line_frequency) else {
            ah::bail!("Unsupported line frequency: {} Hz", self.line_frequency);
        };
        let mut params = Params::new(line_frequency);
        if let Some(tick_period_us) = self.tick_period_us {
            params.tick_period_us = tick_period_us;
        }
        if let Some(duty_max_percent) = self.duty_max_percent {
            params.duty_max_percent = duty_max_percent;
        }
        if let Some(energy_limit) = self.energy_limit {
            params.energy_limit = energy_limit;
        }
        Ok(Config::new(params)?)
    }
}

fn print_trace(cycle: u32, now: Nanos, r: &CycleReport) {
    let reg = &r.regulation;
    println!(
        "{cycle:7} {:9.3}s solar={:3} temp={:3} on={:3} off={:3} {:7} trip={:03b} fan={} {:4} energy={}",
        now.as_micros() as f64 / 1e6,
        r.inputs.solar_voltage,
        r.inputs.heatsink_temp,
        reg.duty.on_ticks(),
        reg.duty.off_ticks(),
        format!("{:?}", reg.step),
        reg.trip.bits(),
        u8::from(reg.fan),
        format!("{:?}", r.level),
        r.energy,
    );
}

fn main() -> ah::Result<()> {
    let opts = Opts::parse();

    let config = opts.config().context("Inverter configuration")?;
    println!(
        "{} Hz, {} ticks of {} us per half-cycle, duty ceiling {} ticks",
        config.line_frequency().hz(),
        config.half_cycle_ticks(),
        config.tick_period_us(),
        config.duty_max(),
    );

    let params = config.params();
    println!(
        "solar start/stop {}/{} counts, fan/stop {}/{} counts, energy limit {}",
        params.solar_start_counts,
        params.solar_stop_counts,
        params.thermal_fan_counts,
        params.thermal_stop_counts,
        params.energy_limit,
    );

    let mut sim = Simulation::new(
        config,
        Panel::new(opts.voc_mv, opts.droop_mv),
        Heatsink::new(opts.ambient),
    );

    let every = opts.every;
    let summary = sim
        .run(opts.cycles, |cycle, now, report| {
            if every != 0 && (cycle % every == 0 || cycle + 1 == opts.cycles) {
                print_trace(cycle, now, report);
            }
        })
        .context("Simulation")?;

    println!();
    println!("cycles:       {}", summary.cycles);
    println!("time:         {:.3} s", summary.sim_time.as_micros() as f64 / 1e6);
    println!("on_ticks:     {}", summary.on_ticks);
    println!("energy:       {}", summary.energy);
    println!("trip cycles:  {}", summary.trip_cycles);
    println!("fan toggles:  {}", summary.fan_toggles);
    println!("max wdt:      {} us", summary.max_wdt_interval.as_micros());

    println!();
    println!("debug values:");
    for (d, value) in Debug::ALL.iter().zip(debug::snapshot()) {
        println!("  {:<8} {}", d.name(), value);
    }

    Ok(())
}

// vim: ts=4 sw=4 expandtab
