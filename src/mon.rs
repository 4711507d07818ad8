// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Safety monitoring.
//!
//! This is the only fault handling path of the control loop.
//! A trip forces the duty cycle to zero for the iteration it is detected in.
//! The voltage and temperature conditions clear as soon as the measurement
//! is back in range. The energy condition stays, because the energy
//! accumulator is never reset.

use crate::{analog::SampledInputs, config::Config, energy::Energy, shutoff::Shutoff};

/// Safety conditions active in one iteration.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Trip {
    pub under_voltage: bool,
    pub over_temperature: bool,
    pub energy_limit: bool,
}

impl Trip {
    const UNDER_VOLTAGE: u8 = 1 << 0;
    const OVER_TEMPERATURE: u8 = 1 << 1;
    const ENERGY_LIMIT: u8 = 1 << 2;

    pub const fn is_tripped(&self) -> bool {
        self.under_voltage || self.over_temperature || self.energy_limit
    }

    pub const fn shutoff(&self) -> Shutoff {
        if self.is_tripped() {
            Shutoff::MachineShutoff
        } else {
            Shutoff::MachineRunning
        }
    }

    /// Bit mask representation for the debug log.
    pub const fn bits(&self) -> u8 {
        let mut bits = 0;
        if self.under_voltage {
            bits |= Self::UNDER_VOLTAGE;
        }
        if self.over_temperature {
            bits |= Self::OVER_TEMPERATURE;
        }
        if self.energy_limit {
            bits |= Self::ENERGY_LIMIT;
        }
        bits
    }
}

pub fn check(inputs: &SampledInputs, energy: Energy, config: &Config) -> Trip {
    Trip {
        under_voltage: inputs.solar_voltage < config.solar_stop_counts(),
        over_temperature: inputs.heatsink_temp > config.thermal_stop_counts(),
        energy_limit: energy.exceeds(config.energy_limit()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn inputs(solar_voltage: u8, heatsink_temp: u8) -> SampledInputs {
        SampledInputs {
            solar_voltage,
            heatsink_temp,
        }
    }

    #[test]
    fn test_ok() {
        let c = Config::MAINS_50HZ;
        let trip = check(&inputs(200, 100), Energy::new(0), &c);
        assert_eq!(trip, Trip::default());
        assert_eq!(trip.shutoff(), Shutoff::MachineRunning);
        assert_eq!(trip.bits(), 0);
    }

    #[test]
    fn test_under_voltage() {
        let c = Config::MAINS_50HZ;
        let stop = c.solar_stop_counts();
        assert!(check(&inputs(stop - 1, 100), Energy::new(0), &c).under_voltage);
        assert!(!check(&inputs(stop, 100), Energy::new(0), &c).under_voltage);
    }

    #[test]
    fn test_over_temperature() {
        let c = Config::MAINS_50HZ;
        let stop = c.thermal_stop_counts();
        let trip = check(&inputs(200, stop + 1), Energy::new(0), &c);
        assert!(trip.over_temperature);
        assert_eq!(trip.shutoff(), Shutoff::MachineShutoff);
        assert_eq!(trip.bits(), 0x02);
        assert!(!check(&inputs(200, stop), Energy::new(0), &c).over_temperature);
    }

    #[test]
    fn test_energy_boundary() {
        let c = Config::MAINS_50HZ;
        let limit = c.energy_limit();
        assert!(!check(&inputs(200, 100), Energy::new(limit), &c).is_tripped());
        let trip = check(&inputs(200, 100), Energy::new(limit + 1), &c);
        assert!(trip.energy_limit);
        assert_eq!(trip.bits(), 0x04);
    }

    #[test]
    fn test_all() {
        let c = Config::MAINS_50HZ;
        let trip = check(&inputs(0, 255), Energy::new(u32::MAX), &c);
        assert_eq!(trip.bits(), 0x07);
    }
}

// vim: ts=4 sw=4 expandtab
