// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Solar voltage divider scale, in millivolts per ADC count.
pub const SOLAR_ADC_BIT_MV: u32 = 346;

/// Convert a solar voltage in millivolts to ADC counts.
pub const fn solar_mv_to_counts(mv: u32) -> u8 {
    let counts = mv / SOLAR_ADC_BIT_MV;
    if counts > u8::MAX as u32 {
        u8::MAX
    } else {
        counts as u8
    }
}

/// Convert ADC counts to a solar voltage in millivolts.
pub const fn solar_counts_to_mv(counts: u8) -> u32 {
    counts as u32 * SOLAR_ADC_BIT_MV
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineFrequency {
    Hz50,
    Hz60,
}

impl LineFrequency {
    pub const fn hz(self) -> u32 {
        match self {
            Self::Hz50 => 50,
            Self::Hz60 => 60,
        }
    }

    pub const fn from_hz(hz: u32) -> Option<Self> {
        match hz {
            50 => Some(Self::Hz50),
            60 => Some(Self::Hz60),
            _ => None,
        }
    }
}

/// The configuration surface of the inverter.
///
/// All analog thresholds are in raw 8-bit ADC counts.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Params {
    /// Length of one timing tick, in microseconds.
    pub tick_period_us: u16,
    /// Output line frequency.
    pub line_frequency: LineFrequency,
    /// Duty ceiling, in percent of one half-cycle.
    pub duty_max_percent: u8,
    /// Track upwards at or above this solar voltage.
    pub solar_start_counts: u8,
    /// Hard stop below this solar voltage.
    pub solar_stop_counts: u8,
    /// Fan may run above this heatsink temperature.
    pub thermal_fan_counts: u8,
    /// Hard stop above this heatsink temperature.
    pub thermal_stop_counts: u8,
    /// Hard stop once the accumulated energy exceeds this value.
    /// Unit: on-ticks summed over full cycles.
    pub energy_limit: u32,
}

impl Params {
    /// Default parameter set for the given line frequency.
    pub const fn new(line_frequency: LineFrequency) -> Self {
        Self {
            tick_period_us: 100,
            line_frequency,
            duty_max_percent: 67,
            solar_start_counts: solar_mv_to_counts(56_000),
            solar_stop_counts: solar_mv_to_counts(24_000),
            thermal_fan_counts: 170, // approx 40 deg Celsius
            thermal_stop_counts: 175, // approx 50 deg Celsius
            energy_limit: 100_000_000, // approx 10 kWh
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConfigError {
    TickPeriodZero,
    HalfCycleTooShort,
    HalfCycleTooLong,
    DutyMaxOutOfRange,
    SolarThresholdsInverted,
    ThermalThresholdsInverted,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TickPeriodZero => write!(f, "tick period must not be zero"),
            Self::HalfCycleTooShort => write!(f, "half-cycle is shorter than two ticks"),
            Self::HalfCycleTooLong => write!(f, "half-cycle is longer than 255 ticks"),
            Self::DutyMaxOutOfRange => {
                write!(f, "duty ceiling must be at least one tick and at most 100 percent")
            }
            Self::SolarThresholdsInverted => {
                write!(f, "solar stop threshold is above the start threshold")
            }
            Self::ThermalThresholdsInverted => {
                write!(f, "fan temperature threshold is above the stop threshold")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// Validated inverter configuration.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Config {
    params: Params,
    half_cycle_ticks: u8,
    duty_max: u8,
}

impl Config {
    pub const MAINS_50HZ: Self = unwrap_config(Self::new(Params::new(LineFrequency::Hz50)));
    pub const MAINS_60HZ: Self = unwrap_config(Self::new(Params::new(LineFrequency::Hz60)));

    pub const fn new(params: Params) -> Result<Self, ConfigError> {
        if params.tick_period_us == 0 {
            return Err(ConfigError::TickPeriodZero);
        }
        let full_cycle_ticks =
            1_000_000 / params.line_frequency.hz() / params.tick_period_us as u32;
        let half_cycle_ticks = full_cycle_ticks / 2;
        if half_cycle_ticks < 2 {
            return Err(ConfigError::HalfCycleTooShort);
        }
        if half_cycle_ticks > u8::MAX as u32 {
            return Err(ConfigError::HalfCycleTooLong);
        }
        if params.duty_max_percent > 100 {
            return Err(ConfigError::DutyMaxOutOfRange);
        }
        let duty_max = (half_cycle_ticks * params.duty_max_percent as u32) / 100;
        if duty_max == 0 {
            return Err(ConfigError::DutyMaxOutOfRange);
        }
        if params.solar_stop_counts > params.solar_start_counts {
            return Err(ConfigError::SolarThresholdsInverted);
        }
        if params.thermal_fan_counts > params.thermal_stop_counts {
            return Err(ConfigError::ThermalThresholdsInverted);
        }
        Ok(Self {
            params,
            half_cycle_ticks: half_cycle_ticks as u8,
            duty_max: duty_max as u8,
        })
    }

    pub const fn params(&self) -> &Params {
        &self.params
    }

    pub const fn tick_period_us(&self) -> u16 {
        self.params.tick_period_us
    }

    pub const fn line_frequency(&self) -> LineFrequency {
        self.params.line_frequency
    }

    /// Number of ticks in one half-cycle of the output.
    pub const fn half_cycle_ticks(&self) -> u8 {
        self.half_cycle_ticks
    }

    /// Maximum on-ticks per half-cycle.
    pub const fn duty_max(&self) -> u8 {
        self.duty_max
    }

    /// The fan only runs above this tracking strength.
    pub const fn fan_min_on_ticks(&self) -> u8 {
        self.duty_max / 10
    }

    pub const fn solar_start_counts(&self) -> u8 {
        self.params.solar_start_counts
    }

    pub const fn solar_stop_counts(&self) -> u8 {
        self.params.solar_stop_counts
    }

    pub const fn thermal_fan_counts(&self) -> u8 {
        self.params.thermal_fan_counts
    }

    pub const fn thermal_stop_counts(&self) -> u8 {
        self.params.thermal_stop_counts
    }

    pub const fn energy_limit(&self) -> u32 {
        self.params.energy_limit
    }

    /// Duration of one full cycle of bridge timing, in microseconds.
    /// Excludes the analog conversions and guard delays.
    pub const fn cycle_period_us(&self) -> u32 {
        self.half_cycle_ticks as u32 * 2 * self.params.tick_period_us as u32
    }
}

const fn unwrap_config(config: Result<Config, ConfigError>) -> Config {
    match config {
        Ok(config) => config,
        Err(_) => panic!("Invalid inverter configuration"),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_presets() {
        let c = Config::MAINS_50HZ;
        assert_eq!(c.half_cycle_ticks(), 100);
        assert_eq!(c.duty_max(), 67);
        assert_eq!(c.fan_min_on_ticks(), 6);
        assert_eq!(c.solar_start_counts(), 161);
        assert_eq!(c.solar_stop_counts(), 69);
        assert_eq!(c.cycle_period_us(), 20_000);

        let c = Config::MAINS_60HZ;
        assert_eq!(c.half_cycle_ticks(), 83);
        assert_eq!(c.duty_max(), 55);
        assert_eq!(c.line_frequency(), LineFrequency::Hz60);
    }

    #[test]
    fn test_invalid() {
        let base = Params::new(LineFrequency::Hz50);

        let p = Params {
            tick_period_us: 0,
            ..base
        };
        assert_eq!(Config::new(p), Err(ConfigError::TickPeriodZero));

        let p = Params {
            tick_period_us: 10_000,
            ..base
        };
        assert_eq!(Config::new(p), Err(ConfigError::HalfCycleTooShort));

        let p = Params {
            tick_period_us: 10,
            ..base
        };
        assert_eq!(Config::new(p), Err(ConfigError::HalfCycleTooLong));

        let p = Params {
            duty_max_percent: 101,
            ..base
        };
        assert_eq!(Config::new(p), Err(ConfigError::DutyMaxOutOfRange));

        let p = Params {
            duty_max_percent: 0,
            ..base
        };
        assert_eq!(Config::new(p), Err(ConfigError::DutyMaxOutOfRange));

        let p = Params {
            solar_stop_counts: 200,
            ..base
        };
        assert_eq!(Config::new(p), Err(ConfigError::SolarThresholdsInverted));

        let p = Params {
            thermal_fan_counts: 180,
            ..base
        };
        assert_eq!(Config::new(p), Err(ConfigError::ThermalThresholdsInverted));
    }

    #[test]
    fn test_full_duty() {
        let p = Params {
            duty_max_percent: 100,
            ..Params::new(LineFrequency::Hz50)
        };
        let c = Config::new(p).unwrap();
        assert_eq!(c.duty_max(), c.half_cycle_ticks());
        assert_eq!(*c.params(), p);
    }

    #[test]
    fn test_solar_conv() {
        assert_eq!(solar_mv_to_counts(0), 0);
        assert_eq!(solar_mv_to_counts(345), 0);
        assert_eq!(solar_mv_to_counts(346), 1);
        assert_eq!(solar_mv_to_counts(1_000_000), 255);
        assert_eq!(solar_counts_to_mv(161), 55_706);
    }

    #[test]
    fn test_line_frequency() {
        assert_eq!(LineFrequency::from_hz(50), Some(LineFrequency::Hz50));
        assert_eq!(LineFrequency::from_hz(60), Some(LineFrequency::Hz60));
        assert_eq!(LineFrequency::from_hz(55), None);
    }
}

// vim: ts=4 sw=4 expandtab
