// -*- coding: utf-8 -*-

use solarinv::config::solar_mv_to_counts;

/// Heat put into the heatsink per on-tick and cycle, in ADC counts.
const HEAT_PER_TICK: f32 = 0.0005;
/// Fraction of the heatsink-to-ambient difference removed per cycle.
const COOLING: f32 = 0.002;
const COOLING_FAN: f32 = 0.004;

/// Solar panel whose voltage sags linearly with the load.
pub struct Panel {
    voc_mv: u32,
    droop_mv: u32,
}

impl Panel {
    pub fn new(voc_mv: u32, droop_mv: u32) -> Self {
        Self { voc_mv, droop_mv }
    }

    /// Panel voltage, in ADC counts, while delivering `on_ticks` of duty.
    pub fn voltage(&self, on_ticks: u8) -> u8 {
        let sag = self.droop_mv * u32::from(on_ticks);
        solar_mv_to_counts(self.voc_mv.saturating_sub(sag))
    }
}

/// First order heatsink temperature model, in ADC counts.
pub struct Heatsink {
    temp: f32,
    ambient: f32,
}

impl Heatsink {
    pub fn new(ambient: u8) -> Self {
        Self {
            temp: ambient.into(),
            ambient: ambient.into(),
        }
    }

    /// Advance by one mains cycle.
    pub fn step(&mut self, on_ticks: u8, fan: bool) {
        let cooling = if fan { COOLING_FAN } else { COOLING };
        self.temp += f32::from(on_ticks) * HEAT_PER_TICK - (self.temp - self.ambient) * cooling;
    }

    pub fn counts(&self) -> u8 {
        self.temp.round().clamp(0.0, 255.0) as u8
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_panel_sag() {
        let p = Panel::new(70_000, 400);
        assert_eq!(p.voltage(0), 202);
        assert!(p.voltage(30) < p.voltage(10));
        assert_eq!(Panel::new(1_000, 400).voltage(67), 0);
    }

    #[test]
    fn test_heatsink_settles() {
        let mut h = Heatsink::new(100);
        for _ in 0..20_000 {
            h.step(0, false);
        }
        assert_eq!(h.counts(), 100);

        for _ in 0..20_000 {
            h.step(67, false);
        }
        let hot = h.counts();
        assert!(hot > 110);

        for _ in 0..20_000 {
            h.step(67, true);
        }
        assert!(h.counts() < hot);
    }
}

// vim: ts=4 sw=4 expandtab
