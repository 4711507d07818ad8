// -*- coding: utf-8 -*-

// The debug slots are global. This file holds a single test,
// so no other test writes them concurrently.

use solarinv::{
    Config, System,
    debug::{self, Debug},
    hw::AdcChannel,
    sim::SimBoard,
};

#[test]
fn test_debug_log() {
    let c = Config::MAINS_50HZ;
    let mut board = SimBoard::new(&c);
    let mut system = System::new(c);
    system.init(&mut board);

    board.set_analog(AdcChannel::SolarVoltage, 200);
    board.set_analog(AdcChannel::HeatsinkTemp, 100);
    for _ in 0..16 * 5 {
        system.run(&mut board);
        board.clear_events();
    }
    assert_eq!(system.state().on_ticks, 5);
    // 16 * (1 + 2 + 3 + 4) + 5
    assert_eq!(debug::snapshot(), [200, 100, 5, 0, 0, 165]);
    assert_eq!(Debug::Energy.get(), system.state().energy.value());

    // Under-voltage trips and zeroes the duty in the same iteration.
    board.set_analog(AdcChannel::SolarVoltage, 30);
    system.run(&mut board);
    assert_eq!(debug::snapshot(), [30, 100, 0, 1, 0, 165]);
    assert_eq!(Debug::Trip.get(), 1);
    assert_eq!(Debug::OnTicks.name(), "on");
}

// vim: ts=4 sw=4 expandtab
