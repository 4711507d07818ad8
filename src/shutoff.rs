// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Shutoff {
    MachineShutoff = 0,
    MachineRunning,
}

impl Shutoff {
    pub const fn is_shutoff(self) -> bool {
        matches!(self, Self::MachineShutoff)
    }
}

// vim: ts=4 sw=4 expandtab
