//! Command line options shared by the frontends.

use std::path::PathBuf;

use structopt::StructOpt;

use crate::emulator::{Config, Quirks};

/// Options every frontend understands.
#[derive(StructOpt, Debug)]
pub struct MachineOpt {
    /// The program to execute
    #[structopt(parse(from_os_str))]
    pub input: PathBuf,

    /// Instructions executed per second
    #[structopt(long, default_value = "500")]
    pub cpu_hz: u64,

    /// Seed for the random number instruction
    #[structopt(long, default_value = "0")]
    pub seed: u64,

    /// Shift Vy into Vx on 8xy6 and 8xyE
    #[structopt(long)]
    pub shift_uses_vy: bool,

    /// Advance I past the registers on Fx55 and Fx65
    #[structopt(long)]
    pub load_store_increments_i: bool,

    /// Jump to nnn + Vx on Bnnn, with x taken from nnn
    #[structopt(long)]
    pub jump_plus_vx: bool,
}

impl MachineOpt {
    pub fn config(&self) -> Config {
        Config {
            quirks: Quirks {
                shift_uses_vy: self.shift_uses_vy,
                load_store_increments_i: self.load_store_increments_i,
                jump_plus_vx: self.jump_plus_vx,
            },
            seed: self.seed,
        }
    }

    /// Instructions to run between two 60 Hz timer ticks, at least one.
    pub fn steps_per_tick(&self) -> u64 {
        (self.cpu_hz / 60).max(1)
    }
}
