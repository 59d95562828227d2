use std::error::Error;
use std::thread;
use std::time::{Duration, Instant};

use structopt::StructOpt;

use chip8_vm::cli::MachineOpt;
use chip8_vm::emulator::Emulator;

mod crossterm_io;
mod key_buffer;
mod key_manager;
use crossterm_io::CrosstermOutput;
use key_manager::{Control, KeyManager};

const TIMER_HZ: u64 = 60;

/// Run a CHIP-8 program in the terminal.
#[derive(StructOpt)]
struct Opt {
    #[structopt(flatten)]
    machine: MachineOpt,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.machine.input);
    let program = std::fs::read(&opt.machine.input)?;

    let mut emulator = Emulator::with_config(opt.machine.config());
    emulator.load(&program)?;

    let key_manager = KeyManager::new();
    let mut output = CrosstermOutput::new()?;

    let cpu_period = Duration::from_nanos(1_000_000_000 / opt.machine.cpu_hz.max(1));
    let timer_period = Duration::from_nanos(1_000_000_000 / TIMER_HZ);
    let mut next_step = Instant::now();
    let mut next_tick = next_step;

    loop {
        match key_manager.control() {
            Some(Control::Quit) => break,
            Some(Control::Restart) => emulator.restart(),
            None => {}
        }

        let now = Instant::now();

        if now >= next_step {
            emulator.poll_input(&key_manager);
            emulator.step();
            next_step += cpu_period;
        }

        if now >= next_tick {
            emulator.tick_timers();
            emulator.present(&mut output);
            next_tick += timer_period;
        }

        let wake = next_step.min(next_tick);
        thread::sleep(wake.saturating_duration_since(Instant::now()));
    }

    Ok(())
}
