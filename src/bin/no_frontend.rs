use std::io::{Error, ErrorKind};

use structopt::StructOpt;

use chip8_vm::cli::MachineOpt;
use chip8_vm::emulator::Emulator;

/// Run a CHIP-8 program without a screen, then print what it drew.
#[derive(StructOpt)]
struct Opt {
    #[structopt(flatten)]
    machine: MachineOpt,

    /// Number of instructions to execute
    #[structopt(long, default_value = "1000")]
    steps: u64,
}

fn main() -> std::io::Result<()> {
    pretty_env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.machine.input);
    let program = std::fs::read(&opt.machine.input)?;

    // Load instructions into emulator memory
    let mut emulator = Emulator::with_config(opt.machine.config());
    emulator
        .load(&program)
        .map_err(|err| Error::new(ErrorKind::InvalidData, err))?;

    // Timers tick at 60 Hz of emulated time, not wall time
    let steps_per_tick = opt.machine.steps_per_tick();
    let mut faults = 0;
    for n in 1..=opt.steps {
        if emulator.step().is_some() {
            faults += 1;
        }
        if n % steps_per_tick == 0 {
            emulator.tick_timers();
        }
    }

    print!("{}", emulator);
    if let Some(fault) = emulator.last_fault() {
        println!("{} faults, last: {}", faults, fault);
    }
    if emulator.waiting_for_key() {
        println!("stopped while waiting for a key press");
    }

    Ok(())
}
