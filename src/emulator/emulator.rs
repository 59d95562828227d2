//! The CHIP-8 emulator as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use std::fmt;

use rand::Rng;

use crate::emulator::config::Config;
use crate::emulator::fault::{Fault, LoadError};
use crate::emulator::font;
use crate::emulator::input::EmulatorInput;
use crate::emulator::instruction::*;
use crate::emulator::output::EmulatorOutput;
use crate::emulator::state::*;

/// A CHIP-8 machine together with the host-facing controls.
///
/// The emulator never blocks and never sleeps. The host calls `step` at the
/// CPU rate and `tick_timers` at 60 Hz, feeds keys in with `set_key` and
/// reads the screen and sound gate back out.
pub struct Emulator {
    state: State,
    config: Config,
    program: Vec<u8>,
    last_fault: Option<Fault>,
}

impl fmt::Display for Emulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..SCREEN_HEIGHT {
            for x in 0..SCREEN_WIDTH {
                write!(f, "{}", if self.pixel(x, y) { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Emulator {

    /// Create a reset emulator with the default configuration.
    pub fn new() -> Emulator {
        Emulator::with_config(Config::default())
    }

    /// Create a reset emulator with the given quirks and seed.
    pub fn with_config(config: Config) -> Emulator {
        let mut emulator = Emulator {
            state: State::new(),
            config,
            program: Vec::new(),
            last_fault: None,
        };
        emulator.reset();
        emulator
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Zero all state, install the font and set the program counter to 0x200.
    pub fn reset(&mut self) {
        self.state.reset(self.config.seed);
        self.last_fault = None;
        log::info!("Reset with seed {}", self.config.seed);
    }

    /// Reset with a new random seed, which later resets keep using.
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.reset();
    }

    /// Copy a program into memory at 0x200. Does not reset.
    pub fn load(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::TooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }

        let start = PC_START as usize;
        self.state.memory[start..start + program.len()].copy_from_slice(program);
        self.program = program.to_vec();
        log::info!("Loaded {} byte program", program.len());
        Ok(())
    }

    /// Reset, then load the most recently loaded program again.
    pub fn restart(&mut self) {
        self.reset();
        let start = PC_START as usize;
        self.state.memory[start..start + self.program.len()].copy_from_slice(&self.program);
        log::info!("Restarted {} byte program", self.program.len());
    }

    /// Fetch, decode and execute a single instruction.
    ///
    /// The program counter moves past the instruction before it runs,
    /// so jumps and skips work from the following address.
    pub fn step(&mut self) -> Option<Fault> {
        let pc = self.state.program_counter;

        // Each opcode is two bytes
        if pc as usize + 1 >= MEM_SIZE {
            return self.raise(Fault::FetchOverrun(pc));
        }
        let high = self.state.memory[pc as usize];
        let low = self.state.memory[pc as usize + 1];

        self.state.skip();

        match Instruction::from_two_u8(high, low) {
            Some(instruction) => {
                log::trace!("{:03X}: {:?}", pc, instruction);
                self.execute_single(instruction)
            }
            None => self.raise(Fault::UnknownOpcode(u16::from_be_bytes([high, low]))),
        }
    }

    /// One 60 Hz tick of the delay and sound timers.
    pub fn tick_timers(&mut self) {
        self.state.tick_timers();
    }

    /// Press or release a key. Keys outside `0x0..=0xF` are ignored.
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        if let Some(slot) = self.state.keypad.get_mut(key as usize) {
            if *slot != pressed {
                log::debug!("Key {:X} {}", key, if pressed { "down" } else { "up" });
            }
            *slot = pressed;
        }
        // A release always re-arms the key for Fx0A
        if !pressed {
            if let Some(seen) = self.state.previous_keypad.get_mut(key as usize) {
                *seen = false;
            }
        }
    }

    /// Whether the pixel at (x, y) is lit. Coordinates off screen read as unlit.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.state.pixel(x, y)
    }

    pub fn sound_active(&self) -> bool {
        self.state.sound_active()
    }

    /// True while `Fx0A` is stalling for a key press.
    pub fn waiting_for_key(&self) -> bool {
        self.state.waiting_for_key
    }

    /// The most recent fault, if any happened since the last reset.
    pub fn last_fault(&self) -> Option<Fault> {
        self.last_fault
    }

    pub fn take_fault(&mut self) -> Option<Fault> {
        self.last_fault.take()
    }

    /// Copy every key state from an input device.
    pub fn poll_input<I: EmulatorInput>(&mut self, input: &I) {
        for (key, &pressed) in input.pressed_keys().iter().enumerate() {
            self.set_key(key as u8, pressed);
        }
    }

    /// Draw the whole screen and the sound gate onto an output device.
    pub fn present<O: EmulatorOutput>(&self, output: &mut O) {
        for y in 0..SCREEN_HEIGHT {
            for x in 0..SCREEN_WIDTH {
                output.set(x, y, self.pixel(x, y));
            }
        }
        output.buzz(self.sound_active());
        output.refresh();
    }

    /// Execute many instructions in order, returning the last fault raised.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Option<Fault> {
        instructions
            .iter()
            .fold(None, |fault, &instruction| self.execute_single(instruction).or(fault))
    }

    fn raise(&mut self, fault: Fault) -> Option<Fault> {
        if self.last_fault == Some(fault) {
            log::debug!("{} again (pc = {:03X})", fault, self.state.program_counter);
        } else {
            log::warn!("{} (pc = {:03X})", fault, self.state.program_counter);
        }
        self.last_fault = Some(fault);
        Some(fault)
    }

    fn reg(&self, Reg(x): Reg) -> u8 {
        self.state.registers[x as usize & 0xF]
    }

    fn set_reg(&mut self, Reg(x): Reg, value: u8) {
        self.state.registers[x as usize & 0xF] = value;
    }

    /// Write a result and then the flag, so the flag wins when `x` is `F`.
    fn set_reg_and_flag(&mut self, x: Reg, value: u8, flag: bool) {
        self.set_reg(x, value);
        self.state.registers[FLAG] = flag as u8;
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.state.skip();
        }
    }

    /// Execute a single instruction without fetching it.
    pub fn execute_single(&mut self, instruction: Instruction) -> Option<Fault> {
        let quirks = self.config.quirks;

        match instruction {

            // Clear the screen
            Instruction::ClearScreen => {
                self.state.screen = [false; SCREEN_SIZE];
            }

            // Return to the previous call site via the stack.
            Instruction::Return => {
                if !self.state.pop_return() {
                    return self.raise(Fault::StackUnderflow);
                }
            }

            Instruction::Goto(Addr(addr)) => {
                self.state.program_counter = addr & ADDR_MASK;
            }

            // Store the current address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                if !self.state.push_call(addr) {
                    return self.raise(Fault::StackOverflow);
                }
            }

            Instruction::IfRegEqConst(x, Const(n)) => {
                self.skip_if(self.reg(x) == n);
            }

            Instruction::IfRegNeqConst(x, Const(n)) => {
                self.skip_if(self.reg(x) != n);
            }

            Instruction::IfRegEqReg(x, y) => {
                self.skip_if(self.reg(x) == self.reg(y));
            }

            Instruction::SetRegToConst(x, Const(n)) => {
                self.set_reg(x, n);
            }

            // No carry flag
            Instruction::IncRegByConst(x, Const(n)) => {
                self.set_reg(x, self.reg(x).wrapping_add(n));
            }

            Instruction::SetRegToReg(x, y) => {
                self.set_reg(x, self.reg(y));
            }

            Instruction::BitwiseOr(x, y) => {
                self.set_reg(x, self.reg(x) | self.reg(y));
            }

            Instruction::BitwiseAnd(x, y) => {
                self.set_reg(x, self.reg(x) & self.reg(y));
            }

            Instruction::BitwiseXor(x, y) => {
                self.set_reg(x, self.reg(x) ^ self.reg(y));
            }

            // VF is 1 on carry
            Instruction::IncRegByReg(x, y) => {
                let (sum, carry) = self.reg(x).overflowing_add(self.reg(y));
                self.set_reg_and_flag(x, sum, carry);
            }

            // VF is 1 when Vx > Vy, so equal operands count as a borrow
            Instruction::DecRegByReg(x, y) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_reg_and_flag(x, vx.wrapping_sub(vy), vx > vy);
            }

            Instruction::BitshiftRight(x, y) => {
                let source = if quirks.shift_uses_vy { self.reg(y) } else { self.reg(x) };
                self.set_reg_and_flag(x, source >> 1, source & 1 == 1);
            }

            Instruction::SetVxVyMinusVx(x, y) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_reg_and_flag(x, vy.wrapping_sub(vx), vy > vx);
            }

            Instruction::BitshiftLeft(x, y) => {
                let source = if quirks.shift_uses_vy { self.reg(y) } else { self.reg(x) };
                self.set_reg_and_flag(x, source << 1, source >> 7 == 1);
            }

            Instruction::IfRegNeqReg(x, y) => {
                self.skip_if(self.reg(x) != self.reg(y));
            }

            Instruction::SetI(Addr(addr)) => {
                self.state.i = addr;
            }

            Instruction::GotoPlusV0(Addr(addr)) => {
                let offset = if quirks.jump_plus_vx {
                    self.reg(Reg((addr >> 8) as u8))
                } else {
                    self.reg(Reg(0))
                };
                self.state.program_counter = addr.wrapping_add(offset as u16) & ADDR_MASK;
            }

            Instruction::SetVxRand(x, Const(n)) => {
                let random: u8 = self.state.rng.gen();
                self.set_reg(x, random & n);
            }

            Instruction::Draw(x, y, Const(rows)) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                let collision = self.state.draw_sprite(vx, vy, rows);
                self.state.registers[FLAG] = collision as u8;
            }

            Instruction::IfKeyDown(x) => {
                self.skip_if(self.state.keypad[(self.reg(x) & 0x0F) as usize]);
            }

            Instruction::IfKeyUp(x) => {
                self.skip_if(!self.state.keypad[(self.reg(x) & 0x0F) as usize]);
            }

            Instruction::SetRegToDelayTimer(x) => {
                self.set_reg(x, self.state.delay_timer);
            }

            // Stall on this instruction until a key goes down.
            // Keys already held when the wait begins do not count.
            Instruction::WaitForKey(x) => {
                if !self.state.waiting_for_key {
                    log::debug!("Waiting for key press");
                    self.state.previous_keypad = self.state.keypad;
                    self.state.waiting_for_key = true;
                }
                let pressed = self.state.fresh_key_press();
                self.state.previous_keypad = self.state.keypad;
                match pressed {
                    Some(key) => {
                        log::debug!("Key {:X} ends wait", key);
                        self.set_reg(x, key);
                        self.state.waiting_for_key = false;
                    }
                    None => self.state.rewind(),
                }
            }

            Instruction::SetDelayTimerToReg(x) => {
                self.state.delay_timer = self.reg(x);
            }

            Instruction::SetSoundTimerToReg(x) => {
                self.state.sound_timer = self.reg(x);
            }

            // No flag, and I may leave the 12-bit range
            Instruction::AddRegToI(x) => {
                self.state.i = self.state.i.wrapping_add(self.reg(x) as u16);
            }

            Instruction::SetIToGlyphOfReg(x) => {
                self.state.i = font::glyph_address(self.reg(x));
            }

            Instruction::SetIToBcdOfReg(x) => {
                let value = self.reg(x);
                let i = self.state.i;
                self.state.write(i, value / 100);
                self.state.write(i.wrapping_add(1), value / 10 % 10);
                self.state.write(i.wrapping_add(2), value % 10);
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                let i = self.state.i;
                for reg_no in 0..=(x & 0xF) {
                    let value = self.state.registers[reg_no as usize];
                    self.state.write(i.wrapping_add(reg_no as u16), value);
                }
                if quirks.load_store_increments_i {
                    self.state.i = i.wrapping_add(x as u16 + 1);
                }
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                let i = self.state.i;
                for reg_no in 0..=(x & 0xF) {
                    let value = self.state.read(i.wrapping_add(reg_no as u16));
                    self.state.registers[reg_no as usize] = value;
                }
                if quirks.load_store_increments_i {
                    self.state.i = i.wrapping_add(x as u16 + 1);
                }
            }
        };

        None
    }
}
