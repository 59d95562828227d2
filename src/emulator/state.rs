//! All state of the CHIP-8 virtual machine, as described at
//! https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::emulator::font::{FONT, FONT_START};

pub const MEM_SIZE: usize = 4096;
pub const ADDR_MASK: u16 = 0x0FFF;
pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;
pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
pub const SCREEN_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;
pub const KEY_COUNT: usize = 16;
pub const PC_START: u16 = 0x200;
pub const MAX_PROGRAM_SIZE: usize = MEM_SIZE - PC_START as usize;

/// The flag register, `VF`.
pub const FLAG: usize = 0xF;

pub type Framebuffer = [bool; SCREEN_SIZE];
pub type Keypad = [bool; KEY_COUNT];

/// Memory, registers, screen, keypad and timers of one machine.
///
/// Fields are readable by hosts through `Emulator::state`;
/// only the emulator itself mutates them.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub memory: [u8; MEM_SIZE],
    pub registers: [u8; NUM_REGISTERS],
    pub i: u16,
    pub program_counter: u16,
    pub stack_pointer: u8,
    pub stack: [u16; STACK_SIZE],
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub screen: Framebuffer,
    pub keypad: Keypad,
    /// Keypad as last seen by `Fx0A`, for spotting fresh presses.
    pub previous_keypad: Keypad,
    /// Set while `Fx0A` is stalling the machine.
    pub waiting_for_key: bool,
    pub rng: StdRng,
}

impl State {

    /// A zero-valued machine. Call `reset` before running anything on it.
    pub fn new() -> State {
        State {
            memory: [0; MEM_SIZE],
            registers: [0; NUM_REGISTERS],
            i: 0,
            program_counter: 0,
            stack_pointer: 0,
            stack: [0; STACK_SIZE],
            delay_timer: 0,
            sound_timer: 0,
            screen: [false; SCREEN_SIZE],
            keypad: [false; KEY_COUNT],
            previous_keypad: [false; KEY_COUNT],
            waiting_for_key: false,
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Zero everything, install the font and point the program counter at the program area.
    pub fn reset(&mut self, seed: u64) {
        *self = State::new();
        self.memory[FONT_START..FONT_START + FONT.len()].copy_from_slice(&FONT);
        self.program_counter = PC_START;
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// One 60 Hz timer tick.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    pub fn sound_active(&self) -> bool {
        self.sound_timer > 0
    }

    /// Read a byte, folding the address into the 12-bit address space.
    pub fn read(&self, addr: u16) -> u8 {
        self.memory[(addr & ADDR_MASK) as usize]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.memory[(addr & ADDR_MASK) as usize] = value;
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x < SCREEN_WIDTH && y < SCREEN_HEIGHT {
            self.screen[x + SCREEN_WIDTH * y]
        } else {
            false
        }
    }

    pub fn lit_pixels(&self) -> usize {
        self.screen.iter().filter(|&&p| p).count()
    }

    /// Move the program counter forward one instruction, wrapping within memory.
    pub fn skip(&mut self) {
        self.program_counter = self.program_counter.wrapping_add(2) & ADDR_MASK;
    }

    /// Move the program counter back one instruction, wrapping within memory.
    pub fn rewind(&mut self) {
        self.program_counter = self.program_counter.wrapping_sub(2) & ADDR_MASK;
    }

    /// Push the program counter and jump. Returns `false` if the stack is full.
    pub fn push_call(&mut self, addr: u16) -> bool {
        let sp = self.stack_pointer as usize;
        if sp >= STACK_SIZE {
            return false;
        }
        self.stack[sp] = self.program_counter;
        self.stack_pointer += 1;
        self.program_counter = addr & ADDR_MASK;
        true
    }

    /// Pop a return address into the program counter. Returns `false` if the stack is empty.
    pub fn pop_return(&mut self) -> bool {
        if self.stack_pointer == 0 {
            return false;
        }
        self.stack_pointer -= 1;
        self.program_counter = self.stack[self.stack_pointer as usize] & ADDR_MASK;
        true
    }

    /// XOR an 8-pixel-wide sprite of `rows` rows from memory at `I` onto the screen.
    ///
    /// The start position wraps around the screen, but rows and columns
    /// running past the right or bottom edge are clipped.
    /// Returns whether any lit pixel was switched off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: u8) -> bool {
        let x_start = x as usize % SCREEN_WIDTH;
        let y_start = y as usize % SCREEN_HEIGHT;
        let mut collision = false;

        for row in 0..rows as usize {
            let y_coord = y_start + row;
            if y_coord >= SCREEN_HEIGHT {
                break;
            }
            let bits = self.read(self.i.wrapping_add(row as u16));
            for col in 0..8 {
                let x_coord = x_start + col;
                if x_coord >= SCREEN_WIDTH {
                    break;
                }
                // MSB is the left-most pixel
                let sprite_pixel = (bits >> (7 - col)) & 1 == 1;
                let pixel = &mut self.screen[x_coord + SCREEN_WIDTH * y_coord];
                let old = *pixel;
                *pixel = old ^ sprite_pixel;
                if old && !*pixel {
                    collision = true;
                }
            }
        }

        collision
    }

    /// The lowest key that is down now but was up when `Fx0A` last looked.
    pub fn fresh_key_press(&self) -> Option<u8> {
        self.keypad
            .iter()
            .zip(self.previous_keypad.iter())
            .position(|(&now, &before)| now && !before)
            .map(|k| k as u8)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
