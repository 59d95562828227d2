use crate::emulator::state::Keypad;

/// Represents an input device that knows which of the keys `0x0..=0xF` are held down.
pub trait EmulatorInput {
    fn pressed_keys(&self) -> Keypad;
}
