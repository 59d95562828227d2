use chip8_vm::emulator::state::{Keypad, KEY_COUNT};
use std::{
    sync::Mutex,
    time::{Duration, Instant},
};

/// A thread-safe record of when each keypad key was last pressed.
/// Terminals report presses but not releases, so a key counts as
/// held until `timeout` has passed since its latest press.
/// Wrap it in an `std::sync::Arc` and you are good to go.
pub struct KeyBuffer {
    timeout: Duration,
    last_pressed: Mutex<[Option<Instant>; KEY_COUNT]>,
}

impl KeyBuffer {

    /// Create a new `KeyBuffer` that forgets presses older than `timeout`.
    pub fn new(timeout: Duration) -> KeyBuffer {
        KeyBuffer {
            timeout,
            last_pressed: Mutex::new([None; KEY_COUNT]),
        }
    }

    /// Record a press of keypad key `key`. Keys above 0xF are ignored.
    pub fn press(&self, key: u8) {
        self.press_at(key, Instant::now());
    }

    fn press_at(&self, key: u8, at: Instant) {
        let mut guard = self.last_pressed.lock().unwrap();
        if let Some(slot) = guard.get_mut(key as usize) {
            *slot = Some(at);
        }
    }

    /// Which keys were pressed recently enough to still count as held.
    pub fn held(&self) -> Keypad {
        let guard = self.last_pressed.lock().unwrap();
        let mut keypad = [false; KEY_COUNT];
        for (slot, pressed) in keypad.iter_mut().zip(guard.iter()) {
            *slot = pressed.map_or(false, |at| at.elapsed() < self.timeout);
        }
        keypad
    }
}
