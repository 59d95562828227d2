use super::key_buffer::KeyBuffer;
use chip8_vm::emulator::input::EmulatorInput;
use chip8_vm::emulator::state::Keypad;
use crossterm::event::{poll, read, Event, KeyCode};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const HOLD_TIMEOUT: Duration = Duration::from_millis(250);
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Requests for the host rather than the emulated machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Quit,
    Restart,
}

/// A struct for managing keypresses that will automatically
/// start a thread that grabs keypresses.
pub struct KeyManager {
    stop: Arc<AtomicBool>,
    key_buffer: Arc<KeyBuffer>,
    controls: Receiver<Control>,
    event_listener: Option<JoinHandle<()>>,
}

impl KeyManager {
    // Start event listener thread
    pub fn new() -> KeyManager {
        let stop = Arc::new(AtomicBool::new(false));
        let key_buffer = Arc::new(KeyBuffer::new(HOLD_TIMEOUT));
        let (sender, controls) = channel();
        let event_listener = event_listener(stop.clone(), key_buffer.clone(), sender);
        KeyManager {
            stop,
            key_buffer,
            controls,
            event_listener: Some(event_listener),
        }
    }

    /// The next pending host request, if any.
    pub fn control(&self) -> Option<Control> {
        self.controls.try_recv().ok()
    }
}

impl EmulatorInput for KeyManager {
    fn pressed_keys(&self) -> Keypad {
        self.key_buffer.held()
    }
}

impl Drop for KeyManager {
    fn drop(&mut self) {
        // Tell the event listener to stop, then wait for it
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.event_listener.take() {
            let _ = handle.join();
        }
    }
}

/// Starts a thread that listens for key events and records them in the key buffer.
fn event_listener(
    stop: Arc<AtomicBool>,
    key_buffer: Arc<KeyBuffer>,
    controls: Sender<Control>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::SeqCst) {
            match poll(POLL_INTERVAL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => {
                    log::error!("Could not poll terminal events: {}", err);
                    break;
                }
            }

            let event = match read() {
                Ok(event) => event,
                Err(err) => {
                    log::error!("Could not read terminal event: {}", err);
                    break;
                }
            };
            log::trace!("Got event {:?}", event);

            if let Event::Key(key_event) = event {
                let control = match key_event.code {
                    KeyCode::Esc => Some(Control::Quit),
                    KeyCode::F(5) => Some(Control::Restart),
                    code => {
                        if let Some(key) = key_to_hex(code) {
                            key_buffer.press(key);
                        }
                        None
                    }
                };
                if let Some(control) = control {
                    if controls.send(control).is_err() {
                        break;
                    }
                }
            }
        }
    })
}

/// Map the left block of a QWERTY keyboard onto the hex keypad.
///
/// ```text
/// 1 2 3 C      1 2 3 4
/// 4 5 6 D      Q W E R
/// 7 8 9 E      A S D F
/// A 0 B F      Z X C V
/// ```
pub fn key_to_hex(key: KeyCode) -> Option<u8> {
    let c = match key {
        KeyCode::Char(c) => c.to_ascii_lowercase(),
        _ => return None,
    };
    let hex = match c {
        '1' => 0x1, '2' => 0x2, '3' => 0x3, '4' => 0xC,
        'q' => 0x4, 'w' => 0x5, 'e' => 0x6, 'r' => 0xD,
        'a' => 0x7, 's' => 0x8, 'd' => 0x9, 'f' => 0xE,
        'z' => 0xA, 'x' => 0x0, 'c' => 0xB, 'v' => 0xF,
        _ => return None,
    };
    Some(hex)
}
