use std::collections::HashMap;

/// Represents an output device that can be written to.
pub trait EmulatorOutput {
    fn set(&mut self, x: usize, y: usize, state: bool);
    fn refresh(&mut self);

    /// Turn the tone on or off. Silent devices can ignore this.
    fn buzz(&mut self, _on: bool) {}
}

/// A simple output device that keeps track of set coordinates.
pub struct DummyOutput {
    screen: HashMap<(usize, usize), bool>,
    pub buzzing: bool,
    pub refreshes: usize,
}

impl DummyOutput {
    pub fn new() -> DummyOutput {
        DummyOutput {
            screen: HashMap::new(),
            buzzing: false,
            refreshes: 0,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.screen.get(&(x, y)).copied().unwrap_or(false)
    }
}

impl Default for DummyOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl EmulatorOutput for DummyOutput {
    fn set(&mut self, x: usize, y: usize, state: bool) {
        self.screen.insert((x, y), state);
    }
    fn refresh(&mut self) {
        self.refreshes += 1;
    }
    fn buzz(&mut self, on: bool) {
        self.buzzing = on;
    }
}
