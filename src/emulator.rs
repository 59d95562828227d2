//! The CHIP-8 virtual machine and the interfaces a host uses to drive it.

pub mod config;
#[allow(clippy::module_inception)]
pub mod emulator;
pub mod fault;
pub mod font;
pub mod input;
pub mod instruction;
pub mod output;
pub mod state;

pub use config::{Config, Quirks};
pub use emulator::Emulator;
pub use fault::{Fault, LoadError};
