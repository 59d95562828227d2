//! Errors returned to the caller and faults raised while running.

use thiserror::Error;

/// A program could not be copied into memory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("program is {size} bytes, but at most {max} bytes fit in memory")]
    TooLarge { size: usize, max: usize },
}

/// Something went wrong while executing an instruction.
///
/// Faults are reported, never fatal: the emulator keeps running so that
/// slightly broken programs stay playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    /// `RET` with an empty call stack. The program counter is left alone.
    #[error("stack underflow: return with an empty call stack")]
    StackUnderflow,
    /// `CALL` with a full call stack. The call is skipped.
    #[error("stack overflow: call with 16 return addresses already stacked")]
    StackOverflow,
    /// The word did not decode to any instruction. It has been skipped.
    #[error("unknown opcode {0:#06X}")]
    UnknownOpcode(u16),
    /// The program counter points at the last byte of memory, so a whole
    /// instruction can not be fetched. The machine stays put.
    #[error("instruction fetch past end of memory at {0:#05X}")]
    FetchOverrun(u16),
}
