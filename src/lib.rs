/*!

A CHIP-8 emulator as specified at https://en.wikipedia.org/wiki/CHIP-8.

# Crossterm Frontend

If you want to try the emulator on some programs, there is a ready-to-use implementation
you can run by using `cargo run --release -- <program>`.
The keypad is mapped onto the left side of the keyboard:

```text
1 2 3 C      1 2 3 4
4 5 6 D      Q W E R
7 8 9 E      A S D F
A 0 B F      Z X C V
```

Escape quits and F5 restarts the program.

# Library

The emulator never blocks and never sleeps. The host decides how fast it runs:
call `step` at the CPU rate (500 Hz is typical) and `tick_timers` at 60 Hz.

```rust
use chip8_vm::emulator::Emulator;

let mut emulator = Emulator::new();

// Load a program at address 0x200.
let clear_display = [0x00, 0xE0];
emulator.load(&clear_display).unwrap();
assert_eq!(emulator.step(), None); // Will now clear the display
emulator.tick_timers();

assert!(!emulator.pixel(0, 0));
assert!(!emulator.sound_active());
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip8_vm::emulator::Emulator;
use chip8_vm::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new();

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen);

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
]);
assert_eq!(emulator.state().registers[0xB], 35);
```

## Faults

Stack underflow and overflow, unknown opcodes and fetching past the end of memory
do not stop the machine. `step` returns the fault and `last_fault` remembers it,
and each one is logged through the `log` crate at `warn` level.

## Custom input and output

`EmulatorInput` and `EmulatorOutput` describe somewhere to get key states from and
a screen to draw on. They are optional: `poll_input` and `present` copy state
through them, and everything they do is also available through `set_key`, `pixel`
and `sound_active`.
*/

pub mod cli;
pub mod emulator;
pub mod util;
