use chip8_vm::emulator::font::FONT;
use chip8_vm::emulator::state::{PC_START, SCREEN_HEIGHT, SCREEN_WIDTH};
use chip8_vm::emulator::{Emulator, Fault, LoadError};
use pretty_assertions::assert_eq;

fn run(program: &[u8], steps: usize) -> Emulator {
    let mut emulator = Emulator::new();
    emulator.reset();
    emulator.load(program).unwrap();
    for _ in 0..steps {
        assert_eq!(emulator.step(), None);
    }
    emulator
}

/// The screen as rows of '#' and '.', trimmed to the top-left corner.
fn corner(emulator: &Emulator, width: usize, height: usize) -> Vec<String> {
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| if emulator.pixel(x, y) { '#' } else { '.' })
                .collect()
        })
        .collect()
}

fn lit_pixels(emulator: &Emulator) -> usize {
    (0..SCREEN_HEIGHT)
        .flat_map(|y| (0..SCREEN_WIDTH).map(move |x| (x, y)))
        .filter(|&(x, y)| emulator.pixel(x, y))
        .count()
}

#[test]
fn jump() {
    let emulator = run(&[0x12, 0x04, 0x00, 0x00, 0x60, 0x2A], 2);
    assert_eq!(emulator.state().registers[0], 0x2A);
    assert_eq!(emulator.state().program_counter, 0x206);
}

#[test]
fn add_with_carry() {
    let emulator = run(&[0x60, 0xFF, 0x61, 0x01, 0x80, 0x14], 3);
    let registers = emulator.state().registers;
    assert_eq!((registers[0x0], registers[0x1], registers[0xF]), (0x00, 0x01, 1));
}

#[test]
fn call_and_return() {
    let emulator = run(
        &[0x22, 0x06, 0x12, 0x04, 0x00, 0x00, 0x60, 0x07, 0x00, 0xEE],
        4,
    );
    assert_eq!(emulator.state().registers[0], 0x07);
    assert_eq!(emulator.state().stack_pointer, 0);
    assert_eq!(emulator.state().program_counter, 0x204);
}

#[test]
fn draw_and_clear() {
    let program = [
        0x60, 0x00, // LD V0, 0
        0x61, 0x00, // LD V1, 0
        0xA0, 0x00, // LD I, 0x000 ; glyph "0"
        0xD0, 0x15, // DRW V0, V1, 5
        0x00, 0xE0, // CLS
    ];
    let mut emulator = run(&program, 4);

    assert_eq!(
        corner(&emulator, 8, 6),
        vec!["####....", "#..#....", "#..#....", "#..#....", "####....", "........"]
    );
    assert_eq!(lit_pixels(&emulator), 14);
    assert_eq!(emulator.state().registers[0xF], 0);

    assert_eq!(emulator.step(), None);
    assert_eq!(lit_pixels(&emulator), 0);
}

#[test]
fn sprite_collision() {
    let program = [0x60, 0x00, 0x61, 0x00, 0xA0, 0x00, 0xD0, 0x15, 0xD0, 0x15];
    let emulator = run(&program, 5);
    assert_eq!(lit_pixels(&emulator), 0);
    assert_eq!(emulator.state().registers[0xF], 1);
}

#[test]
fn binary_coded_decimal() {
    let program = [
        0x60, 0xFD, // LD V0, 253
        0xA3, 0x00, // LD I, 0x300
        0xF0, 0x33, // LD B, V0
    ];
    let emulator = run(&program, 3);
    assert_eq!(&emulator.state().memory[0x300..0x303], &[2, 5, 3]);
}

#[test]
fn every_glyph_is_drawable_via_font_instruction() {
    for digit in 0..16u8 {
        let program = [
            0x60, digit, // LD V0, digit
            0xF0, 0x29, // LD F, V0
            0x61, 0x00, // LD V1, 0
            0xD1, 0x15, // DRW V1, V1, 5
        ];
        let emulator = run(&program, 4);
        let glyph = &FONT[digit as usize * 5..digit as usize * 5 + 5];
        let expected: usize = glyph.iter().map(|row| row.count_ones() as usize).sum();
        assert_eq!(lit_pixels(&emulator), expected, "glyph {:X}", digit);
    }
}

#[test]
fn draw_clips_at_bottom_right() {
    let program = [
        0x60, 0x3F, // LD V0, 63
        0x61, 0x1F, // LD V1, 31
        0xA0, 0x00, // LD I, 0x000 ; glyph "0"
        0xD0, 0x15, // DRW V0, V1, 5
    ];
    let emulator = run(&program, 4);
    assert!(emulator.pixel(63, 31));
    assert_eq!(lit_pixels(&emulator), 1);
    assert!(!emulator.pixel(0, 0));
}

#[test]
fn key_wait_resumes_on_press() {
    let mut emulator = run(&[0xF3, 0x0A, 0x64, 0x01], 0);
    for _ in 0..10 {
        emulator.step();
    }
    assert!(emulator.waiting_for_key());
    assert_eq!(emulator.state().program_counter, PC_START);

    emulator.set_key(0xE, true);
    emulator.step();
    emulator.step();
    assert_eq!(emulator.state().registers[0x3], 0xE);
    assert_eq!(emulator.state().registers[0x4], 0x01);
}

#[test]
fn faults_do_not_stop_the_machine() {
    let program = [
        0x00, 0xEE, // RET with empty stack
        0x51, 0x23, // not an instruction
        0x60, 0x09, // LD V0, 9
    ];
    let mut emulator = Emulator::new();
    emulator.load(&program).unwrap();

    assert_eq!(emulator.step(), Some(Fault::StackUnderflow));
    assert_eq!(emulator.step(), Some(Fault::UnknownOpcode(0x5123)));
    assert_eq!(emulator.step(), None);
    assert_eq!(emulator.state().registers[0], 9);
    assert_eq!(emulator.last_fault(), Some(Fault::UnknownOpcode(0x5123)));
}

#[test]
fn oversized_rom_is_rejected() {
    let mut emulator = Emulator::new();
    let rom = vec![0; 3585];
    assert_eq!(
        emulator.load(&rom),
        Err(LoadError::TooLarge { size: 3585, max: 3584 })
    );
}
