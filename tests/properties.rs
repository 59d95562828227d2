use chip8_vm::emulator::instruction::{Addr, Const, Instruction, Reg};
use chip8_vm::emulator::state::{MEM_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH, STACK_SIZE};
use chip8_vm::emulator::{Config, Emulator};
use proptest::prelude::*;

fn loaded(program: &[u8], seed: u64) -> Emulator {
    let mut emulator = Emulator::with_config(Config::with_seed(seed));
    emulator.load(program).unwrap();
    emulator
}

proptest! {
    #[test]
    fn random_programs_keep_invariants(
        program in prop::collection::vec(any::<u8>(), 0..512),
        keys in prop::collection::vec(any::<bool>(), 16),
        seed in any::<u64>(),
    ) {
        let mut emulator = loaded(&program, seed);
        for (k, &pressed) in keys.iter().enumerate() {
            emulator.set_key(k as u8, pressed);
        }
        for n in 0..400 {
            emulator.step();
            if n % 8 == 0 {
                emulator.tick_timers();
            }
            let state = emulator.state();
            prop_assert!((state.program_counter as usize) < MEM_SIZE);
            prop_assert!((state.stack_pointer as usize) <= STACK_SIZE);
        }
    }

    #[test]
    fn arithmetic_flag_is_a_bit(
        vx in any::<u8>(),
        vy in any::<u8>(),
        x in 0u8..16,
        y in 0u8..16,
        op in prop::sample::select(vec![0x4u8, 0x5, 0x7]),
    ) {
        let program = [
            0x60 | x, vx,
            0x60 | y, vy,
            0x80 | x, (y << 4) | op,
        ];
        let mut emulator = loaded(&program, 0);
        for _ in 0..3 {
            prop_assert_eq!(emulator.step(), None);
        }
        prop_assert!(emulator.state().registers[0xF] <= 1);
    }

    #[test]
    fn draw_xors_sprite_onto_screen(
        first in prop::collection::vec(any::<u8>(), 1..16),
        second in prop::collection::vec(any::<u8>(), 1..16),
        a in (any::<u8>(), any::<u8>()),
        b in (any::<u8>(), any::<u8>()),
    ) {
        let mut emulator = Emulator::new();
        let sprite_at = |emulator: &mut Emulator, rows: &[u8], (x, y): (u8, u8)| {
            let mut instructions = vec![Instruction::SetI(Addr(0x300))];
            for (n, &row) in rows.iter().enumerate() {
                instructions.push(Instruction::SetRegToConst(Reg(n as u8), Const(row)));
            }
            instructions.push(Instruction::RegDump(Reg(rows.len() as u8 - 1)));
            instructions.push(Instruction::SetRegToConst(Reg(0xD), Const(x)));
            instructions.push(Instruction::SetRegToConst(Reg(0xE), Const(y)));
            instructions.push(Instruction::Draw(Reg(0xD), Reg(0xE), Const(rows.len() as u8)));
            emulator.execute_many(&instructions);
        };

        sprite_at(&mut emulator, &first, a);
        let before = emulator.state().screen;
        sprite_at(&mut emulator, &second, b);
        let after = emulator.state().screen;

        // Reference model: clipped XOR from the wrapped start position
        let mut expected = before;
        let mut collision = false;
        let (x0, y0) = (b.0 as usize % SCREEN_WIDTH, b.1 as usize % SCREEN_HEIGHT);
        for (r, &row) in second.iter().enumerate() {
            for c in 0..8 {
                let (x, y) = (x0 + c, y0 + r);
                if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT || (row >> (7 - c)) & 1 == 0 {
                    continue;
                }
                let pixel = &mut expected[x + SCREEN_WIDTH * y];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }

        prop_assert!(after.iter().zip(expected.iter()).all(|(a, e)| a == e));
        prop_assert_eq!(emulator.state().registers[0xF], collision as u8);

        let lit = |screen: &[bool]| screen.iter().filter(|&&p| p).count();
        let cleared = before.iter().zip(after.iter()).filter(|&(&b, &a)| b && !a).count();
        let drawn = before.iter().zip(after.iter()).filter(|&(&b, &a)| !b && a).count();
        prop_assert_eq!(lit(&after[..]), lit(&before[..]) - cleared + drawn);
    }

    #[test]
    fn reset_is_idempotent(
        program in prop::collection::vec(any::<u8>(), 0..256),
        steps in 0usize..200,
        seed in any::<u64>(),
    ) {
        let mut emulator = loaded(&program, seed);
        for _ in 0..steps {
            emulator.step();
        }
        emulator.reset();
        let once = emulator.state().clone();
        emulator.reset();
        prop_assert!(emulator.state() == &once);

        let fresh = Emulator::with_config(Config::with_seed(seed));
        prop_assert!(fresh.state() == &once);
    }

    #[test]
    fn timers_count_down_to_zero(dt in any::<u8>(), st in any::<u8>(), ticks in 0usize..300) {
        let mut emulator = Emulator::new();
        emulator.execute_many(&[
            Instruction::SetRegToConst(Reg(0), Const(dt)),
            Instruction::SetRegToConst(Reg(1), Const(st)),
            Instruction::SetDelayTimerToReg(Reg(0)),
            Instruction::SetSoundTimerToReg(Reg(1)),
        ]);
        for _ in 0..ticks {
            emulator.tick_timers();
        }
        let state = emulator.state();
        prop_assert_eq!(state.delay_timer as usize, (dt as usize).saturating_sub(ticks));
        prop_assert_eq!(state.sound_timer as usize, (st as usize).saturating_sub(ticks));
        prop_assert_eq!(emulator.sound_active(), state.sound_timer > 0);
    }

    #[test]
    fn register_dump_then_load_restores(
        registers in prop::collection::vec(any::<u8>(), 16),
        x in 0u8..16,
        i in 0u16..0x1000,
    ) {
        let mut emulator = Emulator::new();
        let mut setup = vec![Instruction::SetI(Addr(i))];
        for (n, &value) in registers.iter().enumerate() {
            setup.push(Instruction::SetRegToConst(Reg(n as u8), Const(value)));
        }
        emulator.execute_many(&setup);
        emulator.execute_single(Instruction::RegDump(Reg(x)));

        let scramble: Vec<Instruction> = (0..=x)
            .map(|n| Instruction::SetRegToConst(Reg(n), Const(!registers[n as usize])))
            .collect();
        emulator.execute_many(&scramble);
        emulator.execute_single(Instruction::RegLoad(Reg(x)));

        prop_assert_eq!(&emulator.state().registers[..=x as usize], &registers[..=x as usize]);
        prop_assert_eq!(emulator.state().i, i);
    }

    #[test]
    fn bcd_reconstructs_value(value in any::<u8>(), i in 0u16..0x1000) {
        let mut emulator = Emulator::new();
        emulator.execute_many(&[
            Instruction::SetRegToConst(Reg(7), Const(value)),
            Instruction::SetI(Addr(i)),
            Instruction::SetIToBcdOfReg(Reg(7)),
        ]);
        let memory = &emulator.state().memory;
        let digit = |offset: u16| memory[((i + offset) & 0xFFF) as usize] as u32;
        prop_assert!(digit(0) <= 2 && digit(1) <= 9 && digit(2) <= 9);
        prop_assert_eq!(100 * digit(0) + 10 * digit(1) + digit(2), value as u32);
    }
}
