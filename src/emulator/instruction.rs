use crate::util::bit_splitter::BitSplitter;

/// A wrapper for 12-bit addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for register indices `0x0..=0xF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for 8-bit and 4-bit immediates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - KK: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen, // 00E0
    Return, // 00EE
    Goto(Addr), // 1NNN
    Call(Addr), // 2NNN
    IfRegEqConst(Reg, Const), // 3XKK
    IfRegNeqConst(Reg, Const), // 4XKK
    IfRegEqReg(Reg, Reg), // 5XY0
    SetRegToConst(Reg, Const), // 6XKK
    IncRegByConst(Reg, Const), // 7XKK
    SetRegToReg(Reg, Reg), // 8XY0
    BitwiseOr(Reg, Reg), // 8XY1
    BitwiseAnd(Reg, Reg), // 8XY2
    BitwiseXor(Reg, Reg), // 8XY3
    IncRegByReg(Reg, Reg), // 8XY4
    DecRegByReg(Reg, Reg), // 8XY5
    BitshiftRight(Reg, Reg), // 8XY6
    SetVxVyMinusVx(Reg, Reg), // 8XY7
    BitshiftLeft(Reg, Reg), // 8XYE
    IfRegNeqReg(Reg, Reg), // 9XY0
    SetI(Addr), // ANNN
    GotoPlusV0(Addr), // BNNN
    SetVxRand(Reg, Const), // CXKK
    Draw(Reg, Reg, Const), // DXYN
    IfKeyDown(Reg), // EX9E
    IfKeyUp(Reg), // EXA1
    SetRegToDelayTimer(Reg), // FX07
    WaitForKey(Reg), // FX0A
    SetDelayTimerToReg(Reg), // FX15
    SetSoundTimerToReg(Reg), // FX18
    AddRegToI(Reg), // FX1E
    SetIToGlyphOfReg(Reg), // FX29
    SetIToBcdOfReg(Reg), // FX33
    RegDump(Reg), // FX55
    RegLoad(Reg), // FX65
}

impl Instruction {

    /// Decode a 16-bit instruction word. Returns `None` for words that are not instructions.
    pub fn from_u16(value: u16) -> Option<Instruction> {
        Instruction::decode(BitSplitter::from_u16(value))
    }

    /// Decode the two bytes of an instruction, high byte first.
    pub fn from_two_u8(high: u8, low: u8) -> Option<Instruction> {
        Instruction::decode(BitSplitter::new(high, low))
    }

    fn decode(word: BitSplitter) -> Option<Instruction> {
        let addr = Addr(word.nnn());
        let kk = Const(word.kk());
        let instruction = match word.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::ClearScreen,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Return,
            (0x1, _, _, _) => Instruction::Goto(addr),
            (0x2, _, _, _) => Instruction::Call(addr),
            (0x3, x, _, _) => Instruction::IfRegEqConst(Reg(x), kk),
            (0x4, x, _, _) => Instruction::IfRegNeqConst(Reg(x), kk),
            (0x5, x, y, 0x0) => Instruction::IfRegEqReg(Reg(x), Reg(y)),
            (0x6, x, _, _) => Instruction::SetRegToConst(Reg(x), kk),
            (0x7, x, _, _) => Instruction::IncRegByConst(Reg(x), kk),
            (0x8, x, y, 0x0) => Instruction::SetRegToReg(Reg(x), Reg(y)),
            (0x8, x, y, 0x1) => Instruction::BitwiseOr(Reg(x), Reg(y)),
            (0x8, x, y, 0x2) => Instruction::BitwiseAnd(Reg(x), Reg(y)),
            (0x8, x, y, 0x3) => Instruction::BitwiseXor(Reg(x), Reg(y)),
            (0x8, x, y, 0x4) => Instruction::IncRegByReg(Reg(x), Reg(y)),
            (0x8, x, y, 0x5) => Instruction::DecRegByReg(Reg(x), Reg(y)),
            (0x8, x, y, 0x6) => Instruction::BitshiftRight(Reg(x), Reg(y)),
            (0x8, x, y, 0x7) => Instruction::SetVxVyMinusVx(Reg(x), Reg(y)),
            (0x8, x, y, 0xE) => Instruction::BitshiftLeft(Reg(x), Reg(y)),
            (0x9, x, y, 0x0) => Instruction::IfRegNeqReg(Reg(x), Reg(y)),
            (0xA, _, _, _) => Instruction::SetI(addr),
            (0xB, _, _, _) => Instruction::GotoPlusV0(addr),
            (0xC, x, _, _) => Instruction::SetVxRand(Reg(x), kk),
            (0xD, x, y, n) => Instruction::Draw(Reg(x), Reg(y), Const(n)),
            (0xE, x, 0x9, 0xE) => Instruction::IfKeyDown(Reg(x)),
            (0xE, x, 0xA, 0x1) => Instruction::IfKeyUp(Reg(x)),
            (0xF, x, 0x0, 0x7) => Instruction::SetRegToDelayTimer(Reg(x)),
            (0xF, x, 0x0, 0xA) => Instruction::WaitForKey(Reg(x)),
            (0xF, x, 0x1, 0x5) => Instruction::SetDelayTimerToReg(Reg(x)),
            (0xF, x, 0x1, 0x8) => Instruction::SetSoundTimerToReg(Reg(x)),
            (0xF, x, 0x1, 0xE) => Instruction::AddRegToI(Reg(x)),
            (0xF, x, 0x2, 0x9) => Instruction::SetIToGlyphOfReg(Reg(x)),
            (0xF, x, 0x3, 0x3) => Instruction::SetIToBcdOfReg(Reg(x)),
            (0xF, x, 0x5, 0x5) => Instruction::RegDump(Reg(x)),
            (0xF, x, 0x6, 0x5) => Instruction::RegLoad(Reg(x)),
            _ => return None,
        };
        Some(instruction)
    }
}
