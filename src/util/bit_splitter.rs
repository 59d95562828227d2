/// A structure for splitting a 16-bit instruction word
/// into the operand fields used by the CHIP-8 instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSplitter(u8, u8);

impl BitSplitter {

    pub fn from_u16(value: u16) -> BitSplitter {
        BitSplitter((value >> 8) as u8, (value & 0x00FF) as u8)
    }

    /// Build from the two bytes of a big-endian word, high byte first.
    pub fn new(high: u8, low: u8) -> BitSplitter {
        BitSplitter(high, low)
    }

    pub fn as_u16(&self) -> u16 {
        ((self.0 as u16) << 8) | self.1 as u16
    }

    /// The four nibbles, most significant first.
    pub fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.0 >> 4, self.0 & 0x0F, self.1 >> 4, self.1 & 0x0F)
    }

    /// `nnn`, the low 12 bits.
    pub fn nnn(&self) -> u16 {
        self.as_u16() & 0x0FFF
    }

    /// `kk`, the low byte.
    pub fn kk(&self) -> u8 {
        self.1
    }
}
