//! Decoding 16-bit instruction words into something we can match on.

use crate::error::{Fault, Result};
use std::fmt;

/// V register selector, 0x0-0xf
pub type Reg = u8;

/// One decoded CHIP-8 instruction, operands included. X and Y are register
/// selectors; NN a byte immediate; NNN a 12-bit address; N a nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 0NNN
    Sys(u16),
    /// 00E0
    ClearScreen,
    /// 00EE
    Return,
    /// 1NNN
    Jump(u16),
    /// 2NNN
    Call(u16),
    /// 3XNN
    SkipEqImm(Reg, u8),
    /// 4XNN
    SkipNeImm(Reg, u8),
    /// 5XY0
    SkipEqReg(Reg, Reg),
    /// 6XNN
    LoadImm(Reg, u8),
    /// 7XNN
    AddImm(Reg, u8),
    /// 8XY0
    LoadReg(Reg, Reg),
    /// 8XY1
    Or(Reg, Reg),
    /// 8XY2
    And(Reg, Reg),
    /// 8XY3
    Xor(Reg, Reg),
    /// 8XY4
    AddReg(Reg, Reg),
    /// 8XY5
    SubReg(Reg, Reg),
    /// 8XY6
    ShiftRight(Reg, Reg),
    /// 8XY7
    SubN(Reg, Reg),
    /// 8XYE
    ShiftLeft(Reg, Reg),
    /// 9XY0
    SkipNeReg(Reg, Reg),
    /// ANNN
    LoadIndex(u16),
    /// BNNN
    JumpOffset(u16),
    /// CXNN
    Random(Reg, u8),
    /// DXYN
    Draw(Reg, Reg, u8),
    /// EX9E
    SkipKeyDown(Reg),
    /// EXA1
    SkipKeyUp(Reg),
    /// FX07
    LoadDelay(Reg),
    /// FX0A
    WaitKey(Reg),
    /// FX15
    SetDelay(Reg),
    /// FX18
    SetSound(Reg),
    /// FX1E
    AddIndex(Reg),
    /// FX29
    LoadFontAddr(Reg),
    /// FX33
    StoreBcd(Reg),
    /// FX55
    StoreRegs(Reg),
    /// FX65
    LoadRegs(Reg),
}

impl Instruction {
    /// Split a word into its fields and work out which instruction it is.
    /// Anything that isn't a known encoding is `Fault::UnknownOpcode`.
    pub fn decode(word: u16) -> Result<Instruction> {
        use Instruction::*;

        let class = (word >> 12) as u8;
        let x = ((word >> 8) & 0xf) as u8;
        let y = ((word >> 4) & 0xf) as u8;
        let n = (word & 0xf) as u8;
        let nn = (word & 0xff) as u8;
        let nnn = word & 0x0fff;

        let instruction = match (class, n) {
            (0x0, _) => match nnn {
                0x0e0 => ClearScreen,
                0x0ee => Return,
                _ => Sys(nnn),
            },
            (0x1, _) => Jump(nnn),
            (0x2, _) => Call(nnn),
            (0x3, _) => SkipEqImm(x, nn),
            (0x4, _) => SkipNeImm(x, nn),
            (0x5, 0x0) => SkipEqReg(x, y),
            (0x6, _) => LoadImm(x, nn),
            (0x7, _) => AddImm(x, nn),
            (0x8, 0x0) => LoadReg(x, y),
            (0x8, 0x1) => Or(x, y),
            (0x8, 0x2) => And(x, y),
            (0x8, 0x3) => Xor(x, y),
            (0x8, 0x4) => AddReg(x, y),
            (0x8, 0x5) => SubReg(x, y),
            (0x8, 0x6) => ShiftRight(x, y),
            (0x8, 0x7) => SubN(x, y),
            (0x8, 0xe) => ShiftLeft(x, y),
            (0x9, 0x0) => SkipNeReg(x, y),
            (0xa, _) => LoadIndex(nnn),
            (0xb, _) => JumpOffset(nnn),
            (0xc, _) => Random(x, nn),
            (0xd, _) => Draw(x, y, n),
            (0xe, _) => match nn {
                0x9e => SkipKeyDown(x),
                0xa1 => SkipKeyUp(x),
                _ => return Err(Fault::UnknownOpcode(word)),
            },
            (0xf, _) => match nn {
                0x07 => LoadDelay(x),
                0x0a => WaitKey(x),
                0x15 => SetDelay(x),
                0x18 => SetSound(x),
                0x1e => AddIndex(x),
                0x29 => LoadFontAddr(x),
                0x33 => StoreBcd(x),
                0x55 => StoreRegs(x),
                0x65 => LoadRegs(x),
                _ => return Err(Fault::UnknownOpcode(word)),
            },
            _ => return Err(Fault::UnknownOpcode(word)),
        };
        Ok(instruction)
    }
}

/// conventional (Cowgod-ish) mnemonics, for logs
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Sys(a) => write!(f, "SYS {:#05x}", a),
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump(a) => write!(f, "JP {:#05x}", a),
            Call(a) => write!(f, "CALL {:#05x}", a),
            SkipEqImm(x, nn) => write!(f, "SE V{:X}, {:#04x}", x, nn),
            SkipNeImm(x, nn) => write!(f, "SNE V{:X}, {:#04x}", x, nn),
            SkipEqReg(x, y) => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadImm(x, nn) => write!(f, "LD V{:X}, {:#04x}", x, nn),
            AddImm(x, nn) => write!(f, "ADD V{:X}, {:#04x}", x, nn),
            LoadReg(x, y) => write!(f, "LD V{:X}, V{:X}", x, y),
            Or(x, y) => write!(f, "OR V{:X}, V{:X}", x, y),
            And(x, y) => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor(x, y) => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg(x, y) => write!(f, "ADD V{:X}, V{:X}", x, y),
            SubReg(x, y) => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight(x, y) => write!(f, "SHR V{:X}, V{:X}", x, y),
            SubN(x, y) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft(x, y) => write!(f, "SHL V{:X}, V{:X}", x, y),
            SkipNeReg(x, y) => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex(a) => write!(f, "LD I, {:#05x}", a),
            JumpOffset(a) => write!(f, "JP V0, {:#05x}", a),
            Random(x, nn) => write!(f, "RND V{:X}, {:#04x}", x, nn),
            Draw(x, y, n) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipKeyDown(x) => write!(f, "SKP V{:X}", x),
            SkipKeyUp(x) => write!(f, "SKNP V{:X}", x),
            LoadDelay(x) => write!(f, "LD V{:X}, DT", x),
            WaitKey(x) => write!(f, "LD V{:X}, K", x),
            SetDelay(x) => write!(f, "LD DT, V{:X}", x),
            SetSound(x) => write!(f, "LD ST, V{:X}", x),
            AddIndex(x) => write!(f, "ADD I, V{:X}", x),
            LoadFontAddr(x) => write!(f, "LD F, V{:X}", x),
            StoreBcd(x) => write!(f, "LD B, V{:X}", x),
            StoreRegs(x) => write!(f, "LD [I], V{:X}", x),
            LoadRegs(x) => write!(f, "LD V{:X}, [I]", x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Instruction::*;
    use super::*;

    #[test]
    fn test_opcode_translation() -> Result<()> {
        let cases = [
            (0x00e0, ClearScreen),
            (0x00ee, Return),
            (0x0123, Sys(0x123)),
            (0x1234, Jump(0x234)),
            (0x2456, Call(0x456)),
            (0x342a, SkipEqImm(0x4, 0x2a)),
            (0x4a75, SkipNeImm(0xa, 0x75)),
            (0x5ae0, SkipEqReg(0xa, 0xe)),
            (0x63f5, LoadImm(0x3, 0xf5)),
            (0x7b12, AddImm(0xb, 0x12)),
            (0x8590, LoadReg(0x5, 0x9)),
            (0x8101, Or(0x1, 0x0)),
            (0x8642, And(0x6, 0x4)),
            (0x87f3, Xor(0x7, 0xf)),
            (0x8264, AddReg(0x2, 0x6)),
            (0x8c45, SubReg(0xc, 0x4)),
            (0x8106, ShiftRight(0x1, 0x0)),
            (0x86d7, SubN(0x6, 0xd)),
            (0x8e3e, ShiftLeft(0xe, 0x3)),
            (0x9990, SkipNeReg(0x9, 0x9)),
            (0xa568, LoadIndex(0x568)),
            (0xbabc, JumpOffset(0xabc)),
            (0xc5af, Random(0x5, 0xaf)),
            (0xd7b0, Draw(0x7, 0xb, 0)),
            (0xd12f, Draw(0x1, 0x2, 0xf)),
            (0xe49e, SkipKeyDown(0x4)),
            (0xeca1, SkipKeyUp(0xc)),
            (0xf907, LoadDelay(0x9)),
            (0xfd0a, WaitKey(0xd)),
            (0xf315, SetDelay(0x3)),
            (0xf718, SetSound(0x7)),
            (0xf91e, AddIndex(0x9)),
            (0xff29, LoadFontAddr(0xf)),
            (0xf533, StoreBcd(0x5)),
            (0xf655, StoreRegs(0x6)),
            (0xf865, LoadRegs(0x8)),
        ];

        for (word, instr) in cases {
            assert_eq!(Instruction::decode(word)?, instr, "decoding {:#06x}", word);
        }
        Ok(())
    }

    #[test]
    fn test_unknown_sub_ops() {
        for word in [0x5121, 0x8008, 0x800f, 0x9ab1, 0xe19f, 0xe0a0, 0xf000, 0xf175, 0xf0ff] {
            assert_eq!(
                Instruction::decode(word),
                Err(Fault::UnknownOpcode(word)),
                "decoding {:#06x}",
                word
            );
        }
    }

    #[test]
    fn test_mnemonics() {
        assert_eq!(Draw(0x1, 0xa, 5).to_string(), "DRW V1, VA, 5");
        assert_eq!(LoadIndex(0x2ea).to_string(), "LD I, 0x2ea");
        assert_eq!(LoadImm(0x3, 0x42).to_string(), "LD V3, 0x42");
        assert_eq!(StoreRegs(0xf).to_string(), "LD [I], VF");
    }
}
