use crate::error::{Fault, Result};

// NB. addresses are u16 as per the chip-8; lengths and offsets into the
//     backing store are usize to stop endless casting

/// Represents memory map, ROM, RAM etc. Every access is bounds checked;
/// nothing wraps around the top of memory.
pub trait MemoryMap {
    /// the whole of the underlying memory, read-only
    fn bytes(&self) -> &[u8];

    /// the whole of the underlying memory, read-write
    fn bytes_mut(&mut self) -> &mut [u8];

    /// get a r/o slice of `len` bytes from `addr`
    fn slice(&self, addr: u16, len: usize) -> Result<&[u8]> {
        let a = addr as usize;
        let end = checked_end(a, len, self.bytes().len())?;
        Ok(&self.bytes()[a..end])
    }

    /// write a chunk of bytes into "RAM"
    fn write(&mut self, addr: u16, data: &[u8]) -> Result<()> {
        let a = addr as usize;
        let end = checked_end(a, data.len(), self.bytes().len())?;
        self.bytes_mut()[a..end].copy_from_slice(data);
        Ok(())
    }

    fn read_byte(&self, addr: u16) -> Result<u8> {
        Ok(self.slice(addr, 1)?[0])
    }

    fn write_byte(&mut self, addr: u16, value: u8) -> Result<()> {
        self.write(addr, &[value])
    }

    /// get a big-endian two-byte word (instructions)
    fn read_word(&self, addr: u16) -> Result<u16> {
        let word = self.slice(addr, 2)?;
        Ok(u16::from_be_bytes([word[0], word[1]]))
    }
}

/// one past the last byte of `len` bytes at `addr`, if that fits in `limit`
fn checked_end(addr: usize, len: usize, limit: usize) -> Result<usize> {
    let end = addr + len;
    if end > limit {
        // report the first byte that doesn't exist
        return Err(Fault::OutOfBounds {
            addr: addr.max(limit),
        });
    }
    Ok(end)
}

/// how much RAM we have
pub const MEMORY_SIZE: usize = 4096;

/// where the program is loaded
pub const PROGRAM_ADDR: u16 = 0x0200;

/// the largest program that fits between PROGRAM_ADDR and the top of RAM
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_ADDR as usize;

/// where the font lives, in the space the COSMAC interpreter used to occupy
pub const FONT_ADDR: u16 = 0x050;

/// bytes per font glyph; one byte per row of a 4x5 sprite
pub const GLYPH_SIZE: u16 = 5;

/// Defines the CHIP-8 standard memory map
///   0x0000-0x01ff  interpreter (font set at 0x050-0x09f)
///   0x0200-0x0fff  program and work RAM
pub struct AddressSpace {
    bytes: Box<[u8]>,
}

impl MemoryMap for AddressSpace {
    fn bytes(&self) -> &[u8] {
        &self.bytes
    }
    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl AddressSpace {
    /// power-on memory: zeroed apart from the font
    pub fn new() -> Self {
        let mut mm = AddressSpace {
            bytes: vec![0u8; MEMORY_SIZE].into_boxed_slice(),
        };
        mm.reset();
        mm
    }

    fn reset(&mut self) {
        self.bytes.fill(0);
        let font = FONT_ADDR as usize;
        self.bytes[font..font + FONT.len()].copy_from_slice(&FONT);
    }

    /// wipe memory and load a CHIP-8 program at 0x200. an oversized program
    /// leaves memory as it was
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Fault::ProgramTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        self.reset();
        self.write(PROGRAM_ADDR, program)
    }

    /// address of the built-in glyph for the low nibble of `digit`
    pub fn font_glyph_addr(digit: u8) -> u16 {
        FONT_ADDR + GLYPH_SIZE * u16::from(digit & 0x0f)
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
