use crate::memory::PROGRAM_ADDR;

/// number of general purpose V registers
pub const REGISTER_COUNT: usize = 16;

/// VF doubles as the carry / borrow / collision flag
pub const FLAG: u8 = 0xf;

/// V0-VF, plus the I pointer and the program counter.
///
/// Register selectors come out of 4-bit instruction fields, so indexing with
/// them can't go out of range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    v: [u8; REGISTER_COUNT],
    /// I; only the low 12 bits address memory
    pub index: u16,
    pub pc: u16,
}

impl RegisterFile {
    pub fn new() -> Self {
        RegisterFile {
            v: [0; REGISTER_COUNT],
            index: 0,
            pc: PROGRAM_ADDR,
        }
    }

    pub fn get(&self, x: u8) -> u8 {
        self.v[usize::from(x)]
    }

    pub fn set(&mut self, x: u8, value: u8) {
        self.v[usize::from(x)] = value;
    }

    pub fn set_flag(&mut self, on: bool) {
        self.v[usize::from(FLAG)] = u8::from(on);
    }

    /// V0..=Vx
    pub fn up_to(&self, x: u8) -> &[u8] {
        &self.v[..=usize::from(x)]
    }

    /// V0..=Vx, writable
    pub fn up_to_mut(&mut self, x: u8) -> &mut [u8] {
        &mut self.v[..=usize::from(x)]
    }

    /// step past the next instruction
    pub fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_on_state() {
        let r = RegisterFile::new();
        assert_eq!(r.pc, 0x200);
        assert_eq!(r.index, 0);
        assert_eq!(r.up_to(0xf), &[0; 16]);
    }

    #[test]
    fn test_flag_is_vf() {
        let mut r = RegisterFile::new();
        r.set_flag(true);
        assert_eq!(r.get(0xf), 1);
        r.set_flag(false);
        assert_eq!(r.get(0xf), 0);
    }

    #[test]
    fn test_up_to_is_inclusive() {
        let mut r = RegisterFile::new();
        r.up_to_mut(2).copy_from_slice(&[1, 2, 3]);
        assert_eq!(r.up_to(3), &[1, 2, 3, 0]);
    }
}
