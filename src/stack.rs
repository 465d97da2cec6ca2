use crate::error::{Fault, Result};

/// how many nested calls the COSMAC VIP left room for
pub const STACK_DEPTH: usize = 16;

/// return addresses for 2NNN / 00EE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallStack {
    frames: [u16; STACK_DEPTH],
    sp: usize,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            frames: [0; STACK_DEPTH],
            sp: 0,
        }
    }

    pub fn push(&mut self, addr: u16) -> Result<()> {
        let slot = self.frames.get_mut(self.sp).ok_or(Fault::StackOverflow)?;
        *slot = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        self.sp = self.sp.checked_sub(1).ok_or(Fault::StackUnderflow)?;
        Ok(self.frames[self.sp])
    }

    pub fn depth(&self) -> usize {
        self.sp
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo() -> Result<()> {
        let mut s = CallStack::new();
        s.push(0x202)?;
        s.push(0x30a)?;
        assert_eq!(s.depth(), 2);
        assert_eq!(s.pop()?, 0x30a);
        assert_eq!(s.pop()?, 0x202);
        assert_eq!(s.depth(), 0);
        Ok(())
    }

    #[test]
    fn test_overflow() -> Result<()> {
        let mut s = CallStack::new();
        for n in 0..STACK_DEPTH as u16 {
            s.push(0x200 + n * 2)?;
        }
        assert_eq!(s.push(0x400), Err(Fault::StackOverflow));
        // the full stack is intact
        assert_eq!(s.depth(), STACK_DEPTH);
        assert_eq!(s.pop()?, 0x21e);
        Ok(())
    }

    #[test]
    fn test_underflow() {
        let mut s = CallStack::new();
        assert_eq!(s.pop(), Err(Fault::StackUnderflow));
        assert_eq!(s.depth(), 0);
    }
}
