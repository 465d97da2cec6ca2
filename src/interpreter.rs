//! # interpreter
//!
//! Owns every piece of machine state and steps it one instruction at a time.
//! A host drives two clocks independently:
//!
//!  * `cycle()` at whatever CPU rate it likes (a few hundred to ~1000Hz
//!    suits most ROMs)
//!  * `tick_timers()` at 60Hz, regardless of CPU rate
//!
//! and between those reads the framebuffer and sound flag and writes keys.
//!
//! Execution is a little state machine:
//!
//!  Running ----FX0A----> WaitingForKey(x) ----key down----> Running
//!     |
//!     `------any fault------> Halted(fault) ----load()----> Running
//!
//! Halted is sticky: `cycle()` keeps handing back the same fault and touches
//! nothing. A host may `resume()` past an unknown opcode, since the program
//! counter has already moved beyond it.
use crate::config::{Quirks, ShiftSource, SysCalls};
use crate::display::Framebuffer;
use crate::error::{self, Error, Fault};
use crate::input::{KeyPad, KEY_COUNT};
use crate::instruction::{Instruction, Reg};
use crate::memory::{AddressSpace, MemoryMap};
use crate::random::{EntropyRandom, RandomSource, SeededRandom};
use crate::registers::RegisterFile;
use crate::stack::CallStack;
use crate::timer::TimerBank;
use log::{debug, trace, warn};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    /// FX0A is waiting to put the next key pressed into this register
    WaitingForKey(Reg),
    Halted(Fault),
}

pub struct Interpreter {
    memory: AddressSpace,
    registers: RegisterFile,
    stack: CallStack,
    timers: TimerBank,
    keypad: KeyPad,
    random: Box<dyn RandomSource>,
    framebuffer: Framebuffer,
    quirks: Quirks,
    state: State,
}

impl Interpreter {
    pub fn new(random: Box<dyn RandomSource>, quirks: Quirks) -> Self {
        Interpreter {
            memory: AddressSpace::new(),
            registers: RegisterFile::new(),
            stack: CallStack::new(),
            timers: TimerBank::default(),
            keypad: KeyPad::default(),
            random,
            framebuffer: Framebuffer::new(),
            quirks,
            state: State::Running,
        }
    }

    /// reproducible machine with the default quirks
    pub fn seeded(seed: u64) -> Self {
        Self::new(Box::new(SeededRandom::new(seed)), Quirks::default())
    }

    /// machine with OS-seeded randomness and the default quirks
    pub fn with_entropy() -> Self {
        Self::new(Box::new(EntropyRandom::new()), Quirks::default())
    }

    /// load a chip8 program; a hardware reset. if it doesn't fit, nothing
    /// changes
    pub fn load(&mut self, program: &[u8]) -> error::Result<()> {
        self.memory.load(program)?;
        self.registers = RegisterFile::new();
        self.stack.clear();
        self.timers = TimerBank::default();
        self.framebuffer.clear();
        self.state = State::Running;
        debug!("loaded {} byte program", program.len());
        Ok(())
    }

    /// load a chip8 program from a reader
    pub fn load_from(&mut self, reader: &mut impl io::Read) -> Result<(), Error> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(self.load(&buf)?)
    }

    /// Execute one instruction, or check for a key if FX0A is waiting.
    pub fn cycle(&mut self) -> error::Result<()> {
        match self.state {
            State::Halted(fault) => Err(fault),
            State::WaitingForKey(x) => {
                if let Some(key) = self.keypad.first_down() {
                    debug!("key {:X} released FX0A into V{:X}", key, x);
                    self.registers.set(x, key);
                    self.state = State::Running;
                }
                Ok(())
            }
            State::Running => self.step().map_err(|fault| self.halt(fault)),
        }
    }

    fn halt(&mut self, fault: Fault) -> Fault {
        warn!("halted at {:#05x}: {}", self.registers.pc, fault);
        self.state = State::Halted(fault);
        fault
    }

    /// fetch, advance the counter past the instruction, decode, execute
    fn step(&mut self) -> error::Result<()> {
        let pc = self.registers.pc;
        let word = self.memory.read_word(pc)?;
        self.registers.pc = pc + 2;
        let instruction = Instruction::decode(word)?;
        trace!("{:#05x}: {:04x}  {}", pc, word, instruction);
        self.execute(instruction)
    }

    /// Carry out a decoded instruction against the current state. The
    /// program counter should already point at the following instruction.
    pub fn execute(&mut self, instruction: Instruction) -> error::Result<()> {
        use Instruction::*;

        let r = &mut self.registers;
        match instruction {
            Sys(addr) => match self.quirks.sys_calls {
                SysCalls::Ignore => trace!("ignoring SYS {:#05x}", addr),
                SysCalls::Fault => return Err(Fault::UnknownOpcode(addr)),
            },
            ClearScreen => self.framebuffer.clear(),
            Return => r.pc = self.stack.pop()?,
            Jump(addr) => r.pc = addr,
            Call(addr) => {
                self.stack.push(r.pc)?;
                r.pc = addr;
            }
            SkipEqImm(x, nn) => {
                if r.get(x) == nn {
                    r.skip();
                }
            }
            SkipNeImm(x, nn) => {
                if r.get(x) != nn {
                    r.skip();
                }
            }
            SkipEqReg(x, y) => {
                if r.get(x) == r.get(y) {
                    r.skip();
                }
            }
            LoadImm(x, nn) => r.set(x, nn),
            AddImm(x, nn) => r.set(x, r.get(x).wrapping_add(nn)),
            LoadReg(x, y) => r.set(x, r.get(y)),
            Or(x, y) => r.set(x, r.get(x) | r.get(y)),
            And(x, y) => r.set(x, r.get(x) & r.get(y)),
            Xor(x, y) => r.set(x, r.get(x) ^ r.get(y)),
            // arithmetic writes the flag last, so VF as a destination
            // ends up holding the flag
            AddReg(x, y) => {
                let sum = u16::from(r.get(x)) + u16::from(r.get(y));
                r.set(x, sum as u8);
                r.set_flag(sum > 0xff);
            }
            SubReg(x, y) => {
                let (vx, vy) = (r.get(x), r.get(y));
                r.set(x, vx.wrapping_sub(vy));
                r.set_flag(vx >= vy);
            }
            ShiftRight(x, y) => {
                let src = r.get(shift_operand(self.quirks, x, y));
                r.set(x, src >> 1);
                r.set_flag(src & 0x01 != 0);
            }
            SubN(x, y) => {
                let (vx, vy) = (r.get(x), r.get(y));
                r.set(x, vy.wrapping_sub(vx));
                r.set_flag(vy >= vx);
            }
            ShiftLeft(x, y) => {
                let src = r.get(shift_operand(self.quirks, x, y));
                r.set(x, src << 1);
                r.set_flag(src & 0x80 != 0);
            }
            SkipNeReg(x, y) => {
                if r.get(x) != r.get(y) {
                    r.skip();
                }
            }
            LoadIndex(addr) => r.index = addr,
            // may land beyond memory; the next fetch will fault
            JumpOffset(addr) => r.pc = addr + u16::from(r.get(0)),
            Random(x, nn) => r.set(x, self.random.next_byte() & nn),
            Draw(x, y, n) => {
                // fetch the whole sprite first, so a bad I leaves the screen alone
                let sprite = self.memory.slice(r.index, usize::from(n))?;
                let collision = self.framebuffer.draw_sprite(r.get(x), r.get(y), sprite);
                r.set_flag(collision);
            }
            SkipKeyDown(x) => {
                if self.keypad.is_down(r.get(x)) {
                    r.skip();
                }
            }
            SkipKeyUp(x) => {
                if !self.keypad.is_down(r.get(x)) {
                    r.skip();
                }
            }
            LoadDelay(x) => r.set(x, self.timers.delay),
            WaitKey(x) => self.state = State::WaitingForKey(x),
            SetDelay(x) => self.timers.delay = r.get(x),
            SetSound(x) => self.timers.sound = r.get(x),
            AddIndex(x) => r.index = r.index.wrapping_add(u16::from(r.get(x))),
            LoadFontAddr(x) => r.index = AddressSpace::font_glyph_addr(r.get(x)),
            StoreBcd(x) => {
                let v = r.get(x);
                self.memory.write(r.index, &[v / 100, v / 10 % 10, v % 10])?;
            }
            StoreRegs(x) => self.memory.write(r.index, r.up_to(x))?,
            LoadRegs(x) => {
                let src = self.memory.slice(r.index, usize::from(x) + 1)?;
                r.up_to_mut(x).copy_from_slice(src);
            }
        }
        Ok(())
    }

    /// take a fault-halted machine back to Running. only an unknown opcode
    /// can be stepped over; any other fault is handed back and the machine
    /// stays halted
    pub fn resume(&mut self) -> error::Result<()> {
        match self.state {
            State::Halted(Fault::UnknownOpcode(word)) => {
                debug!("resuming past unknown opcode {:#06x}", word);
                self.state = State::Running;
                Ok(())
            }
            State::Halted(fault) => Err(fault),
            _ => Ok(()),
        }
    }

    /// count the delay and sound timers down; call at 60Hz
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    pub fn sound_active(&self) -> bool {
        self.timers.sound_active()
    }

    pub fn set_key(&mut self, key: usize, down: bool) -> error::Result<()> {
        self.keypad.set_key(key, down)
    }

    pub fn set_keys(&mut self, keys: [bool; KEY_COUNT]) {
        self.keypad.set_keys(keys);
    }

    pub fn keypad(&self) -> &KeyPad {
        &self.keypad
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// for harnesses that want to set up a particular machine state
    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.registers
    }

    pub fn memory(&self) -> &AddressSpace {
        &self.memory
    }

    pub fn timers(&self) -> &TimerBank {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut TimerBank {
        &mut self.timers
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn quirks(&self) -> Quirks {
        self.quirks
    }
}

/// which register feeds a shift, depending on quirks
fn shift_operand(quirks: Quirks, x: Reg, y: Reg) -> Reg {
    match quirks.shift_source {
        ShiftSource::Vx => x,
        ShiftSource::Vy => y,
    }
}
