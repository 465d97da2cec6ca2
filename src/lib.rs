//! A CHIP-8 virtual machine.
//!
//! ## Design
//!
//! * the machine core knows nothing about screens, keyboards or speakers:
//!   it takes program bytes and a key vector, and hands back a pixel grid and
//!   a "buzzer on" flag
//! * every bit of machine state lives in one owned `Interpreter`; no
//!   globals, so any number of machines can run side by side
//! * decode and execute are separate. `Instruction::decode` turns a word
//!   into an enum, `Interpreter::execute` matches on it
//! * the host owns time. `cycle()` runs one instruction, `tick_timers()`
//!   runs the 60Hz timers; neither blocks, and FX0A is a state rather than a
//!   spin, so any loop can drive the machine
//! * faults come back as values. a faulted machine halts until the next
//!   `load()`
//! * where historical interpreters disagree (shift source, 0NNN) `Quirks`
//!   decides
//!
//! Model
//!
//! Interpreter
//!  |-- AddressSpace  4K, font at 0x050, program at 0x200
//!  |-- RegisterFile  V0-VF, I, PC
//!  |-- CallStack     16 deep
//!  |-- TimerBank     delay, sound
//!  |-- KeyPad        16 keys, written by the host
//!  |-- RandomSource  seeded / entropy / fixed sequence
//!  `-- Framebuffer   64x32, XOR sprites
//!
//! Host (host.rs, driven by src/main.rs)
//!  |-- Display  -> tui canvas in the terminal
//!  |-- Input    -> crossterm key events
//!  |-- Sound    -> PC speaker beep
//!  `-- main loop, per 60Hz frame
//!       |-- keys = input.scan(); interpreter.set_keys(keys)
//!       |-- interpreter.cycle() * (hz / 60)
//!       |-- interpreter.tick_timers()
//!       |-- display.draw(interpreter.framebuffer())
//!       |-- sound.sync(interpreter.sound_active())
//!       `-- spin_sleep until the next frame
pub mod config;
pub mod display;
pub mod error;
pub mod host;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod memory;
pub mod random;
pub mod registers;
pub mod sound;
pub mod stack;
pub mod timer;

pub use config::{Quirks, ShiftSource, SysCalls};
pub use display::Framebuffer;
pub use error::{Error, Fault};
pub use input::KeyPad;
pub use instruction::Instruction;
pub use interpreter::{Interpreter, State};
pub use random::{EntropyRandom, RandomSource, SeededRandom, SequenceRandom};
