use std::io;
use thiserror::Error;

/// Something the machine cannot carry on from. `cycle()` and `load()` hand
/// these back to the host; none are retried.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error("memory access out of bounds at {addr:#06x}")]
    OutOfBounds { addr: usize },

    #[error("call stack overflow")]
    StackOverflow,

    #[error("return with an empty call stack")]
    StackUnderflow,

    #[error("unknown opcode {0:#06x}")]
    UnknownOpcode(u16),

    #[error("program is {size} bytes, at most {max} bytes fit")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("no such key {0:#x}")]
    InvalidKey(usize),
}

/// Errors from the wider crate: machine faults plus whatever the host's I/O
/// throws at us
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fault(#[from] Fault),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Fault>;
