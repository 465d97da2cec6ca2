use crate::error::{self, Fault};
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal;
use log::warn;
use std::collections::HashMap;
use std::io;
use std::time::Duration;

pub const KEY_COUNT: usize = 16;

/// The 16-key hex pad, as the interpreter sees it. Hosts write whole keys
/// or the whole vector between cycles; instructions only ever read.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KeyPad {
    keys: [bool; KEY_COUNT],
}

impl KeyPad {
    pub fn set_key(&mut self, key: usize, down: bool) -> error::Result<()> {
        let k = self.keys.get_mut(key).ok_or(Fault::InvalidKey(key))?;
        *k = down;
        Ok(())
    }

    pub fn set_keys(&mut self, keys: [bool; KEY_COUNT]) {
        self.keys = keys;
    }

    /// key state for the low nibble of `key`
    pub fn is_down(&self, key: u8) -> bool {
        self.keys[usize::from(key & 0xf)]
    }

    /// lowest-numbered key that's held, if any
    pub fn first_down(&self) -> Option<u8> {
        self.keys.iter().position(|&k| k).map(|k| k as u8)
    }
}

/// map of terminal characters to hex keys, using the left-hand side of a
/// qwerty keyboard to stand in for the COSMAC layout
/// 1 2 3 C    1 2 3 4
/// 4 5 6 D    q w e r
/// 7 8 9 E    a s d f
/// A 0 B F    z x c v
const CONVENTIONAL_KEYMAP: [(char, u8); 16] = [
    ('x', 0x00),
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('q', 0x04),
    ('w', 0x05),
    ('e', 0x06),
    ('a', 0x07),
    ('s', 0x08),
    ('d', 0x09),
    ('z', 0x0a),
    ('c', 0x0b),
    ('4', 0x0c),
    ('r', 0x0d),
    ('f', 0x0e),
    ('v', 0x0f),
];

/// terminals only tell us about presses (and auto-repeat), never releases,
/// so a press holds its key down for this many scans
pub const KEY_HOLD_SCANS: u8 = 6;

/// reads keypresses
pub trait Input {
    /// the whole key vector as of now, or None if the user wants out
    fn scan(&mut self) -> Result<Option<[bool; KEY_COUNT]>, io::Error>;
}

/// Input from the terminal via crossterm. holds raw mode for as long as it
/// lives
pub struct TermInput {
    keymap: HashMap<char, u8>,
    held: [u8; KEY_COUNT],
}

impl TermInput {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(TermInput {
            keymap: HashMap::from(CONVENTIONAL_KEYMAP),
            held: [0; KEY_COUNT],
        })
    }

    fn press(&mut self, c: char) {
        match self.keymap.get(&c.to_ascii_lowercase()) {
            Some(&key) => self.held[usize::from(key)] = KEY_HOLD_SCANS,
            None => warn!("can't map {:?} to a COSMAC key", c),
        }
    }

    /// count down held keys by one scan
    fn decay(&mut self) {
        for h in self.held.iter_mut() {
            *h = h.saturating_sub(1);
        }
    }

    fn keys(&self) -> [bool; KEY_COUNT] {
        let mut keys = [false; KEY_COUNT];
        for (k, &h) in keys.iter_mut().zip(self.held.iter()) {
            *k = h > 0;
        }
        keys
    }
}

impl Drop for TermInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for TermInput {
    fn scan(&mut self) -> Result<Option<[bool; KEY_COUNT]>, io::Error> {
        self.decay();
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(evt) => {
                    if is_quit(&evt) {
                        return Ok(None);
                    }
                    match evt.code {
                        KeyCode::Char(c) => self.press(c),
                        _ => warn!("unknown key event received"),
                    }
                }
                _ => {}
            }
        }
        Ok(Some(self.keys()))
    }
}

/// Esc, or Ctrl-C since raw mode eats the signal
fn is_quit(evt: &KeyEvent) -> bool {
    match evt.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') | KeyCode::Char('C') => evt.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// dummy Input implementation for testing; the same keys every scan
pub struct DummyInput {
    keys: [bool; KEY_COUNT],
}

impl DummyInput {
    pub fn new(down: &[u8]) -> Self {
        let mut keys = [false; KEY_COUNT];
        for &k in down {
            keys[usize::from(k & 0xf)] = true;
        }
        DummyInput { keys }
    }
}

impl Input for DummyInput {
    fn scan(&mut self) -> Result<Option<[bool; KEY_COUNT]>, io::Error> {
        Ok(Some(self.keys))
    }
}
