use rand::{rngs::StdRng, Rng, SeedableRng};

/// where CXNN gets its random bytes from
pub trait RandomSource {
    fn next_byte(&mut self) -> u8;
}

/// deterministic stream for a given seed; two machines with the same seed
/// roll the same numbers
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        SeededRandom(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn next_byte(&mut self) -> u8 {
        self.0.gen()
    }
}

/// seeded from the OS, for actually playing games
pub struct EntropyRandom(StdRng);

impl EntropyRandom {
    pub fn new() -> Self {
        EntropyRandom(StdRng::from_entropy())
    }
}

impl Default for EntropyRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropyRandom {
    fn next_byte(&mut self) -> u8 {
        self.0.gen()
    }
}

/// plays back a fixed list of bytes, round and round; handy when a test
/// wants to know exactly what CXNN will see
pub struct SequenceRandom {
    bytes: Vec<u8>,
    pos: usize,
}

impl SequenceRandom {
    pub fn new(bytes: &[u8]) -> Self {
        SequenceRandom {
            bytes: Vec::from(bytes),
            pos: 0,
        }
    }
}

impl RandomSource for SequenceRandom {
    fn next_byte(&mut self) -> u8 {
        // an empty sequence is all zeroes
        let b = self.bytes.get(self.pos).copied().unwrap_or(0);
        self.pos = (self.pos + 1) % self.bytes.len().max(1);
        b
    }
}
