use crate::app::ports::IdGeneratorPort;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const FRAGMENT_LEN: usize = 9;

/// Node identifiers of the form `_k3j9x0a2q-_p81mz0c7d`: two independent
/// base-36 fragments, roughly 93 bits of entropy in total.
pub struct RandomIdGenerator {
    rng: Mutex<StdRng>,
}

impl RandomIdGenerator {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible identifiers for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn fragment(rng: &mut StdRng) -> String {
        let mut out = String::with_capacity(FRAGMENT_LEN + 1);
        out.push('_');
        for _ in 0..FRAGMENT_LEN {
            out.push(ALPHABET[rng.gen_range(0..ALPHABET.len())] as char);
        }
        out
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGeneratorPort for RandomIdGenerator {
    fn next_id(&self) -> String {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let first = Self::fragment(&mut rng);
        let second = Self::fragment(&mut rng);
        format!("{}-{}", first, second)
    }
}
