//! Seedable PRNG for trial simulation. SplitMix64 for throughput and good statistical quality.
//! Deterministic: same seed and same call order produce the same sequence.
//! Not cryptographically secure.

const SPLITMIX64_GOLDEN: u64 = 0x9e3779b97f4a7c15;
const SPLITMIX64_M1: u64 = 0xbf58476d1ce4e5b9;
const SPLITMIX64_M2: u64 = 0x94d049bb133111eb;

/// 2^-53, maps the top 53 bits of a draw onto `[0, 1)`.
const UNIT_SCALE: f64 = 1.0 / (1u64 << 53) as f64;

#[derive(Debug, Clone, Copy)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seeds from the OS entropy source. Falls back to the wall clock if entropy is unavailable.
    pub fn from_entropy() -> (Self, u64) {
        let seed = entropy_seed();
        (Self::new(seed), seed)
    }

    /// Independent stream for batch `index` of a run seeded with `seed`.
    /// The offset seed is passed through one mixing step so neighbouring batches do not overlap.
    pub fn substream(seed: u64, index: u64) -> Self {
        let mut mixer = Self::new(seed.wrapping_add(index));
        Self::new(mixer.next_u64())
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(SPLITMIX64_GOLDEN);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(SPLITMIX64_M1);
        z = (z ^ (z >> 27)).wrapping_mul(SPLITMIX64_M2);
        z ^ (z >> 31)
    }

    /// Uniform float in `[0, 1)`.
    #[inline]
    pub fn next_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * UNIT_SCALE
    }

    /// Uniform float in `[lo, hi)`. Returns `lo` when the range is empty.
    #[inline]
    pub fn next_float(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            // Still advance so call order stays independent of the magnitudes involved.
            self.next_u64();
            return lo;
        }
        let value = lo + (hi - lo) * self.next_unit();
        if value >= hi {
            lo
        } else {
            value
        }
    }
}

fn entropy_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(err) => {
            tracing::warn!(%err, "entropy source unavailable, seeding from clock");
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(SPLITMIX64_GOLDEN)
        }
    }
}
