// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

/// Stateful `xoroshiro128+` pseudo-random number generator.
///
/// * Not cryptographically secure.
/// * Matching seeds yield identical sequences across supported platforms.
#[derive(Debug, Clone, Copy)]
pub struct Prng {
    state: [u64; 2],
}

impl Prng {
    /// Constructs a PRNG from two 64-bit seeds.
    pub fn from_seed(seed0: u64, seed1: u64) -> Self {
        let mut state = [seed0, seed1];
        if state[0] == 0 && state[1] == 0 {
            state[0] = 0x9e37_79b9_7f4a_7c15;
        }
        Self { state }
    }

    /// Constructs a PRNG from a single 64-bit seed via SplitMix64 expansion.
    pub fn from_seed_u64(seed: u64) -> Self {
        fn splitmix64(state: &mut u64) -> u64 {
            *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
            let mut z = *state;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
            z ^ (z >> 31)
        }

        let mut sm_state = seed;
        Self::from_seed(splitmix64(&mut sm_state), splitmix64(&mut sm_state))
    }

    fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(55) ^ s1 ^ (s1 << 14);
        self.state[1] = s1.rotate_left(36);

        result
    }

    /// Returns the next float in `[0, 1)`.
    ///
    /// Uses the high 23 bits of the state to fill the mantissa.
    pub fn next_f32(&mut self) -> f32 {
        let raw = self.next_u64();
        #[allow(clippy::cast_possible_truncation)]
        let bits = ((raw >> 41) as u32) | 0x3f80_0000;
        f32::from_bits(bits) - 1.0
    }

    /// Returns the next float in `[from, to)`.
    pub fn next_range(&mut self, from: f32, to: f32) -> f32 {
        self.next_f32() * (to - from) + from
    }

    /// Picks an index with probability proportional to `weights[i]`.
    ///
    /// Scans the cumulative distribution of a uniform draw over the weight
    /// sum. If rounding leaves the draw past the end, the last positive
    /// weight wins. Returns `None` for an empty slice or when no weight is
    /// positive.
    pub fn next_weighted(&mut self, weights: &[f32]) -> Option<usize> {
        if weights.is_empty() {
            return None;
        }
        let sum: f32 = weights.iter().sum();
        let mut remaining = self.next_f32() * sum;
        for (i, w) in weights.iter().enumerate() {
            remaining -= w;
            if remaining < 0.0 {
                return Some(i);
            }
        }
        weights.iter().rposition(|w| *w > 0.0)
    }
}
