//! `rand::RngCore` for every generator, so they can drive rand's
//! distributions and shuffles.

use rand::RngCore;

use super::{
    Generator, Knuth64, Lcg32, Lfsr32, NoiseSource, Rand48, Xorshift64, Xorshift64Star,
};

macro_rules! impl_rng_core {
    ($($t:ty),+ $(,)?) => {
        $(
            impl RngCore for $t {
                fn next_u32(&mut self) -> u32 {
                    self.next_word(32) as u32
                }

                fn next_u64(&mut self) -> u64 {
                    self.next_word(64)
                }

                fn fill_bytes(&mut self, dst: &mut [u8]) {
                    rand::rand_core::impls::fill_bytes_via_next(self, dst)
                }
            }
        )+
    };
}

impl_rng_core!(
    Lcg32,
    Rand48,
    Knuth64,
    Lfsr32,
    Xorshift64,
    Xorshift64Star,
    Generator,
);
