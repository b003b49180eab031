//! Sample payload generation for the channel demo.
//!
//! The channel side needs a byte buffer to protect; the original demo
//! used image pixels. Here we generate deterministic patterned data
//! (gradients and texture) so corruption and recovery are visible in the
//! byte-error counts without shipping an asset.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate a deterministic sample payload of `size_bytes` bytes.
///
/// Mixes smooth gradients (where single flipped bits stand out) with
/// noisy texture, in alternating bands.
pub fn generate_payload(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    let band = 256;
    let mut gradient_base: u8 = 0;

    while data.len() < size_bytes {
        let remaining = size_bytes - data.len();
        let chunk = remaining.min(band);

        if rng.gen_bool(0.5) {
            // smooth gradient band
            for i in 0..chunk {
                data.push(gradient_base.wrapping_add(i as u8));
            }
            gradient_base = gradient_base.wrapping_add(37);
        } else {
            // textured band
            for _ in 0..chunk {
                data.push(rng.gen());
            }
        }
    }

    data
}
