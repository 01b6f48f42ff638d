//! Percussive noise burst.

use super::fade_edges;

/// White noise with a fast decay, 120 ms. Snare-ish.
///
/// Uses a fixed-seed xorshift so the clip is identical on every call.
pub fn noise_burst(sample_rate: f32) -> Vec<f32> {
    let len = (sample_rate * 0.12) as usize;
    let mut state: u32 = 0x9e37_79b9;
    let mut out: Vec<f32> = (0..len)
        .map(|i| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let noise = (state as f32 / u32::MAX as f32) * 2.0 - 1.0;

            let t = i as f32 / sample_rate;
            0.4 * (-20.0 * t).exp() * noise
        })
        .collect();
    fade_edges(&mut out, sample_rate);
    out
}
