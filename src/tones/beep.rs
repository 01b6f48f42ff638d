//! UI beep.
//!
//! A plain 880 Hz sine, 150 ms. The A5 pitch sits well above typical
//! program material, so it cuts through without needing to be loud.

use std::f32::consts::TAU;

use super::fade_edges;

/// 880 Hz sine beep, 150 ms.
pub fn beep(sample_rate: f32) -> Vec<f32> {
    let len = (sample_rate * 0.15) as usize;
    let mut out: Vec<f32> = (0..len)
        .map(|i| {
            let t = i as f32 / sample_rate;
            0.6 * (TAU * 880.0 * t).sin()
        })
        .collect();
    fade_edges(&mut out, sample_rate);
    out
}
