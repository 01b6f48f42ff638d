//! Short confirmation blip.

use std::f32::consts::TAU;

use super::fade_edges;

/// 1320 Hz sine blip, 60 ms. Short enough to fire rapidly without smearing.
pub fn blip(sample_rate: f32) -> Vec<f32> {
    let len = (sample_rate * 0.06) as usize;
    let mut out: Vec<f32> = (0..len)
        .map(|i| {
            let t = i as f32 / sample_rate;
            0.5 * (TAU * 1320.0 * t).sin()
        })
        .collect();
    fade_edges(&mut out, sample_rate);
    out
}
