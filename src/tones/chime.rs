//! Bell-like chime.
//!
//! Three inharmonic partials with staggered exponential decays, the
//! classic recipe for a struck-metal sound. The higher partials die faster
//! than the fundamental, which is what makes it read as "bell" rather
//! than "organ".

use std::f32::consts::TAU;

use super::fade_edges;

/// E5 chime with two upper partials, 400 ms.
pub fn chime(sample_rate: f32) -> Vec<f32> {
    let len = (sample_rate * 0.4) as usize;
    let mut out: Vec<f32> = (0..len)
        .map(|i| {
            let t = i as f32 / sample_rate;
            let fundamental = 0.45 * (-5.0 * t).exp() * (TAU * 660.0 * t).sin();
            let second = 0.25 * (-9.0 * t).exp() * (TAU * 1320.0 * t).sin();
            // 2.76x, the first inharmonic mode of an ideal bar
            let shimmer = 0.12 * (-14.0 * t).exp() * (TAU * 660.0 * 2.76 * t).sin();
            fundamental + second + shimmer
        })
        .collect();
    fade_edges(&mut out, sample_rate);
    out
}
