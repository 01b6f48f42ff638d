//! Prebuilt PCM clips.
//!
//! Small synthesized sounds, ready to drop into a sample bank. Used by the
//! demo binary and the tests; also handy as placeholder audio while real
//! assets are not wired up yet.
//!
//! # Example
//!
//! ```ignore
//! use cuepool::pcm::SampleBank;
//! use cuepool::tones;
//!
//! let mut bank = SampleBank::new();
//! bank.insert("beep", tones::beep(48_000.0));
//! bank.insert("blip", tones::blip(48_000.0));
//! bank.insert("chime", tones::chime(48_000.0));
//! bank.insert("noise", tones::noise_burst(48_000.0));
//! ```
//!
//! All generators are pure: same sample rate in, same samples out.

mod beep;
mod blip;
mod chime;
mod noise_burst;

pub use beep::beep;
pub use blip::blip;
pub use chime::chime;
pub use noise_burst::noise_burst;

const FADE_SECS: f32 = 0.005;

/// Linear fade over the first and last few milliseconds, so clips start
/// and end at zero instead of clicking.
fn fade_edges(samples: &mut [f32], sample_rate: f32) {
    let fade = ((sample_rate * FADE_SECS) as usize).min(samples.len() / 2);
    if fade == 0 {
        return;
    }
    for i in 0..fade {
        let gain = i as f32 / fade as f32;
        samples[i] *= gain;
        let end = samples.len() - 1 - i;
        samples[end] *= gain;
    }
}
