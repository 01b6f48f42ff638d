//! Cueboard - application wiring and audio stream.

use std::sync::Arc;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;

use cuepool::pcm::{PcmPool, SampleBank};
use cuepool::{tones, AudioConfig, AudioManager, Channel, ClipEntry, MixBus, MAX_BLOCK_SIZE};

use super::ui::UiApp;

/// Ring capacity for audio samples flowing to the UI meter.
const VIS_RING_CAPACITY: usize = 8192;

/// Soundboard application builder.
pub struct Cueboard {
    channels: usize,
    master_volume: f32,
}

impl Cueboard {
    pub fn new() -> Self {
        Self {
            channels: 6,
            master_volume: 1.0,
        }
    }

    /// Set the playback channel count (pool size).
    pub fn channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    /// Set the initial master volume.
    pub fn master_volume(mut self, volume: f32) -> Self {
        self.master_volume = volume;
        self
    }

    /// Run the soundboard (takes over the terminal, plays audio).
    pub fn run(self) -> EyreResult<()> {
        // Audio device
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let device_config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = device_config.sample_rate().0 as f32;
        let out_channels = device_config.channels() as usize;

        // Clip set
        let config = AudioConfig {
            clips: vec![
                ClipEntry::new("beep", "Beep"),
                ClipEntry::new("blip", "Blip"),
                ClipEntry::new("chime", "Chime"),
                ClipEntry::new("noise", "Noise Burst"),
            ],
            channels: self.channels,
            master_volume: self.master_volume,
        };
        let catalog = config.catalog().wrap_err("clip set is invalid")?;

        let mut bank = SampleBank::new();
        bank.insert("beep", tones::beep(sample_rate));
        bank.insert("blip", tones::blip(sample_rate));
        bank.insert("chime", tones::chime(sample_rate));
        bank.insert("noise", tones::noise_burst(sample_rate));

        // Playback backend and manager
        let (channels, mut pool) = PcmPool::new(Arc::new(bank), config.channels);
        let bus = Arc::new(MixBus::with_volume(config.master_volume));
        let manager = AudioManager::builder()
            .catalog(catalog)
            .channels(channels.iter().map(|ch| ch.clone() as Arc<dyn Channel>))
            .bus(bus)
            .build()
            .wrap_err("audio manager setup failed")?;

        // Samples for the UI meter
        let (mut vis_tx, vis_rx) = RingBuffer::<f32>::new(VIS_RING_CAPACITY);

        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];
        let stream = device.build_output_stream(
            &device_config.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / out_channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];
                    pool.render_block(block);

                    // Copy to output (mono to all channels)
                    let out_off = frames_written * out_channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..out_channels {
                            data[out_off + i * out_channels + ch] = s;
                        }
                    }

                    // Feed the meter; drop samples when the UI lags
                    for &s in block.iter() {
                        let _ = vis_tx.push(s);
                    }

                    frames_written += frames_to_render;
                }
            },
            |err| eprintln!("Audio error: {}", err),
            None,
        )?;
        stream.play()?;

        // Hand the terminal to the UI
        let mut terminal = ratatui::init();
        let result = UiApp::new(manager, vis_rx).run(&mut terminal);
        ratatui::restore();
        result
    }
}

impl Default for Cueboard {
    fn default() -> Self {
        Self::new()
    }
}
