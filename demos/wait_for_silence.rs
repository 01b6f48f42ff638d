/// Demonstrates awaiting the end of playback
/// A background thread renders the pool while the task waits on until_silent

use std::sync::Arc;
use std::thread;

use cuepool::{
    pcm::{PcmChannel, PcmPool, SampleBank},
    tones, AudioManager, Channel, Clip, ClipCatalog, MixBus,
};

const SAMPLE_RATE: f32 = 48_000.0;
const BLOCK_SIZE: usize = 256;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let mut bank = SampleBank::new();
    bank.insert("beep", tones::beep(SAMPLE_RATE));
    bank.insert("noise", tones::noise_burst(SAMPLE_RATE));
    let bank = Arc::new(bank);

    let catalog = ClipCatalog::builder()
        .clip(Clip::new("beep", "Beep"))
        .clip(Clip::new("noise", "Noise Burst"))
        .build()
        .unwrap();

    let (channels, mut pool) = PcmPool::new(bank, 4);
    let manager = AudioManager::builder()
        .catalog(catalog)
        .channels(channels.iter().map(|ch| ch.clone() as Arc<dyn Channel>))
        .bus(Arc::new(MixBus::new()))
        .build()
        .unwrap();

    println!("Playing two clips...");
    manager.play_by_name("Beep").unwrap();
    manager.play_by_name("Noise Burst").unwrap();

    // Stand-in for an audio callback: render blocks until the pool drains
    let render_channels: Vec<Arc<PcmChannel>> = channels.clone();
    let render = thread::spawn(move || {
        let mut buffer = [0.0f32; BLOCK_SIZE];
        let mut blocks = 0usize;
        while render_channels.iter().any(|ch| ch.is_busy()) {
            pool.render_block(&mut buffer);
            blocks += 1;
        }
        blocks
    });

    println!("Waiting for silence...");
    manager.until_silent().await;
    println!("Pool is silent, playback finished.");

    let blocks = render.join().unwrap();
    println!("Render thread processed {} blocks.", blocks);
}
