/// Demonstrates pooled clip playback without real-time audio
/// Shows first-idle allocation, pool exhaustion, and mixing

use std::sync::Arc;

use cuepool::{
    pcm::{PcmPool, SampleBank},
    tones, AudioManager, Channel, Clip, ClipCatalog, MixBus,
};

fn main() {
    println!("=== Pool Demo (Offline) ===\n");

    let sample_rate = 48_000.0;
    let pool_size = 3;
    let block_size = 256;

    let mut bank = SampleBank::new();
    bank.insert("beep", tones::beep(sample_rate));
    bank.insert("chime", tones::chime(sample_rate));
    let bank = Arc::new(bank);

    let catalog = ClipCatalog::builder()
        .clip(Clip::new("beep", "Beep"))
        .clip(Clip::new("chime", "Chime"))
        .build()
        .unwrap();

    let (channels, mut pool) = PcmPool::new(bank, pool_size);
    let bus = Arc::new(MixBus::with_volume(0.8));
    let manager = AudioManager::builder()
        .catalog(catalog)
        .channels(channels.iter().map(|ch| ch.clone() as Arc<dyn Channel>))
        .bus(bus)
        .build()
        .unwrap();

    println!("Created pool with {} channels\n", pool_size);

    // Fill the pool one clip at a time
    println!("Playing three clips:");
    for name in ["Beep", "Chime", "Beep"] {
        let voice = manager.play_by_name(name).unwrap().unwrap();
        println!("  {} -> channel {}", name, voice.channel_index());
    }

    // A fourth request finds no idle channel and is dropped
    println!("\nRequesting a fourth clip:");
    match manager.play_by_name("Chime").unwrap() {
        Some(voice) => println!("  Chime -> channel {}", voice.channel_index()),
        None => println!("  all channels busy, request dropped"),
    }

    // Render a block with all three channels mixing
    let mut buffer = vec![0.0; block_size];
    pool.render_block(&mut buffer);

    let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
    println!("\nAfter first render:");
    println!("  Busy channels: {}", manager.pool().busy_count());
    println!("  Peak amplitude: {:.3}", peak);

    // Render until every clip has run out of samples
    println!("\nRendering blocks until the pool drains...");
    let mut blocks = 1;
    while manager.is_playing() {
        buffer.fill(0.0);
        pool.render_block(&mut buffer);
        blocks += 1;
    }
    println!("  Silent after {} blocks", blocks);

    // A freed channel is reused on the next request
    let voice = manager.play_by_name("Beep").unwrap().unwrap();
    println!("\nPool drained, next request:");
    println!("  Beep -> channel {}", voice.channel_index());

    println!("\n=== Allocation Rules ===");
    println!("• play scans the pool in order and takes the first idle channel");
    println!("• an exhausted pool drops the request instead of failing");
    println!("• unknown clip names are hard errors, never silent drops");
    println!("• every channel mixes into one shared bus");
}
