//! Sample-playback backend.
//!
//! One real [`Channel`] implementation: each channel is the control half of
//! a slot, connected to its audio half by an SPSC command ring. The control
//! side resolves clip ids against a [`SampleBank`] and pushes commands; the
//! audio side ([`PcmPool`]) pops them at the start of every rendered block
//! and mixes all playing slots into a mono buffer, scaled by the attached
//! bus's master volume.
//!
//! Busy state lives in an atomic shared by both halves. `start` raises it
//! on the control side, so the channel reports busy the moment the call
//! returns; the audio side clears it when the slot's samples run out.
//! Nothing on the audio side allocates or locks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use log::warn;
use rtrb::{Consumer, Producer, RingBuffer};

use crate::catalog::Clip;
use crate::channel::Channel;
use crate::mix::MixBus;

const COMMAND_QUEUE_SIZE: usize = 64;

/// Clip id to mono PCM lookup.
///
/// Samples are stored as `Arc<[f32]>` so binding a clip to a slot is a
/// pointer copy, not a buffer copy.
#[derive(Debug, Clone, Default)]
pub struct SampleBank {
    samples: HashMap<String, Arc<[f32]>>,
}

impl SampleBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register mono PCM under a clip id. Replaces any previous entry.
    pub fn insert(&mut self, id: impl Into<String>, samples: Vec<f32>) {
        self.samples.insert(id.into(), samples.into());
    }

    pub fn get(&self, id: &str) -> Option<Arc<[f32]>> {
        self.samples.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.samples.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

enum SlotCommand {
    Bind { samples: Arc<[f32]> },
    Start,
    AttachBus { bus: Arc<MixBus> },
}

/// Control half of one playback slot.
///
/// Obtained from [`PcmPool::new`]. Implements [`Channel`], so a set of
/// these is what the manager's pool is built from.
pub struct PcmChannel {
    tx: Mutex<Producer<SlotCommand>>,
    bank: Arc<SampleBank>,
    busy: Arc<AtomicBool>,
    bound: AtomicBool,
}

impl PcmChannel {
    fn push(&self, command: SlotCommand) -> bool {
        match self.tx.lock().unwrap().push(command) {
            Ok(()) => true,
            Err(_) => {
                warn!("slot command queue full, command dropped");
                false
            }
        }
    }
}

impl Channel for PcmChannel {
    fn bind(&self, clip: &Clip) {
        match self.bank.get(clip.id()) {
            Some(samples) => {
                let queued = self.push(SlotCommand::Bind { samples });
                self.bound.store(queued, Ordering::Release);
            }
            None => {
                warn!("clip id {:?} not in sample bank, channel stays idle", clip.id());
                self.bound.store(false, Ordering::Release);
            }
        }
    }

    fn start(&self) {
        // Only a successful bind may start; otherwise the busy flag would
        // never be cleared by the audio side.
        if !self.bound.load(Ordering::Acquire) {
            return;
        }
        if self.push(SlotCommand::Start) {
            self.busy.store(true, Ordering::Release);
        }
    }

    fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn attach_bus(&self, bus: &Arc<MixBus>) {
        bus.register_attachment();
        self.push(SlotCommand::AttachBus { bus: bus.clone() });
    }
}

/// Audio half of one slot.
struct PcmSlot {
    rx: Consumer<SlotCommand>,
    samples: Option<Arc<[f32]>>,
    cursor: usize,
    playing: bool,
    bus: Option<Arc<MixBus>>,
    busy: Arc<AtomicBool>,
}

impl PcmSlot {
    fn drain_commands(&mut self) {
        while let Ok(command) = self.rx.pop() {
            match command {
                SlotCommand::Bind { samples } => {
                    // Rebinding replaces the current playback and rewinds
                    self.samples = Some(samples);
                    self.cursor = 0;
                }
                SlotCommand::Start => {
                    self.cursor = 0;
                    self.playing = self.samples.is_some();
                    if !self.playing {
                        self.busy.store(false, Ordering::Release);
                    }
                }
                SlotCommand::AttachBus { bus } => {
                    self.bus = Some(bus);
                }
            }
        }
    }

    fn mix_into(&mut self, out: &mut [f32]) {
        if !self.playing {
            return;
        }
        let Some(samples) = &self.samples else {
            self.playing = false;
            self.busy.store(false, Ordering::Release);
            return;
        };

        let n = (samples.len() - self.cursor).min(out.len());

        // A slot with no bus keeps time but stays inaudible
        if let Some(bus) = &self.bus {
            let gain = bus.volume();
            for (o, &s) in out[..n].iter_mut().zip(&samples[self.cursor..self.cursor + n]) {
                *o += s * gain;
            }
        }

        self.cursor += n;
        if self.cursor == samples.len() {
            self.playing = false;
            self.busy.store(false, Ordering::Release);
        }
    }
}

/// Audio half of the backend: owns every slot.
///
/// Lives wherever rendering happens (typically the audio callback) and is
/// the only thing that touches sample data. Call
/// [`render_block`](PcmPool::render_block) once per output block; busy
/// flags clear only as rendering consumes samples, so a pool that is never
/// rendered never goes idle.
pub struct PcmPool {
    slots: Vec<PcmSlot>,
}

impl PcmPool {
    /// Create `count` connected channel/slot pairs over a shared bank.
    ///
    /// Returns the control-side handles and the audio-side pool. The
    /// handles go into the manager's channel pool (in order, so channel
    /// indices line up with slot indices); the pool moves to the render
    /// thread.
    pub fn new(bank: Arc<SampleBank>, count: usize) -> (Vec<Arc<PcmChannel>>, PcmPool) {
        let mut channels = Vec::with_capacity(count);
        let mut slots = Vec::with_capacity(count);

        for _ in 0..count {
            let (tx, rx) = RingBuffer::<SlotCommand>::new(COMMAND_QUEUE_SIZE);
            let busy = Arc::new(AtomicBool::new(false));

            channels.push(Arc::new(PcmChannel {
                tx: Mutex::new(tx),
                bank: bank.clone(),
                busy: busy.clone(),
                bound: AtomicBool::new(false),
            }));
            slots.push(PcmSlot {
                rx,
                samples: None,
                cursor: 0,
                playing: false,
                bus: None,
                busy,
            });
        }

        (channels, PcmPool { slots })
    }

    /// Render one mono block: drain queued commands, then mix every
    /// playing slot into `out`.
    pub fn render_block(&mut self, out: &mut [f32]) {
        out.fill(0.0);
        for slot in &mut self.slots {
            slot.drain_commands();
            slot.mix_into(out);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
