//! TUI for the soundboard.
//!
//! Number keys fire clips through the manager; the board shows which
//! channel each playback landed on and when requests get dropped.

mod board;
mod transport;

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;

use cuepool::{AudioManager, PlayError};

use transport::AudioStats;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;

/// Master volume change per keypress.
const VOLUME_STEP: f32 = 0.05;

/// UI application state
pub struct UiApp {
    manager: AudioManager,
    /// Ring buffer receiver for audio samples
    audio_rx: Consumer<f32>,
    /// Audio sample buffer for the output meter
    audio_buffer: Vec<f32>,
    /// Last play outcome, shown in the status line
    status: String,
    should_quit: bool,
}

impl UiApp {
    pub fn new(manager: AudioManager, audio_rx: Consumer<f32>) -> Self {
        Self {
            manager,
            audio_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            status: String::from("press 1-9 to fire a clip"),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Poll for new audio samples from the ring buffer
    fn poll_audio(&mut self) {
        let mut new_samples = Vec::new();
        while let Ok(sample) = self.audio_rx.pop() {
            new_samples.push(sample);
        }

        if !new_samples.is_empty() {
            // Append and keep only the last VIS_BUFFER_SIZE samples
            self.audio_buffer.extend(new_samples);
            if self.audio_buffer.len() > VIS_BUFFER_SIZE {
                let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
                self.audio_buffer.drain(0..excess);
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.nudge_volume(VOLUME_STEP),
            KeyCode::Char('-') => self.nudge_volume(-VOLUME_STEP),
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                self.trigger(index);
            }
            _ => {}
        }
    }

    fn nudge_volume(&mut self, delta: f32) {
        let bus = self.manager.bus();
        bus.set_volume((bus.volume() + delta).min(2.0));
        self.status = format!("master volume {:.2}", bus.volume());
    }

    /// Fire the clip behind a number key and report where it landed.
    fn trigger(&mut self, index: usize) {
        self.status = match self.manager.play_by_index(index) {
            Ok(Some(voice)) => {
                let name = self
                    .manager
                    .catalog()
                    .resolve_by_index(index)
                    .map(|clip| clip.name().to_string())
                    .unwrap_or_default();
                format!("{} -> channel {}", name, voice.channel_index())
            }
            Ok(None) => String::from("all channels busy, request dropped"),
            Err(PlayError::Catalog(err)) => err.to_string(),
            Err(err) => err.to_string(),
        };
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Transport bar
                Constraint::Min(6),    // Clip list and channel grid
                Constraint::Length(1), // Status line
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        transport::render_transport(frame, chunks[0], &self.manager, &stats);
        board::render_board(frame, chunks[1], &self.manager);

        let status = Paragraph::new(format!(" {}", self.status));
        frame.render_widget(status, chunks[2]);

        let help = Paragraph::new(" [1-9] Play  [+/-] Volume  [Q] Quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
