//! Transport bar - master volume, pool occupancy, and output level.

use cuepool::AudioManager;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Output level summary for display.
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute stats over the visualization buffer.
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self {
                peak: 0.0,
                rms: 0.0,
            };
        }
        let mut peak = 0.0f32;
        let mut sum_sq = 0.0f32;
        for &s in buffer {
            peak = peak.max(s.abs());
            sum_sq += s * s;
        }
        Self {
            peak,
            rms: (sum_sq / buffer.len() as f32).sqrt(),
        }
    }
}

/// Render the transport bar
pub fn render_transport(frame: &mut Frame, area: Rect, manager: &AudioManager, stats: &AudioStats) {
    let block = Block::default().title(" cueboard ").borders(Borders::ALL);

    let pool = manager.pool();
    let busy = pool.busy_count();
    let busy_style = if busy > 0 {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" Vol: {:.2}  ", manager.bus().volume()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!("{}/{} channels busy  ", busy, pool.len()), busy_style),
        Span::styled(
            format!("{} clips  ", manager.catalog().len()),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
