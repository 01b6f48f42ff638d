//! Clip list and channel activity grid.

use cuepool::AudioManager;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn render_board(frame: &mut Frame, area: Rect, manager: &AudioManager) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_clip_list(frame, halves[0], manager);
    render_channel_grid(frame, halves[1], manager);
}

fn render_clip_list(frame: &mut Frame, area: Rect, manager: &AudioManager) {
    let items: Vec<ListItem> = manager
        .catalog()
        .clips()
        .iter()
        .enumerate()
        .map(|(i, clip)| {
            let key = if i < 9 {
                (i + 1).to_string()
            } else {
                String::from(" ")
            };
            ListItem::new(format!(" [{}] {}", key, clip.name()))
        })
        .collect();

    let list = List::new(items).block(Block::default().title(" Clips ").borders(Borders::ALL));
    frame.render_widget(list, area);
}

fn render_channel_grid(frame: &mut Frame, area: Rect, manager: &AudioManager) {
    let lines: Vec<Line> = manager
        .pool()
        .iter()
        .enumerate()
        .map(|(i, channel)| {
            let (marker, style) = if channel.is_busy() {
                ("▶ busy", Style::default().fg(Color::Green))
            } else {
                ("· idle", Style::default().fg(Color::DarkGray))
            };
            Line::from(vec![
                Span::raw(format!(" ch {:>2}  ", i)),
                Span::styled(marker, style),
            ])
        })
        .collect();

    let block = Block::default().title(" Channels ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
