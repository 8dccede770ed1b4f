//! Pieces shared by every wizard screen: step indicator, loading overlay, toasts

use std::time::{Duration, Instant};

use podflow::workflow::{Stage, STAGE_COUNT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Spans for the step indicator: completed steps green, current cyan, later gray
pub fn step_indicator_line(current: Stage) -> Line<'static> {
    let mut spans = Vec::new();
    for stage in Stage::all() {
        if stage.step() > 1 {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }

        let (marker, style) = if *stage < current {
            ("✓", Style::default().fg(Color::Green))
        } else if *stage == current {
            (
                "●",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("○", Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(format!("{marker} {}", stage.label()), style));
    }
    Line::from(spans)
}

pub fn render_step_indicator(frame: &mut Frame, area: Rect, current: Stage) {
    let counter = Line::from(Span::styled(
        format!("Step {} of {}", current.step(), STAGE_COUNT),
        Style::default().fg(Color::Gray),
    ));

    let indicator = Paragraph::new(vec![step_indicator_line(current), counter])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(indicator, area);
}

/// Modal shown while a backend call is in flight
pub fn render_loading_overlay(frame: &mut Frame, message: &str, tick: usize) {
    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);

    let spinner = SPINNER[tick % SPINNER.len()];
    let text = if message.is_empty() {
        "Working..."
    } else {
        message
    };

    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(spinner, Style::default().fg(Color::Cyan)),
            Span::raw(" "),
            Span::raw(text.to_string()),
        ]),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(" Please wait ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(body, area);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient message in the top-right corner
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    expires_at: Instant,
}

impl Toast {
    pub fn success(message: impl Into<String>, ttl: Duration) -> Self {
        Self::new(message, ToastKind::Success, ttl)
    }

    pub fn error(message: impl Into<String>, ttl: Duration) -> Self {
        Self::new(message, ToastKind::Error, ttl)
    }

    fn new(message: impl Into<String>, kind: ToastKind, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            kind,
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    pub fn render(&self, frame: &mut Frame) {
        let screen = frame.area();
        let width = (self.message.chars().count() as u16 + 4)
            .clamp(20, screen.width.saturating_sub(2).max(20))
            .min(screen.width);
        let area = Rect {
            x: screen.width.saturating_sub(width + 1),
            y: 1,
            width,
            height: 3,
        }
        .intersection(screen);

        let (title, color) = match self.kind {
            ToastKind::Success => (" Success ", Color::Green),
            ToastKind::Error => (" Error ", Color::Red),
        };

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(self.message.as_str()).block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            ),
            area,
        );
    }
}
