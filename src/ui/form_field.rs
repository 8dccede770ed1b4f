//! Labelled text inputs for the wizard forms

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

enum Input {
    /// Single-line text input; `cursor` counts chars, not bytes
    Line { value: String, cursor: usize },
    /// Multi-line text input using tui-textarea
    Area { textarea: Box<TextArea<'static>> },
}

/// One labelled input of a wizard form
pub struct FormField {
    label: String,
    placeholder: String,
    required: bool,
    input: Input,
}

impl FormField {
    pub fn line(label: impl Into<String>, placeholder: impl Into<String>, value: &str) -> Self {
        Self {
            label: label.into(),
            placeholder: placeholder.into(),
            required: false,
            input: Input::Line {
                value: value.to_string(),
                cursor: value.chars().count(),
            },
        }
    }

    pub fn area(label: impl Into<String>, placeholder: impl Into<String>, value: &str) -> Self {
        let lines: Vec<String> = value.lines().map(str::to_string).collect();
        let mut textarea = if lines.is_empty() {
            TextArea::default()
        } else {
            TextArea::new(lines)
        };
        textarea.move_cursor(tui_textarea::CursorMove::Bottom);
        textarea.move_cursor(tui_textarea::CursorMove::End);

        Self {
            label: label.into(),
            placeholder: placeholder.into(),
            required: false,
            input: Input::Area {
                textarea: Box::new(textarea),
            },
        }
    }

    /// Mark the field as required (shown with `*`, checked by `is_valid`)
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.input, Input::Area { .. })
    }

    pub fn value(&self) -> String {
        match &self.input {
            Input::Line { value, .. } => value.clone(),
            Input::Area { textarea } => textarea.lines().join("\n"),
        }
    }

    /// Non-empty after trimming, or not required at all
    pub fn is_valid(&self) -> bool {
        !self.required || !self.value().trim().is_empty()
    }

    /// Handle a key event, returns true if the key was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match &mut self.input {
            Input::Line { value, cursor } => match key.code {
                KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => false,
                KeyCode::Char(c) => {
                    let at = byte_index(value, *cursor);
                    value.insert(at, c);
                    *cursor += 1;
                    true
                }
                KeyCode::Backspace => {
                    if *cursor > 0 {
                        *cursor -= 1;
                        let at = byte_index(value, *cursor);
                        value.remove(at);
                    }
                    true
                }
                KeyCode::Delete => {
                    if *cursor < value.chars().count() {
                        let at = byte_index(value, *cursor);
                        value.remove(at);
                    }
                    true
                }
                KeyCode::Left => {
                    *cursor = cursor.saturating_sub(1);
                    true
                }
                KeyCode::Right => {
                    if *cursor < value.chars().count() {
                        *cursor += 1;
                    }
                    true
                }
                KeyCode::Home => {
                    *cursor = 0;
                    true
                }
                KeyCode::End => {
                    *cursor = value.chars().count();
                    true
                }
                _ => false,
            },
            // TextArea handles its own key events
            Input::Area { textarea } => textarea.input(key),
        }
    }

    /// Rows needed for label plus input
    pub fn render_height(&self) -> u16 {
        match self.input {
            Input::Line { .. } => 2,
            Input::Area { .. } => 6,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);

        let mut label = vec![Span::styled(
            self.label.clone(),
            Style::default()
                .fg(if focused { Color::Cyan } else { Color::Gray })
                .add_modifier(Modifier::BOLD),
        )];
        if self.required {
            label.push(Span::styled(" *", Style::default().fg(Color::Red)));
        }
        frame.render_widget(Paragraph::new(Line::from(label)), chunks[0]);

        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        match &mut self.input {
            Input::Line { value, cursor } => {
                let content = if value.is_empty() && !focused {
                    Line::from(Span::styled(
                        self.placeholder.as_str(),
                        Style::default().fg(Color::DarkGray),
                    ))
                } else if focused {
                    let at = byte_index(value, *cursor);
                    let (before, after) = value.split_at(at);
                    Line::from(vec![
                        Span::raw(before.to_string()),
                        Span::styled("|", Style::default().fg(Color::Cyan)),
                        Span::raw(after.to_string()),
                    ])
                } else {
                    Line::from(value.as_str())
                };
                frame.render_widget(Paragraph::new(content), chunks[1]);
            }
            Input::Area { textarea } => {
                textarea.set_cursor_line_style(Style::default());
                textarea.set_cursor_style(if focused {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                });
                textarea.set_block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border_color)),
                );
                textarea.set_placeholder_text(self.placeholder.clone());
                textarea.set_placeholder_style(Style::default().fg(Color::DarkGray));

                frame.render_widget(&**textarea, chunks[1]);
            }
        }
    }
}

/// Byte offset of the `chars`-th character (or the end of the string)
fn byte_index(value: &str, chars: usize) -> usize {
    value
        .char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(value.len())
}
