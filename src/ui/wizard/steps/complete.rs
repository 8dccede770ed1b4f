//! Completion stage: summary, links and what was generated

use podflow::types::ProjectData;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::wizard::WizardView;

/// Grammar point as shown in the summary
pub(crate) fn grammar_display(project: &ProjectData) -> &str {
    if project.grammar_point.trim().is_empty() {
        "None specified"
    } else {
        &project.grammar_point
    }
}

impl WizardView {
    pub(crate) fn render_complete(&self, frame: &mut Frame, area: Rect) {
        let project = &self.project;
        let links = project
            .project_info
            .as_ref()
            .map(|info| info.links())
            .unwrap_or_default();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),                      // Summary
                Constraint::Length(links.len() as u16 + 2), // Links
                Constraint::Min(6),                         // Generated content
            ])
            .split(area);

        let label = Style::default().add_modifier(Modifier::BOLD);
        let summary = vec![
            Line::from(vec![
                Span::styled("Project Name: ", label),
                Span::raw(project.project_name.clone()),
            ]),
            Line::from(vec![
                Span::styled("Status: ", label),
                Span::styled(
                    "Completed",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Folder ID: ", label),
                Span::raw(project.drive_folder_id.clone().unwrap_or_default()),
            ]),
            Line::from(vec![
                Span::styled("Grammar Point: ", label),
                Span::raw(grammar_display(project).to_string()),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(summary).block(
                Block::default()
                    .title(" Project Summary ")
                    .borders(Borders::ALL),
            ),
            chunks[0],
        );

        if !links.is_empty() {
            let lines: Vec<Line> = links
                .iter()
                .map(|(name, url)| {
                    Line::from(vec![
                        Span::styled(format!("{name}: "), label),
                        Span::styled(url.to_string(), Style::default().fg(Color::Blue)),
                    ])
                })
                .collect();
            frame.render_widget(
                Paragraph::new(lines).block(
                    Block::default()
                        .title(" Quick Access Links ")
                        .borders(Borders::ALL),
                ),
                chunks[1],
            );
        }

        let image_count = project.image_prompts.as_ref().map_or(0, Vec::len);
        let check = Span::styled("✓ ", Style::default().fg(Color::Green));
        let generated = vec![
            Line::from(vec![
                check.clone(),
                Span::raw("Project outline created and refined"),
            ]),
            Line::from(vec![
                check.clone(),
                Span::raw("Detailed podcast script generated"),
            ]),
            Line::from(vec![
                check.clone(),
                Span::raw(format!(
                    "{image_count} images generated from custom prompts"
                )),
            ]),
            Line::from(vec![check, Span::raw("All files saved to Google Drive")]),
        ];
        frame.render_widget(
            Paragraph::new(generated).wrap(Wrap { trim: true }).block(
                Block::default()
                    .title(" Generated Content ")
                    .borders(Borders::ALL),
            ),
            chunks[2],
        );
    }
}
