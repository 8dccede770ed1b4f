//! Outline stage: the form plus the collapsible project information panel

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::wizard::WizardView;

impl WizardView {
    pub(crate) fn render_outline(&mut self, frame: &mut Frame, area: Rect) {
        if self.project.project_info.is_none() {
            self.render_fields(frame, area);
            return;
        }

        if !self.show_project_info {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2), Constraint::Min(1)])
                .split(area);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Project Information (Ctrl-P to view)",
                    Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
                )),
                chunks[0],
            );
            self.render_fields(frame, chunks[1]);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        self.render_fields(frame, chunks[0]);
        self.render_project_info(frame, chunks[1]);
    }

    fn render_project_info(&self, frame: &mut Frame, area: Rect) {
        let label = Style::default().add_modifier(Modifier::BOLD);
        let entry = |name: &'static str, value: String| {
            Line::from(vec![Span::styled(format!("{name}: "), label), Span::raw(value)])
        };

        let project = &self.project;
        let info = project.project_info.clone().unwrap_or_default();
        let mut lines = vec![
            entry("Project Name", project.project_name.clone()),
            entry("Project ID", info.project_id.clone()),
            entry("Date Created", info.date_created.clone()),
            entry("Folder ID", project.drive_folder_id.clone().unwrap_or_default()),
            entry(
                "Main Log File ID",
                project.main_log_file_id.clone().unwrap_or_default(),
            ),
        ];

        let links = info.links();
        if !links.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Project Links:", label)));
            for (name, url) in links {
                lines.push(Line::from(vec![
                    Span::raw(format!("{name}: ")),
                    Span::styled(url.to_string(), Style::default().fg(Color::Blue)),
                ]));
            }
        }

        let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title(" Project Information (Ctrl-P to collapse) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );
        frame.render_widget(panel, area);
    }
}
