//! Render methods for each wizard stage

mod complete;
mod fields;
mod outline;

use podflow::workflow::Stage;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::WizardView;

impl WizardView {
    /// Stage title and one-line description
    pub(crate) fn render_header(&self, frame: &mut Frame, area: Rect) {
        let (title, description) = match self.stage {
            Stage::NameProject => (
                "Welcome to AI Podcast Creator".to_string(),
                "Let's start by giving your podcast project a name".to_string(),
            ),
            Stage::InputContent => (
                "Input Initial Content".to_string(),
                "Provide the original content and ideas for your podcast".to_string(),
            ),
            Stage::CreateOutline => (
                "Create & Edit Outline".to_string(),
                "Review and edit the generated outline for your podcast".to_string(),
            ),
            Stage::CreateScript => (
                "Review & Edit Script".to_string(),
                "Fine-tune your podcast script before generating media".to_string(),
            ),
            Stage::PrepareMedia => (
                "Prepare Media Creation".to_string(),
                "Review and edit image prompts for your podcast visuals".to_string(),
            ),
            Stage::Complete => (
                "Project Completed Successfully!".to_string(),
                format!(
                    "Your podcast \"{}\" has been created and all images have been generated.",
                    self.project.project_name
                ),
            ),
        };

        let color = if self.stage == Stage::Complete {
            Color::Green
        } else {
            Color::White
        };

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(description, Style::default().fg(Color::Gray))),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(header, area);
    }
}
