//! Wizard screen: one form per stage, rebuilt from the session state

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use podflow::state::SessionState;
use podflow::types::{ImagePrompt, ProjectData, Script};
use podflow::workflow::forms::validate_script;
use podflow::workflow::{OutlineDraft, PromptEditor, Stage, ValidationError};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use uuid::Uuid;

use super::form_field::FormField;
use super::widgets::render_step_indicator;

mod steps;


/// Script sections in display order
const SCRIPT_LABELS: [&str; 7] = [
    "Opening Hook",
    "Part 1",
    "Part 2",
    "Part 3",
    "Vocabulary Section",
    "Grammar Section",
    "Summary",
];

/// What the app should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    None,
    Quit,
    Back,
    Reset,
    NameProject(String),
    SubmitContent { content: String, grammar: String },
    SubmitOutline(OutlineDraft),
    SubmitScript(Script),
    SubmitPrompts(Vec<ImagePrompt>),
}

/// Form state for the stage currently on screen.
///
/// Fields are rebuilt from the project data whenever the stage or the session
/// changes, and left alone otherwise so a failed submit keeps the user's edits.
pub struct WizardView {
    stage: Stage,
    session_id: Option<Uuid>,
    project: ProjectData,
    fields: Vec<FormField>,
    focus: usize,
    prompts: PromptEditor,
    show_project_info: bool,
    error: Option<String>,
}

impl Default for WizardView {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardView {
    pub fn new() -> Self {
        let project = ProjectData::default();
        let prompts = PromptEditor::default();
        Self {
            stage: Stage::NameProject,
            session_id: None,
            fields: build_fields(Stage::NameProject, &project, &prompts),
            project,
            focus: 0,
            prompts,
            show_project_info: false,
            error: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Show an inline message under the form
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Adopt the latest session state
    pub fn sync(&mut self, state: &SessionState) {
        let stage = state.stage();
        let rebuild = self.session_id != Some(state.session_id) || self.stage != stage;
        self.project = state.project.clone();

        if rebuild {
            self.session_id = Some(state.session_id);
            self.stage = stage;
            self.focus = 0;
            self.error = None;
            self.show_project_info = false;
            self.prompts = PromptEditor::from_saved(state.project.image_prompts.as_deref());
            self.fields = build_fields(stage, &self.project, &self.prompts);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> WizardAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return WizardAction::Quit,
                KeyCode::Char('s') => return self.submit(),
                KeyCode::Char('r') if self.stage == Stage::Complete => return WizardAction::Reset,
                KeyCode::Char('n') if self.stage == Stage::PrepareMedia => {
                    self.add_prompt();
                    return WizardAction::None;
                }
                KeyCode::Char('d') if self.stage == Stage::PrepareMedia => {
                    self.remove_prompt();
                    return WizardAction::None;
                }
                KeyCode::Char('p')
                    if self.stage == Stage::CreateOutline && self.project.project_info.is_some() =>
                {
                    self.show_project_info = !self.show_project_info;
                    return WizardAction::None;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc if self.stage == Stage::NameProject => WizardAction::Quit,
            KeyCode::Esc if self.stage.allows_back() => WizardAction::Back,
            KeyCode::Esc => WizardAction::None,
            KeyCode::Tab => {
                self.focus_next();
                WizardAction::None
            }
            KeyCode::BackTab => {
                self.focus_prev();
                WizardAction::None
            }
            KeyCode::Enter if self.stage == Stage::Complete => WizardAction::Reset,
            KeyCode::Char('q') if self.stage == Stage::Complete => WizardAction::Quit,
            KeyCode::Enter if self.focused_is_single_line() => self.submit(),
            _ => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    if field.handle_key(key) {
                        self.error = None;
                    }
                }
                WizardAction::None
            }
        }
    }

    fn focused_is_single_line(&self) -> bool {
        self.fields
            .get(self.focus)
            .is_some_and(|field| !field.is_multiline())
    }

    fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    fn value(&self, index: usize) -> String {
        self.fields
            .get(index)
            .map(FormField::value)
            .unwrap_or_default()
    }

    fn outline_draft(&self) -> OutlineDraft {
        OutlineDraft {
            opening_hook: self.value(0),
            part1_problem: self.value(1),
            part2_cause: self.value(2),
            part3_solution: self.value(3),
            suggested_vocab: self.value(4),
        }
    }

    fn script(&self) -> Script {
        Script {
            open_hook: self.value(0),
            part1: self.value(1),
            part2: self.value(2),
            part3: self.value(3),
            vocab: self.value(4),
            grammar: self.value(5),
            summary: self.value(6),
        }
    }

    /// Copy prompt field text back into the editor
    fn store_prompt_edits(&mut self) {
        for (index, field) in self.fields.iter().enumerate() {
            self.prompts.update(index, &field.value());
        }
    }

    fn add_prompt(&mut self) {
        self.store_prompt_edits();
        let index = self.prompts.add();
        self.fields = prompt_fields(&self.prompts);
        self.focus = index;
    }

    fn remove_prompt(&mut self) {
        self.store_prompt_edits();
        if self.prompts.remove(self.focus) {
            self.fields = prompt_fields(&self.prompts);
            self.focus = self.focus.min(self.fields.len().saturating_sub(1));
            self.error = None;
        } else {
            self.error = Some("At least one image prompt is required".to_string());
        }
    }

    /// Check the form locally and turn it into a submit action
    fn submit(&mut self) -> WizardAction {
        let result = match self.stage {
            Stage::NameProject => {
                let name = self.value(0);
                if name.trim().is_empty() {
                    Err(ValidationError::EmptyProjectName)
                } else {
                    Ok(WizardAction::NameProject(name))
                }
            }
            Stage::InputContent => {
                let content = self.value(0);
                if content.trim().is_empty() {
                    Err(ValidationError::EmptyInitialContent)
                } else {
                    Ok(WizardAction::SubmitContent {
                        content,
                        grammar: self.value(1),
                    })
                }
            }
            Stage::CreateOutline => {
                let draft = self.outline_draft();
                draft.validate().map(|_| WizardAction::SubmitOutline(draft))
            }
            Stage::CreateScript => {
                let script = self.script();
                validate_script(&script).map(|()| WizardAction::SubmitScript(script))
            }
            Stage::PrepareMedia => {
                self.store_prompt_edits();
                self.prompts.validate().map(WizardAction::SubmitPrompts)
            }
            Stage::Complete => Ok(WizardAction::Reset),
        };

        match result {
            Ok(action) => {
                self.error = None;
                action
            }
            Err(e) => {
                self.focus = match e {
                    ValidationError::EmptyImagePrompt { index } => index,
                    _ => 0,
                };
                self.error = Some(e.to_string());
                WizardAction::None
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Step indicator
                Constraint::Length(3), // Title and description
                Constraint::Min(3),    // Form or summary
                Constraint::Length(1), // Inline error
                Constraint::Length(1), // Key help
            ])
            .split(area);

        render_step_indicator(frame, chunks[0], self.stage);
        self.render_header(frame, chunks[1]);

        match self.stage {
            Stage::Complete => self.render_complete(frame, chunks[2]),
            Stage::CreateOutline => self.render_outline(frame, chunks[2]),
            _ => self.render_fields(frame, chunks[2]),
        }

        if let Some(error) = self.error() {
            frame.render_widget(
                Paragraph::new(Span::styled(error, Style::default().fg(Color::Red))),
                chunks[3],
            );
        }

        frame.render_widget(Paragraph::new(self.help_line()), chunks[4]);
    }

    /// Every required field has content
    pub fn can_submit(&self) -> bool {
        self.fields.iter().all(FormField::is_valid)
    }

    fn help_parts(&self) -> Vec<&'static str> {
        match self.stage {
            Stage::NameProject => vec!["Enter/Ctrl-S continue", "Esc quit"],
            Stage::InputContent | Stage::CreateScript => {
                vec!["Tab next field", "Ctrl-S submit", "Esc back", "Ctrl-C quit"]
            }
            Stage::CreateOutline if self.project.project_info.is_some() => vec![
                "Tab next field",
                "Ctrl-S submit",
                "Ctrl-P project info",
                "Esc back",
            ],
            Stage::CreateOutline => vec!["Tab next field", "Ctrl-S submit", "Esc back"],
            Stage::PrepareMedia => vec![
                "Tab next",
                "Ctrl-N add prompt",
                "Ctrl-D remove prompt",
                "Ctrl-S generate",
                "Esc back",
            ],
            Stage::Complete => vec!["Enter/Ctrl-R create new project", "q quit"],
        }
    }

    /// Key help, with the submit hint dimmed while required fields are empty
    fn help_line(&self) -> Line<'static> {
        let ready = self.can_submit();
        let hint = Style::default().fg(Color::DarkGray);
        let mut spans = Vec::new();

        for (index, part) in self.help_parts().into_iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled(" | ", hint));
            }
            if !part.contains("Ctrl-S") {
                spans.push(Span::styled(part, hint));
            } else if ready {
                spans.push(Span::styled(part, Style::default().fg(Color::Cyan)));
            } else {
                spans.push(Span::styled(part, hint.add_modifier(Modifier::DIM)));
                spans.push(Span::styled(
                    " (fill required fields)",
                    Style::default().fg(Color::Yellow),
                ));
            }
        }
        Line::from(spans)
    }
}

fn build_fields(stage: Stage, project: &ProjectData, prompts: &PromptEditor) -> Vec<FormField> {
    match stage {
        Stage::NameProject => vec![FormField::line(
            "Project Name",
            "Enter your project name...",
            &project.project_name,
        )
        .required()],
        Stage::InputContent => vec![
            FormField::area(
                "Initial Content (Original content, ideas)",
                "Enter your original content or ideas here...",
                &project.initial_content,
            )
            .required(),
            FormField::line(
                "Grammar Point (Optional)",
                "Example: Present Simple, Conditional Sentences",
                &project.grammar_point,
            ),
        ],
        Stage::CreateOutline => {
            let draft = OutlineDraft::from_outline(project.outline.as_ref());
            vec![
                FormField::area(
                    "Opening Hook",
                    "Enter the opening hook for your podcast...",
                    &draft.opening_hook,
                )
                .required(),
                FormField::area(
                    "Part 1: Problem",
                    "Describe the problem or challenge...",
                    &draft.part1_problem,
                ),
                FormField::area(
                    "Part 2: Cause",
                    "Explain the causes or reasons...",
                    &draft.part2_cause,
                ),
                FormField::area(
                    "Part 3: Solution",
                    "Provide solutions or recommendations...",
                    &draft.part3_solution,
                ),
                FormField::line(
                    "Suggested Vocabulary",
                    "Enter vocabulary words separated by commas...",
                    &draft.suggested_vocab,
                ),
            ]
        }
        Stage::CreateScript => {
            let script = project.script.clone().unwrap_or_default();
            let values = [
                script.open_hook,
                script.part1,
                script.part2,
                script.part3,
                script.vocab,
                script.grammar,
                script.summary,
            ];
            SCRIPT_LABELS
                .iter()
                .zip(values.iter())
                .enumerate()
                .map(|(index, (label, value))| {
                    let field = FormField::area(
                        *label,
                        format!("Enter {}...", label.to_lowercase()),
                        value,
                    );
                    if index == 0 {
                        field.required()
                    } else {
                        field
                    }
                })
                .collect()
        }
        Stage::PrepareMedia => prompt_fields(prompts),
        Stage::Complete => Vec::new(),
    }
}

fn prompt_fields(prompts: &PromptEditor) -> Vec<FormField> {
    prompts
        .prompts()
        .iter()
        .enumerate()
        .map(|(index, prompt)| {
            FormField::area(
                format!("Image Prompt {} ({})", index + 1, prompt.id),
                "Describe the image you want to generate...",
                &prompt.prompt,
            )
            .required()
        })
        .collect()
}
