//! The six wizard stages in order

use std::fmt;

/// Total number of stages in the wizard
pub const STAGE_COUNT: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    NameProject,
    InputContent,
    CreateOutline,
    CreateScript,
    PrepareMedia,
    Complete,
}

impl Stage {
    pub fn all() -> &'static [Stage] {
        &[
            Stage::NameProject,
            Stage::InputContent,
            Stage::CreateOutline,
            Stage::CreateScript,
            Stage::PrepareMedia,
            Stage::Complete,
        ]
    }

    /// 1-based step number as stored in the session
    pub fn step(self) -> u8 {
        match self {
            Stage::NameProject => 1,
            Stage::InputContent => 2,
            Stage::CreateOutline => 3,
            Stage::CreateScript => 4,
            Stage::PrepareMedia => 5,
            Stage::Complete => 6,
        }
    }

    pub fn from_step(step: u8) -> Option<Self> {
        match step {
            1 => Some(Stage::NameProject),
            2 => Some(Stage::InputContent),
            3 => Some(Stage::CreateOutline),
            4 => Some(Stage::CreateScript),
            5 => Some(Stage::PrepareMedia),
            6 => Some(Stage::Complete),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_step(self.step() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        Self::from_step(self.step() - 1)
    }

    /// Label shown in the step indicator
    pub fn label(self) -> &'static str {
        match self {
            Stage::NameProject => "Name Project",
            Stage::InputContent => "Input Content",
            Stage::CreateOutline => "Create Outline",
            Stage::CreateScript => "Create Script",
            Stage::PrepareMedia => "Prepare Media",
            Stage::Complete => "Generate Images",
        }
    }

    /// Loading message while this stage's backend call is in flight
    pub fn loading_message(self) -> Option<&'static str> {
        match self {
            Stage::InputContent => Some("Initializing project and creating outline..."),
            Stage::CreateOutline => Some("Generating detailed script..."),
            Stage::CreateScript => Some("Preparing media prompts..."),
            Stage::PrepareMedia => {
                Some("Generating images... This process may take a few minutes.")
            }
            Stage::NameProject | Stage::Complete => None,
        }
    }

    /// Notification used when the backend does not supply one
    pub fn success_message(self) -> &'static str {
        match self {
            Stage::NameProject => "Project named",
            Stage::InputContent => "Project initialized and outline created successfully!",
            Stage::CreateOutline => "Script generated successfully!",
            Stage::CreateScript => "Media prompts prepared successfully!",
            Stage::PrepareMedia => "Images generated successfully!",
            Stage::Complete => "Project completed",
        }
    }

    /// Whether the user may step back from here without a backend call
    pub fn allows_back(self) -> bool {
        matches!(
            self,
            Stage::InputContent | Stage::CreateOutline | Stage::CreateScript | Stage::PrepareMedia
        )
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
