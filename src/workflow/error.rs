use thiserror::Error;

use super::Stage;
use crate::api::GatewayError;

/// A required input is missing. Raised before any backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a project name")]
    EmptyProjectName,
    #[error("Please enter initial content")]
    EmptyInitialContent,
    #[error("Please fill in the opening hook")]
    EmptyOpeningHook,
    #[error("Please fill in all image prompts")]
    EmptyImagePrompt { index: usize },
    #[error("Please add at least one image prompt")]
    NoImagePrompts,
}

/// Why a stage submission did not advance the wizard
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// The UI submitted a stage that is not the current one
    #[error("Cannot submit {expected} while on step {current}")]
    WrongStage { expected: Stage, current: u8 },
}

impl StageError {
    /// True when the backend was never contacted
    pub fn is_local(&self) -> bool {
        !matches!(self, StageError::Gateway(_))
    }
}
