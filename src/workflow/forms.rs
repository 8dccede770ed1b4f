//! Editable drafts behind stages 3 to 5 and their presence checks

use crate::types::{ImagePrompt, Outline, Script};

use super::ValidationError;

/// Stock prompts offered when the backend returned none
const DEFAULT_PROMPTS: &[(&str, &str)] = &[
    (
        "img_vocab1",
        "A colorful illustration showing vocabulary learning concepts",
    ),
    (
        "img_problem",
        "An illustration representing the main problem discussed",
    ),
    (
        "img_solution",
        "A bright, optimistic image showing the solution",
    ),
];

/// Split comma-separated vocabulary, trimming words and dropping empties
pub fn split_vocab(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Outline as the user edits it: vocabulary is one comma-separated string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineDraft {
    pub opening_hook: String,
    pub part1_problem: String,
    pub part2_cause: String,
    pub part3_solution: String,
    pub suggested_vocab: String,
}

impl OutlineDraft {
    /// Pre-fill from the outline the backend returned, if any
    pub fn from_outline(outline: Option<&Outline>) -> Self {
        match outline {
            Some(o) => Self {
                opening_hook: o.opening_hook.clone(),
                part1_problem: o.part1_problem.clone(),
                part2_cause: o.part2_cause.clone(),
                part3_solution: o.part3_solution.clone(),
                suggested_vocab: o.suggested_vocab.join(", "),
            },
            None => Self::default(),
        }
    }

    pub fn to_outline(&self) -> Outline {
        Outline {
            opening_hook: self.opening_hook.clone(),
            part1_problem: self.part1_problem.clone(),
            part2_cause: self.part2_cause.clone(),
            part3_solution: self.part3_solution.clone(),
            suggested_vocab: split_vocab(&self.suggested_vocab),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.opening_hook.trim().is_empty()
    }

    /// Structured outline, or the reason it cannot be submitted
    pub fn validate(&self) -> Result<Outline, ValidationError> {
        if !self.is_complete() {
            return Err(ValidationError::EmptyOpeningHook);
        }
        Ok(self.to_outline())
    }
}

/// Presence check for a script about to be confirmed
pub fn validate_script(script: &Script) -> Result<(), ValidationError> {
    if script.open_hook.trim().is_empty() {
        return Err(ValidationError::EmptyOpeningHook);
    }
    Ok(())
}

/// Editable list of image prompts. Never shrinks below one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptEditor {
    prompts: Vec<ImagePrompt>,
}

impl Default for PromptEditor {
    fn default() -> Self {
        Self {
            prompts: Self::default_prompts(),
        }
    }
}

impl PromptEditor {
    pub fn default_prompts() -> Vec<ImagePrompt> {
        DEFAULT_PROMPTS
            .iter()
            .map(|(id, prompt)| ImagePrompt::new(*id, *prompt))
            .collect()
    }

    /// Start from saved prompts, falling back to the stock set when there are none
    pub fn from_saved(saved: Option<&[ImagePrompt]>) -> Self {
        match saved {
            Some(prompts) if !prompts.is_empty() => Self {
                prompts: prompts.to_vec(),
            },
            _ => Self::default(),
        }
    }

    pub fn prompts(&self) -> &[ImagePrompt] {
        &self.prompts
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn can_remove(&self) -> bool {
        self.prompts.len() > 1
    }

    /// Append an empty prompt with a fresh `img_custom_<millis>` id.
    /// Returns the new prompt's index.
    pub fn add(&mut self) -> usize {
        let millis = chrono::Utc::now().timestamp_millis();
        let mut id = format!("img_custom_{millis}");
        let mut suffix = 1;
        while self.prompts.iter().any(|p| p.id == id) {
            id = format!("img_custom_{millis}_{suffix}");
            suffix += 1;
        }
        self.prompts.push(ImagePrompt::new(id, ""));
        self.prompts.len() - 1
    }

    /// Remove the prompt at `index`. Refuses to remove the last one.
    pub fn remove(&mut self, index: usize) -> bool {
        if !self.can_remove() || index >= self.prompts.len() {
            return false;
        }
        self.prompts.remove(index);
        true
    }

    /// Replace the text of the prompt at `index`
    pub fn update(&mut self, index: usize, text: &str) -> bool {
        match self.prompts.get_mut(index) {
            Some(p) => {
                text.clone_into(&mut p.prompt);
                true
            }
            None => false,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.prompts.is_empty() && self.prompts.iter().all(|p| !p.prompt.trim().is_empty())
    }

    /// Prompts ready to submit, or the first empty one
    pub fn validate(&self) -> Result<Vec<ImagePrompt>, ValidationError> {
        validate_prompts(&self.prompts)
    }
}

/// All prompts must be non-empty; returns them in order
pub fn validate_prompts(prompts: &[ImagePrompt]) -> Result<Vec<ImagePrompt>, ValidationError> {
    if prompts.is_empty() {
        return Err(ValidationError::NoImagePrompts);
    }
    if let Some(index) = prompts.iter().position(|p| p.prompt.trim().is_empty()) {
        return Err(ValidationError::EmptyImagePrompt { index });
    }
    Ok(prompts.to_vec())
}
