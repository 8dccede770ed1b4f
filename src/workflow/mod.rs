//! Six-stage project flow: validate input, call the backend, merge, advance.

mod error;
mod flow;
pub mod forms;
mod stage;

pub use error::{StageError, ValidationError};
pub use flow::{StageOutcome, Workflow};
pub use forms::{split_vocab, OutlineDraft, PromptEditor};
pub use stage::{Stage, STAGE_COUNT};
