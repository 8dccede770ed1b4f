//! Domain types shared by the store, the stage flow and the gateway.

mod project;

pub use project::{ImagePrompt, Outline, ProjectData, ProjectInfo, ProjectUpdate, Script};
