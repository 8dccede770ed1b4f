//! Request and response bodies of the four automation webhooks
//!
//! Responses are lenient: unknown fields are ignored and missing ones default,
//! so the backend can evolve without breaking the wizard.

use serde::{Deserialize, Serialize};

use crate::types::{ImagePrompt, Outline, ProjectInfo, Script};

/// Stage 2 -> 3
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeProjectRequest {
    pub project_name: String,
    pub initial_content: String,
    pub grammar_point: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InitializeProjectResponse {
    pub drive_folder_id: Option<String>,
    pub main_log_file_id: Option<String>,
    pub outline: Option<Outline>,
    pub project_info: Option<ProjectInfo>,
    pub notification: Option<String>,
}

/// Stage 3 -> 4
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScriptRequest {
    pub edited_outline: Outline,
    pub grammar_point: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drive_folder_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreateScriptResponse {
    pub script: Option<Script>,
}

/// Stage 4 -> 5
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepareMediaRequest {
    pub confirmed_script: Script,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drive_folder_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrepareMediaResponse {
    pub image_prompts: Option<Vec<ImagePrompt>>,
}

/// Stage 5 -> 6
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImagesRequest {
    pub edited_prompts: Vec<ImagePrompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drive_folder_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GenerateImagesResponse {
    pub notification: Option<String>,
}
