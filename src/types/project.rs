//! Project record accumulated across the wizard stages
//!
//! Field names on the wire follow the automation backend's contract, which mixes
//! camelCase (project fields), snake-ish (`part1_Problem`) and PascalCase (script
//! sections). The serde attributes below pin those names down.

use serde::{Deserialize, Deserializer, Serialize};

/// Everything the wizard knows about the in-progress project.
///
/// One instance per session. Optional fields are filled in as stages complete
/// and are only ever cleared by a full reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub project_name: String,
    pub initial_content: String,
    /// Empty when the user did not pick a grammar focus
    pub grammar_point: String,

    // ─────────────────────────────────────────────────────────────────────
    // Backend identifiers (opaque)
    // ─────────────────────────────────────────────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_folder_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_log_file_id: Option<String>,

    // ─────────────────────────────────────────────────────────────────────
    // Generated artifacts
    // ─────────────────────────────────────────────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<Outline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<Script>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompts: Option<Vec<ImagePrompt>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_info: Option<ProjectInfo>,
}

impl ProjectData {
    /// Shallow-merge a partial update. Fields the update leaves as `None`
    /// keep their current value.
    pub fn merge(&mut self, update: ProjectUpdate) {
        let ProjectUpdate {
            project_name,
            initial_content,
            grammar_point,
            drive_folder_id,
            main_log_file_id,
            outline,
            script,
            image_prompts,
            project_info,
        } = update;

        if let Some(v) = project_name {
            self.project_name = v;
        }
        if let Some(v) = initial_content {
            self.initial_content = v;
        }
        if let Some(v) = grammar_point {
            self.grammar_point = v;
        }
        if drive_folder_id.is_some() {
            self.drive_folder_id = drive_folder_id;
        }
        if main_log_file_id.is_some() {
            self.main_log_file_id = main_log_file_id;
        }
        if outline.is_some() {
            self.outline = outline;
        }
        if script.is_some() {
            self.script = script;
        }
        if image_prompts.is_some() {
            self.image_prompts = image_prompts;
        }
        if project_info.is_some() {
            self.project_info = project_info;
        }
    }
}

/// A partial [`ProjectData`]: `Some` fields overwrite, `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUpdate {
    pub project_name: Option<String>,
    pub initial_content: Option<String>,
    pub grammar_point: Option<String>,
    pub drive_folder_id: Option<String>,
    pub main_log_file_id: Option<String>,
    pub outline: Option<Outline>,
    pub script: Option<Script>,
    pub image_prompts: Option<Vec<ImagePrompt>>,
    pub project_info: Option<ProjectInfo>,
}

/// Episode outline produced by project initialization and edited in stage 3
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Outline {
    #[serde(rename = "openingHook", deserialize_with = "null_as_default")]
    pub opening_hook: String,
    #[serde(rename = "part1_Problem", deserialize_with = "null_as_default")]
    pub part1_problem: String,
    #[serde(rename = "part2_Cause", deserialize_with = "null_as_default")]
    pub part2_cause: String,
    #[serde(rename = "part3_Solution", deserialize_with = "null_as_default")]
    pub part3_solution: String,
    #[serde(rename = "suggestedVocab", deserialize_with = "null_as_default")]
    pub suggested_vocab: Vec<String>,
}

/// Full episode script, one section per field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Script {
    #[serde(deserialize_with = "null_as_default")]
    pub open_hook: String,
    #[serde(deserialize_with = "null_as_default")]
    pub part1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub part2: String,
    #[serde(deserialize_with = "null_as_default")]
    pub part3: String,
    #[serde(deserialize_with = "null_as_default")]
    pub vocab: String,
    #[serde(deserialize_with = "null_as_default")]
    pub grammar: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
}

/// One image to generate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePrompt {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub prompt: String,
}

impl ImagePrompt {
    pub fn new(id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
        }
    }
}

/// Links and metadata the backend reports for a created project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub project_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date_created: String,
    #[serde(deserialize_with = "null_as_default")]
    pub folder_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub keyword_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub video_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub script_doc_url: String,
}

impl ProjectInfo {
    /// Non-empty links in display order: folder, script doc, keywords, images
    pub fn links(&self) -> Vec<(&'static str, &str)> {
        [
            ("Project Folder", self.folder_url.as_str()),
            ("Script Document", self.script_doc_url.as_str()),
            ("Keywords Sheet", self.keyword_url.as_str()),
            ("Generated Images", self.image_url.as_str()),
        ]
        .into_iter()
        .filter(|(_, url)| !url.is_empty())
        .collect()
    }
}

/// Read an explicit JSON `null` the same way as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
