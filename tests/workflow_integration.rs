//! End-to-end runs of the six-stage workflow against an in-memory backend
//!
//! These tests verify that:
//! - Project data accumulates stage by stage and nothing is dropped
//! - Reset returns the store to its initial shape
//! - Going back never alters project data
//! - A failed backend call leaves the step and data unchanged
//! - Missing required input never reaches the backend
//! - Fields absent from a response keep their previous value

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::oneshot;

use podflow::api::{Endpoint, Gateway, GatewayError};
use podflow::state::INITIAL_STEP;
use podflow::types::{ImagePrompt, ProjectData, Script};
use podflow::workflow::{OutlineDraft, Stage, StageError, ValidationError, Workflow};

// ─── Test Backend ─────────────────────────────────────────────────────────────

/// Answers each endpoint with a configured result and records every request
#[derive(Default)]
struct ScriptedBackend {
    responses: Mutex<HashMap<Endpoint, Result<Value, GatewayError>>>,
    requests: Mutex<Vec<(Endpoint, Value)>>,
}

impl ScriptedBackend {
    fn respond(&self, endpoint: Endpoint, body: Value) {
        self.responses.lock().unwrap().insert(endpoint, Ok(body));
    }

    fn fail(&self, endpoint: Endpoint, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(endpoint, Err(GatewayError::network(endpoint, message)));
    }

    fn requests(&self) -> Vec<(Endpoint, Value)> {
        self.requests.lock().unwrap().clone()
    }

    fn last_request(&self, endpoint: Endpoint) -> Value {
        self.requests()
            .into_iter()
            .rev()
            .find(|(e, _)| *e == endpoint)
            .map(|(_, body)| body)
            .unwrap_or_else(|| panic!("no request sent to {endpoint}"))
    }
}

#[async_trait]
impl Gateway for ScriptedBackend {
    async fn call(&self, endpoint: Endpoint, payload: Value) -> Result<Value, GatewayError> {
        self.requests.lock().unwrap().push((endpoint, payload));
        self.responses
            .lock()
            .unwrap()
            .get(&endpoint)
            .cloned()
            .unwrap_or_else(|| Ok(json!({})))
    }
}

fn scripted_backend() -> ScriptedBackend {
    let backend = ScriptedBackend::default();
    backend.respond(
        Endpoint::InitializeProject,
        json!({
            "driveFolderId": "F1",
            "mainLogFileId": "L1",
            "outline": {
                "openingHook": "Ever wondered?",
                "part1_Problem": "The problem",
                "part2_Cause": "The cause",
                "part3_Solution": "The fix",
                "suggestedVocab": ["alpha", "beta"]
            },
            "projectInfo": {
                "projectId": "P-1",
                "dateCreated": "2024-05-01",
                "folderUrl": "https://drive.example/F1"
            }
        }),
    );
    backend.respond(
        Endpoint::CreateScript,
        json!({
            "script": {
                "OpenHook": "Welcome back",
                "Part1": "One",
                "Part2": "Two",
                "Part3": "Three",
                "Vocab": "alpha, beta",
                "Grammar": "Past Simple",
                "Summary": "Bye"
            }
        }),
    );
    backend.respond(
        Endpoint::PrepareMedia,
        json!({
            "imagePrompts": [
                { "id": "img_a", "prompt": "A sunrise" },
                { "id": "img_b", "prompt": "A classroom" }
            ]
        }),
    );
    backend.respond(
        Endpoint::GenerateImages,
        json!({ "notification": "Images are ready" }),
    );
    backend
}

fn draft(hook: &str, vocab: &str) -> OutlineDraft {
    OutlineDraft {
        opening_hook: hook.to_string(),
        part1_problem: "The problem".to_string(),
        part2_cause: "The cause".to_string(),
        part3_solution: "The fix".to_string(),
        suggested_vocab: vocab.to_string(),
    }
}

/// Drive a fresh workflow all the way to the completion stage
async fn complete_project() -> Workflow<ScriptedBackend> {
    let mut flow = Workflow::new(scripted_backend());
    flow.name_project("My Show").unwrap();
    flow.submit_content("Topic X", "").await.unwrap();
    flow.submit_outline(&draft("Ever wondered?", "alpha, beta"))
        .await
        .unwrap();
    let script = flow.store().snapshot().project.script.unwrap();
    flow.submit_script(script).await.unwrap();
    let prompts = flow.store().snapshot().project.image_prompts.unwrap();
    flow.submit_prompts(&prompts).await.unwrap();
    flow
}

// ─── Scenarios ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_initialize_project_scenario() {
    let backend = ScriptedBackend::default();
    backend.respond(Endpoint::InitializeProject, json!({ "driveFolderId": "F1" }));
    let mut flow = Workflow::new(backend);

    flow.name_project("My Show").unwrap();
    let outcome = flow.submit_content("Topic X", "").await.unwrap();

    assert_eq!(outcome.stage, Stage::CreateOutline);
    let state = flow.store().snapshot();
    assert_eq!(state.current_step, 3);
    assert_eq!(state.project.project_name, "My Show");
    assert_eq!(state.project.initial_content, "Topic X");
    assert_eq!(state.project.grammar_point, "");
    assert_eq!(state.project.drive_folder_id.as_deref(), Some("F1"));
    assert!(!state.is_loading);

    assert_eq!(
        flow.gateway().last_request(Endpoint::InitializeProject),
        json!({
            "projectName": "My Show",
            "initialContent": "Topic X",
            "grammarPoint": ""
        })
    );
}

#[tokio::test]
async fn test_full_run_accumulates_every_field() {
    let flow = complete_project().await;
    let state = flow.store().snapshot();

    assert_eq!(state.stage(), Stage::Complete);
    let project = state.project;
    assert_eq!(project.project_name, "My Show");
    assert_eq!(project.initial_content, "Topic X");
    assert_eq!(project.drive_folder_id.as_deref(), Some("F1"));
    assert_eq!(project.main_log_file_id.as_deref(), Some("L1"));
    assert_eq!(project.outline.unwrap().suggested_vocab, vec!["alpha", "beta"]);
    assert_eq!(project.script.unwrap().open_hook, "Welcome back");
    assert_eq!(project.image_prompts.unwrap().len(), 2);
    assert_eq!(project.project_info.unwrap().project_id, "P-1");

    let endpoints: Vec<Endpoint> = flow.gateway().requests().into_iter().map(|(e, _)| e).collect();
    assert_eq!(
        endpoints,
        vec![
            Endpoint::InitializeProject,
            Endpoint::CreateScript,
            Endpoint::PrepareMedia,
            Endpoint::GenerateImages,
        ]
    );
}

#[tokio::test]
async fn test_requests_carry_folder_id_and_edits() {
    let flow = complete_project().await;
    let backend = flow.gateway();

    let create = backend.last_request(Endpoint::CreateScript);
    assert_eq!(create["driveFolderId"], "F1");
    assert_eq!(create["grammarPoint"], "");
    assert_eq!(create["editedOutline"]["openingHook"], "Ever wondered?");

    let prepare = backend.last_request(Endpoint::PrepareMedia);
    assert_eq!(prepare["driveFolderId"], "F1");
    assert_eq!(prepare["confirmedScript"]["OpenHook"], "Welcome back");
    assert_eq!(prepare["confirmedScript"]["Summary"], "Bye");

    let generate = backend.last_request(Endpoint::GenerateImages);
    assert_eq!(generate["driveFolderId"], "F1");
    assert_eq!(
        generate["editedPrompts"],
        json!([
            { "id": "img_a", "prompt": "A sunrise" },
            { "id": "img_b", "prompt": "A classroom" }
        ])
    );
}

#[tokio::test]
async fn test_vocab_is_split_before_sending() {
    let mut flow = Workflow::new(scripted_backend());
    flow.name_project("My Show").unwrap();
    flow.submit_content("Topic X", "").await.unwrap();
    flow.submit_outline(&draft("Hook", "a, b ,c")).await.unwrap();

    let request = flow.gateway().last_request(Endpoint::CreateScript);
    assert_eq!(
        request["editedOutline"]["suggestedVocab"],
        json!(["a", "b", "c"])
    );
    let stored = flow.store().snapshot().project.outline.unwrap();
    assert_eq!(stored.suggested_vocab, vec!["a", "b", "c"]);
    assert_eq!(stored.opening_hook, "Hook");
}

#[tokio::test]
async fn test_backend_notification_reaches_caller() {
    let mut flow = complete_project().await;
    // Last stage reported the backend's message; stepping back and
    // resubmitting shows it again
    flow.back();
    let prompts = flow.store().snapshot().project.image_prompts.unwrap();
    let outcome = flow.submit_prompts(&prompts).await.unwrap();
    assert_eq!(outcome.notification, "Images are ready");
    assert_eq!(outcome.stage, Stage::Complete);
}

#[tokio::test]
async fn test_reset_returns_initial_shape() {
    let mut flow = complete_project().await;
    let finished_session = flow.store().session_id();

    flow.reset();

    let state = flow.store().snapshot();
    assert_eq!(state.project, ProjectData::default());
    assert_eq!(state.current_step, INITIAL_STEP);
    assert!(!state.is_loading);
    assert!(state.loading_message.is_empty());
    assert_ne!(state.session_id, finished_session);
}

#[tokio::test]
async fn test_back_never_alters_data() {
    let mut flow = complete_project().await;
    let project = flow.store().snapshot().project;

    let mut visited = Vec::new();
    while let Some(stage) = flow.back() {
        visited.push(stage);
        assert_eq!(flow.store().snapshot().project, project);
    }

    assert_eq!(
        visited,
        vec![
            Stage::PrepareMedia,
            Stage::CreateScript,
            Stage::CreateOutline,
            Stage::InputContent,
            Stage::NameProject,
        ]
    );
    assert_eq!(flow.store().current_step(), 1);
}

#[tokio::test]
async fn test_failure_leaves_step_and_data_unchanged() {
    let mut flow = Workflow::new(scripted_backend());
    flow.name_project("My Show").unwrap();
    flow.submit_content("Topic X", "").await.unwrap();
    flow.gateway().fail(Endpoint::CreateScript, "X");

    let before = flow.store().snapshot();
    let err = flow
        .submit_outline(&draft("Edited hook", "z"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "X");
    let after = flow.store().snapshot();
    assert_eq!(after.current_step, 3);
    assert_eq!(after.project, before.project);
    assert!(!after.is_loading);
    assert_eq!(after.project.outline.unwrap().opening_hook, "Ever wondered?");
}

#[tokio::test]
async fn test_missing_input_never_calls_backend() {
    let mut flow = Workflow::new(scripted_backend());

    assert_eq!(
        flow.name_project("  ").unwrap_err(),
        StageError::Validation(ValidationError::EmptyProjectName)
    );
    flow.name_project("My Show").unwrap();

    assert_eq!(
        flow.submit_content(" \n ", "grammar").await.unwrap_err(),
        StageError::Validation(ValidationError::EmptyInitialContent)
    );
    assert!(flow.gateway().requests().is_empty());

    flow.submit_content("Topic X", "").await.unwrap();
    assert_eq!(
        flow.submit_outline(&draft("   ", "a")).await.unwrap_err(),
        StageError::Validation(ValidationError::EmptyOpeningHook)
    );

    flow.submit_outline(&draft("Hook", "a")).await.unwrap();
    assert_eq!(
        flow.submit_script(Script::default()).await.unwrap_err(),
        StageError::Validation(ValidationError::EmptyOpeningHook)
    );

    let script = flow.store().snapshot().project.script.unwrap();
    flow.submit_script(script).await.unwrap();
    let prompts = vec![
        ImagePrompt::new("img_a", "A sunrise"),
        ImagePrompt::new("img_b", "  "),
    ];
    assert_eq!(
        flow.submit_prompts(&prompts).await.unwrap_err(),
        StageError::Validation(ValidationError::EmptyImagePrompt { index: 1 })
    );

    // One call per successful stage, none for the rejected attempts
    assert_eq!(flow.gateway().requests().len(), 3);
    assert_eq!(flow.stage(), Stage::PrepareMedia);
}

#[tokio::test]
async fn test_absent_response_fields_keep_previous_values() {
    let mut flow = Workflow::new(scripted_backend());
    flow.name_project("My Show").unwrap();
    flow.submit_content("Topic X", "").await.unwrap();

    // Go back and resubmit; this time the backend omits everything
    flow.back();
    flow.gateway().respond(Endpoint::InitializeProject, json!({}));
    flow.submit_content("Topic Y", "Conditionals").await.unwrap();

    let project = flow.store().snapshot().project;
    assert_eq!(project.initial_content, "Topic Y");
    assert_eq!(project.grammar_point, "Conditionals");
    assert_eq!(project.drive_folder_id.as_deref(), Some("F1"));
    assert_eq!(project.outline.unwrap().opening_hook, "Ever wondered?");
    assert!(project.project_info.is_some());
}

#[tokio::test]
async fn test_null_inner_fields_still_advance() {
    let backend = ScriptedBackend::default();
    backend.respond(
        Endpoint::InitializeProject,
        json!({
            "driveFolderId": "F1",
            "outline": { "openingHook": "Hi", "part1_Problem": null, "suggestedVocab": null }
        }),
    );
    backend.respond(
        Endpoint::PrepareMedia,
        json!({ "imagePrompts": [{ "prompt": "x" }] }),
    );
    let mut flow = Workflow::new(backend);

    flow.name_project("My Show").unwrap();
    flow.submit_content("Topic X", "").await.unwrap();
    assert_eq!(flow.stage(), Stage::CreateOutline);

    let outline = flow.store().snapshot().project.outline.unwrap();
    assert_eq!(outline.opening_hook, "Hi");
    assert_eq!(outline.part1_problem, "");
    assert!(outline.suggested_vocab.is_empty());

    flow.submit_outline(&draft("Hi", "")).await.unwrap();
    let script = Script {
        open_hook: "Welcome".to_string(),
        ..Default::default()
    };
    flow.submit_script(script).await.unwrap();

    assert_eq!(flow.stage(), Stage::PrepareMedia);
    assert_eq!(
        flow.store().snapshot().project.image_prompts,
        Some(vec![ImagePrompt::new("", "x")])
    );
}

#[tokio::test]
async fn test_submitting_another_stage_is_rejected() {
    let mut flow = Workflow::new(scripted_backend());
    let err = flow
        .submit_outline(&draft("Hook", ""))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        StageError::WrongStage {
            expected: Stage::CreateOutline,
            current: 1,
        }
    );
    assert!(flow.gateway().requests().is_empty());
}

// ─── Observers ────────────────────────────────────────────────────────────────

/// Holds its response until the test releases it
struct GatedBackend {
    release: tokio::sync::Mutex<Option<oneshot::Receiver<()>>>,
}

#[async_trait]
impl Gateway for GatedBackend {
    async fn call(&self, _endpoint: Endpoint, _payload: Value) -> Result<Value, GatewayError> {
        let gate = self.release.lock().await.take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(json!({ "driveFolderId": "F9" }))
    }
}

#[tokio::test]
async fn test_subscribers_see_loading_while_call_is_in_flight() {
    let (release, gate) = oneshot::channel();
    let mut flow = Workflow::new(GatedBackend {
        release: tokio::sync::Mutex::new(Some(gate)),
    });
    flow.name_project("My Show").unwrap();

    let mut updates = flow.subscribe();
    updates.current().unwrap();

    let observer = async {
        let state = updates.changed().await.unwrap();
        assert!(state.is_loading);
        assert_eq!(
            state.loading_message,
            "Initializing project and creating outline..."
        );
        release.send(()).unwrap();

        let state = updates.changed().await.unwrap();
        assert!(!state.is_loading);
    };

    let (outcome, ()) = tokio::join!(flow.submit_content("Topic X", ""), observer);
    assert_eq!(outcome.unwrap().stage, Stage::CreateOutline);

    let state = updates.current().unwrap();
    assert_eq!(state.current_step, 3);
    assert_eq!(state.project.drive_folder_id.as_deref(), Some("F9"));
}
