use std::future::Future;

use crate::api::{
    CreateScriptRequest, Gateway, GatewayError, GenerateImagesRequest, InitializeProjectRequest,
    PrepareMediaRequest,
};
use crate::state::{ProjectStore, StoreSubscription};
use crate::types::{ImagePrompt, ProjectUpdate, Script};

use super::forms::{validate_prompts, validate_script, OutlineDraft};
use super::{Stage, StageError, ValidationError};

/// Result of a successful stage submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutcome {
    /// Stage the wizard is on now
    pub stage: Stage,
    /// Message for the user: the backend's own notification when it sent one
    pub notification: String,
}

/// Drives the session through its stages.
///
/// Each submit validates locally, performs at most one gateway call, and only
/// on success merges the result and advances. On any error the store is left
/// exactly as it was, apart from the loading flag which is always cleared.
pub struct Workflow<G> {
    store: ProjectStore,
    gateway: G,
}

impl<G: Gateway> Workflow<G> {
    pub fn new(gateway: G) -> Self {
        Self::with_store(ProjectStore::new(), gateway)
    }

    pub fn with_store(store: ProjectStore, gateway: G) -> Self {
        Self { store, gateway }
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn subscribe(&self) -> StoreSubscription {
        self.store.subscribe()
    }

    pub fn stage(&self) -> Stage {
        self.store.read(|s| s.stage())
    }

    fn ensure_stage(&self, expected: Stage) -> Result<(), StageError> {
        let current = self.store.current_step();
        if current == expected.step() {
            Ok(())
        } else {
            Err(StageError::WrongStage { expected, current })
        }
    }

    fn advance(&self, from: Stage, notification: String) -> StageOutcome {
        let stage = from.next().unwrap_or(from);
        self.store.set_current_step(stage.step());
        tracing::info!(
            session_id = %self.store.session_id(),
            completed = %from,
            now = %stage,
            "Stage completed"
        );
        StageOutcome {
            stage,
            notification,
        }
    }

    /// Run one backend call with the loading flag raised for its duration
    async fn with_loading<T>(
        &self,
        stage: Stage,
        call: impl Future<Output = Result<T, GatewayError>>,
    ) -> Result<T, GatewayError> {
        self.store.set_loading(true, stage.loading_message());
        let result = call.await;
        self.store.set_loading(false, None);

        if let Err(e) = &result {
            tracing::warn!(
                session_id = %self.store.session_id(),
                stage = %stage,
                error = %e,
                "Stage call failed"
            );
        }
        result
    }

    /// Stage 1: store the trimmed project name. No backend call.
    pub fn name_project(&mut self, name: &str) -> Result<StageOutcome, StageError> {
        self.ensure_stage(Stage::NameProject)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyProjectName.into());
        }

        self.store.update_project_data(ProjectUpdate {
            project_name: Some(name.to_string()),
            ..Default::default()
        });
        Ok(self.advance(
            Stage::NameProject,
            Stage::NameProject.success_message().to_string(),
        ))
    }

    /// Stage 2: initialize the project and receive the first outline
    pub async fn submit_content(
        &mut self,
        initial_content: &str,
        grammar_point: &str,
    ) -> Result<StageOutcome, StageError> {
        let stage = Stage::InputContent;
        self.ensure_stage(stage)?;

        let initial_content = initial_content.trim();
        if initial_content.is_empty() {
            return Err(ValidationError::EmptyInitialContent.into());
        }
        let grammar_point = grammar_point.trim();

        let request = InitializeProjectRequest {
            project_name: self.store.read(|s| s.project.project_name.clone()),
            initial_content: initial_content.to_string(),
            grammar_point: grammar_point.to_string(),
        };

        let response = self
            .with_loading(stage, self.gateway.initialize_project(&request))
            .await?;

        self.store.update_project_data(ProjectUpdate {
            initial_content: Some(request.initial_content),
            grammar_point: Some(request.grammar_point),
            drive_folder_id: response.drive_folder_id,
            main_log_file_id: response.main_log_file_id,
            outline: response.outline,
            project_info: response.project_info,
            ..Default::default()
        });

        let notification = response
            .notification
            .unwrap_or_else(|| stage.success_message().to_string());
        Ok(self.advance(stage, notification))
    }

    /// Stage 3: confirm the edited outline and receive the script
    pub async fn submit_outline(
        &mut self,
        draft: &OutlineDraft,
    ) -> Result<StageOutcome, StageError> {
        let stage = Stage::CreateOutline;
        self.ensure_stage(stage)?;

        let edited_outline = draft.validate()?;
        let (grammar_point, drive_folder_id) = self.store.read(|s| {
            (
                s.project.grammar_point.clone(),
                s.project.drive_folder_id.clone(),
            )
        });

        let request = CreateScriptRequest {
            edited_outline,
            grammar_point,
            drive_folder_id,
        };

        let response = self
            .with_loading(stage, self.gateway.create_script(&request))
            .await?;

        self.store.update_project_data(ProjectUpdate {
            outline: Some(request.edited_outline),
            script: response.script,
            ..Default::default()
        });

        Ok(self.advance(stage, stage.success_message().to_string()))
    }

    /// Stage 4: confirm the edited script and receive image prompts
    pub async fn submit_script(&mut self, script: Script) -> Result<StageOutcome, StageError> {
        let stage = Stage::CreateScript;
        self.ensure_stage(stage)?;

        validate_script(&script)?;
        let request = PrepareMediaRequest {
            confirmed_script: script,
            drive_folder_id: self.store.read(|s| s.project.drive_folder_id.clone()),
        };

        let response = self
            .with_loading(stage, self.gateway.prepare_media(&request))
            .await?;

        self.store.update_project_data(ProjectUpdate {
            script: Some(request.confirmed_script),
            image_prompts: response.image_prompts,
            ..Default::default()
        });

        Ok(self.advance(stage, stage.success_message().to_string()))
    }

    /// Stage 5: send the final prompts for image generation
    pub async fn submit_prompts(
        &mut self,
        prompts: &[ImagePrompt],
    ) -> Result<StageOutcome, StageError> {
        let stage = Stage::PrepareMedia;
        self.ensure_stage(stage)?;

        let edited_prompts = validate_prompts(prompts)?;
        let request = GenerateImagesRequest {
            edited_prompts,
            drive_folder_id: self.store.read(|s| s.project.drive_folder_id.clone()),
        };

        let response = self
            .with_loading(stage, self.gateway.generate_images(&request))
            .await?;

        self.store.update_project_data(ProjectUpdate {
            image_prompts: Some(request.edited_prompts),
            ..Default::default()
        });

        let notification = response
            .notification
            .unwrap_or_else(|| stage.success_message().to_string());
        Ok(self.advance(stage, notification))
    }

    /// Step back one stage without touching project data.
    /// Returns the new stage, or `None` when already on the first step.
    pub fn back(&mut self) -> Option<Stage> {
        let current = Stage::from_step(self.store.current_step())?;
        let prev = current.prev()?;
        self.store.set_current_step(prev.step());
        tracing::debug!(from = %current, to = %prev, "Navigated back");
        Some(prev)
    }

    /// Discard the project and return to stage 1
    pub fn reset(&mut self) {
        self.store.reset_project();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Endpoint;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails every call with the given message and counts attempts
    struct FailingGateway {
        message: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Gateway for FailingGateway {
        async fn call(&self, endpoint: Endpoint, _payload: Value) -> Result<Value, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(GatewayError::network(endpoint, self.message))
        }
    }

    /// Answers every call with the same body
    struct EchoGateway(Value);

    #[async_trait]
    impl Gateway for EchoGateway {
        async fn call(&self, _endpoint: Endpoint, _payload: Value) -> Result<Value, GatewayError> {
            Ok(self.0.clone())
        }
    }

    fn failing() -> Workflow<FailingGateway> {
        Workflow::new(FailingGateway {
            message: "X",
            calls: AtomicUsize::new(0),
        })
    }

    #[test]
    fn test_name_project_trims_and_advances() {
        let mut flow = failing();
        let outcome = flow.name_project("  My Show  ").unwrap();
        assert_eq!(outcome.stage, Stage::InputContent);
        assert_eq!(flow.store().snapshot().project.project_name, "My Show");
    }

    #[test]
    fn test_name_project_rejects_blank() {
        let mut flow = failing();
        let err = flow.name_project("   ").unwrap_err();
        assert_eq!(err, StageError::Validation(ValidationError::EmptyProjectName));
        assert_eq!(flow.stage(), Stage::NameProject);
    }

    #[tokio::test]
    async fn test_gateway_failure_keeps_step_and_data() {
        let mut flow = failing();
        flow.name_project("My Show").unwrap();
        let before = flow.store().snapshot();

        let err = flow.submit_content("Topic X", "").await.unwrap_err();
        assert_eq!(err.to_string(), "X");
        assert!(!err.is_local());

        let after = flow.store().snapshot();
        assert_eq!(after.project, before.project);
        assert_eq!(after.current_step, 2);
        assert!(!after.is_loading);
    }

    #[tokio::test]
    async fn test_empty_content_never_calls_gateway() {
        let mut flow = failing();
        flow.name_project("My Show").unwrap();

        let err = flow.submit_content("  ", "grammar").await.unwrap_err();
        assert_eq!(
            err,
            StageError::Validation(ValidationError::EmptyInitialContent)
        );
        assert_eq!(flow.gateway().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_wrong_stage_is_rejected_without_call() {
        let mut flow = failing();
        let err = flow
            .submit_script(Script {
                open_hook: "hook".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StageError::WrongStage {
                expected: Stage::CreateScript,
                current: 1
            }
        );
        assert_eq!(flow.gateway().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_backend_notification_is_preferred() {
        let mut flow = Workflow::new(EchoGateway(json!({
            "driveFolderId": "F1",
            "notification": "Folder ready",
        })));
        flow.name_project("p").unwrap();
        let outcome = flow.submit_content("c", "").await.unwrap();
        assert_eq!(outcome.notification, "Folder ready");
        assert_eq!(outcome.stage, Stage::CreateOutline);
    }

    #[tokio::test]
    async fn test_default_notification_when_backend_silent() {
        let mut flow = Workflow::new(EchoGateway(json!({})));
        flow.name_project("p").unwrap();
        let outcome = flow.submit_content("c", "").await.unwrap();
        assert_eq!(
            outcome.notification,
            "Project initialized and outline created successfully!"
        );
    }

    #[test]
    fn test_back_from_first_step_is_noop() {
        let mut flow = failing();
        assert_eq!(flow.back(), None);
        assert_eq!(flow.stage(), Stage::NameProject);
    }

    #[test]
    fn test_back_keeps_data() {
        let mut flow = failing();
        flow.name_project("My Show").unwrap();
        let before = flow.store().snapshot().project;

        assert_eq!(flow.back(), Some(Stage::NameProject));
        assert_eq!(flow.store().snapshot().project, before);
    }
}
