//! Session state store for the in-progress project.
//!
//! `ProjectStore` is the single writer. Every mutation is published through a
//! `tokio::sync::watch` channel so any number of readers (the terminal UI, tests)
//! can observe the latest snapshot without borrowing the store itself.

use thiserror::Error;
use tokio::sync::watch;
use uuid::Uuid;

use crate::types::{ProjectData, ProjectUpdate};
use crate::workflow::Stage;

/// First step of every session
pub const INITIAL_STEP: u8 = 1;

/// Errors raised when reading the store from outside its session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store that fed this subscription is gone (or was never wired up)
    #[error("project state accessed outside an active session: no ProjectStore is providing it")]
    NoActiveSession,
}

/// Everything a consumer needs to render the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Correlates log lines of one session; regenerated on reset
    pub session_id: Uuid,
    pub project: ProjectData,
    /// 1-based step index. The store does not bounds-check it.
    pub current_step: u8,
    pub is_loading: bool,
    pub loading_message: String,
}

impl SessionState {
    fn initial(session_id: Uuid) -> Self {
        Self {
            session_id,
            project: ProjectData::default(),
            current_step: INITIAL_STEP,
            is_loading: false,
            loading_message: String::new(),
        }
    }

    /// Stage for the current step. Out-of-range steps render as the first stage.
    pub fn stage(&self) -> Stage {
        Stage::from_step(self.current_step).unwrap_or(Stage::NameProject)
    }
}

/// Owner of the session's project data, step and loading status
#[derive(Debug)]
pub struct ProjectStore {
    tx: watch::Sender<SessionState>,
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectStore {
    /// Start a fresh session: empty project, step 1, not loading
    pub fn new() -> Self {
        Self::with_session_id(Uuid::new_v4())
    }

    /// Start a fresh session under an id chosen by the caller (e.g. the one
    /// already stamped on the log file)
    pub fn with_session_id(session_id: Uuid) -> Self {
        let (tx, _rx) = watch::channel(SessionState::initial(session_id));
        let store = Self { tx };
        tracing::debug!(session_id = %store.session_id(), "Project session started");
        store
    }

    /// Current snapshot (cloned)
    pub fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// Read the current state in place. Do not hold the returned value across
    /// a mutation of this store.
    pub fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&self.tx.borrow())
    }

    pub fn session_id(&self) -> Uuid {
        self.read(|s| s.session_id)
    }

    pub fn current_step(&self) -> u8 {
        self.read(|s| s.current_step)
    }

    /// Subscribe to every future change
    pub fn subscribe(&self) -> StoreSubscription {
        StoreSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Shallow-merge `update` into the project data
    pub fn update_project_data(&self, update: ProjectUpdate) {
        self.tx.send_modify(|state| {
            state.project.merge(update);
            tracing::debug!(session_id = %state.session_id, "Project data updated");
        });
    }

    /// Set the step unconditionally. Callers are responsible for passing 1..=6.
    pub fn set_current_step(&self, step: u8) {
        self.tx.send_modify(|state| {
            tracing::debug!(
                session_id = %state.session_id,
                from = state.current_step,
                to = step,
                "Step changed"
            );
            state.current_step = step;
        });
    }

    /// Set the loading flag. The message is cleared when not loading.
    pub fn set_loading(&self, loading: bool, message: Option<&str>) {
        self.tx.send_modify(|state| {
            state.is_loading = loading;
            state.loading_message = match message {
                Some(m) if loading => m.to_string(),
                _ => String::new(),
            };
        });
    }

    /// Discard the project and start over at step 1
    pub fn reset_project(&self) {
        self.tx.send_modify(|state| {
            let previous = state.session_id;
            *state = SessionState::initial(Uuid::new_v4());
            tracing::info!(
                previous_session = %previous,
                session_id = %state.session_id,
                "Project reset"
            );
        });
    }
}

/// Read side of a [`ProjectStore`]
#[derive(Debug, Clone)]
pub struct StoreSubscription {
    rx: watch::Receiver<SessionState>,
}

impl StoreSubscription {
    /// Latest published state, marking it as seen
    pub fn current(&mut self) -> Result<SessionState, StoreError> {
        self.rx
            .has_changed()
            .map_err(|_| StoreError::NoActiveSession)?;
        Ok(self.rx.borrow_and_update().clone())
    }

    /// Whether something was published since the last `current`/`changed`
    pub fn has_update(&self) -> Result<bool, StoreError> {
        self.rx.has_changed().map_err(|_| StoreError::NoActiveSession)
    }

    /// Wait for the next change
    pub async fn changed(&mut self) -> Result<SessionState, StoreError> {
        self.rx
            .changed()
            .await
            .map_err(|_| StoreError::NoActiveSession)?;
        Ok(self.rx.borrow_and_update().clone())
    }
}
