use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use podflow::api::WebhookGateway;
use podflow::config::Config;
use podflow::notifications::{DesktopNotifier, WorkflowEvent};
use podflow::state::{ProjectStore, StoreSubscription};
use podflow::workflow::{Stage, StageError, StageOutcome, Workflow};
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use crate::ui::terminal_guard::TerminalGuard;
use crate::ui::widgets::{render_loading_overlay, Toast};
use crate::ui::wizard::{WizardAction, WizardView};

/// What is on screen. Kept apart from the workflow so it can be redrawn
/// while a stage call holds the workflow.
struct Screen {
    view: WizardView,
    updates: StoreSubscription,
    toast: Option<Toast>,
    /// Set while a backend call is in flight
    loading_message: Option<String>,
    spinner: usize,
}

impl Screen {
    /// Pull the latest session state into the view and expire the toast
    fn refresh(&mut self) -> Result<()> {
        if self.updates.has_update()? {
            let state = self.updates.current()?;
            self.loading_message = state
                .is_loading
                .then(|| state.loading_message.clone());
            self.view.sync(&state);
        }

        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
        Ok(())
    }

    fn draw(&mut self, terminal: &mut TerminalGuard) -> Result<()> {
        self.spinner = self.spinner.wrapping_add(1);
        terminal.draw(|frame| {
            let area = frame.area();
            self.view.render(frame, area);
            if let Some(message) = &self.loading_message {
                render_loading_overlay(frame, message, self.spinner);
            }
            if let Some(toast) = &self.toast {
                toast.render(frame);
            }
        })?;
        Ok(())
    }
}

pub struct App {
    config: Config,
    workflow: Workflow<WebhookGateway>,
    notifier: DesktopNotifier,
    screen: Screen,
    should_quit: bool,
}

impl App {
    /// `session_id` is the id the log file was named after
    pub fn new(config: Config, session_id: Uuid) -> Result<Self> {
        let gateway = WebhookGateway::new(&config.webhooks)?;
        let workflow = Workflow::with_store(ProjectStore::with_session_id(session_id), gateway);

        let mut updates = workflow.subscribe();
        let mut view = WizardView::new();
        view.sync(&updates.current()?);

        let notifier = DesktopNotifier::new(&config.notifications);
        if notifier.is_enabled() {
            tracing::info!("Desktop notifications enabled");
        }

        Ok(Self {
            config,
            workflow,
            notifier,
            screen: Screen {
                view,
                updates,
                toast: None,
                loading_message: None,
                spinner: 0,
            },
            should_quit: false,
        })
    }

    fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.config.ui.tick_rate_ms.max(10))
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = TerminalGuard::new()?;
        let tick_rate = self.tick_rate();

        tracing::info!(
            session_id = %self.workflow.store().session_id(),
            base_url = %self.config.webhooks.base_url,
            "Wizard started"
        );

        while !self.should_quit {
            self.screen.refresh()?;
            self.screen.draw(&mut terminal)?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let action = self.screen.view.handle_key(key);
                        self.perform(action, &mut terminal).await?;
                    }
                }
            }
        }

        tracing::info!(stage = %self.screen.view.stage(), "Wizard closed");
        Ok(())
    }

    async fn perform(&mut self, action: WizardAction, terminal: &mut TerminalGuard) -> Result<()> {
        let stage = self.workflow.stage();
        let tick_rate = self.tick_rate();

        let result = match action {
            WizardAction::None => return Ok(()),
            WizardAction::Quit => {
                self.should_quit = true;
                return Ok(());
            }
            WizardAction::Back => {
                self.workflow.back();
                return Ok(());
            }
            WizardAction::Reset => {
                self.workflow.reset();
                return Ok(());
            }
            WizardAction::NameProject(name) => self.workflow.name_project(&name),
            WizardAction::SubmitContent { content, grammar } => {
                let call = self.workflow.submit_content(&content, &grammar);
                drive(call, &mut self.screen, terminal, tick_rate).await?
            }
            WizardAction::SubmitOutline(draft) => {
                let call = self.workflow.submit_outline(&draft);
                drive(call, &mut self.screen, terminal, tick_rate).await?
            }
            WizardAction::SubmitScript(script) => {
                let call = self.workflow.submit_script(script);
                drive(call, &mut self.screen, terminal, tick_rate).await?
            }
            WizardAction::SubmitPrompts(prompts) => {
                let call = self.workflow.submit_prompts(&prompts);
                drive(call, &mut self.screen, terminal, tick_rate).await?
            }
        };

        self.report(stage, result);
        if stage != Stage::NameProject {
            discard_pending_input()?;
        }
        Ok(())
    }

    /// Toast, inline error or desktop notification for a finished submission
    fn report(&mut self, stage: Stage, result: Result<StageOutcome, StageError>) {
        let ttl = Duration::from_millis(self.config.ui.toast_duration_ms);
        let project_name = self
            .workflow
            .store()
            .read(|s| s.project.project_name.clone());

        match result {
            Ok(outcome) => {
                if stage == Stage::NameProject {
                    return;
                }
                if stage == Stage::PrepareMedia {
                    self.notifier.notify(&WorkflowEvent::ImagesGenerated {
                        project_name,
                        message: outcome.notification.clone(),
                    });
                }
                self.screen.toast = Some(Toast::success(outcome.notification, ttl));
            }
            Err(e) if e.is_local() => self.screen.view.set_error(e.to_string()),
            Err(e) => {
                if stage == Stage::PrepareMedia {
                    self.notifier.notify(&WorkflowEvent::StageFailed {
                        project_name,
                        stage: stage.label().to_string(),
                        error: e.to_string(),
                    });
                }
                self.screen.toast = Some(Toast::error(e.to_string(), ttl));
            }
        }
    }
}

/// Await a stage call, redrawing on every tick so the loading overlay animates
async fn drive<F, T>(
    call: F,
    screen: &mut Screen,
    terminal: &mut TerminalGuard,
    tick_rate: Duration,
) -> Result<T>
where
    F: Future<Output = T>,
{
    let mut call = pin!(call);
    let mut ticker = tokio::time::interval(tick_rate);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            result = &mut call => return Ok(result),
            _ = ticker.tick() => {
                screen.refresh()?;
                screen.draw(terminal)?;
            }
        }
    }
}

/// Drop keys typed while the loading overlay was up
fn discard_pending_input() -> Result<()> {
    while event::poll(Duration::ZERO)? {
        let _ = event::read()?;
    }
    Ok(())
}
