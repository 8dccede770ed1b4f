//! Desktop notifications for long-running stages.
//!
//! Image generation can take minutes, so the user may switch away from the
//! terminal. When enabled, completion raises a native notification:
//! - macOS: `mac-notification-sys`
//! - Linux: `notify-rust` (freedesktop notifications)
//! - elsewhere: logged only

use anyhow::Result;

use crate::config::NotificationsConfig;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "linux")]
mod linux;

/// Events worth interrupting the user for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    /// The final backend stage finished
    ImagesGenerated {
        project_name: String,
        message: String,
    },
    /// A backend stage failed while the user may be looking elsewhere
    StageFailed {
        project_name: String,
        stage: String,
        error: String,
    },
}

impl WorkflowEvent {
    /// (title, subtitle, message) for the OS notification
    pub fn to_os_notification(&self) -> (String, String, String) {
        match self {
            WorkflowEvent::ImagesGenerated {
                project_name,
                message,
            } => (
                "Podcast project complete".to_string(),
                project_name.clone(),
                message.clone(),
            ),
            WorkflowEvent::StageFailed {
                project_name,
                stage,
                error,
            } => (
                format!("{stage} failed"),
                project_name.clone(),
                error.clone(),
            ),
        }
    }
}

/// Sends [`WorkflowEvent`]s to the desktop when enabled
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    enabled: bool,
    sound: bool,
}

impl DesktopNotifier {
    pub fn new(config: &NotificationsConfig) -> Self {
        Self {
            enabled: config.enabled,
            sound: config.sound,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Deliver an event. Delivery problems are logged, never returned.
    pub fn notify(&self, event: &WorkflowEvent) {
        if !self.enabled {
            return;
        }

        let (title, subtitle, message) = event.to_os_notification();
        if let Err(e) = send_os_notification(&title, &subtitle, &message, self.sound) {
            tracing::warn!(error = %e, "Failed to send desktop notification");
        }
    }
}

/// Send a notification using the platform-specific implementation
fn send_os_notification(title: &str, subtitle: &str, message: &str, sound: bool) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        macos::send_notification(title, subtitle, message, sound)
    }

    #[cfg(target_os = "linux")]
    {
        linux::send_notification(title, subtitle, message, sound)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        let _ = sound;
        tracing::info!("Notification: {} - {} - {}", title, subtitle, message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_images_generated_notification_text() {
        let event = WorkflowEvent::ImagesGenerated {
            project_name: "My Show".to_string(),
            message: "Images generated successfully!".to_string(),
        };
        let (title, subtitle, message) = event.to_os_notification();
        assert_eq!(title, "Podcast project complete");
        assert_eq!(subtitle, "My Show");
        assert_eq!(message, "Images generated successfully!");
    }

    #[test]
    fn test_stage_failed_notification_text() {
        let event = WorkflowEvent::StageFailed {
            project_name: "My Show".to_string(),
            stage: "Prepare Media".to_string(),
            error: "HTTP error! status: 500".to_string(),
        };
        let (title, _, message) = event.to_os_notification();
        assert_eq!(title, "Prepare Media failed");
        assert_eq!(message, "HTTP error! status: 500");
    }

    #[test]
    fn test_disabled_notifier_is_silent() {
        let notifier = DesktopNotifier::new(&NotificationsConfig::default());
        assert!(!notifier.is_enabled());
        // Must return without touching the desktop
        notifier.notify(&WorkflowEvent::ImagesGenerated {
            project_name: "p".to_string(),
            message: "m".to_string(),
        });
    }
}
