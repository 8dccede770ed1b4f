use anyhow::Result;
use mac_notification_sys::Notification;

pub fn send_notification(title: &str, subtitle: &str, message: &str, sound: bool) -> Result<()> {
    let mut notification = Notification::new();

    notification
        .title(title)
        .subtitle(subtitle)
        .message(message);

    if sound {
        notification.sound("default");
    }

    if let Err(e) = notification.send() {
        tracing::warn!("Notification error: {:?}", e);
    }
    Ok(())
}
