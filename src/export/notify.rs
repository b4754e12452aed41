//! User-facing export notifications

use std::path::Path;

/// How a message is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Error,
}

/// Shows a short message to the user
pub trait Notifier {
    fn notify(&mut self, level: NotifyLevel, title: &str, body: &str);
}

/// Notifier that writes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, level: NotifyLevel, title: &str, body: &str) {
        let body = body.replace('\n', " ");
        match level {
            NotifyLevel::Info => log::info!("{title}: {body}"),
            NotifyLevel::Error => log::error!("{title}: {body}"),
        }
    }
}

/// Notifier that shows a modal message dialog, and logs every message
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogNotifier {
    log: LogNotifier,
}

impl Notifier for DialogNotifier {
    fn notify(&mut self, level: NotifyLevel, title: &str, body: &str) {
        self.log.notify(level, title, body);
        let level = match level {
            NotifyLevel::Info => rfd::MessageLevel::Info,
            NotifyLevel::Error => rfd::MessageLevel::Error,
        };
        rfd::MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(body)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

pub const SAVED_TITLE: &str = "Screenshot Saved";
pub const COPIED_TITLE: &str = "Copied";
pub const FAILED_TITLE: &str = "Export Failed";

pub fn saved_message(path: &Path, also_copied: bool) -> String {
    let mut message = format!("Screenshot saved to:\n{}", path.display());
    if also_copied {
        message.push_str("\n\n(Also copied to clipboard)");
    }
    message
}

pub fn copied_message(region: bool) -> &'static str {
    if region {
        "Region copied to clipboard!"
    } else {
        "Screenshot copied to clipboard!"
    }
}
