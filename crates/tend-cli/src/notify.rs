//! Terminal implementations of the platform notification and sound seams.

use std::io::{self, Write};

use tend_core::{Chime, Notification, NotificationPermission, Notifier};

use crate::renderer::TerminalRenderer;

/// Shows notifications inline in the terminal output.
pub struct TerminalNotifier {
    renderer: TerminalRenderer,
    enabled: bool,
}

impl TerminalNotifier {
    pub fn new(renderer: TerminalRenderer, enabled: bool) -> Self {
        Self { renderer, enabled }
    }
}

impl Notifier for TerminalNotifier {
    fn request_permission(&self) -> NotificationPermission {
        if self.enabled {
            NotificationPermission::Granted
        } else {
            NotificationPermission::Denied
        }
    }

    fn notify(&self, notification: &Notification) {
        if let Err(e) = self.renderer.render(&format!("\n{notification}\n")) {
            log::warn!("Failed to show notification: {e}");
        }
    }
}

/// Rings the terminal bell.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl Chime for TerminalBell {
    fn play(&self) {
        let mut stdout = io::stdout().lock();
        // A closed stdout only loses the sound.
        let _ = stdout.write_all(b"\x07").and_then(|()| stdout.flush());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_follows_flag() {
        let granted = TerminalNotifier::new(TerminalRenderer::new(false), true);
        assert_eq!(granted.request_permission(), NotificationPermission::Granted);

        let denied = TerminalNotifier::new(TerminalRenderer::new(false), false);
        assert_eq!(denied.request_permission(), NotificationPermission::Denied);
    }
}
