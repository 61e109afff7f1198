//! Transient user notifications, one implementation per platform.

use std::process::Command;

use tracing::debug;

/// Fire-and-forget notification sink.
///
/// Display failures are discarded; nothing here may influence the exit code.
pub trait Notifier {
    /// Show `body` to the user under the sink's configured title.
    fn notify(&self, body: &str);
}

/// Select the sink for the host platform, once at startup.
pub fn detect(title: String) -> Box<dyn Notifier> {
    #[cfg(target_os = "macos")]
    {
        Box::new(OsaScriptNotifier { title })
    }
    #[cfg(target_os = "windows")]
    {
        Box::new(PowerShellNotifier { title })
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        Box::new(NotifySendNotifier { title })
    }
}

/// macOS notification center via osascript.
#[cfg(target_os = "macos")]
pub struct OsaScriptNotifier {
    title: String,
}

#[cfg(target_os = "macos")]
impl Notifier for OsaScriptNotifier {
    fn notify(&self, body: &str) {
        let script = format!(
            "display notification \"{}\" with title \"{}\"",
            escape_osascript(body),
            escape_osascript(&self.title)
        );
        if let Err(e) = Command::new("osascript").args(["-e", &script]).status() {
            debug!("osascript notification failed: {}", e);
        }
    }
}

/// Escape a string for embedding in a double-quoted AppleScript literal.
#[cfg(any(target_os = "macos", test))]
fn escape_osascript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// notify-send sink for Linux and other Unix. No-ops when absent.
pub struct NotifySendNotifier {
    title: String,
}

impl Notifier for NotifySendNotifier {
    fn notify(&self, body: &str) {
        if let Err(e) = Command::new("notify-send").args([&self.title, body]).status() {
            debug!("notify-send failed: {}", e);
        }
    }
}

/// Windows toast via PowerShell, with a modal message box as last resort.
#[cfg(target_os = "windows")]
pub struct PowerShellNotifier {
    title: String,
}

#[cfg(target_os = "windows")]
impl Notifier for PowerShellNotifier {
    fn notify(&self, body: &str) {
        let toast = format!(
            concat!(
                "$x=[Windows.UI.Notifications.ToastNotificationManager,",
                "Windows.UI.Notifications,ContentType=WindowsRuntime]::",
                "GetTemplateContent('ToastText02');",
                "$t=$x.GetElementsByTagName('text');",
                "$t.Item(0).AppendChild($x.CreateTextNode('{0}'))>$null;",
                "$t.Item(1).AppendChild($x.CreateTextNode('{1}'))>$null;",
                "[Windows.UI.Notifications.ToastNotificationManager]::",
                "CreateToastNotifier('{0}').Show(",
                "[Windows.UI.Notifications.ToastNotification]::new($x))"
            ),
            escape_powershell(&self.title),
            escape_powershell(body)
        );
        let shown = Command::new("powershell")
            .args(["-NoProfile", "-Command", &toast])
            .status()
            .map(|s| s.success())
            .unwrap_or(false);
        if shown {
            return;
        }

        // Toast machinery unavailable: fall back to a plain message box.
        let dialog = format!(
            "Add-Type -AssemblyName System.Windows.Forms;\
             [System.Windows.Forms.MessageBox]::Show('{}','{}')>$null",
            escape_powershell(body),
            escape_powershell(&self.title)
        );
        if let Err(e) = Command::new("powershell")
            .args(["-NoProfile", "-Command", &dialog])
            .status()
        {
            debug!("message box fallback failed: {}", e);
        }
    }
}

/// Escape a string for a single-quoted PowerShell literal.
#[cfg(target_os = "windows")]
fn escape_powershell(text: &str) -> String {
    text.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_osascript_quotes() {
        assert_eq!(escape_osascript(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_osascript(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_missing_notify_send_is_swallowed() {
        // Must not panic even when the command cannot run.
        let sink = NotifySendNotifier {
            title: "Translator".to_string(),
        };
        sink.notify("hello");
    }
}
