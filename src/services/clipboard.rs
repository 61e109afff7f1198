//! Clipboard access, one implementation per platform.

use std::process::{Command, Stdio};

use tracing::debug;

/// System clipboard accessor.
///
/// The clipboard is owned by the OS and shared with every other process;
/// reads never fail (an unreadable clipboard is an empty one) and writes
/// are best-effort.
pub trait Clipboard {
    /// Snapshot the current clipboard text. Empty on any underlying error.
    fn read(&self) -> String;

    /// Replace the clipboard text. Failures are swallowed.
    fn write(&self, text: &str);
}

/// Select the accessor for the host platform, once at startup.
pub fn detect() -> Box<dyn Clipboard> {
    #[cfg(target_os = "windows")]
    {
        Box::new(NativeClipboard)
    }
    #[cfg(target_os = "macos")]
    {
        Box::new(Pasteboard)
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        Box::new(XclipClipboard)
    }
}

/// Run a clipboard utility and capture its trimmed stdout.
///
/// Returns None when the utility is missing or exits non-zero, so callers
/// degrade to an empty read.
fn capture_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string())
}

/// Pipe text into a clipboard utility's stdin.
fn feed_stdin(program: &str, args: &[&str], text: &str) -> std::io::Result<()> {
    use std::io::Write;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(text.as_bytes())?;
    }
    child.wait()?;
    Ok(())
}

/// Native clipboard API, used on Windows.
#[cfg(target_os = "windows")]
pub struct NativeClipboard;

#[cfg(target_os = "windows")]
impl Clipboard for NativeClipboard {
    fn read(&self) -> String {
        arboard::Clipboard::new()
            .and_then(|mut c| c.get_text())
            .unwrap_or_default()
    }

    fn write(&self, text: &str) {
        let result = arboard::Clipboard::new().and_then(|mut c| c.set_text(text));
        if let Err(e) = result {
            debug!("clipboard write failed: {}", e);
        }
    }
}

/// macOS pasteboard bridge via pbpaste/pbcopy.
#[cfg(target_os = "macos")]
pub struct Pasteboard;

#[cfg(target_os = "macos")]
impl Clipboard for Pasteboard {
    fn read(&self) -> String {
        capture_stdout("pbpaste", &[]).unwrap_or_default()
    }

    fn write(&self, text: &str) {
        if let Err(e) = feed_stdin("pbcopy", &[], text) {
            debug!("pbcopy failed: {}", e);
        }
    }
}

/// xclip subprocess accessor for Linux and other Unix.
///
/// No-ops gracefully when xclip is not installed.
pub struct XclipClipboard;

impl Clipboard for XclipClipboard {
    fn read(&self) -> String {
        capture_stdout("xclip", &["-selection", "clipboard", "-o"]).unwrap_or_default()
    }

    fn write(&self, text: &str) {
        if let Err(e) = feed_stdin("xclip", &["-selection", "clipboard"], text) {
            debug!("xclip write failed: {}", e);
        }
    }
}
