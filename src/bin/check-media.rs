//! check-media - report whether system media is currently playing.
//!
//! One-shot probe with an exit-code contract: 0 means media is playing,
//! 1 means not playing or indeterminate. Independent of the translation
//! pipeline; neither invokes the other.

use std::process::Command;

fn main() {
    std::process::exit(if media_playing() { 0 } else { 1 });
}

/// Capture a probe command's trimmed stdout, None when it cannot run.
fn probe(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Ask playerctl (MPRIS) for the current playback status.
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn media_playing() -> bool {
    matches!(probe("playerctl", &["status"]).as_deref(), Some("Playing"))
}

/// Ask the common macOS players for their state.
#[cfg(target_os = "macos")]
fn media_playing() -> bool {
    for player in ["Music", "Spotify"] {
        let script = format!(
            "if application \"{player}\" is running then \
             tell application \"{player}\" to get player state as string"
        );
        if let Some(state) = probe("osascript", &["-e", &script]) {
            if state == "playing" {
                return true;
            }
        }
    }
    false
}

/// No subprocess equivalent of the WinRT media session API; indeterminate.
#[cfg(target_os = "windows")]
fn media_playing() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_probe_command_is_indeterminate() {
        assert_eq!(probe("check-media-no-such-command", &[]), None);
    }
}
