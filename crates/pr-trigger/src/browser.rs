//! Browser utilities
//!
//! Functions for opening URLs in the system's default browser.

use std::process::Command;

/// Open a URL in the system's default browser
///
/// Uses platform-specific commands:
/// - macOS: `open`
/// - Linux: `xdg-open`
/// - Windows: `cmd /C start`
pub fn open_url(url: &str) {
    #[cfg(target_os = "macos")]
    let result = Command::new("open").arg(url).spawn();

    #[cfg(target_os = "windows")]
    let result = Command::new("cmd").args(["/C", "start", url]).spawn();

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let result = Command::new("xdg-open").arg(url).spawn();

    if let Err(e) = result {
        log::error!("Failed to open URL in browser: {}", e);
        eprintln!("Open {} in your browser", url);
    }
}
