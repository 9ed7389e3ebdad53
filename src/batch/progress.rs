//! Terminal progress display for conversions.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Creates a bar counting converted files, or a hidden one if `visible` is false.
pub fn file_progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template(
            "[{elapsed_precise}] [{bar:40.green/blue}] {pos}/{len} files ({per_sec}, ETA {eta}) {msg}",
        )
        .map(|style| style.progress_chars("█▉▊▋▌▍▎▏"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

/// Creates a ticking spinner for a single conversion.
pub fn spinner(message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg} [{elapsed}]") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
