//! Live status line.

use indicatif::{ProgressBar, ProgressStyle};

use crate::download::ProgressEvent;

/// Create a spinner for long-running operations.
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

/// Render session events on a spinner.
pub struct StatusLine {
    spinner: Option<ProgressBar>,
}

impl StatusLine {
    /// A hidden status line prints nothing but failures.
    pub fn new(visible: bool) -> Self {
        Self {
            spinner: visible.then(|| create_spinner("Waiting to start...")),
        }
    }

    pub fn update(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::ImageFailed { .. } => match &self.spinner {
                Some(spinner) => spinner.println(format!("  {}", event)),
                None => eprintln!("  {}", event),
            },
            _ if event.is_terminal() => self.finish(),
            _ => {
                if let Some(spinner) = &self.spinner {
                    spinner.set_message(event.to_string());
                }
            }
        }
    }

    pub fn finish(&self) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }
    }
}
