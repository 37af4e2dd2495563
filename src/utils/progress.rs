//! Progress indicators for long-running operations

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner for indeterminate operations
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("Failed to create spinner template")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Progress wrapper for blocking wait operations (rollouts, namespace deletion)
pub struct WaitProgress {
    pb: ProgressBar,
    subject: String,
}

impl WaitProgress {
    pub fn new(subject: &str, condition: &str) -> Self {
        let message = format!("Waiting for {} to be {}", subject, condition);
        Self {
            pb: create_spinner(&message),
            subject: subject.to_string(),
        }
    }

    pub fn update(&self, status: &str) {
        self.pb.set_message(format!("{}: {}", self.subject, status));
    }

    pub fn finish_success(&self, outcome: &str) {
        self.pb
            .finish_with_message(format!("✓ {} {}", self.subject, outcome));
    }

    pub fn finish_error(&self, error: &str) {
        self.pb
            .finish_with_message(format!("✗ {} failed: {}", self.subject, error));
    }
}
