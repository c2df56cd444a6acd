use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

const TICK: Duration = Duration::from_millis(120);

/// Stderr spinner for uploads and imports. Does nothing when
/// [`ui::UiPrefs::progress`] is off.
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        let bar = ui::prefs().progress.then(|| {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner:.green} {msg} ({elapsed})")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.set_message(message.to_string());
            bar.enable_steady_tick(TICK);
            bar
        });
        Self { bar }
    }

    /// Await `work` under a spinner. The spinner is cleared on success and
    /// left with `failure` on error.
    pub async fn track<T, E, F>(message: &str, failure: &str, work: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let progress = Self::spinner(message);
        let result = work.await;
        match &result {
            Ok(_) => progress.finish_clear(),
            Err(_) => progress.finish_err(failure),
        }
        result
    }

    fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}
