//! Progress display for frame rendering and track summaries

use crate::io::configuration::MIN_PROGRESS_ITEMS;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {pos}/{len} ({elapsed})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Optional progress bar over a known number of items
///
/// Short loops and quiet runs get no bar; every method is then a no-op.
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Progress over `total` items, shown only if `visible` and the loop is long enough
    pub fn new(label: &str, total: usize, visible: bool) -> Self {
        let bar = (visible && total >= MIN_PROGRESS_ITEMS).then(|| {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(PROGRESS_STYLE.clone());
            bar.set_message(label.to_string());
            bar
        });
        Self { bar }
    }

    /// Progress that never draws
    pub const fn hidden() -> Self {
        Self { bar: None }
    }

    /// Whether a bar is drawn
    pub const fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    /// Advance by one item
    pub fn inc(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Current position, zero when hidden
    pub fn position(&self) -> u64 {
        self.bar.as_ref().map_or(0, ProgressBar::position)
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
