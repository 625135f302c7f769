//! Input/output operations, figures and error handling

use crate::io::error::{Result, WithPath};
use std::path::Path;

/// Track animation export as animated GIF
pub mod animation;
/// Raster drawing primitives for figures
pub mod canvas;
/// Command-line interface and command dispatch
pub mod cli;
/// Physical constants and runtime configuration defaults
pub mod configuration;
/// Error types and path context
pub mod error;
/// Histogram and rotary spectrum figures
pub mod figures;
/// Bitmap glyphs for figure text
pub mod glyphs;
/// Tracing subscriber set-up
pub mod logging;
/// Progress bars for long loops
pub mod progress;
/// Velocity record loading
pub mod series;
/// CSV output tables
pub mod tables;

// Outputs may point into directories that don't exist yet
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }
    Ok(())
}
