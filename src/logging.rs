use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

use crate::error::EngineResult;

/// Route tracing output to an append-only log file.
///
/// The terminal belongs to the TUI, so nothing is ever written to stdout or
/// stderr. A second call is a no-op.
pub fn init(path: &Path, level: Level) -> EngineResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let _ = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init();
    Ok(())
}
