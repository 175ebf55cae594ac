use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::warn;

/// Plain line-oriented output stream, written alongside the structured logger.
///
/// Clones share the same underlying writer. Lines from concurrent callers are
/// written whole but in no particular order.
#[derive(Clone)]
pub struct ConsoleSink {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl ConsoleSink {
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Writes `line` plus a trailing newline. Failures are logged, never returned.
    pub fn emit(&self, line: &str) {
        if let Err(err) = self.write_line(line) {
            warn!("Failed to write to console sink: {}", err);
        }
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{line}")?;
        writer.flush()
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::stdout()
    }
}

impl std::fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSink").finish_non_exhaustive()
    }
}
