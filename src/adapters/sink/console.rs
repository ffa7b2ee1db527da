use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::domain::AlertEvent;
use crate::ports::AlertSink;

/// Append-only log file, one record per line
#[derive(Debug)]
pub struct LogFile {
    path: PathBuf,
    file: File,
}

impl LogFile {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.file, "{}", line)
    }

    fn sync(&mut self) -> io::Result<()> {
        self.file.flush()?;
        self.file.sync_data()
    }
}

/// Sink writing console lines to `W` (stdout by default) and records to a log file
pub struct ConsoleLogSink<W: Write + Send = io::Stdout> {
    console: W,
    log_file: Option<LogFile>,
}

impl ConsoleLogSink {
    pub fn stdout(log_file: Option<LogFile>) -> Self {
        Self::new(io::stdout(), log_file)
    }
}

impl<W: Write + Send> ConsoleLogSink<W> {
    pub fn new(console: W, log_file: Option<LogFile>) -> Self {
        Self { console, log_file }
    }

    #[cfg(test)]
    pub fn into_console(self) -> W {
        self.console
    }
}

impl<W: Write + Send> AlertSink for ConsoleLogSink<W> {
    fn console(&mut self, line: &str) {
        let written = writeln!(self.console, "{}", line).and_then(|_| self.console.flush());
        if let Err(e) = written {
            warn!("Failed to write console output: {}", e);
        }
    }

    fn log(&mut self, event: &AlertEvent) {
        let Some(log_file) = self.log_file.as_mut() else {
            return;
        };
        if let Err(e) = log_file.append(&event.log_line()) {
            warn!(
                target_name = %event.target_name,
                "Failed to append to {}: {}",
                log_file.path().display(),
                e
            );
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.console.flush() {
            warn!("Failed to flush console output: {}", e);
        }
        if let Some(log_file) = self.log_file.as_mut() {
            if let Err(e) = log_file.sync() {
                warn!("Failed to flush {}: {}", log_file.path().display(), e);
            }
        }
    }
}
