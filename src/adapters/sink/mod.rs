mod console;

pub use console::{ConsoleLogSink, LogFile};
