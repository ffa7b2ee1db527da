use crate::domain::AlertEvent;

/// Port for the operator console and the durable log
pub trait AlertSink: Send {
    /// Write one line to the console, unbuffered
    fn console(&mut self, line: &str);

    /// Append one timestamped record to the log
    fn log(&mut self, event: &AlertEvent);

    /// Flush pending log output
    fn flush(&mut self) {}

    /// Log the event and optionally echo a console line; the two writes are independent
    fn emit(&mut self, event: &AlertEvent, console_line: Option<&str>) {
        self.log(event);
        if let Some(line) = console_line {
            self.console(line);
        }
    }
}
