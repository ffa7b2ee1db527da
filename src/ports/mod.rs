pub mod alert_sink;
pub mod http_probe;
pub mod resource_source;

pub use alert_sink::AlertSink;
pub use http_probe::HttpProbe;
pub use resource_source::{ResourceSource, SourceError};
