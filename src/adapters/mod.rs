pub mod http;
pub mod procfs;
pub mod sink;

pub use http::ReqwestProbe;
pub use procfs::{ProcfsConfig, ProcfsResourceSource};
pub use sink::{ConsoleLogSink, LogFile};
