pub mod resources;
pub mod sampler;
pub mod scheduler;
pub mod stop;
pub mod uptime;

pub use resources::ResourceMonitor;
pub use sampler::Sampler;
pub use scheduler::{Monitor, Scheduler};
pub use stop::{forward_interrupts, stop_channel, StopSignal};
pub use uptime::UptimeMonitor;
