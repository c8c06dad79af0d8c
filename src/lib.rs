mod config;
mod report;
mod sampler;
mod scheduler;
mod stats;

pub use config::LoadConfig;
pub use report::write_outputs;
pub use sampler::{Sample, SampleStatus};
pub use scheduler::run_load;
pub use stats::{summarize, LatencyStats, Summary};
