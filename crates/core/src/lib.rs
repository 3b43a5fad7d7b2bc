pub mod format;
pub mod model;
pub mod provider;
pub mod report;
pub mod score;

pub use format::{format_bytes, proportion_bar, proportion_bar_default, DEFAULT_BAR_WIDTH};
pub use model::{
    HealthStatus, MediaType, Partition, PhysicalDisk, ReliabilityCounters, Volume,
};
pub use provider::{DeviceDataProvider, ProviderError, StaticProvider, SysinfoProvider};
pub use report::render_report;
pub use score::{classify_severity, fallback_score, health_score, Severity};
