pub mod metrics;
pub mod renewal;

pub use metrics::{get_metrics, init_metrics};
